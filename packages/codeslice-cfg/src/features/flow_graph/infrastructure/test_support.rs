//! Small hand-built CFGs shared by the flow_graph unit tests

use super::assembler::CfgAssembler;
use super::reachability::NodeSet;
use crate::features::def_use::{DefUse, JLocalReference};
use crate::features::flow_graph::domain::{Cfg, DeclKind, FlowKind, StatementKind};
use crate::shared::models::{IdAllocator, NodeId};

pub(crate) fn ids(raw: &[u32]) -> NodeSet {
    raw.iter().copied().map(NodeId::new).collect()
}

fn local(name: &str) -> JLocalReference {
    JLocalReference::new("T", "T.m()", name, "int")
}

pub(crate) struct Loop {
    pub start: NodeId,
    pub init: NodeId,
    pub header: NodeId,
    pub body: NodeId,
    pub incr: NodeId,
    pub after: NodeId,
    pub end: NodeId,
}

/// ```text
/// void m() {
///     int i = 0;
///     while (i < n) {
///         s += i;
///         i++;
///     }
///     return;
/// }
/// ```
pub(crate) fn while_loop() -> (Cfg, Loop) {
    let mut ids = IdAllocator::new();
    let mut asm = CfgAssembler::method(&mut ids, DeclKind::Method, "m", "m()", "T.m()", "void");
    let init = asm.statement(StatementKind::LocalDeclaration, DefUse::new().def(local("i")));
    let header = asm.statement(StatementKind::While, DefUse::new().using(local("i")).using(local("n")));
    let body = asm.statement(
        StatementKind::Assignment,
        DefUse::new().def(local("s")).using(local("s")).using(local("i")),
    );
    let incr = asm.statement(StatementKind::Assignment, DefUse::new().def(local("i")).using(local("i")));
    let after = asm.statement(StatementKind::Return, DefUse::new());
    let (start, end) = (asm.start(), asm.end());

    asm.sequence(&[start, init, header]);
    asm.true_flow(header, body);
    asm.fall_through(body, incr);
    asm.loopback(incr, header, FlowKind::FallThrough);
    asm.false_flow(header, after);
    asm.fall_through(after, end);

    let nodes = Loop {
        start,
        init,
        header,
        body,
        incr,
        after,
        end,
    };
    (asm.finish(), nodes)
}

pub(crate) struct Diamond {
    pub decl: NodeId,
    pub guard: NodeId,
    pub then_arm: NodeId,
    pub else_arm: NodeId,
    pub merge: NodeId,
    pub tail: NodeId,
}

/// ```text
/// void m() {
///     int x = 1;
///     if (x > 0) { y = 1; } else { y = 2; }
///     z = y;
/// }
/// ```
pub(crate) fn if_else() -> (Cfg, Diamond) {
    let mut ids = IdAllocator::new();
    let mut asm = CfgAssembler::method(&mut ids, DeclKind::Method, "m", "m()", "T.m()", "void");
    let decl = asm.statement(StatementKind::LocalDeclaration, DefUse::new().def(local("x")));
    let guard = asm.statement(StatementKind::If, DefUse::new().using(local("x")));
    let then_arm = asm.statement(StatementKind::Assignment, DefUse::new().def(local("y")));
    let else_arm = asm.statement(StatementKind::Assignment, DefUse::new().def(local("y")));
    let merge = asm.merge();
    let tail = asm.statement(StatementKind::Assignment, DefUse::new().def(local("z")).using(local("y")));
    let (start, end) = (asm.start(), asm.end());

    asm.sequence(&[start, decl, guard]);
    asm.true_flow(guard, then_arm);
    asm.false_flow(guard, else_arm);
    asm.sequence(&[then_arm, merge, tail, end]);
    asm.fall_through(else_arm, merge);

    let nodes = Diamond {
        decl,
        guard,
        then_arm,
        else_arm,
        merge,
        tail,
    };
    (asm.finish(), nodes)
}

pub(crate) struct Switch {
    pub start: NodeId,
    pub switch: NodeId,
    pub case1: NodeId,
    pub a1: NodeId,
    pub case2: NodeId,
    pub a2: NodeId,
    pub brk: NodeId,
    pub default: NodeId,
    pub a3: NodeId,
    pub merge: NodeId,
    pub tail: NodeId,
    pub end: NodeId,
}

/// ```text
/// void m() {
///     switch (k) {
///         case 1: a = 1;
///         case 2: a = 2; break;
///         default: a = 3;
///     }
///     b = a;
/// }
/// ```
///
/// `case 1` falls through into `case 2`.
pub(crate) fn switch_fallthrough() -> (Cfg, Switch) {
    let mut ids = IdAllocator::new();
    let mut asm = CfgAssembler::method(&mut ids, DeclKind::Method, "m", "m()", "T.m()", "void");
    let switch = asm.statement(StatementKind::Switch, DefUse::new().using(local("k")));
    let case1 = asm.statement(StatementKind::SwitchCase, DefUse::new());
    let a1 = asm.statement(StatementKind::Assignment, DefUse::new().def(local("a")));
    let case2 = asm.statement(StatementKind::SwitchCase, DefUse::new());
    let a2 = asm.statement(StatementKind::Assignment, DefUse::new().def(local("a")));
    let brk = asm.statement(StatementKind::Break, DefUse::new());
    let default = asm.statement(StatementKind::SwitchDefault, DefUse::new());
    let a3 = asm.statement(StatementKind::Assignment, DefUse::new().def(local("a")));
    let merge = asm.merge();
    let tail = asm.statement(StatementKind::Assignment, DefUse::new().def(local("b")).using(local("a")));
    let (start, end) = (asm.start(), asm.end());

    asm.fall_through(start, switch);
    asm.true_flow(switch, case1);
    asm.true_flow(switch, case2);
    asm.false_flow(switch, default);
    asm.sequence(&[case1, a1, case2, a2, brk, merge]);
    asm.sequence(&[default, a3, merge, tail, end]);

    let nodes = Switch {
        start,
        switch,
        case1,
        a1,
        case2,
        a2,
        brk,
        default,
        a3,
        merge,
        tail,
        end,
    };
    (asm.finish(), nodes)
}

pub(crate) struct TryCatch {
    pub start: NodeId,
    pub try_stmt: NodeId,
    pub body: NodeId,
    pub catch: NodeId,
    pub handler: NodeId,
    pub merge: NodeId,
    pub tail: NodeId,
    pub end: NodeId,
}

/// ```text
/// void m() {
///     try {
///         x = read();
///     } catch (IOException e) {
///         x = 0;
///     }
///     y = x;
/// }
/// ```
pub(crate) fn try_catch() -> (Cfg, TryCatch) {
    let mut ids = IdAllocator::new();
    let mut asm = CfgAssembler::method(&mut ids, DeclKind::Method, "m", "m()", "T.m()", "void");
    let try_stmt = asm.statement(StatementKind::Try, DefUse::new());
    let body = asm.statement(StatementKind::Assignment, DefUse::new().def(local("x")));
    let catch = asm
        .exception_target(DefUse::new().def(local("e")))
        .expect("method entry accepts catch targets");
    let handler = asm.statement(StatementKind::Assignment, DefUse::new().def(local("x")));
    let merge = asm.merge();
    let tail = asm.statement(StatementKind::Assignment, DefUse::new().def(local("y")).using(local("x")));
    let (start, end) = (asm.start(), asm.end());

    asm.sequence(&[start, try_stmt, body, merge, tail, end]);
    asm.flow(body, catch, FlowKind::ExceptionCatch);
    asm.sequence(&[catch, handler, merge]);

    let nodes = TryCatch {
        start,
        try_stmt,
        body,
        catch,
        handler,
        merge,
        tail,
        end,
    };
    (asm.finish(), nodes)
}
