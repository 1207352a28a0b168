//! Test fixture programs
//!
//! A tiny structured program model standing in for a real front end's AST.
//! Every statement carries its source line and text so slices can be
//! checked by line.

use codeslice_cfg::{JMethodReference, StatementKind};

/// One statement of a fixture method body
#[derive(Debug, Clone)]
pub enum Stmt {
    Simple {
        line: u32,
        text: &'static str,
        kind: StatementKind,
        defs: Vec<&'static str>,
        uses: Vec<&'static str>,
    },
    If {
        line: u32,
        text: &'static str,
        uses: Vec<&'static str>,
        then_branch: Vec<Stmt>,
        else_branch: Vec<Stmt>,
    },
    While {
        line: u32,
        text: &'static str,
        uses: Vec<&'static str>,
        body: Vec<Stmt>,
    },
    Call {
        line: u32,
        text: &'static str,
        callee: JMethodReference,
        args: Vec<&'static str>,
        result: Option<&'static str>,
    },
    Return {
        line: u32,
        text: &'static str,
        uses: Vec<&'static str>,
    },
}

impl Stmt {
    pub fn decl(line: u32, text: &'static str, def: &'static str, uses: &[&'static str]) -> Self {
        Stmt::Simple {
            line,
            text,
            kind: StatementKind::LocalDeclaration,
            defs: vec![def],
            uses: uses.to_vec(),
        }
    }

    pub fn assign(line: u32, text: &'static str, def: &'static str, uses: &[&'static str]) -> Self {
        Stmt::Simple {
            line,
            text,
            kind: StatementKind::Assignment,
            defs: vec![def],
            uses: uses.to_vec(),
        }
    }

    pub fn if_else(
        line: u32,
        text: &'static str,
        uses: &[&'static str],
        then_branch: Vec<Stmt>,
        else_branch: Vec<Stmt>,
    ) -> Self {
        Stmt::If {
            line,
            text,
            uses: uses.to_vec(),
            then_branch,
            else_branch,
        }
    }

    pub fn while_loop(line: u32, text: &'static str, uses: &[&'static str], body: Vec<Stmt>) -> Self {
        Stmt::While {
            line,
            text,
            uses: uses.to_vec(),
            body,
        }
    }

    pub fn call(
        line: u32,
        text: &'static str,
        callee: JMethodReference,
        args: &[&'static str],
        result: Option<&'static str>,
    ) -> Self {
        Stmt::Call {
            line,
            text,
            callee,
            args: args.to_vec(),
            result,
        }
    }

    pub fn ret(line: u32, text: &'static str, uses: &[&'static str]) -> Self {
        Stmt::Return {
            line,
            text,
            uses: uses.to_vec(),
        }
    }
}

/// A method of a fixture class
#[derive(Debug, Clone)]
pub struct MethodSpec {
    pub class: &'static str,
    pub name: &'static str,
    pub params: Vec<(&'static str, &'static str)>,
    pub return_type: &'static str,
    pub body: Vec<Stmt>,
}

impl MethodSpec {
    pub fn new(class: &'static str, name: &'static str, return_type: &'static str) -> Self {
        MethodSpec {
            class,
            name,
            params: Vec::new(),
            return_type,
            body: Vec::new(),
        }
    }

    pub fn param(mut self, name: &'static str, type_name: &'static str) -> Self {
        self.params.push((name, type_name));
        self
    }

    pub fn body(mut self, body: Vec<Stmt>) -> Self {
        self.body = body;
        self
    }

    pub fn signature(&self) -> String {
        let types: Vec<&str> = self.params.iter().map(|(_, t)| *t).collect();
        format!("{}({})", self.name, types.join(","))
    }

    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.class, self.signature())
    }

    pub fn reference(&self) -> JMethodReference {
        let types: Vec<&str> = self.params.iter().map(|(_, t)| *t).collect();
        JMethodReference::new(self.class, self.name, &types, self.return_type)
    }
}

/// A fixture class: initialized fields, methods and inner classes
///
/// `name` is qualified; an inner class of `Outer` is named `Outer.Inner`.
#[derive(Debug, Clone)]
pub struct ClassSpec {
    pub name: &'static str,
    pub methods: Vec<MethodSpec>,
    pub fields: Vec<(&'static str, &'static str)>,
    pub inner: Vec<ClassSpec>,
}

impl ClassSpec {
    pub fn new(name: &'static str) -> Self {
        ClassSpec {
            name,
            methods: Vec::new(),
            fields: Vec::new(),
            inner: Vec::new(),
        }
    }

    pub fn simple_name(&self) -> &'static str {
        self.name.rsplit('.').next().unwrap_or(self.name)
    }

    /// This class followed by all its inner classes, depth first
    pub fn flatten(&self) -> Vec<&ClassSpec> {
        let mut all = vec![self];
        for inner in &self.inner {
            all.extend(inner.flatten());
        }
        all
    }

    pub fn inner(mut self, class: ClassSpec) -> Self {
        self.inner.push(class);
        self
    }

    pub fn method(mut self, method: MethodSpec) -> Self {
        self.methods.push(method);
        self
    }

    pub fn field(mut self, name: &'static str, type_name: &'static str) -> Self {
        self.fields.push((name, type_name));
        self
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Canonical programs
// ═══════════════════════════════════════════════════════════════════════════

/// ```text
/// 4  void m() {
/// 5      int x = 10;
/// 6      int y = x + 1;
/// 7  }
/// ```
pub fn fixture_straight_line() -> ClassSpec {
    ClassSpec::new("Simple").method(MethodSpec::new("Simple", "m", "void").body(vec![
        Stmt::decl(5, "int x = 10;", "x", &[]),
        Stmt::decl(6, "int y = x + 1;", "y", &["x"]),
    ]))
}

/// ```text
/// 4  void m() {
/// 5      int x = 5;
/// 6      int y = 0;
/// 7      if (x > 0) {
/// 8          y = 1;
/// 9      } else {
/// 10         x = 2;
/// 11     }
/// 12     int z = y;
/// 13 }
/// ```
pub fn fixture_branch_merge() -> ClassSpec {
    ClassSpec::new("Branch").method(MethodSpec::new("Branch", "m", "void").body(vec![
        Stmt::decl(5, "int x = 5;", "x", &[]),
        Stmt::decl(6, "int y = 0;", "y", &[]),
        Stmt::if_else(
            7,
            "if (x > 0)",
            &["x"],
            vec![Stmt::assign(8, "y = 1;", "y", &[])],
            vec![Stmt::assign(10, "x = 2;", "x", &[])],
        ),
        Stmt::decl(12, "int z = y;", "z", &["y"]),
    ]))
}

/// ```text
/// 4  int sum(int n) {
/// 5      int s = 0;
/// 6      int i = 0;
/// 7      while (i < n) {
/// 8          s = s + i;
/// 9          i = i + 1;
/// 10     }
/// 11     return s;
/// 12 }
/// ```
pub fn fixture_loop() -> ClassSpec {
    ClassSpec::new("Loop").method(
        MethodSpec::new("Loop", "sum", "int")
            .param("n", "int")
            .body(vec![
                Stmt::decl(5, "int s = 0;", "s", &[]),
                Stmt::decl(6, "int i = 0;", "i", &[]),
                Stmt::while_loop(
                    7,
                    "while (i < n)",
                    &["i", "n"],
                    vec![
                        Stmt::assign(8, "s = s + i;", "s", &["s", "i"]),
                        Stmt::assign(9, "i = i + 1;", "i", &["i"]),
                    ],
                ),
                Stmt::ret(11, "return s;", &["s"]),
            ]),
    )
}

/// ```text
/// class Calc {
///     int base = 0;
///     int add(int a, int b) { return a + b; }
///     void run() {
///         int x = 1;
///         int y = 2;
///         int s = add(x, y);
///         Log.info(s);
///         int t = add(s);
///     }
/// }
/// ```
///
/// `Log.info` is never built; `add(s)` is an arity mismatch.
pub fn fixture_calls() -> ClassSpec {
    let add = MethodSpec::new("Calc", "add", "int")
        .param("a", "int")
        .param("b", "int")
        .body(vec![Stmt::ret(3, "return a + b;", &["a", "b"])]);
    let add_ref = add.reference();

    let run = MethodSpec::new("Calc", "run", "void").body(vec![
        Stmt::decl(5, "int x = 1;", "x", &[]),
        Stmt::decl(6, "int y = 2;", "y", &[]),
        Stmt::call(7, "int s = add(x, y);", add_ref.clone(), &["x", "y"], Some("s")),
        Stmt::call(
            8,
            "Log.info(s);",
            JMethodReference::new("Log", "info", &["int"], "void"),
            &["s"],
            None,
        ),
        Stmt::call(9, "int t = add(s);", add_ref, &["s"], Some("t")),
    ]);

    ClassSpec::new("Calc").field("base", "int").method(add).method(run)
}

/// ```text
/// 1  class Outer {
/// 2      void tick() {
/// 3          int c = 1;
/// 4      }
/// 5      class Inner {
/// 6          int twice(int v) {
/// 7              return v + v;
/// 8          }
/// 9      }
/// 10 }
/// ```
pub fn fixture_nested() -> ClassSpec {
    let tick = MethodSpec::new("Outer", "tick", "void").body(vec![Stmt::decl(3, "int c = 1;", "c", &[])]);
    let twice = MethodSpec::new("Outer.Inner", "twice", "int")
        .param("v", "int")
        .body(vec![Stmt::ret(7, "return v + v;", &["v"])]);

    ClassSpec::new("Outer")
        .method(tick)
        .inner(ClassSpec::new("Outer.Inner").method(twice))
}
