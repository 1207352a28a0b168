//! CfgStore and BuildCoordinator behavior over the fixture front end

#[path = "../common/mod.rs"]
mod common;

use codeslice_cfg::config::StoreConfig;
use codeslice_cfg::{
    BuildCoordinator, CfgError, CfgStore, ClassMember, CommonCfg, Declaration, DiagnosticKind,
    NodeId, PdgNodeRef,
};
use common::*;
use pretty_assertions::assert_eq;
use std::sync::Arc;

#[test]
fn test_get_cfg_is_idempotent() {
    let mut store = CfgStore::default();
    let mut front_end = fixture_front_end();
    let decl = Declaration::method("Branch.m()");

    let first = store.get_cfg(&decl, &mut front_end).unwrap();
    let second = store.get_cfg(&decl, &mut front_end).unwrap();

    assert!(first.ptr_eq(&second));
    assert_eq!(front_end.calls, 1);
    assert_eq!(first.qualified_name(), "Branch.m()");
    assert_well_formed(first.flow_graph());
}

#[test]
fn test_class_build_caches_members() {
    let (mut store, mut front_end) = built_store(StoreConfig::default(), &["Calc"]);
    assert_eq!(front_end.calls, 1);

    let class = store.class_cfg("Calc").cloned().unwrap();
    assert_eq!(class.member_count(), 3);
    assert_well_formed(&class);
    for name in ["Calc.base", "Calc.add(int,int)", "Calc.run()"] {
        assert!(store.contains(name), "{name} should be cached");
    }

    let add = store
        .get_cfg(&Declaration::method("Calc.add(int,int)"), &mut front_end)
        .unwrap();
    assert_eq!(front_end.calls, 1, "member lookups never reach the builder");
    assert!(Arc::ptr_eq(add.as_method().unwrap(), class.member("Calc.add(int,int)").unwrap()));

    let field = store.method_cfg("Calc.base").unwrap();
    assert!(field.method_entry().is_none());
    assert_eq!(field.node_count(), 3);
}

#[test]
fn test_one_cfg_per_name_in_either_request_order() {
    // member first, then its class
    let mut store = CfgStore::default();
    let mut front_end = fixture_front_end();
    let add = store
        .get_cfg(&Declaration::method("Calc.add(int,int)"), &mut front_end)
        .unwrap();
    let add = Arc::clone(add.as_method().unwrap());
    let class = store.get_cfg(&Declaration::class("Calc"), &mut front_end).unwrap();
    let class = class.as_class().unwrap();

    assert!(Arc::ptr_eq(class.member("Calc.add(int,int)").unwrap(), &add));
    assert!(Arc::ptr_eq(store.method_cfg("Calc.add(int,int)").unwrap(), &add));
    assert!(add.node_ids().all(|id| class.contains(id)));
    assert_unique_ids(store.method_cfgs().iter().map(|cfg| cfg.flow_graph()));

    // class first, then its member
    let (mut store, mut front_end) = built_store(StoreConfig::default(), &["Calc"]);
    let class = store.class_cfg("Calc").cloned().unwrap();
    for name in ["Calc.base", "Calc.add(int,int)", "Calc.run()"] {
        let member = store.get_cfg(&Declaration::method(name), &mut front_end).unwrap();
        assert!(Arc::ptr_eq(member.as_method().unwrap(), class.member(name).unwrap()));
    }
}

#[test]
fn test_class_nodes_agree_with_member_nodes() {
    let (store, _) = built_store(StoreConfig::default(), &["Calc", "Outer"]);
    let calc = store.class_cfg("Calc").unwrap();
    let outer = store.class_cfg("Outer").unwrap();
    let add = store.method_cfg("Calc.add(int,int)").unwrap();

    // a dependence-graph link set through either container shows in both
    let ret = node_at(add, 3);
    assert!(add.set_pdg_node(ret, PdgNodeRef(5)));
    assert_eq!(calc.node(ret).and_then(|n| n.pdg_node()), Some(PdgNodeRef(5)));
    assert!(calc.set_pdg_node(add.start(), PdgNodeRef(6)));
    assert_eq!(add.start_node().and_then(|n| n.pdg_node()), Some(PdgNodeRef(6)));

    // block ids assigned after the class was assembled reach the class copies
    for member in store.method_cfgs() {
        let class = if member.qualified_name().starts_with("Calc.") { calc } else { outer };
        for node in member.nodes() {
            let copy = class.node(node.id()).unwrap();
            assert!(node.block().is_some(), "{} has no block", node.id());
            assert_eq!(copy.block(), node.block(), "block of {} in {}", node.id(), class.qualified_name());
        }
    }
}

#[test]
fn test_nested_class_members_are_registered() {
    let (mut store, mut front_end) = built_store(StoreConfig::default(), &["Outer"]);
    assert_eq!(front_end.calls, 1);

    let outer = store.class_cfg("Outer").cloned().unwrap();
    let inner = store.class_cfg("Outer.Inner").cloned().unwrap();
    let twice = store.method_cfg("Outer.Inner.twice(int)").cloned().unwrap();
    assert!(Arc::ptr_eq(outer.nested_class("Outer.Inner").unwrap(), &inner));
    assert!(Arc::ptr_eq(inner.member("Outer.Inner.twice(int)").unwrap(), &twice));
    assert!(outer.member("Outer.Inner.twice(int)").is_none());
    assert!(matches!(outer.members().next(), Some(ClassMember::Class(_))));

    let names: Vec<&str> = outer.member_names().iter().map(String::as_str).collect();
    assert_eq!(names, vec!["Outer.tick()", "Outer.Inner"]);

    // the inner class and its method are part of the outer graph
    assert_well_formed(&outer);
    assert!(inner.node_ids().all(|id| outer.contains(id)));
    let reached = outer.forward_reachable_nodes(outer.start(), true, |_| false);
    assert!(reached.contains(&twice.end()));
    assert_partition(&twice);

    // requesting the inner class or its method never reaches the builder
    let again = store
        .get_cfg(&Declaration::class("Outer.Inner"), &mut front_end)
        .unwrap();
    assert!(Arc::ptr_eq(again.as_class().unwrap(), &inner));
    assert_eq!(front_end.calls, 1);
}

#[test]
fn test_ids_unique_within_session() {
    let (store, _) = built_store(StoreConfig::default(), &["Simple", "Branch", "Loop", "Calc"]);
    let cfgs = store.method_cfgs();
    assert_eq!(cfgs.len(), 6);
    assert_unique_ids(cfgs.iter().map(|cfg| cfg.flow_graph()));

    let allocated = store.ids().allocated();
    let total: usize = cfgs.iter().map(|cfg| cfg.node_count()).sum();
    // plus the entry and exit of each of the four class CFGs
    assert_eq!(allocated, total + 4 * 2);
}

#[test]
fn test_reset_id_restarts_at_one() {
    let (mut store, mut front_end) = built_store(StoreConfig::default(), &["Calc"]);
    store.reset_id();
    assert!(store.is_empty());

    let simple = store
        .get_cfg(&Declaration::method("Simple.m()"), &mut front_end)
        .unwrap();
    assert_eq!(simple.flow_graph().start(), NodeId::new(1));
    assert_eq!(simple.flow_graph().end(), NodeId::new(2));
}

#[test]
fn test_unresolvable_declaration_is_memoized() {
    let mut store = CfgStore::default();
    let mut front_end = fixture_front_end();
    let decl = Declaration::method("Nope.missing()");

    assert!(store.get_cfg(&decl, &mut front_end).is_none());
    let err = store.try_get_cfg(&decl, &mut front_end).unwrap_err();
    assert!(err.is_resolution());
    assert_eq!(front_end.calls, 1);

    let diagnostic = store.failure("Nope.missing()").unwrap();
    assert_eq!(diagnostic.kind, DiagnosticKind::Resolution);
    assert_eq!(store.diagnostics().len(), 1);

    // the session keeps going
    assert!(store
        .get_cfg(&Declaration::method("Simple.m()"), &mut front_end)
        .is_some());
}

#[test]
fn test_node_limit() {
    let strict = StoreConfig::default().max_nodes_per_cfg(3).strict(true);
    let mut store = CfgStore::new(strict);
    let mut front_end = fixture_front_end();
    let decl = Declaration::method("Simple.m()");

    let err = store.try_get_cfg(&decl, &mut front_end).unwrap_err();
    assert!(matches!(err, CfgError::Limit { nodes: 4, max: 3, .. }));
    assert_eq!(store.diagnostics()[0].kind, DiagnosticKind::Limit);
    assert!(matches!(
        store.try_get_cfg(&decl, &mut front_end),
        Err(CfgError::Build { .. })
    ));

    let lenient = StoreConfig::default().max_nodes_per_cfg(3);
    let mut store = CfgStore::new(lenient);
    assert!(store.get_cfg(&decl, &mut front_end).is_some());
    assert!(store.diagnostics().is_empty());
}

#[test]
fn test_basic_blocks_on_store_build() {
    let (store, _) = built_store(StoreConfig::default(), &["Branch", "Loop"]);
    for cfg in store.method_cfgs() {
        assert_partition(cfg);
    }

    let branch = store.method_cfg("Branch.m()").unwrap();
    let else_arm = node_at(branch, 10);
    let block = branch.block_of(else_arm).unwrap();
    assert_eq!(block.nodes(), &[else_arm]);

    let guard_block = branch.block_of(node_at(branch, 7)).unwrap();
    assert!(guard_block.contains(node_at(branch, 5)));
    assert_eq!(guard_block.leader(), branch.start());

    let (store, _) = built_store(StoreConfig::default().compute_basic_blocks(false), &["Branch"]);
    assert!(!store.method_cfg("Branch.m()").unwrap().has_blocks());
}

#[test]
fn test_coordinator_shares_one_session() {
    let coordinator = BuildCoordinator::new(CfgStore::default());
    let names = ["Simple.m()", "Branch.m()", "Loop.sum(int)", "Calc.add(int,int)", "Calc.run()"];

    let built: Vec<Vec<codeslice_cfg::StoredCfg>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    let mut front_end = fixture_front_end();
                    names
                        .iter()
                        .map(|name| coordinator.get_cfg(&Declaration::method(*name), &mut front_end).unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for per_thread in &built[1..] {
        for (a, b) in per_thread.iter().zip(&built[0]) {
            assert!(a.ptr_eq(b), "{} built twice", a.qualified_name());
        }
    }
    coordinator.with_store(|store| {
        assert_eq!(store.len(), names.len());
        assert_unique_ids(store.method_cfgs().iter().map(|cfg| cfg.flow_graph()));
    });
}
