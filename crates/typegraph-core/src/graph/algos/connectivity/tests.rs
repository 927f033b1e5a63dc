use super::*;
use crate::graph::algos::shared::{DirectedScope, ScopedAlgorithm};
use crate::graph::{Direction, GraphProvider, NodeId, TypeId};
use crate::store::MemoryStore;

struct Fixture {
    store: MemoryStore,
    node: TypeId,
    edge: TypeId,
    n: Vec<NodeId>,
}

/// `edges` are index pairs into a fresh list of `count` nodes
fn fixture(count: usize, edges: &[(usize, usize)]) -> Fixture {
    let mut store = MemoryStore::new();
    let node = store.new_node_type("node").unwrap();
    let edge = store.new_edge_type("link").unwrap();
    let n: Vec<NodeId> = (0..count).map(|_| store.new_node(node).unwrap()).collect();
    for &(from, to) in edges {
        store.new_edge(edge, n[from], n[to]).unwrap();
    }
    Fixture {
        store,
        node,
        edge,
        n,
    }
}

fn same_component(cc: &ConnectedComponents, a: NodeId, b: NodeId) -> bool {
    cc.component_of(a).unwrap() == cc.component_of(b).unwrap()
}

#[test]
fn test_weak_triangle_plus_isolated() {
    let mut f = fixture(4, &[(0, 1), (1, 2), (2, 0)]);
    let mut weak = WeakConnectivityDfs::new(&mut f.store);
    weak.add_node_type(f.node).unwrap();
    weak.add_edge_type(f.edge).unwrap();
    weak.run().unwrap();

    let cc = weak.connected_components().unwrap();
    assert_eq!(cc.count(), 2);
    assert!(same_component(cc, f.n[0], f.n[2]));
    assert!(!same_component(cc, f.n[0], f.n[3]));
    assert_eq!(cc.size(cc.component_of(f.n[3]).unwrap()).unwrap(), 1);
    assert_eq!(cc.largest().unwrap().1.len(), 3);
}

#[test]
fn test_weak_ignores_direction() {
    // 0 -> 1 <- 2: no directed path from 0 to 2
    let mut f = fixture(3, &[(0, 1), (2, 1)]);
    let mut weak = WeakConnectivityDfs::new(&mut f.store);
    weak.add_all_node_types().unwrap();
    weak.add_all_edge_types().unwrap();
    weak.run().unwrap();
    assert_eq!(weak.connected_components().unwrap().count(), 1);
}

#[test]
fn test_weak_exclusions_split_components() {
    let mut f = fixture(3, &[(0, 1), (1, 2)]);
    let excluded = NodeSet::from([f.n[1]]);
    let mut weak = WeakConnectivityDfs::new(&mut f.store);
    weak.add_node_type(f.node).unwrap();
    weak.add_edge_type(f.edge).unwrap();
    weak.exclude_nodes(&excluded).unwrap();
    weak.run().unwrap();

    let cc = weak.connected_components().unwrap();
    assert_eq!(cc.count(), 2);
    assert!(matches!(
        cc.component_of(f.n[1]),
        Err(GraphError::NotInScope { .. })
    ));
}

#[test]
fn test_strong_cycle_plus_isolated() {
    let mut f = fixture(4, &[(0, 1), (1, 2), (2, 0)]);
    let mut strong = StrongConnectivityGabow::new(&mut f.store);
    strong.add_node_type(f.node).unwrap();
    strong.add_edge_type(f.edge, Direction::Out).unwrap();
    strong.run().unwrap();

    let cc = strong.connected_components().unwrap();
    assert_eq!(cc.count(), 2);
    assert!(same_component(cc, f.n[0], f.n[1]));
    assert!(same_component(cc, f.n[1], f.n[2]));
    assert!(!same_component(cc, f.n[2], f.n[3]));
}

#[test]
fn test_strong_chain_is_all_singletons() {
    let mut f = fixture(4, &[(0, 1), (1, 2), (2, 3)]);
    let mut strong = StrongConnectivityGabow::new(&mut f.store);
    strong.add_all_node_types().unwrap();
    strong.add_all_edge_types(Direction::Out).unwrap();
    strong.run().unwrap();

    let cc = strong.connected_components().unwrap();
    assert_eq!(cc.count(), 4);
    assert!(cc.iter().all(|(_, nodes)| nodes.len() == 1));
}

#[test]
fn test_strong_matches_mutual_reachability() {
    // two cycles {0,1,2} and {3,4} joined one way, plus a tail 5 and self-loop 6
    let edges = [(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 3), (4, 5), (6, 6)];
    let mut f = fixture(7, &edges);
    let reach = reachability(7, &edges);

    let mut strong = StrongConnectivityGabow::new(&mut f.store);
    strong.add_node_type(f.node).unwrap();
    strong.add_edge_type(f.edge, Direction::Out).unwrap();
    strong.run().unwrap();
    let cc = strong.connected_components().unwrap();

    assert_eq!(cc.count(), 4);
    for a in 0..7 {
        for b in 0..7 {
            let mutual = reach[a][b] && reach[b][a];
            assert_eq!(same_component(cc, f.n[a], f.n[b]), mutual, "{} {}", a, b);
        }
    }
}

/// Transitive closure by Floyd-Warshall, reflexive
fn reachability(count: usize, edges: &[(usize, usize)]) -> Vec<Vec<bool>> {
    let mut reach = vec![vec![false; count]; count];
    for (i, row) in reach.iter_mut().enumerate() {
        row[i] = true;
    }
    for &(a, b) in edges {
        reach[a][b] = true;
    }
    for k in 0..count {
        for i in 0..count {
            for j in 0..count {
                if reach[i][k] && reach[k][j] {
                    reach[i][j] = true;
                }
            }
        }
    }
    reach
}

#[test]
fn test_strong_ingoing_gives_same_components() {
    let edges = [(0, 1), (1, 0), (1, 2)];
    let mut f = fixture(3, &edges);
    let mut strong = StrongConnectivityGabow::new(&mut f.store);
    strong.add_node_type(f.node).unwrap();
    strong.add_edge_type(f.edge, Direction::In).unwrap();
    strong.run().unwrap();
    let cc = strong.connected_components().unwrap();
    assert_eq!(cc.count(), 2);
    assert!(same_component(cc, f.n[0], f.n[1]));
}

#[test]
fn test_run_twice_and_results_before_run() {
    let mut f = fixture(2, &[(0, 1)]);
    let mut weak = WeakConnectivityDfs::new(&mut f.store);
    weak.add_node_type(f.node).unwrap();
    weak.add_edge_type(f.edge).unwrap();
    assert!(matches!(
        weak.connected_components(),
        Err(GraphError::NotRun { .. })
    ));
    weak.run().unwrap();
    assert!(matches!(weak.run(), Err(GraphError::AlreadyRun { .. })));
    assert!(matches!(
        weak.add_edge_type(f.edge),
        Err(GraphError::ConfigurationFrozen { .. })
    ));
}

#[test]
fn test_run_without_edge_types() {
    let mut f = fixture(2, &[(0, 1)]);
    let mut strong = StrongConnectivityGabow::new(&mut f.store);
    strong.add_node_type(f.node).unwrap();
    let err = strong.run().unwrap_err();
    assert!(matches!(err, GraphError::MissingEdgeTypes { .. }));
    assert!(err.is_usage());
}

#[test]
fn test_materialize_and_reload() {
    let mut f = fixture(4, &[(0, 1), (1, 2), (2, 0)]);
    let expected = {
        let mut strong = StrongConnectivityGabow::new(&mut f.store);
        strong.add_node_type(f.node).unwrap();
        strong.add_edge_type(f.edge, Direction::Out).unwrap();
        strong.set_materialized_attribute("scc").unwrap();
        strong.run().unwrap();
        let cc = strong.connected_components().unwrap();
        assert_eq!(cc.materialized_attribute(), Some("scc"));
        cc.clone()
    };

    let store = f.store.reopen();
    let reloaded = ConnectedComponents::from_materialized(&store, "scc").unwrap();
    assert_eq!(reloaded, expected);
    assert!(store.find_attribute("scc").is_some());
}

#[test]
fn test_materialized_name_in_use() {
    let mut f = fixture(1, &[]);
    f.store
        .new_attribute("taken", AttrKind::Integer, AttrOwner::AllNodes)
        .unwrap();
    let mut weak = WeakConnectivityDfs::new(&mut f.store);
    let err = weak.set_materialized_attribute("taken").unwrap_err();
    assert!(matches!(err, GraphError::AttributeInUse { .. }));
    assert!(err.is_usage());
    assert!(matches!(
        weak.set_materialized_attribute(" "),
        Err(GraphError::InvalidValue { .. })
    ));
}

#[test]
fn test_empty_scope_has_no_components() {
    let mut store = MemoryStore::new();
    let node = store.new_node_type("node").unwrap();
    let edge = store.new_edge_type("link").unwrap();
    let mut weak = WeakConnectivityDfs::new(&mut store);
    weak.add_node_type(node).unwrap();
    weak.add_edge_type(edge).unwrap();
    weak.run().unwrap();
    let cc = weak.connected_components().unwrap();
    assert_eq!(cc.count(), 0);
    assert!(cc.largest().is_none());
}
