use super::*;
use crate::graph::algos::shared::{DirectedScope, HopBounded, ScopedAlgorithm};
use crate::graph::{
    AttrHandle, AttrKind, AttrOwner, Direction, EdgeSet, GraphStore, NodeSet, ObjectId, TypeId,
    Value,
};
use crate::store::MemoryStore;

/// Cities A..E joined by weighted roads:
///
/// ```text
/// A -1-> B -2-> C
/// A -5-> C
/// C -1-> D
/// E (isolated)
/// ```
struct Roads {
    store: MemoryStore,
    city: TypeId,
    road: TypeId,
    km: AttrHandle,
    a: NodeId,
    b: NodeId,
    c: NodeId,
    d: NodeId,
    e: NodeId,
    ab: EdgeId,
    bc: EdgeId,
    ac: EdgeId,
}

fn roads() -> Roads {
    let mut store = MemoryStore::new();
    let city = store.new_node_type("city").unwrap();
    let road = store.new_edge_type("road").unwrap();
    let km = store
        .new_attribute("km", AttrKind::Double, AttrOwner::Type(road))
        .unwrap();
    let [a, b, c, d, e] = ["a", "b", "c", "d", "e"].map(|_| store.new_node(city).unwrap());

    let mut link = |from, to, weight: f64| {
        let edge = store.new_edge(road, from, to).unwrap();
        store
            .set_attribute_value(ObjectId::Edge(edge), km, Value::Double(weight))
            .unwrap();
        edge
    };
    let ab = link(a, b, 1.0);
    let bc = link(b, c, 2.0);
    let ac = link(a, c, 5.0);
    link(c, d, 1.0);

    Roads {
        store,
        city,
        road,
        km,
        a,
        b,
        c,
        d,
        e,
        ab,
        bc,
        ac,
    }
}

fn dijkstra<'a>(r: &'a Roads, from: NodeId, to: NodeId) -> SinglePairShortestPathDijkstra<'a> {
    let mut sp = SinglePairShortestPathDijkstra::new(&r.store, from, to).unwrap();
    sp.add_node_type(r.city).unwrap();
    sp.add_weighted_edge_type(r.road, Direction::Out, r.km).unwrap();
    sp
}

fn bfs<'a>(r: &'a Roads, from: NodeId, to: NodeId) -> SinglePairShortestPathBfs<'a> {
    let mut sp = SinglePairShortestPathBfs::new(&r.store, from, to).unwrap();
    sp.add_node_type(r.city).unwrap();
    sp.add_edge_type(r.road, Direction::Out).unwrap();
    sp
}

#[test]
fn test_dijkstra_prefers_lighter_detour() {
    let r = roads();
    let mut sp = dijkstra(&r, r.a, r.c);
    sp.run().unwrap();

    assert!(sp.exists().unwrap());
    assert_eq!(sp.cost().unwrap(), Some(3.0));
    assert_eq!(sp.path_as_nodes().unwrap(), vec![r.a, r.b, r.c]);
    assert_eq!(sp.path_as_edges().unwrap(), vec![r.ab, r.bc]);
}

#[test]
fn test_dijkstra_path_weights_sum_to_cost() {
    let r = roads();
    let mut sp = dijkstra(&r, r.a, r.d);
    sp.run().unwrap();

    let total: f64 = sp
        .path_as_edges()
        .unwrap()
        .into_iter()
        .map(|edge| r.store.numeric_value(edge, r.km).unwrap().unwrap())
        .sum();
    assert_eq!(sp.cost().unwrap(), Some(total));
    assert_eq!(total, 4.0);
}

#[test]
fn test_bfs_counts_hops() {
    let r = roads();
    let mut sp = bfs(&r, r.a, r.c);
    sp.run().unwrap();
    assert_eq!(sp.cost().unwrap(), Some(1.0));
    assert_eq!(sp.path_as_edges().unwrap(), vec![r.ac]);

    let mut sp = bfs(&r, r.a, r.d);
    sp.run().unwrap();
    assert_eq!(sp.path_as_nodes().unwrap(), vec![r.a, r.c, r.d]);
    assert_eq!(sp.source(), r.a);
    assert_eq!(sp.destination(), r.d);
}

#[test]
fn test_unreachable_destination() {
    let r = roads();
    let mut sp = bfs(&r, r.a, r.e);
    sp.run().unwrap();
    assert!(!sp.exists().unwrap());
    assert_eq!(sp.cost().unwrap(), None);
    assert!(sp.path_as_nodes().unwrap().is_empty());

    // roads are one-way
    let mut sp = dijkstra(&r, r.d, r.a);
    sp.run().unwrap();
    assert!(!sp.exists().unwrap());
}

#[test]
fn test_hop_bound_limits_search() {
    let r = roads();
    let mut sp = bfs(&r, r.a, r.d);
    sp.set_maximum_hops(1).unwrap();
    sp.run().unwrap();
    assert!(!sp.exists().unwrap());

    // B sits at the bound and is never relaxed, so only the direct road remains
    let mut sp = dijkstra(&r, r.a, r.c);
    sp.set_maximum_hops(1).unwrap();
    sp.run().unwrap();
    assert_eq!(sp.cost().unwrap(), Some(5.0));
    assert_eq!(sp.path_as_edges().unwrap(), vec![r.ac]);
}

#[test]
fn test_exclusions_force_detour() {
    let r = roads();
    let edges = EdgeSet::from([r.ac]);
    let mut sp = bfs(&r, r.a, r.c);
    sp.exclude_edges(&edges).unwrap();
    sp.run().unwrap();
    assert_eq!(sp.path_as_nodes().unwrap(), vec![r.a, r.b, r.c]);

    let nodes = NodeSet::from([r.b]);
    let mut sp = dijkstra(&r, r.a, r.c);
    sp.exclude_nodes(&nodes).unwrap();
    sp.run().unwrap();
    assert_eq!(sp.cost().unwrap(), Some(5.0));
}

#[test]
fn test_source_equals_destination() {
    let r = roads();
    let mut sp = bfs(&r, r.b, r.b);
    sp.run().unwrap();
    assert_eq!(sp.path_as_nodes().unwrap(), vec![r.b]);
    assert_eq!(sp.cost().unwrap(), Some(0.0));

    let mut sp = dijkstra(&r, r.b, r.b);
    sp.run().unwrap();
    assert_eq!(sp.cost().unwrap(), Some(0.0));
    assert!(sp.path_as_edges().unwrap().is_empty());
}

#[test]
fn test_parallel_edges_use_the_lightest() {
    let mut r = roads();
    let mut parallel = |weight: f64| {
        let edge = r.store.new_edge(r.road, r.d, r.e).unwrap();
        r.store
            .set_attribute_value(ObjectId::Edge(edge), r.km, Value::Double(weight))
            .unwrap();
        edge
    };
    let heavy = parallel(3.0);
    let light = parallel(1.0);
    let heavier = parallel(7.0);

    let mut sp = dijkstra(&r, r.d, r.e);
    sp.run().unwrap();
    assert_eq!(sp.cost().unwrap(), Some(1.0));
    assert_eq!(sp.path_as_edges().unwrap(), vec![light]);
    assert_ne!(sp.path_as_edges().unwrap(), vec![heavy]);
    assert_ne!(sp.path_as_edges().unwrap(), vec![heavier]);
}

#[test]
fn test_unweighted_edges_use_default_cost() {
    let r = roads();
    let mut sp = SinglePairShortestPathDijkstra::new(&r.store, r.a, r.c).unwrap();
    sp.add_node_type(r.city).unwrap();
    sp.add_edge_type(r.road, Direction::Out).unwrap();
    sp.set_unweighted_edge_cost(2.5).unwrap();
    sp.run().unwrap();
    assert_eq!(sp.cost().unwrap(), Some(2.5));
    assert_eq!(sp.path_as_edges().unwrap(), vec![r.ac]);
}

#[test]
fn test_invalid_unweighted_cost() {
    let r = roads();
    let mut sp = dijkstra(&r, r.a, r.c);
    for bad in [-1.0, f64::NAN, f64::INFINITY] {
        let err = sp.set_unweighted_edge_cost(bad).unwrap_err();
        assert!(matches!(err, GraphError::InvalidValue { .. }));
        assert!(err.is_usage());
    }
    assert_eq!(sp.unweighted_edge_cost(), 1.0);
}

#[test]
fn test_negative_weight_aborts_run() {
    let mut r = roads();
    r.store
        .set_attribute_value(ObjectId::Edge(r.ab), r.km, Value::Double(-3.0))
        .unwrap();
    let mut sp = dijkstra(&r, r.a, r.c);
    let err = sp.run().unwrap_err();
    assert!(matches!(err, GraphError::NegativeWeight { .. }));
    assert!(!err.is_usage());
    // no valid result after a failed run
    assert!(matches!(sp.exists(), Err(GraphError::NotRun { .. })));
    assert!(matches!(sp.run(), Err(GraphError::AlreadyRun { .. })));
}

#[test]
fn test_weight_attribute_must_be_numeric_edge_attribute() {
    let mut r = roads();
    let label = r
        .store
        .new_attribute("label", AttrKind::String, AttrOwner::AllEdges)
        .unwrap();
    let rank = r
        .store
        .new_attribute("rank", AttrKind::Integer, AttrOwner::AllNodes)
        .unwrap();
    let mut sp = SinglePairShortestPathDijkstra::new(&r.store, r.a, r.c).unwrap();

    assert!(matches!(
        sp.add_weighted_edge_type(r.road, Direction::Out, label),
        Err(GraphError::AttributeTypeMismatch { .. })
    ));
    let err = sp
        .add_weighted_edge_type(r.road, Direction::Out, rank)
        .unwrap_err();
    assert!(matches!(err, GraphError::NotFound { .. }));
}

#[test]
fn test_results_before_run_are_usage_errors() {
    let r = roads();
    let sp = bfs(&r, r.a, r.c);
    assert!(matches!(sp.exists(), Err(GraphError::NotRun { .. })));
    assert!(matches!(sp.cost(), Err(GraphError::NotRun { .. })));
    assert!(matches!(
        sp.path_as_nodes(),
        Err(GraphError::NotRun { .. })
    ));
}

#[test]
fn test_unknown_endpoint() {
    let r = roads();
    assert!(matches!(
        SinglePairShortestPathBfs::new(&r.store, r.a, NodeId(4_242)),
        Err(GraphError::NodeNotFound { id: 4_242 })
    ));
}

#[test]
fn test_dijkstra_agrees_with_bfs_on_unit_weights() {
    // 6x6 grid, edges right and down
    let mut store = MemoryStore::new();
    let cell = store.new_node_type("cell").unwrap();
    let step = store.new_edge_type("step").unwrap();
    let grid: Vec<Vec<NodeId>> = (0..6)
        .map(|_| (0..6).map(|_| store.new_node(cell).unwrap()).collect())
        .collect();
    for row in 0..6 {
        for col in 0..6 {
            if col + 1 < 6 {
                store.new_edge(step, grid[row][col], grid[row][col + 1]).unwrap();
            }
            if row + 1 < 6 {
                store.new_edge(step, grid[row][col], grid[row + 1][col]).unwrap();
            }
        }
    }

    for (row, col) in [(0, 5), (3, 3), (5, 5), (2, 4)] {
        let target = grid[row][col];
        let mut by_hops = SinglePairShortestPathBfs::new(&store, grid[0][0], target).unwrap();
        by_hops.add_all_node_types().unwrap();
        by_hops.add_all_edge_types(Direction::Out).unwrap();
        by_hops.run().unwrap();

        let mut by_weight =
            SinglePairShortestPathDijkstra::new(&store, grid[0][0], target).unwrap();
        by_weight.add_all_node_types().unwrap();
        by_weight.add_all_edge_types(Direction::Out).unwrap();
        by_weight.run().unwrap();

        let expected = (row + col) as f64;
        assert_eq!(by_hops.cost().unwrap(), Some(expected));
        assert_eq!(by_weight.cost().unwrap(), Some(expected));
    }
}
