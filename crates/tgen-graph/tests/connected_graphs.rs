use std::collections::BTreeSet;

use tgen_core::errors::GenError;
use tgen_core::rng::RngHandle;
use tgen_graph::{ConnectedOptions, DagOptions, Graph, GraphOptions, UdagOptions};

fn params_code(err: GenError) -> String {
    match err {
        GenError::Params(info) => info.code,
        other => panic!("expected a parameter error, got {other:?}"),
    }
}

fn simple() -> GraphOptions {
    GraphOptions {
        self_loop: false,
        repeated_edges: false,
        ..GraphOptions::default()
    }
}

fn is_connected(graph: &Graph) -> bool {
    let n = graph.point_count();
    if n == 0 {
        return true;
    }
    let mut neighbours = vec![Vec::new(); n + 1];
    for edge in graph.edges() {
        neighbours[edge.start].push(edge.end);
        neighbours[edge.end].push(edge.start);
    }
    let mut seen = vec![false; n + 1];
    let mut stack = vec![1];
    seen[1] = true;
    while let Some(v) = stack.pop() {
        for &w in &neighbours[v] {
            if !seen[w] {
                seen[w] = true;
                stack.push(w);
            }
        }
    }
    seen[1..].iter().all(|s| *s)
}

fn has_cycle(graph: &Graph) -> bool {
    let n = graph.point_count();
    let mut indegree = vec![0usize; n + 1];
    let mut out = vec![Vec::new(); n + 1];
    for edge in graph.edges() {
        out[edge.start].push(edge.end);
        indegree[edge.end] += 1;
    }
    let mut ready: Vec<usize> = (1..=n).filter(|v| indegree[*v] == 0).collect();
    let mut visited = 0;
    while let Some(v) = ready.pop() {
        visited += 1;
        for &w in &out[v] {
            indegree[w] -= 1;
            if indegree[w] == 0 {
                ready.push(w);
            }
        }
    }
    visited != n
}

#[test]
fn over_capacity_requests_are_rejected() {
    let mut rng = RngHandle::from_seed(0);
    let err = Graph::graph(3, 4, &simple(), &mut rng).unwrap_err();
    assert_eq!(params_code(err), "edge-capacity-exceeded");

    let err = Graph::graph(0, 1, &GraphOptions::default(), &mut rng).unwrap_err();
    assert_eq!(params_code(err), "no-vertices");

    let err = Graph::graph(1, 1, &simple(), &mut rng).unwrap_err();
    assert_eq!(params_code(err), "no-vertices");
}

#[test]
fn full_capacity_yields_the_complete_graph() {
    let mut rng = RngHandle::from_seed(5);
    let graph = Graph::graph(3, 3, &simple(), &mut rng).unwrap();
    let pairs: BTreeSet<(usize, usize)> =
        graph.edges().map(|edge| (edge.start, edge.end)).collect();
    assert_eq!(pairs, BTreeSet::from([(1, 2), (1, 3), (2, 3)]));
}

#[test]
fn directed_graphs_use_ordered_pairs() {
    let options = GraphOptions {
        directed: true,
        ..simple()
    };
    let mut rng = RngHandle::from_seed(21);
    let graph = Graph::graph(4, 12, &options, &mut rng).unwrap();
    assert_eq!(graph.edge_count(), 12);
    let pairs: BTreeSet<(usize, usize)> =
        graph.edges().map(|edge| (edge.start, edge.end)).collect();
    assert_eq!(pairs.len(), 12);
    assert!(pairs.iter().all(|(u, v)| u != v));
}

#[test]
fn default_graphs_allow_loops_and_repeats() {
    let mut rng = RngHandle::from_seed(4);
    let graph = Graph::graph(2, 40, &GraphOptions::default(), &mut rng).unwrap();
    assert_eq!(graph.edge_count(), 40);
    assert!(graph.edges().any(|edge| edge.start == edge.end));
}

#[test]
fn dags_are_connected_and_acyclic() {
    for seed in 0..10 {
        let mut rng = RngHandle::from_seed(seed);
        let graph = Graph::dag(30, 80, &DagOptions::default(), &mut rng).unwrap();
        assert!(graph.is_directed());
        assert_eq!(graph.edge_count(), 80);
        assert!(is_connected(&graph));
        assert!(!has_cycle(&graph));
        assert!(graph.edges().all(|edge| edge.start < edge.end));
    }
}

#[test]
fn dag_floor_and_capacity_are_enforced() {
    let mut rng = RngHandle::from_seed(1);
    let err = Graph::dag(5, 3, &DagOptions::default(), &mut rng).unwrap_err();
    assert_eq!(params_code(err), "below-connectivity-floor");

    let distinct = DagOptions {
        repeated_edges: false,
        ..DagOptions::default()
    };
    let err = Graph::dag(4, 7, &distinct, &mut rng).unwrap_err();
    assert_eq!(params_code(err), "edge-capacity-exceeded");
    let graph = Graph::dag(4, 6, &distinct, &mut rng).unwrap();
    assert_eq!(graph.edge_count(), 6);
    assert!(!has_cycle(&graph));
}

#[test]
fn cyclic_dags_may_use_both_orientations() {
    let options = DagOptions {
        repeated_edges: false,
        allow_cycles: true,
        ..DagOptions::default()
    };
    let mut rng = RngHandle::from_seed(13);
    let graph = Graph::dag(3, 6, &options, &mut rng).unwrap();
    let pairs: BTreeSet<(usize, usize)> =
        graph.edges().map(|edge| (edge.start, edge.end)).collect();
    assert_eq!(
        pairs,
        BTreeSet::from([(1, 2), (1, 3), (2, 1), (2, 3), (3, 1), (3, 2)])
    );
    assert!(has_cycle(&graph));
}

#[test]
fn udags_are_connected() {
    let options = UdagOptions {
        self_loop: false,
        repeated_edges: false,
        ..UdagOptions::default()
    };
    for seed in 0..10 {
        let mut rng = RngHandle::from_seed(seed);
        let graph = Graph::udag(25, 60, &options, &mut rng).unwrap();
        assert!(!graph.is_directed());
        assert_eq!(graph.edge_count(), 60);
        assert!(is_connected(&graph));
        let pairs: BTreeSet<(usize, usize)> =
            graph.edges().map(|edge| (edge.start, edge.end)).collect();
        assert_eq!(pairs.len(), 60);
        assert!(pairs.iter().all(|(u, v)| u < v));
    }
}

#[test]
fn connected_dispatches_on_direction() {
    let mut rng = RngHandle::from_seed(8);
    let directed = ConnectedOptions {
        directed: true,
        ..ConnectedOptions::default()
    };
    let graph = Graph::connected(12, 30, &directed, &mut rng).unwrap();
    assert!(graph.is_directed());
    assert!(!has_cycle(&graph));
    assert!(graph.edges().all(|edge| edge.start != edge.end));

    let graph = Graph::connected(12, 30, &ConnectedOptions::default(), &mut rng).unwrap();
    assert!(!graph.is_directed());
    assert!(is_connected(&graph));
    assert_eq!(graph.edge_count(), 30);
}

#[test]
fn connected_forwards_explicit_flags() {
    let options = ConnectedOptions {
        self_loop: Some(false),
        repeated_edges: Some(false),
        ..ConnectedOptions::default()
    };
    let udag = options.udag();
    assert!(!udag.self_loop);
    assert!(!udag.repeated_edges);

    let dag = ConnectedOptions::default().dag();
    assert_eq!(dag, DagOptions::default());
    assert_eq!(ConnectedOptions::default().udag(), UdagOptions::default());
}
