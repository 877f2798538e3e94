use tgen_core::errors::GenError;
use tgen_core::rng::RngHandle;
use tgen_graph::{
    estimate_comb, estimated_iterations, from_directed_degree_sequence,
    from_undirected_degree_sequence, DegreeSequence, DegreeSequenceOptions, EdgePolicy, Graph,
};

fn sequence_code(err: GenError) -> String {
    match err {
        GenError::Sequence(info) => {
            assert_eq!(info.hint.as_deref(), Some("degree sequence is not graphical"));
            info.code
        }
        other => panic!("expected a sequence error, got {other:?}"),
    }
}

#[test]
fn regular_four_realizes_complete_graph() {
    let multiset = from_undirected_degree_sequence(&[3, 3, 3, 3], EdgePolicy::default()).unwrap();
    assert_eq!(
        multiset.edges(),
        vec![(1, 2), (1, 3), (1, 4), (2, 3), (2, 4), (3, 4)]
    );
}

#[test]
fn odd_degree_sum_is_rejected() {
    let err = from_undirected_degree_sequence(&[1, 2], EdgePolicy::default()).unwrap_err();
    assert_eq!(sequence_code(err), "odd-degree-sum");
}

#[test]
fn unbalanced_directed_sums_are_rejected() {
    let err = from_directed_degree_sequence(&[(2, 0), (0, 1)], EdgePolicy::default()).unwrap_err();
    assert_eq!(sequence_code(err), "unbalanced-degree-sum");
}

#[test]
fn undirected_exhaustion_is_reported() {
    let err = from_undirected_degree_sequence(&[3, 1], EdgePolicy::default()).unwrap_err();
    assert_eq!(sequence_code(err), "sequence-exhausted");

    let err = from_undirected_degree_sequence(&[2], EdgePolicy::default()).unwrap_err();
    assert_eq!(sequence_code(err), "sequence-exhausted");
}

#[test]
fn self_loops_consume_two_degree_units() {
    let multiset = from_undirected_degree_sequence(&[2], EdgePolicy::new(true, false)).unwrap();
    assert_eq!(multiset.edges(), vec![(1, 1)]);

    let multiset = from_undirected_degree_sequence(&[4, 2], EdgePolicy::new(true, true)).unwrap();
    assert_eq!(multiset.edges(), vec![(1, 1), (1, 1), (2, 2)]);
}

#[test]
fn repeats_let_one_partner_absorb_the_demand() {
    let multiset = from_undirected_degree_sequence(&[2, 2], EdgePolicy::new(false, true)).unwrap();
    assert_eq!(multiset.edges(), vec![(1, 2), (1, 2)]);

    let err = from_undirected_degree_sequence(&[2, 2], EdgePolicy::default()).unwrap_err();
    assert_eq!(sequence_code(err), "sequence-exhausted");
}

#[test]
fn directed_pairs_are_out_then_in() {
    let multiset =
        from_directed_degree_sequence(&[(1, 1), (1, 1)], EdgePolicy::default()).unwrap();
    assert_eq!(multiset.edges(), vec![(1, 2), (2, 1)]);

    let multiset = from_directed_degree_sequence(&[(2, 0), (0, 2)], EdgePolicy::new(false, true))
        .unwrap();
    assert_eq!(multiset.edges(), vec![(1, 2), (1, 2)]);
}

#[test]
fn directed_self_loop_needs_permission() {
    let multiset = from_directed_degree_sequence(&[(1, 1)], EdgePolicy::new(true, false)).unwrap();
    assert_eq!(multiset.edges(), vec![(1, 1)]);

    let err = from_directed_degree_sequence(&[(1, 1)], EdgePolicy::default()).unwrap_err();
    assert_eq!(sequence_code(err), "sequence-exhausted");
}

#[test]
fn graph_realizes_requested_degrees() {
    let sequence = DegreeSequence::Undirected(vec![2, 2, 2, 2, 2, 2]);
    let mut rng = RngHandle::from_seed(19);
    let graph =
        Graph::from_degree_sequence(&sequence, &DegreeSequenceOptions::default(), &mut rng)
            .unwrap();
    assert!(!graph.is_directed());
    assert_eq!(graph.point_count(), 6);
    assert_eq!(graph.edge_count(), 6);
    assert_eq!(&graph.degrees()[1..], &[2, 2, 2, 2, 2, 2]);
    let mut seen = std::collections::BTreeSet::new();
    for edge in graph.edges() {
        assert_ne!(edge.start, edge.end);
        assert!(seen.insert((edge.start, edge.end)));
    }
}

#[test]
fn directed_graph_realizes_requested_pairs() {
    let pairs = vec![(2, 1), (1, 2), (1, 1), (0, 0), (1, 1)];
    let sequence = DegreeSequence::Directed(pairs.clone());
    let mut rng = RngHandle::from_seed(23);
    let graph =
        Graph::from_degree_sequence(&sequence, &DegreeSequenceOptions::default(), &mut rng)
            .unwrap();
    assert!(graph.is_directed());
    assert_eq!(&graph.in_out_degrees()[1..], pairs.as_slice());
}

#[test]
fn empty_sequence_yields_empty_graph() {
    let mut rng = RngHandle::from_seed(1);
    let graph = Graph::from_degree_sequence(
        &DegreeSequence::Directed(Vec::new()),
        &DegreeSequenceOptions::default(),
        &mut rng,
    )
    .unwrap();
    assert_eq!(graph.point_count(), 0);
    assert!(graph.is_directed());
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn iteration_limit_caps_explicit_iterations() {
    let degrees = vec![3, 3, 2, 2, 2, 1, 1];
    let greedy = from_undirected_degree_sequence(&degrees, EdgePolicy::default())
        .unwrap()
        .edges();
    let options = DegreeSequenceOptions {
        iterations: Some(10_000),
        iter_limit: 0,
        ..DegreeSequenceOptions::default()
    };
    let mut rng = RngHandle::from_seed(9);
    let graph =
        Graph::from_degree_sequence(&DegreeSequence::Undirected(degrees), &options, &mut rng)
            .unwrap();
    let mut produced: Vec<(usize, usize)> = graph.edges().map(|e| (e.start, e.end)).collect();
    produced.sort();
    assert_eq!(produced, greedy);
}

#[test]
fn weights_come_from_the_weight_limit() {
    let options = DegreeSequenceOptions {
        weight_limit: tgen_graph::WeightLimit::new(-3, 3),
        ..DegreeSequenceOptions::default()
    };
    let mut rng = RngHandle::from_seed(31);
    let graph = Graph::from_degree_sequence(
        &DegreeSequence::Undirected(vec![3, 3, 3, 3]),
        &options,
        &mut rng,
    )
    .unwrap();
    assert!(graph.edges().all(|e| (-3..=3).contains(&e.weight)));
}

#[test]
fn iteration_estimates_follow_the_log_binomial() {
    assert!((estimate_comb(5, 2) - 10f64.ln()).abs() < 1e-9);
    assert_eq!(estimate_comb(2, 5), 0.0);
    assert_eq!(estimate_comb(7, 0), 0.0);

    assert_eq!(estimated_iterations(4, 1, false, EdgePolicy::default()), 0);
    // C(6, 3) = 20 distinct simple graphs on K4 slots with 3 edges.
    let expected = (20f64.ln() / 3f64.ln()) as usize;
    assert_eq!(estimated_iterations(4, 3, false, EdgePolicy::default()), expected);
    // With repeats the bound counts multisets: C(3 + 6 - 1, 3) = 56.
    let expected = (56f64.ln() / 3f64.ln()) as usize;
    assert_eq!(
        estimated_iterations(4, 3, false, EdgePolicy::new(false, true)),
        expected
    );
}

#[test]
fn loop_realizations_never_switch_into_repeated_edges() {
    let sequence = DegreeSequence::Undirected(vec![2, 2, 2, 2]);
    let options = DegreeSequenceOptions {
        self_loop: true,
        repeated_edges: false,
        iterations: Some(1),
        ..DegreeSequenceOptions::default()
    };
    for seed in 0..200 {
        let mut rng = RngHandle::from_seed(seed);
        let graph = Graph::from_degree_sequence(&sequence, &options, &mut rng).unwrap();
        assert_eq!(&graph.degrees()[1..], &[2, 2, 2, 2]);
        let mut seen = std::collections::BTreeSet::new();
        for edge in graph.edges() {
            assert!(seen.insert((edge.start, edge.end)), "seed {seed}");
        }
    }
}
