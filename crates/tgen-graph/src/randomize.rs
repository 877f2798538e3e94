use serde::{Deserialize, Serialize};
use tgen_core::errors::GenError;
use tgen_core::RngHandle;
use tracing::{debug, instrument, warn};

use crate::degree_seq::DegreeSequence;
use crate::generators::WeightGen;
use crate::graph::Graph;
use crate::multiset::{EdgeMultiset, EdgePolicy};
use crate::options::DegreeSequenceOptions;
use crate::validate::max_edge_capacity;

/// Counters reported by [`randomize`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchStats {
    /// Number of switch attempts, accepted or rejected.
    pub attempted: usize,
    /// Number of attempts that mutated the multiset.
    pub accepted: usize,
}

/// Natural log of `C(n, k)` as a sum of `ln(n - i) - ln(i + 1)` terms.
///
/// Returns `0.0` when `k > n`, where the binomial has no meaningful log.
pub fn estimate_comb(n: usize, k: usize) -> f64 {
    if k > n {
        return 0.0;
    }
    (0..k)
        .map(|i| ((n - i) as f64).ln() - ((i + 1) as f64).ln())
        .sum()
}

/// Log-space upper bound on the number of graphs with `edge_count` edges.
///
/// Without repeats this is `ln C(slots, E)`; with repeats it counts multisets,
/// `ln C(E + slots - 1, E)`, where `slots` is the distinct-edge capacity.
pub fn estimate_upper_bound(
    point_count: usize,
    edge_count: usize,
    directed: bool,
    policy: EdgePolicy,
) -> f64 {
    let slots = max_edge_capacity(point_count, directed, policy.self_loop);
    if policy.repeated_edges {
        estimate_comb((edge_count + slots).saturating_sub(1), edge_count)
    } else {
        estimate_comb(slots, edge_count)
    }
}

/// Heuristic number of switch steps: the upper bound divided by `ln(E)`.
///
/// Fewer than two edges admit no accepted switch, so the estimate is zero.
pub fn estimated_iterations(
    point_count: usize,
    edge_count: usize,
    directed: bool,
    policy: EdgePolicy,
) -> usize {
    if edge_count < 2 {
        return 0;
    }
    let bound = estimate_upper_bound(point_count, edge_count, directed, policy);
    (bound / (edge_count as f64).ln()) as usize
}

/// Runs `iterations` switch attempts against the multiset.
///
/// Every attempt counts, whether accepted or rejected; the degree of every
/// vertex is unchanged afterwards.
pub fn randomize(
    multiset: &mut EdgeMultiset,
    iterations: usize,
    policy: EdgePolicy,
    rng: &mut RngHandle,
) -> Result<SwitchStats, GenError> {
    let mut stats = SwitchStats::default();
    for _ in 0..iterations {
        stats.attempted += 1;
        if multiset.switch(policy, rng)? {
            stats.accepted += 1;
        }
    }
    debug!(
        attempted = stats.attempted,
        accepted = stats.accepted,
        "switch chain finished"
    );
    Ok(stats)
}

impl Graph {
    /// Builds a random graph realizing `sequence`.
    ///
    /// The sequence is realized greedily, mixed by switching and materialized
    /// with weights drawn from `options.weight_limit`.
    pub fn from_degree_sequence(
        sequence: &DegreeSequence,
        options: &DegreeSequenceOptions,
        rng: &mut RngHandle,
    ) -> Result<Graph, GenError> {
        let mut weights = options.weight_limit;
        Self::from_degree_sequence_with(sequence, options, &mut weights, rng)
    }

    /// [`Graph::from_degree_sequence`] with an explicit weight generator.
    #[instrument(
        level = "debug",
        skip(sequence, options, weights, rng),
        fields(point_count = sequence.len(), directed = sequence.is_directed())
    )]
    pub fn from_degree_sequence_with<W>(
        sequence: &DegreeSequence,
        options: &DegreeSequenceOptions,
        weights: &mut W,
        rng: &mut RngHandle,
    ) -> Result<Graph, GenError>
    where
        W: WeightGen + ?Sized,
    {
        weights.check()?;
        if sequence.is_empty() {
            return Ok(Graph::new(0, sequence.is_directed()));
        }
        let policy = options.policy();
        let mut multiset = sequence.realize(policy)?;
        let point_count = sequence.len();

        let requested = match options.iterations {
            Some(explicit) => explicit,
            None => estimated_iterations(
                point_count,
                multiset.edge_count(),
                sequence.is_directed(),
                policy,
            ),
        };
        if requested > options.iter_limit {
            warn!(
                requested,
                iter_limit = options.iter_limit,
                "switch iterations capped"
            );
        }
        let iterations = requested.min(options.iter_limit);
        randomize(&mut multiset, iterations, policy, rng)?;

        Graph::from_multiset(&multiset, point_count, weights, rng)
    }
}
