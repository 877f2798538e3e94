use rand::Rng;
use tgen_core::errors::GenError;
use tgen_core::{RngHandle, VertexId};
use tracing::{debug, instrument};

use crate::generators::WeightGen;
use crate::graph::Graph;
use crate::options::HackSpfaOptions;
use crate::validate::{self, max_edge_capacity};

/// Vertex id skipped by the grid layout: `(n + 3) / 2` for odd `n`, none otherwise.
fn skipped_vertex(point_count: usize) -> VertexId {
    if point_count % 2 == 1 {
        (point_count + 3) / 2
    } else {
        point_count + 3
    }
}

impl Graph {
    /// Two parallel chains joined rung by rung, plus `extra_edge` random edges.
    ///
    /// With `half = n / 2` the pattern is the chains `1..half` and
    /// `half+1..2*half`, then the rungs `(i, i + half)`. Odd `n` renumbers
    /// around one skipped vertex so every id stays within `[1, n]`.
    pub fn hack_spfa(
        point_count: usize,
        options: &HackSpfaOptions,
        rng: &mut RngHandle,
    ) -> Result<Graph, GenError> {
        let mut weights = options.weight_limit;
        Self::hack_spfa_with(point_count, options, &mut weights, rng)
    }

    /// [`Graph::hack_spfa`] with an explicit weight generator.
    #[instrument(
        level = "debug",
        skip(options, weights, rng),
        fields(extra_edge = options.extra_edge)
    )]
    pub fn hack_spfa_with<W>(
        point_count: usize,
        options: &HackSpfaOptions,
        weights: &mut W,
        rng: &mut RngHandle,
    ) -> Result<Graph, GenError>
    where
        W: WeightGen + ?Sized,
    {
        weights.check()?;
        let capacity = max_edge_capacity(point_count, options.directed, true);
        validate::check_capacity(point_count, options.extra_edge, capacity, true)?;

        let skip = skipped_vertex(point_count);
        let id = |x: VertexId| if x >= skip { x + 1 } else { x };
        let half = point_count / 2;

        let mut graph = Graph::new(point_count, options.directed);
        for i in 1..half {
            graph.add_edge(id(i), id(i + 1), weights.next_weight(rng))?;
            graph.add_edge(id(i + half), id(i + half + 1), weights.next_weight(rng))?;
        }
        for i in 1..=half {
            graph.add_edge(id(i), id(i + half), weights.next_weight(rng))?;
        }
        for _ in 0..options.extra_edge {
            let u = rng.gen_range(1..=point_count);
            let v = rng.gen_range(1..=point_count);
            graph.add_edge(u, v, weights.next_weight(rng))?;
        }

        debug!(half, skip, edges = graph.edge_count(), "spfa pattern built");
        Ok(graph)
    }
}
