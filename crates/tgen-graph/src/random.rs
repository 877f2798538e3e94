use std::collections::BTreeSet;

use rand::Rng;
use tgen_core::errors::GenError;
use tgen_core::{Edge, RngHandle, VertexId};
use tracing::{debug, instrument};

use crate::generators::{UniformParent, WeightGen};
use crate::graph::Graph;
use crate::options::{ConnectedOptions, DagOptions, GraphOptions, TreeOptions, UdagOptions};
use crate::validate::{self, max_edge_capacity};

/// Vertex pairs already placed, tracked only when repeats are disallowed.
struct PlacedPairs {
    directed: bool,
    pairs: Option<BTreeSet<(VertexId, VertexId)>>,
}

impl PlacedPairs {
    fn new(directed: bool, repeated_edges: bool) -> Self {
        Self {
            directed,
            pairs: (!repeated_edges).then(BTreeSet::new),
        }
    }

    fn contains(&self, u: VertexId, v: VertexId) -> bool {
        self.pairs
            .as_ref()
            .is_some_and(|pairs| pairs.contains(&(u, v)))
    }

    fn insert(&mut self, u: VertexId, v: VertexId) {
        if let Some(pairs) = self.pairs.as_mut() {
            pairs.insert((u, v));
            if !self.directed {
                pairs.insert((v, u));
            }
        }
    }
}

fn draw_pair(point_count: usize, rng: &mut RngHandle) -> (VertexId, VertexId) {
    let u = rng.gen_range(1..=point_count);
    let v = rng.gen_range(1..=point_count);
    (u, v)
}

/// Spanning tree on `point_count` vertices with uniform attachment.
fn spanning_tree<W>(
    point_count: usize,
    weights: &mut W,
    rng: &mut RngHandle,
) -> Result<Vec<Edge>, GenError>
where
    W: WeightGen + ?Sized,
{
    let tree = Graph::tree_with(
        point_count,
        &TreeOptions::default(),
        weights,
        &mut UniformParent,
        rng,
    )?;
    Ok(tree.edges().copied().collect())
}

impl Graph {
    /// Uniformly random graph with exactly `edge_count` edges.
    pub fn graph(
        point_count: usize,
        edge_count: usize,
        options: &GraphOptions,
        rng: &mut RngHandle,
    ) -> Result<Graph, GenError> {
        let mut weights = options.weight_limit;
        Self::graph_with(point_count, edge_count, options, &mut weights, rng)
    }

    /// [`Graph::graph`] with an explicit weight generator.
    ///
    /// Endpoints are drawn uniformly from `[1, point_count]` and rejected when
    /// they violate the self-loop or repeat policy.
    #[instrument(
        level = "debug",
        skip(options, weights, rng),
        fields(directed = options.directed)
    )]
    pub fn graph_with<W>(
        point_count: usize,
        edge_count: usize,
        options: &GraphOptions,
        weights: &mut W,
        rng: &mut RngHandle,
    ) -> Result<Graph, GenError>
    where
        W: WeightGen + ?Sized,
    {
        weights.check()?;
        let capacity = max_edge_capacity(point_count, options.directed, options.self_loop);
        validate::check_capacity(point_count, edge_count, capacity, options.repeated_edges)?;

        let mut graph = Graph::new(point_count, options.directed);
        let mut placed = PlacedPairs::new(options.directed, options.repeated_edges);
        let mut accepted = 0usize;
        let mut rejected = 0usize;
        while accepted < edge_count {
            let (u, v) = draw_pair(point_count, rng);
            if (!options.self_loop && u == v) || placed.contains(u, v) {
                rejected += 1;
                continue;
            }
            graph.add_edge(u, v, weights.next_weight(rng))?;
            placed.insert(u, v);
            accepted += 1;
        }

        debug!(accepted, rejected, "random graph built");
        Ok(graph)
    }

    /// Connected directed graph built from a spanning tree plus random arcs.
    ///
    /// Unless `allow_cycles` is set every arc points from the lower to the
    /// higher vertex id, so the result is acyclic.
    pub fn dag(
        point_count: usize,
        edge_count: usize,
        options: &DagOptions,
        rng: &mut RngHandle,
    ) -> Result<Graph, GenError> {
        let mut weights = options.weight_limit;
        Self::dag_with(point_count, edge_count, options, &mut weights, rng)
    }

    /// [`Graph::dag`] with an explicit weight generator.
    #[instrument(
        level = "debug",
        skip(options, weights, rng),
        fields(allow_cycles = options.allow_cycles)
    )]
    pub fn dag_with<W>(
        point_count: usize,
        edge_count: usize,
        options: &DagOptions,
        weights: &mut W,
        rng: &mut RngHandle,
    ) -> Result<Graph, GenError>
    where
        W: WeightGen + ?Sized,
    {
        weights.check()?;
        validate::check_connectivity_floor(point_count, edge_count)?;
        // Acyclic graphs only use one orientation of each pair.
        let capacity = max_edge_capacity(point_count, options.allow_cycles, options.self_loop);
        validate::check_capacity(point_count, edge_count, capacity, options.repeated_edges)?;

        let mut graph = Graph::new(point_count, true);
        let mut placed = PlacedPairs::new(true, options.repeated_edges);
        for edge in spanning_tree(point_count, weights, rng)? {
            let (mut u, mut v) = (edge.start, edge.end);
            if options.allow_cycles && rng.gen_bool(0.5) {
                std::mem::swap(&mut u, &mut v);
            }
            graph.add_edge(u, v, edge.weight)?;
            placed.insert(u, v);
        }

        let mut accepted = point_count.saturating_sub(1);
        let mut rejected = 0usize;
        while accepted < edge_count {
            let (mut u, mut v) = draw_pair(point_count, rng);
            if !options.allow_cycles && u > v {
                std::mem::swap(&mut u, &mut v);
            }
            if (!options.self_loop && u == v) || placed.contains(u, v) {
                rejected += 1;
                continue;
            }
            graph.add_edge(u, v, weights.next_weight(rng))?;
            placed.insert(u, v);
            accepted += 1;
        }

        debug!(accepted, rejected, "dag built");
        Ok(graph)
    }

    /// Connected undirected graph built from a spanning tree plus random edges.
    pub fn udag(
        point_count: usize,
        edge_count: usize,
        options: &UdagOptions,
        rng: &mut RngHandle,
    ) -> Result<Graph, GenError> {
        let mut weights = options.weight_limit;
        Self::udag_with(point_count, edge_count, options, &mut weights, rng)
    }

    /// [`Graph::udag`] with an explicit weight generator.
    #[instrument(level = "debug", skip(options, weights, rng))]
    pub fn udag_with<W>(
        point_count: usize,
        edge_count: usize,
        options: &UdagOptions,
        weights: &mut W,
        rng: &mut RngHandle,
    ) -> Result<Graph, GenError>
    where
        W: WeightGen + ?Sized,
    {
        weights.check()?;
        validate::check_connectivity_floor(point_count, edge_count)?;
        let capacity = max_edge_capacity(point_count, false, options.self_loop);
        validate::check_capacity(point_count, edge_count, capacity, options.repeated_edges)?;

        let mut graph = Graph::new(point_count, false);
        let mut placed = PlacedPairs::new(false, options.repeated_edges);
        for edge in spanning_tree(point_count, weights, rng)? {
            graph.add_edge(edge.start, edge.end, edge.weight)?;
            placed.insert(edge.start, edge.end);
        }

        let mut accepted = point_count.saturating_sub(1);
        let mut rejected = 0usize;
        while accepted < edge_count {
            let (u, v) = draw_pair(point_count, rng);
            if (!options.self_loop && u == v) || placed.contains(u, v) {
                rejected += 1;
                continue;
            }
            graph.add_edge(u, v, weights.next_weight(rng))?;
            placed.insert(u, v);
            accepted += 1;
        }

        debug!(accepted, rejected, "udag built");
        Ok(graph)
    }

    /// Connected graph: [`Graph::dag`] when `directed`, [`Graph::udag`] otherwise.
    pub fn connected(
        point_count: usize,
        edge_count: usize,
        options: &ConnectedOptions,
        rng: &mut RngHandle,
    ) -> Result<Graph, GenError> {
        if options.directed {
            Self::dag(point_count, edge_count, &options.dag(), rng)
        } else {
            Self::udag(point_count, edge_count, &options.udag(), rng)
        }
    }

    /// [`Graph::connected`] with an explicit weight generator.
    pub fn connected_with<W>(
        point_count: usize,
        edge_count: usize,
        options: &ConnectedOptions,
        weights: &mut W,
        rng: &mut RngHandle,
    ) -> Result<Graph, GenError>
    where
        W: WeightGen + ?Sized,
    {
        if options.directed {
            Self::dag_with(point_count, edge_count, &options.dag(), weights, rng)
        } else {
            Self::udag_with(point_count, edge_count, &options.udag(), weights, rng)
        }
    }
}
