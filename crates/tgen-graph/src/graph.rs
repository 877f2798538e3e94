use serde::{Deserialize, Serialize};
use tgen_core::errors::{ErrorInfo, GenError};
use tgen_core::{Edge, EdgeSequence, RngHandle, VertexId, Weight};

use crate::generators::WeightGen;
use crate::multiset::EdgeMultiset;

/// Adjacency-list graph produced by every factory.
///
/// `adjacency[v]` lists the records starting at `v` in insertion order; slot 0
/// is unused so vertex ids index directly. Undirected non-loop edges are
/// stored at both endpoints, self-loops once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    directed: bool,
    adjacency: Vec<Vec<Edge>>,
}

impl Graph {
    /// Creates a graph with `point_count` isolated vertices.
    pub fn new(point_count: usize, directed: bool) -> Self {
        Self {
            directed,
            adjacency: vec![Vec::new(); point_count + 1],
        }
    }

    /// Number of vertices.
    pub fn point_count(&self) -> usize {
        self.adjacency.len().saturating_sub(1)
    }

    /// Returns whether edges are arcs.
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Records stored at `vertex`, mirrored copies included.
    pub fn adjacency(&self, vertex: VertexId) -> &[Edge] {
        self.adjacency.get(vertex).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Adds an edge; undirected non-loop edges are mirrored.
    pub fn add_edge(&mut self, u: VertexId, v: VertexId, weight: Weight) -> Result<(), GenError> {
        let point_count = self.point_count();
        for vertex in [u, v] {
            if !(1..=point_count).contains(&vertex) {
                return Err(GenError::Precondition(
                    ErrorInfo::new("vertex-out-of-range", "vertex id outside 1..=point_count")
                        .at_vertex(vertex)
                        .points(point_count),
                ));
            }
        }
        let edge = Edge::new(u, v, weight);
        self.adjacency[u].push(edge);
        if !self.directed && !edge.is_self_loop() {
            self.adjacency[v].push(edge.reversed());
        }
        Ok(())
    }

    /// Canonical edges: by start vertex, then insertion order, each logical
    /// edge once.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        let directed = self.directed;
        self.adjacency
            .iter()
            .flatten()
            .filter(move |edge| directed || edge.end >= edge.start)
    }

    /// Number of canonical edges.
    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }

    /// Undirected degree per vertex (index 0 unused), self-loops counted twice.
    ///
    /// For directed graphs this is `out + in`.
    pub fn degrees(&self) -> Vec<usize> {
        self.in_out_degrees()
            .into_iter()
            .map(|(out, inbound)| if self.directed { out + inbound } else { out })
            .collect()
    }

    /// `(out_degree, in_degree)` per vertex (index 0 unused).
    ///
    /// Undirected graphs report the undirected degree in both halves.
    pub fn in_out_degrees(&self) -> Vec<(usize, usize)> {
        let mut degrees = vec![(0usize, 0usize); self.adjacency.len()];
        for edge in self.edges() {
            if self.directed {
                degrees[edge.start].0 += 1;
                degrees[edge.end].1 += 1;
            } else {
                for endpoint in [edge.start, edge.end] {
                    degrees[endpoint].0 += 1;
                    degrees[endpoint].1 += 1;
                }
            }
        }
        degrees
    }

    /// Materializes a finalized multiset, drawing a fresh weight per edge.
    pub fn from_multiset<W>(
        multiset: &EdgeMultiset,
        point_count: usize,
        weights: &mut W,
        rng: &mut RngHandle,
    ) -> Result<Self, GenError>
    where
        W: WeightGen + ?Sized,
    {
        weights.check()?;
        let mut graph = Graph::new(point_count, multiset.is_directed());
        for (u, v) in multiset.edges() {
            let weight = weights.next_weight(rng);
            graph.add_edge(u, v, weight)?;
        }
        Ok(graph)
    }
}

impl EdgeSequence for Graph {
    fn point_count(&self) -> usize {
        Graph::point_count(self)
    }

    fn is_directed(&self) -> bool {
        self.directed
    }

    fn edge_iter(&self) -> Box<dyn Iterator<Item = Edge> + '_> {
        Box::new(self.edges().copied())
    }
}
