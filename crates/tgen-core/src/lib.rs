#![deny(missing_docs)]
#![doc = "Core contracts shared by the tgen generators: edge records, the edge iteration trait, errors and seeded randomness."]

use serde::{Deserialize, Serialize};

pub mod errors;
pub mod rng;

pub use errors::{ErrorInfo, GenError};
pub use rng::RngHandle;

/// 1-based vertex identifier. Valid identifiers lie in `[1, point_count]`.
pub type VertexId = usize;

/// Edge weight drawn by a weight generator.
pub type Weight = i64;

/// One arc of a generated graph.
///
/// Records carry no identity beyond their fields; parallel edges between the
/// same pair of vertices are distinct records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// Start vertex.
    pub start: VertexId,
    /// End vertex.
    pub end: VertexId,
    /// Weight assigned when the edge was added.
    pub weight: Weight,
}

impl Edge {
    /// Creates a new edge record.
    pub const fn new(start: VertexId, end: VertexId, weight: Weight) -> Self {
        Self { start, end, weight }
    }

    /// Returns the record with its endpoints exchanged.
    pub const fn reversed(&self) -> Self {
        Self {
            start: self.end,
            end: self.start,
            weight: self.weight,
        }
    }

    /// Returns whether both endpoints coincide.
    pub const fn is_self_loop(&self) -> bool {
        self.start == self.end
    }
}

/// Read-only edge enumeration contract consumed by formatters and projections.
///
/// Implementors yield every logical edge exactly once in canonical order: by
/// start vertex ascending, then insertion order. The sequence is lazy, finite
/// and restartable; calling [`EdgeSequence::edge_iter`] again starts over.
pub trait EdgeSequence {
    /// Number of vertices; valid identifiers are `1..=point_count`.
    fn point_count(&self) -> usize;

    /// Whether edges are arcs (`true`) or undirected links.
    fn is_directed(&self) -> bool;

    /// Returns a fresh iterator over the canonical edges.
    fn edge_iter(&self) -> Box<dyn Iterator<Item = Edge> + '_>;
}
