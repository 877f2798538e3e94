use sha2::{Digest, Sha256};
use tgen_core::Edge;

use crate::graph::Graph;

/// Computes a stable hex digest of the graph's edge list.
///
/// The digest covers directedness, vertex count and every canonical edge in
/// canonical order, weights included. Two graphs hash equal exactly when they
/// would print identically.
pub fn canonical_hash(graph: &Graph) -> String {
    let mut hasher = Sha256::new();
    if graph.is_directed() {
        hasher.update(b"directed");
    } else {
        hasher.update(b"undirected");
    }
    hasher.update((graph.point_count() as u64).to_le_bytes());
    hasher.update((graph.edge_count() as u64).to_le_bytes());
    for edge in graph.edges() {
        update_edge(edge, &mut hasher);
    }
    format!("{:x}", hasher.finalize())
}

fn update_edge(edge: &Edge, hasher: &mut Sha256) {
    hasher.update((edge.start as u64).to_le_bytes());
    hasher.update((edge.end as u64).to_le_bytes());
    hasher.update(edge.weight.to_le_bytes());
}
