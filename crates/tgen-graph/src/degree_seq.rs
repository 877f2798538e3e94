use serde::{Deserialize, Serialize};
use tgen_core::errors::{ErrorInfo, GenError};
use tgen_core::VertexId;
use tracing::{debug, instrument};

use crate::multiset::{EdgeMultiset, EdgePolicy};

/// Degree sequence accepted by [`crate::Graph::from_degree_sequence`].
///
/// Position `i` (0-based) describes vertex `i + 1`. Serialized as
/// `{ direction: undirected | directed, degrees: [...] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "direction", content = "degrees", rename_all = "kebab-case")]
pub enum DegreeSequence {
    /// Undirected degrees, self-loops counting twice.
    Undirected(Vec<usize>),
    /// Directed `(out_degree, in_degree)` pairs.
    Directed(Vec<(usize, usize)>),
}

impl DegreeSequence {
    /// Number of vertices described by the sequence.
    pub fn len(&self) -> usize {
        match self {
            DegreeSequence::Undirected(degrees) => degrees.len(),
            DegreeSequence::Directed(pairs) => pairs.len(),
        }
    }

    /// Returns whether the sequence describes no vertex.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns whether the sequence describes a directed graph.
    pub fn is_directed(&self) -> bool {
        matches!(self, DegreeSequence::Directed(_))
    }

    /// Realizes the sequence greedily into a fresh multiset.
    pub fn realize(&self, policy: EdgePolicy) -> Result<EdgeMultiset, GenError> {
        match self {
            DegreeSequence::Undirected(degrees) => from_undirected_degree_sequence(degrees, policy),
            DegreeSequence::Directed(pairs) => from_directed_degree_sequence(pairs, policy),
        }
    }
}

fn exhausted(point_count: usize, vertex: VertexId, demand: usize) -> GenError {
    GenError::non_graphical(
        ErrorInfo::new(
            "sequence-exhausted",
            "ran out of partner vertices before the demand was met",
        )
        .points(point_count)
        .at_vertex(vertex)
        .with_context("remaining", demand),
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct DirectedSlot {
    out: usize,
    inbound: usize,
    vertex: VertexId,
}

/// Realizes a directed `(out_degree, in_degree)` sequence (Kleitman–Wang).
///
/// Each round picks the highest-ranked vertex that still needs in-degree as
/// the sink and feeds its whole demand from the highest-ranked sources.
#[instrument(level = "debug", skip(sequence), fields(point_count = sequence.len()))]
pub fn from_directed_degree_sequence(
    sequence: &[(usize, usize)],
    policy: EdgePolicy,
) -> Result<EdgeMultiset, GenError> {
    let out_sum: usize = sequence.iter().map(|(out, _)| out).sum();
    let in_sum: usize = sequence.iter().map(|(_, inbound)| inbound).sum();
    if out_sum != in_sum {
        return Err(GenError::non_graphical(
            ErrorInfo::new(
                "unbalanced-degree-sum",
                "out-degree and in-degree sums differ",
            )
            .with_context("out_sum", out_sum)
            .with_context("in_sum", in_sum),
        ));
    }

    let mut multiset = EdgeMultiset::new(true);
    let mut work: Vec<DirectedSlot> = sequence
        .iter()
        .enumerate()
        .map(|(idx, &(out, inbound))| DirectedSlot {
            out,
            inbound,
            vertex: idx + 1,
        })
        .collect();
    work.sort_by(|a, b| b.cmp(a));

    while let Some(sink_pos) = work.iter().position(|slot| slot.inbound > 0) {
        let sink = work[sink_pos].vertex;
        let mut demand = work[sink_pos].inbound;
        work[sink_pos].inbound = 0;

        let mut cursor = 0usize;
        while demand > 0 {
            let mut slot = work
                .get(cursor)
                .ok_or_else(|| exhausted(sequence.len(), sink, demand))?;
            if slot.vertex == sink && !policy.self_loop {
                cursor += 1;
                slot = work
                    .get(cursor)
                    .ok_or_else(|| exhausted(sequence.len(), sink, demand))?;
            }
            let source = slot.vertex;
            while demand > 0 && work[cursor].out > 0 {
                demand -= 1;
                work[cursor].out -= 1;
                multiset.insert(source, sink);
                if !policy.repeated_edges {
                    break;
                }
            }
            cursor += 1;
        }
        work.sort_by(|a, b| b.cmp(a));
    }

    debug!(edges = multiset.edge_count(), "directed sequence realized");
    Ok(multiset)
}

/// Realizes an undirected degree sequence (Havel–Hakimi).
///
/// The highest remaining vertex spends its degree first on self-loops (when
/// allowed) and then on the next-highest vertices in ranked order.
#[instrument(level = "debug", skip(sequence), fields(point_count = sequence.len()))]
pub fn from_undirected_degree_sequence(
    sequence: &[usize],
    policy: EdgePolicy,
) -> Result<EdgeMultiset, GenError> {
    let total: usize = sequence.iter().sum();
    if total % 2 != 0 {
        return Err(GenError::non_graphical(
            ErrorInfo::new("odd-degree-sum", "degree sum must be even").with_context("sum", total),
        ));
    }

    let mut multiset = EdgeMultiset::new(false);
    let mut work: Vec<(usize, VertexId)> = sequence
        .iter()
        .enumerate()
        .map(|(idx, &degree)| (degree, idx + 1))
        .collect();
    work.sort_by(|a, b| b.cmp(a));

    let mut emitted = 0usize;
    while emitted * 2 < total {
        let (mut demand, x) = work[0];
        work[0].0 = 0;

        if policy.self_loop {
            while demand > 1 {
                demand -= 2;
                multiset.insert(x, x);
                emitted += 1;
                if !policy.repeated_edges {
                    break;
                }
            }
        }

        let mut cursor = 1usize;
        while demand > 0 {
            let partner = work
                .get_mut(cursor)
                .ok_or_else(|| exhausted(sequence.len(), x, demand))?;
            while demand > 0 && partner.0 > 0 {
                demand -= 1;
                partner.0 -= 1;
                multiset.insert(x, partner.1);
                emitted += 1;
                if !policy.repeated_edges {
                    break;
                }
            }
            cursor += 1;
        }
        work.sort_by(|a, b| b.cmp(a));
    }

    debug!(edges = multiset.edge_count(), "undirected sequence realized");
    Ok(multiset)
}
