use std::collections::BTreeMap;

use tgen_core::errors::{ErrorInfo, GenError};
use tgen_core::{RngHandle, VertexId};

use crate::weights::WeightTable;

/// Policy flags shared by realization and switching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgePolicy {
    /// Whether an edge may join a vertex to itself.
    pub self_loop: bool,
    /// Whether the same ordered pair may appear more than once.
    pub repeated_edges: bool,
}

impl EdgePolicy {
    /// Creates a policy from its two flags.
    pub const fn new(self_loop: bool, repeated_edges: bool) -> Self {
        Self {
            self_loop,
            repeated_edges,
        }
    }
}

/// Counted multiset of arcs with `O(log K)` mutation and weighted draws.
///
/// Every stored pair has a positive multiplicity; a pair whose count drops to
/// zero is purged on the same mutation. In undirected mode every non-loop
/// pair is stored in both orientations with equal counts, and the canonical
/// representative is the orientation with `u <= v`.
#[derive(Debug, Clone)]
pub struct EdgeMultiset {
    directed: bool,
    slots: BTreeMap<(VertexId, VertexId), usize>,
    keys: Vec<(VertexId, VertexId)>,
    weights: WeightTable,
    canonical_edges: usize,
}

impl EdgeMultiset {
    /// Creates an empty multiset.
    pub fn new(directed: bool) -> Self {
        Self {
            directed,
            slots: BTreeMap::new(),
            keys: Vec::new(),
            weights: WeightTable::default(),
            canonical_edges: 0,
        }
    }

    /// Builds a multiset by inserting every pair of the iterator.
    pub fn from_edges<I>(edges: I, directed: bool) -> Self
    where
        I: IntoIterator<Item = (VertexId, VertexId)>,
    {
        let mut multiset = Self::new(directed);
        for (u, v) in edges {
            multiset.insert(u, v);
        }
        multiset
    }

    /// Returns whether mutations are applied to the given orientation only.
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Number of canonical edge instances (mirrored copies are not counted).
    pub fn edge_count(&self) -> usize {
        self.canonical_edges
    }

    /// Returns whether no edge is stored.
    pub fn is_empty(&self) -> bool {
        self.canonical_edges == 0
    }

    /// Current multiplicity of the ordered pair `(u, v)`.
    pub fn multiplicity(&self, u: VertexId, v: VertexId) -> usize {
        self.slots
            .get(&(u, v))
            .map(|slot| self.weights.value(*slot) as usize)
            .unwrap_or(0)
    }

    /// Returns whether the ordered pair `(u, v)` is present.
    pub fn contains(&self, u: VertexId, v: VertexId) -> bool {
        self.slots.contains_key(&(u, v))
    }

    /// Adds one instance of `(u, v)`, mirroring it when undirected.
    pub fn insert(&mut self, u: VertexId, v: VertexId) {
        self.bump(u, v);
        if !self.directed && u != v {
            self.bump(v, u);
        }
        self.canonical_edges += 1;
    }

    /// Removes one instance of `(u, v)`, mirroring it when undirected.
    ///
    /// Removing a pair that is not stored is a precondition violation and
    /// leaves the multiset untouched.
    pub fn remove(&mut self, u: VertexId, v: VertexId) -> Result<(), GenError> {
        if !self.contains(u, v) || (!self.directed && !self.contains(v, u)) {
            return Err(GenError::Precondition(
                ErrorInfo::new("missing-edge", "cannot remove an edge with multiplicity zero")
                    .with_context("start", u)
                    .with_context("end", v),
            ));
        }
        self.drop_one(u, v);
        if !self.directed && u != v {
            self.drop_one(v, u);
        }
        self.canonical_edges -= 1;
        Ok(())
    }

    /// Canonical pairs, each repeated by its multiplicity, in sorted order.
    pub fn edges(&self) -> Vec<(VertexId, VertexId)> {
        let mut out = Vec::with_capacity(self.canonical_edges);
        for (&(u, v), &slot) in &self.slots {
            if self.directed || u <= v {
                let count = self.weights.value(slot) as usize;
                out.extend(std::iter::repeat((u, v)).take(count));
            }
        }
        out
    }

    /// Iterates every stored pair instance, mirrored copies included.
    pub fn iter(&self) -> impl Iterator<Item = (VertexId, VertexId)> + '_ {
        self.slots.iter().flat_map(move |(&key, &slot)| {
            std::iter::repeat(key).take(self.weights.value(slot) as usize)
        })
    }

    /// Largest vertex id stored, or `0` when empty.
    pub fn max_vertex(&self) -> VertexId {
        self.keys
            .iter()
            .map(|&(u, v)| u.max(v))
            .max()
            .unwrap_or(0)
    }

    /// Degree of every vertex, indexed by vertex id.
    ///
    /// Entry `v` is `(out_degree, in_degree)`. In undirected mode both halves
    /// equal the undirected degree, with self-loops counted twice. The result
    /// covers `1..=point_count`, extended to [`Self::max_vertex`] when a stored
    /// vertex lies beyond it.
    pub fn degrees(&self, point_count: usize) -> Vec<(usize, usize)> {
        let mut degrees = vec![(0usize, 0usize); point_count.max(self.max_vertex()) + 1];
        for (u, v) in self.edges() {
            if self.directed {
                degrees[u].0 += 1;
                degrees[v].1 += 1;
            } else {
                for endpoint in [u, v] {
                    degrees[endpoint].0 += 1;
                    degrees[endpoint].1 += 1;
                }
            }
        }
        degrees
    }

    /// Attempts one degree-preserving double-edge swap.
    ///
    /// Two edges are drawn independently with probability proportional to
    /// multiplicity. `(x1, y1), (x2, y2)` become `(x1, y2), (x2, y1)` unless the
    /// policy forbids the result, in which case `Ok(false)` is returned and
    /// nothing is mutated.
    pub fn switch(&mut self, policy: EdgePolicy, rng: &mut RngHandle) -> Result<bool, GenError> {
        let (Some(first), Some(second)) = (self.weights.sample(rng), self.weights.sample(rng))
        else {
            return Ok(false);
        };
        let (x1, y1) = self.orient(self.keys[first]);
        let (x2, y2) = self.orient(self.keys[second]);

        if policy.self_loop {
            if x1 == x2 || y1 == y2 {
                return Ok(false);
            }
        } else if x1 == x2 || x1 == y2 || y1 == x2 || y1 == y2 {
            return Ok(false);
        }

        if !policy.repeated_edges {
            if self.contains(x1, y2) || self.contains(x2, y1) {
                return Ok(false);
            }
            // Two undirected loops would both become the same edge `x1-x2`.
            if !self.directed && x1 == y1 && x2 == y2 {
                return Ok(false);
            }
        }

        self.remove(x1, y1)?;
        self.insert(x1, y2);
        self.remove(x2, y2)?;
        self.insert(x2, y1);
        Ok(true)
    }

    fn orient(&self, (u, v): (VertexId, VertexId)) -> (VertexId, VertexId) {
        if self.directed || u <= v {
            (u, v)
        } else {
            (v, u)
        }
    }

    fn bump(&mut self, u: VertexId, v: VertexId) {
        match self.slots.get(&(u, v)) {
            Some(&slot) => self.weights.increase(slot, 1),
            None => {
                let slot = self.keys.len();
                self.keys.push((u, v));
                self.weights.push(1);
                self.slots.insert((u, v), slot);
            }
        }
    }

    fn drop_one(&mut self, u: VertexId, v: VertexId) {
        let Some(&slot) = self.slots.get(&(u, v)) else {
            return;
        };
        self.weights.decrease(slot, 1);
        if self.weights.value(slot) == 0 {
            self.purge(slot);
        }
    }

    /// Swap-removes an empty slot so draws only ever see live pairs.
    fn purge(&mut self, slot: usize) {
        let last = self.keys.len() - 1;
        self.slots.remove(&self.keys[slot]);
        if slot != last {
            let moved_key = self.keys[last];
            let moved_count = self.weights.value(last);
            self.weights.increase(slot, moved_count);
            self.keys[slot] = moved_key;
            self.slots.insert(moved_key, slot);
        }
        self.keys.pop();
        self.weights.pop();
    }
}
