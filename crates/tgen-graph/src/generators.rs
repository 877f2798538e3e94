use rand::Rng;
use serde::{Deserialize, Serialize};
use tgen_core::errors::GenError;
use tgen_core::{RngHandle, VertexId, Weight};

use crate::validate;

/// Source of edge weights.
///
/// Any `FnMut(&mut RngHandle) -> Weight` closure is a weight generator; the
/// default is [`WeightLimit`], which draws uniformly from an inclusive range.
pub trait WeightGen {
    /// Produces the weight for the next edge.
    fn next_weight(&mut self, rng: &mut RngHandle) -> Weight;

    /// Rejects a generator that cannot produce any weight.
    ///
    /// Every `*_with` factory calls this before drawing. Closures are always
    /// accepted.
    fn check(&self) -> Result<(), GenError> {
        Ok(())
    }
}

impl<F> WeightGen for F
where
    F: FnMut(&mut RngHandle) -> Weight,
{
    fn next_weight(&mut self, rng: &mut RngHandle) -> Weight {
        self(rng)
    }
}

/// Chooses the parent of a vertex attached during random tree growth.
///
/// Closures `FnMut(vertex, &mut RngHandle) -> parent` qualify. The parent must
/// lie in `[1, vertex - 1]`; factories reject anything else.
pub trait ParentGen {
    /// Returns the parent for `vertex`.
    fn parent_of(&mut self, vertex: VertexId, rng: &mut RngHandle) -> VertexId;
}

impl<F> ParentGen for F
where
    F: FnMut(VertexId, &mut RngHandle) -> VertexId,
{
    fn parent_of(&mut self, vertex: VertexId, rng: &mut RngHandle) -> VertexId {
        self(vertex, rng)
    }
}

/// Default parent generator: uniform over every lower-indexed vertex.
///
/// Vertex 1 has no lower-indexed vertex; it is answered with `1`, which the
/// factories reject as `parent-out-of-range`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformParent;

impl ParentGen for UniformParent {
    fn parent_of(&mut self, vertex: VertexId, rng: &mut RngHandle) -> VertexId {
        rng.gen_range(1..vertex.max(2))
    }
}

/// Inclusive weight range `[lo, hi]`, the default weight generator.
///
/// Deserializes either from a `[lo, hi]` pair or from a single integer `hi`,
/// which means `[1, hi]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WeightLimitRepr", into = "(Weight, Weight)")]
pub struct WeightLimit {
    /// Smallest weight that may be drawn.
    pub lo: Weight,
    /// Largest weight that may be drawn.
    pub hi: Weight,
}

impl WeightLimit {
    /// Creates the range `[lo, hi]`.
    pub const fn new(lo: Weight, hi: Weight) -> Self {
        Self { lo, hi }
    }

    /// Creates the range `[1, hi]`.
    pub const fn up_to(hi: Weight) -> Self {
        Self { lo: 1, hi }
    }
}

impl Default for WeightLimit {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl WeightGen for WeightLimit {
    fn next_weight(&mut self, rng: &mut RngHandle) -> Weight {
        rng.gen_range(self.lo..=self.hi)
    }

    fn check(&self) -> Result<(), GenError> {
        validate::check_weight_limit(self)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WeightLimitRepr {
    Max(Weight),
    Range(Weight, Weight),
}

impl From<WeightLimitRepr> for WeightLimit {
    fn from(value: WeightLimitRepr) -> Self {
        match value {
            WeightLimitRepr::Max(hi) => WeightLimit::up_to(hi),
            WeightLimitRepr::Range(lo, hi) => WeightLimit::new(lo, hi),
        }
    }
}

impl From<WeightLimit> for (Weight, Weight) {
    fn from(value: WeightLimit) -> Self {
        (value.lo, value.hi)
    }
}
