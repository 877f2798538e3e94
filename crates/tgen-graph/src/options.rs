//! Per-factory option structs.
//!
//! Every struct implements `Default` with the documented defaults and
//! deserializes with missing fields falling back to those defaults.

use serde::{Deserialize, Serialize};

use crate::generators::WeightLimit;
use crate::multiset::EdgePolicy;

/// Options for [`crate::Graph::tree`], [`crate::Graph::chain`],
/// [`crate::Graph::flower`] and [`crate::Graph::forest`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeOptions {
    /// Emit arcs parent → child instead of undirected links. Default `false`.
    pub directed: bool,
    /// Default weight range. Default `[1, 1]`.
    pub weight_limit: WeightLimit,
    /// Fraction of edges laid out as the path `1-2-3-…`. Default `0`.
    pub chain: f64,
    /// Fraction of edges laid out as a star around vertex 1. Default `0`.
    pub flower: f64,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            directed: false,
            weight_limit: WeightLimit::default(),
            chain: 0.0,
            flower: 0.0,
        }
    }
}

/// Options for [`crate::Graph::binary_tree`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinaryTreeOptions {
    /// Emit arcs parent → child. Default `false`.
    pub directed: bool,
    /// Default weight range. Default `[1, 1]`.
    pub weight_limit: WeightLimit,
    /// Probability that a new vertex becomes a left child. Default `0`.
    pub left: f64,
    /// Probability that a new vertex becomes a right child. Default `0`.
    ///
    /// The probability left over by `left + right` is split evenly.
    pub right: f64,
}

impl Default for BinaryTreeOptions {
    fn default() -> Self {
        Self {
            directed: false,
            weight_limit: WeightLimit::default(),
            left: 0.0,
            right: 0.0,
        }
    }
}

/// Options for [`crate::Graph::graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphOptions {
    /// Default `false`.
    pub directed: bool,
    /// Default `true`.
    pub self_loop: bool,
    /// Default `true`.
    pub repeated_edges: bool,
    /// Default `[1, 1]`.
    pub weight_limit: WeightLimit,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            directed: false,
            self_loop: true,
            repeated_edges: true,
            weight_limit: WeightLimit::default(),
        }
    }
}

/// Options for [`crate::Graph::dag`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DagOptions {
    /// Default `false`.
    pub self_loop: bool,
    /// Default `true`.
    pub repeated_edges: bool,
    /// Permit directed cycles (tree arcs are flipped at random and extra arcs
    /// keep their drawn orientation). Default `false`.
    #[serde(rename = "loop")]
    pub allow_cycles: bool,
    /// Default `[1, 1]`.
    pub weight_limit: WeightLimit,
}

impl Default for DagOptions {
    fn default() -> Self {
        Self {
            self_loop: false,
            repeated_edges: true,
            allow_cycles: false,
            weight_limit: WeightLimit::default(),
        }
    }
}

/// Options for [`crate::Graph::udag`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UdagOptions {
    /// Default `true`.
    pub self_loop: bool,
    /// Default `true`.
    pub repeated_edges: bool,
    /// Default `[1, 1]`.
    pub weight_limit: WeightLimit,
}

impl Default for UdagOptions {
    fn default() -> Self {
        Self {
            self_loop: true,
            repeated_edges: true,
            weight_limit: WeightLimit::default(),
        }
    }
}

/// Options for [`crate::Graph::connected`], which dispatches on `directed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectedOptions {
    /// Build a DAG-style graph instead of an undirected one. Default `false`.
    pub directed: bool,
    /// Unset means the target's own default (`false` directed, `true` undirected).
    pub self_loop: Option<bool>,
    /// Unset means `true`.
    pub repeated_edges: Option<bool>,
    /// Only meaningful when `directed`. Default `false`.
    #[serde(rename = "loop")]
    pub allow_cycles: bool,
    /// Default `[1, 1]`.
    pub weight_limit: WeightLimit,
}

impl ConnectedOptions {
    /// Options forwarded when `directed` is set.
    pub fn dag(&self) -> DagOptions {
        let defaults = DagOptions::default();
        DagOptions {
            self_loop: self.self_loop.unwrap_or(defaults.self_loop),
            repeated_edges: self.repeated_edges.unwrap_or(defaults.repeated_edges),
            allow_cycles: self.allow_cycles,
            weight_limit: self.weight_limit,
        }
    }

    /// Options forwarded when `directed` is unset.
    pub fn udag(&self) -> UdagOptions {
        let defaults = UdagOptions::default();
        UdagOptions {
            self_loop: self.self_loop.unwrap_or(defaults.self_loop),
            repeated_edges: self.repeated_edges.unwrap_or(defaults.repeated_edges),
            weight_limit: self.weight_limit,
        }
    }
}

/// Options for [`crate::Graph::hack_spfa`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HackSpfaOptions {
    /// Default `false`.
    pub directed: bool,
    /// Number of uniformly random edges appended after the pattern. Default `2`.
    pub extra_edge: usize,
    /// Default `[1, 1]`.
    pub weight_limit: WeightLimit,
}

impl Default for HackSpfaOptions {
    fn default() -> Self {
        Self {
            directed: false,
            extra_edge: 2,
            weight_limit: WeightLimit::default(),
        }
    }
}

/// Options for [`crate::Graph::from_degree_sequence`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DegreeSequenceOptions {
    /// Explicit number of switch attempts; unset means estimate it.
    pub iterations: Option<usize>,
    /// Default `false`.
    pub self_loop: bool,
    /// Default `false`.
    pub repeated_edges: bool,
    /// Default `[1, 1]`.
    pub weight_limit: WeightLimit,
    /// Hard cap on switch attempts, explicit or estimated. Default `1_000_000`.
    pub iter_limit: usize,
}

impl DegreeSequenceOptions {
    /// Edge policy used for both realization and switching.
    pub fn policy(&self) -> EdgePolicy {
        EdgePolicy::new(self.self_loop, self.repeated_edges)
    }
}

impl Default for DegreeSequenceOptions {
    fn default() -> Self {
        Self {
            iterations: None,
            self_loop: false,
            repeated_edges: false,
            weight_limit: WeightLimit::default(),
            iter_limit: 1_000_000,
        }
    }
}
