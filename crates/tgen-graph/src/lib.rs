#![deny(missing_docs)]

//! Randomized graph, tree and degree-sequence generators for judge test data.
//!
//! Every factory is an associated function on [`Graph`] that takes its
//! parameters, an options struct and a seeded [`tgen_core::RngHandle`]. The
//! `*_with` variants accept custom weight and parent generators.

mod adversarial;
mod config;
mod degree_seq;
mod generators;
mod graph;
mod hash;
mod multiset;
mod options;
mod random;
mod randomize;
mod trees;
mod validate;
mod weights;

pub use config::{GenerationRequest, Shape};
pub use degree_seq::{
    from_directed_degree_sequence, from_undirected_degree_sequence, DegreeSequence,
};
pub use generators::{ParentGen, UniformParent, WeightGen, WeightLimit};
pub use graph::Graph;
pub use hash::canonical_hash;
pub use multiset::{EdgeMultiset, EdgePolicy};
pub use options::{
    BinaryTreeOptions, ConnectedOptions, DagOptions, DegreeSequenceOptions, GraphOptions,
    HackSpfaOptions, TreeOptions, UdagOptions,
};
pub use randomize::{
    estimate_comb, estimate_upper_bound, estimated_iterations, randomize, SwitchStats,
};
pub use validate::max_edge_capacity;
