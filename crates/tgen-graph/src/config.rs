use serde::{Deserialize, Serialize};
use tgen_core::errors::{ErrorInfo, GenError};
use tgen_core::RngHandle;
use tracing::info;

use crate::degree_seq::DegreeSequence;
use crate::graph::Graph;
use crate::options::{
    BinaryTreeOptions, ConnectedOptions, DagOptions, DegreeSequenceOptions, GraphOptions,
    HackSpfaOptions, TreeOptions, UdagOptions,
};

fn config_error(code: &str, err: impl ToString) -> GenError {
    GenError::Config(ErrorInfo::new(code, err.to_string()))
}

fn default_seed() -> u64 {
    0x7E57_CA5E_0000_0001
}

/// YAML/JSON document describing one graph to generate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Seed for the run's random stream.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Which factory to call and with what arguments.
    pub shape: Shape,
}

/// Factory selection, tagged by `kind`.
///
/// Every variant's `options` block may be omitted, in which case the
/// factory defaults apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
#[allow(missing_docs)]
pub enum Shape {
    Chain {
        point_count: usize,
        #[serde(default)]
        options: TreeOptions,
    },
    Flower {
        point_count: usize,
        #[serde(default)]
        options: TreeOptions,
    },
    Tree {
        point_count: usize,
        #[serde(default)]
        options: TreeOptions,
    },
    BinaryTree {
        point_count: usize,
        #[serde(default)]
        options: BinaryTreeOptions,
    },
    Graph {
        point_count: usize,
        edge_count: usize,
        #[serde(default)]
        options: GraphOptions,
    },
    Dag {
        point_count: usize,
        edge_count: usize,
        #[serde(default)]
        options: DagOptions,
    },
    Udag {
        point_count: usize,
        edge_count: usize,
        #[serde(default)]
        options: UdagOptions,
    },
    Connected {
        point_count: usize,
        edge_count: usize,
        #[serde(default)]
        options: ConnectedOptions,
    },
    Forest {
        point_count: usize,
        tree_count: usize,
        #[serde(default)]
        options: TreeOptions,
    },
    HackSpfa {
        point_count: usize,
        #[serde(default)]
        options: HackSpfaOptions,
    },
    DegreeSequence {
        sequence: DegreeSequence,
        #[serde(default)]
        options: DegreeSequenceOptions,
    },
}

impl Shape {
    /// Short name used in logs; matches the serialized `kind`.
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Chain { .. } => "chain",
            Shape::Flower { .. } => "flower",
            Shape::Tree { .. } => "tree",
            Shape::BinaryTree { .. } => "binary-tree",
            Shape::Graph { .. } => "graph",
            Shape::Dag { .. } => "dag",
            Shape::Udag { .. } => "udag",
            Shape::Connected { .. } => "connected",
            Shape::Forest { .. } => "forest",
            Shape::HackSpfa { .. } => "hack-spfa",
            Shape::DegreeSequence { .. } => "degree-sequence",
        }
    }

    /// Calls the selected factory with its default generators.
    pub fn build(&self, rng: &mut RngHandle) -> Result<Graph, GenError> {
        match self {
            Shape::Chain {
                point_count,
                options,
            } => Graph::chain(*point_count, options, rng),
            Shape::Flower {
                point_count,
                options,
            } => Graph::flower(*point_count, options, rng),
            Shape::Tree {
                point_count,
                options,
            } => Graph::tree(*point_count, options, rng),
            Shape::BinaryTree {
                point_count,
                options,
            } => Graph::binary_tree(*point_count, options, rng),
            Shape::Graph {
                point_count,
                edge_count,
                options,
            } => Graph::graph(*point_count, *edge_count, options, rng),
            Shape::Dag {
                point_count,
                edge_count,
                options,
            } => Graph::dag(*point_count, *edge_count, options, rng),
            Shape::Udag {
                point_count,
                edge_count,
                options,
            } => Graph::udag(*point_count, *edge_count, options, rng),
            Shape::Connected {
                point_count,
                edge_count,
                options,
            } => Graph::connected(*point_count, *edge_count, options, rng),
            Shape::Forest {
                point_count,
                tree_count,
                options,
            } => Graph::forest(*point_count, *tree_count, options, rng),
            Shape::HackSpfa {
                point_count,
                options,
            } => Graph::hack_spfa(*point_count, options, rng),
            Shape::DegreeSequence { sequence, options } => {
                Graph::from_degree_sequence(sequence, options, rng)
            }
        }
    }
}

impl GenerationRequest {
    /// Parses a YAML document.
    pub fn from_yaml_str(contents: &str) -> Result<Self, GenError> {
        serde_yaml::from_str(contents).map_err(|err| config_error("yaml_deserialize", err))
    }

    /// Parses a JSON document.
    pub fn from_json_str(contents: &str) -> Result<Self, GenError> {
        serde_json::from_str(contents).map_err(|err| config_error("json_deserialize", err))
    }

    /// Serializes the request back to YAML.
    pub fn to_yaml_string(&self) -> Result<String, GenError> {
        serde_yaml::to_string(self).map_err(|err| config_error("yaml_serialize", err))
    }

    /// Seeds a fresh [`RngHandle`] and builds the requested graph.
    pub fn build(&self) -> Result<Graph, GenError> {
        let mut rng = RngHandle::from_seed(self.seed);
        let graph = self.shape.build(&mut rng)?;
        info!(
            kind = self.shape.kind(),
            seed = self.seed,
            point_count = graph.point_count(),
            edge_count = graph.edge_count(),
            "generation request built"
        );
        Ok(graph)
    }
}
