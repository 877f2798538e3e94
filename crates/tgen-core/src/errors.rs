//! Structured error types shared across tgen crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::VertexId;

/// Payload carried by every [`GenError`].
///
/// The sizes that most failures are about (`point_count`, `edge_count`, the
/// offending vertex) are typed fields; anything else goes in `context`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable kebab-case code, e.g. `odd-degree-sum`.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Vertex count of the structure being built.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point_count: Option<usize>,
    /// Requested or reached edge count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge_count: Option<usize>,
    /// Vertex the failure is about.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertex: Option<VertexId>,
    /// Remaining named values (fractions, sums, weight bounds).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub context: BTreeMap<String, String>,
    /// Suggested remedy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a payload with only a code and a message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            ..Self::default()
        }
    }

    /// Records the vertex count.
    pub fn points(mut self, point_count: usize) -> Self {
        self.point_count = Some(point_count);
        self
    }

    /// Records the edge count.
    pub fn edges(mut self, edge_count: usize) -> Self {
        self.edge_count = Some(edge_count);
        self
    }

    /// Records the offending vertex.
    pub fn at_vertex(mut self, vertex: VertexId) -> Self {
        self.vertex = Some(vertex);
        self
    }

    /// Records any other named value.
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    /// Sets the suggested remedy.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    fn details(&self) -> Vec<String> {
        let typed = [
            ("n", self.point_count),
            ("m", self.edge_count),
            ("vertex", self.vertex),
        ];
        typed
            .into_iter()
            .filter_map(|(key, value)| value.map(|value| format!("{key}={value}")))
            .chain(self.context.iter().map(|(key, value)| format!("{key}={value}")))
            .collect()
    }
}

/// Canonical error type for graph construction.
///
/// Every failure is raised synchronously while a structure is being built and
/// aborts construction; no partially built graph is ever handed back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum GenError {
    /// The degree sequence cannot be realized under the requested policy.
    #[error("sequence error: {0}")]
    Sequence(ErrorInfo),
    /// Structural parameters are out of range or mutually infeasible.
    #[error("parameter error: {0}")]
    Params(ErrorInfo),
    /// A caller broke an internal contract (e.g. removing a missing edge).
    #[error("precondition violated: {0}")]
    Precondition(ErrorInfo),
    /// A configuration document could not be parsed.
    #[error("config error: {0}")]
    Config(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        let details = self.details();
        if !details.is_empty() {
            write!(f, " ({})", details.join(", "))?;
        }
        if let Some(hint) = &self.hint {
            write!(f, "; {hint}")?;
        }
        Ok(())
    }
}

impl GenError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            GenError::Sequence(info)
            | GenError::Params(info)
            | GenError::Precondition(info)
            | GenError::Config(info) => info,
        }
    }

    /// Shorthand for the stable error code.
    pub fn code(&self) -> &str {
        &self.info().code
    }

    /// Wraps a payload as a non-graphical sequence failure.
    pub fn non_graphical(info: ErrorInfo) -> Self {
        GenError::Sequence(info.with_hint("degree sequence is not graphical"))
    }
}
