//! Label types for the graph schema
//!
//! Vertex and edge labels are opaque identifiers drawn from the closed sets
//! declared by a [`GraphDefinition`](super::GraphDefinition).

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Vertex label (e.g., "dog", "user")
///
/// Names a class of graph vertex. Every edge destination must resolve to a
/// declared vertex label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct VertexLabel(String);

impl VertexLabel {
    pub fn new(label: impl Into<String>) -> Self {
        VertexLabel(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VertexLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Borrow<str> for VertexLabel {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<String> for VertexLabel {
    fn from(s: String) -> Self {
        VertexLabel(s)
    }
}

impl From<&str> for VertexLabel {
    fn from(s: &str) -> Self {
        VertexLabel(s.to_string())
    }
}

/// Edge label (e.g., "owns", "chews")
///
/// Names a class of directed relation. A reverse label (the logical opposite
/// direction of a declared edge) is itself an `EdgeLabel`, introduced by the
/// edge schema that names it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct EdgeLabel(String);

impl EdgeLabel {
    pub fn new(label: impl Into<String>) -> Self {
        EdgeLabel(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EdgeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Borrow<str> for EdgeLabel {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<String> for EdgeLabel {
    fn from(s: String) -> Self {
        EdgeLabel(s)
    }
}

impl From<&str> for EdgeLabel {
    fn from(s: &str) -> Self {
        EdgeLabel(s.to_string())
    }
}
