//! The resolver boundary contract
//!
//! The core defines the shape of field and edge fetches; an external
//! data-access layer executes them. Suspension happens here, at the resolver
//! boundary, never inside the derivation engine.

use super::value::FieldValue;
use crate::schema::{EdgeLabel, VertexLabel};
use crate::surface::EdgeDirection;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Identity of one vertex instance, as handed across the resolver boundary
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VertexRef {
    /// Backend-assigned instance id
    pub id: u64,

    /// Label of the instance, fixing which navigation surface applies
    pub label: VertexLabel,
}

impl VertexRef {
    pub fn new(id: u64, label: impl Into<VertexLabel>) -> Self {
        VertexRef {
            id,
            label: label.into(),
        }
    }
}

impl fmt::Display for VertexRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.label, self.id)
    }
}

/// Identity of one traversed edge instance
///
/// Carries enough context for the resolver to locate the edge's own
/// properties.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeRef {
    /// Vertex the edge was declared on
    pub source: VertexRef,

    /// Primary edge label (the declared direction, even when the hop was
    /// inbound)
    pub label: EdgeLabel,

    /// Vertex the edge points at
    pub target: VertexRef,
}

impl fmt::Display for EdgeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -[{}]-> {}", self.source, self.label, self.target)
    }
}

/// Failures surfaced by the external resolver during field or edge access
///
/// Propagated to the caller of the navigation chain unchanged; the core
/// neither retries nor swallows these.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("vertex {0} not found")]
    VertexNotFound(VertexRef),

    #[error("field '{field}' unavailable on {vertex}")]
    FieldUnavailable { vertex: VertexRef, field: String },

    #[error("edge '{edge}' unavailable on {vertex}")]
    EdgeUnavailable { vertex: VertexRef, edge: EdgeLabel },

    #[error("backend error: {0}")]
    Backend(String),
}

/// Asynchronous data-access contract the navigation layer executes against
///
/// Implementations own instance lifecycle and storage; the core only fixes
/// the shape of the calls. A fetch may suspend arbitrarily and may be
/// cancelled by its caller; the core holds no resources across the boundary.
#[async_trait]
pub trait Resolver: Send + Sync {
    /// Produce the value of one scalar field on one vertex instance,
    /// conforming to the schema's declared type and nullability
    async fn field(&self, vertex: &VertexRef, name: &str) -> Result<FieldValue, FetchError>;

    /// Produce the identities of the destination instances reached by
    /// following `edge` from `vertex` in the given direction
    async fn neighbors(
        &self,
        vertex: &VertexRef,
        edge: &EdgeLabel,
        direction: EdgeDirection,
    ) -> Result<Vec<VertexRef>, FetchError>;

    /// Produce the value of one field attached to a specific edge instance
    async fn edge_field(&self, edge: &EdgeRef, name: &str) -> Result<FieldValue, FetchError>;
}
