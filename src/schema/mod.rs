//! Declarative schema for a directed, labeled property graph
//!
//! This module implements the schema model:
//! - Vertex and edge labels drawn from closed, schema-defined sets
//! - Scalar field typing with nullability
//! - Outbound edge declarations with optional cardinalities
//! - Mandatory reverse-edge mappings
//! - Structural validation, fatal to startup on failure
//!
//! The [`GraphDefinition`] is pure data; the navigation surfaces derived
//! from it live in [`crate::surface`].

pub mod def;
pub mod field;
pub mod load;
pub mod types;

// Re-export main types
pub use def::{
    EdgeCardinality, EdgeRecord, EdgeSchema, GraphDefinition, SchemaError, SchemaResult,
    VertexSchema,
};
pub use field::{FieldSchema, FieldType, SchemaDefinition};
pub use load::{LoadError, LoadResult};
pub use types::{EdgeLabel, VertexLabel};
