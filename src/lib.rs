//! Marga
//!
//! Schema-driven navigation surfaces for directed, labeled property graphs.
//!
//! A [`GraphDefinition`](schema::GraphDefinition) declares vertex labels,
//! edge labels, scalar field types, edge cardinalities, and mandatory
//! reverse-edge mappings. From that definition, the derivation engine
//! computes, for every vertex label, the exact set of navigable members on
//! an instance of that vertex: lazy field accessors, declared outbound
//! edges, and the inbound edges inferred from every other vertex whose
//! outbound edges target it. The derived surfaces back a generic,
//! schema-checked traversal API that executes against an external async data
//! resolver.
//!
//! # Architecture
//!
//! - [`schema`]: the declarative schema model and its structural validation
//! - [`surface`]: the derivation engine producing one navigation surface
//!   per vertex label, computed once at schema-load time
//! - [`traverse`]: the traversal protocol, with vertex/edge instance
//!   handles, the async [`Resolver`](traverse::Resolver) boundary, and an
//!   in-memory reference resolver
//!
//! # Example Usage
//!
//! ```rust
//! use marga::schema::{
//!     EdgeRecord, EdgeSchema, FieldSchema, FieldType, GraphDefinition, VertexSchema,
//! };
//! use marga::surface::SurfaceRegistry;
//!
//! let def = GraphDefinition::new()
//!     .with_vertex(
//!         "dog",
//!         VertexSchema::new()
//!             .with_field("name", FieldSchema::new(FieldType::String))
//!             .with_edge("loves", EdgeRecord::new("user")),
//!     )
//!     .with_vertex(
//!         "user",
//!         VertexSchema::new().with_edge("owns", EdgeRecord::new("dog")),
//!     )
//!     .with_edge("loves", EdgeSchema::new("lovedBy"))
//!     .with_edge("owns", EdgeSchema::new("ownedBy"));
//!
//! let registry = SurfaceRegistry::derive(&def).unwrap();
//!
//! // dog exposes its field, its declared outbound edge, and the inbound
//! // edge inferred from user.owns.
//! let dog = registry.surface(&"dog".into()).unwrap();
//! let members: Vec<&str> = dog.member_names().collect();
//! assert_eq!(members, vec!["name", "loves", "ownedBy"]);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod schema;
pub mod surface;
pub mod traverse;

// Re-export main types for convenience
pub use schema::{
    EdgeCardinality, EdgeLabel, EdgeRecord, EdgeSchema, FieldSchema, FieldType, GraphDefinition,
    SchemaDefinition, SchemaError, SchemaResult, VertexLabel, VertexSchema,
};

pub use surface::{
    EdgeDirection, EdgeMember, FieldMember, Member, NavigationSurface, SurfaceRegistry,
};

pub use traverse::{
    EdgeHandle, EdgeRef, EdgeTarget, FetchError, FieldValue, GraphNavigator, MemoryGraph,
    Resolver, TraversalError, TraversalResult, VertexHandle, VertexRef,
};
