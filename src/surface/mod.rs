//! Navigation surface derivation engine
//!
//! Consumes a validated [`GraphDefinition`](crate::schema::GraphDefinition)
//! and computes, for each vertex label, the exact set of navigable members
//! on an instance of that vertex: lazy field accessors, declared outbound
//! edges, and inbound edges inferred by reversing other vertices' outbound
//! declarations.

pub mod member;
pub mod registry;

pub use member::{EdgeDirection, EdgeMember, FieldMember, Member};
pub use registry::{NavigationSurface, SurfaceRegistry};
