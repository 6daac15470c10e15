//! Members of a derived navigation surface

use crate::schema::{EdgeCardinality, EdgeLabel, FieldSchema, SchemaDefinition, VertexLabel};
use serde::{Deserialize, Serialize};

/// Direction of an edge member relative to the vertex that owns the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeDirection {
    /// Declared on this vertex, navigating to the declared destination
    Outbound,
    /// Inferred because another vertex targets this one; named by the
    /// reverse label
    Inbound,
}

/// A lazy scalar accessor member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMember {
    /// Member name (the field name)
    pub name: String,

    /// Declared storage type and nullability
    pub schema: FieldSchema,
}

/// An edge navigation member, outbound or inbound
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeMember {
    /// Member name: the edge label for outbound members, the reverse label
    /// for inbound members
    pub name: String,

    /// Primary edge label this member traverses (for inbound members, the
    /// label the *source* vertex declared)
    pub label: EdgeLabel,

    /// Direction relative to the owning vertex
    pub direction: EdgeDirection,

    /// Multiplicity seen from the owning vertex; inbound members carry the
    /// inverse of the declared forward cardinality
    pub cardinality: EdgeCardinality,

    /// Possible destination vertex labels. Exactly one for outbound members;
    /// for inbound members, the union of every source vertex emitting the
    /// edge label toward the owner, in authoring order.
    pub destinations: Vec<VertexLabel>,

    /// Fields shared by every edge of this label
    pub fields: SchemaDefinition,
}

impl EdgeMember {
    /// Whether navigating this member yields a sequence of destinations
    pub fn is_to_many(&self) -> bool {
        self.cardinality.is_to_many()
    }

    /// Whether the given label is a possible destination of this member
    pub fn targets(&self, label: &VertexLabel) -> bool {
        self.destinations.contains(label)
    }
}

/// One named member of a navigation surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Member {
    Field(FieldMember),
    Edge(EdgeMember),
}

impl Member {
    /// Member name as authored or derived
    pub fn name(&self) -> &str {
        match self {
            Member::Field(field) => &field.name,
            Member::Edge(edge) => &edge.name,
        }
    }

    pub fn as_field(&self) -> Option<&FieldMember> {
        match self {
            Member::Field(field) => Some(field),
            _ => None,
        }
    }

    pub fn as_edge(&self) -> Option<&EdgeMember> {
        match self {
            Member::Edge(edge) => Some(edge),
            _ => None,
        }
    }
}
