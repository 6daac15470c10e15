//! Graph schema definition and structural validation
//!
//! A [`GraphDefinition`] is authored once, validated, and then treated as the
//! immutable process-wide source of truth from which navigation surfaces are
//! derived.

use super::field::SchemaDefinition;
use super::types::{EdgeLabel, VertexLabel};
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors detected while validating an authored schema
///
/// All of these are fatal to startup: navigation surfaces must never be
/// derived from an invalid schema.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("unknown vertex label '{0}'")]
    UnknownVertexLabel(VertexLabel),

    #[error("unknown edge label '{0}'")]
    UnknownEdgeLabel(EdgeLabel),

    #[error("edge '{edge}' names reverse '{reverse}', but '{reverse}' does not reverse back to '{edge}'")]
    MissingReverse { edge: EdgeLabel, reverse: EdgeLabel },

    #[error("edges '{first}' and '{second}' both declare reverse '{reverse}'")]
    DuplicateReverse {
        reverse: EdgeLabel,
        first: EdgeLabel,
        second: EdgeLabel,
    },

    #[error("vertex '{vertex}' has colliding members named '{member}'")]
    MemberNameCollision { vertex: VertexLabel, member: String },
}

pub type SchemaResult<T> = Result<T, SchemaError>;

/// Multiplicity constraint on an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EdgeCardinality {
    OneToOne,
    OneToMany,
    ManyToOne,
    ManyToMany,
}

impl EdgeCardinality {
    /// Cardinality of the same edge traversed in the opposite direction
    pub fn inverse(&self) -> EdgeCardinality {
        match self {
            EdgeCardinality::OneToOne => EdgeCardinality::OneToOne,
            EdgeCardinality::OneToMany => EdgeCardinality::ManyToOne,
            EdgeCardinality::ManyToOne => EdgeCardinality::OneToMany,
            EdgeCardinality::ManyToMany => EdgeCardinality::ManyToMany,
        }
    }

    /// Whether navigating this edge yields a sequence of destinations
    pub fn is_to_many(&self) -> bool {
        matches!(
            self,
            EdgeCardinality::OneToMany | EdgeCardinality::ManyToMany
        )
    }
}

/// One outbound edge declared on a source vertex
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    /// Label of the destination vertex
    pub destination: VertexLabel,

    /// Declared multiplicity, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cardinality: Option<EdgeCardinality>,
}

impl EdgeRecord {
    /// Create an edge record with unspecified cardinality
    pub fn new(destination: impl Into<VertexLabel>) -> Self {
        EdgeRecord {
            destination: destination.into(),
            cardinality: None,
        }
    }

    /// Create an edge record with an explicit cardinality
    pub fn with_cardinality(
        destination: impl Into<VertexLabel>,
        cardinality: EdgeCardinality,
    ) -> Self {
        EdgeRecord {
            destination: destination.into(),
            cardinality: Some(cardinality),
        }
    }

    /// Declared cardinality, or `ManyToMany` when unspecified: an undeclared
    /// constraint is no constraint
    pub fn effective_cardinality(&self) -> EdgeCardinality {
        self.cardinality.unwrap_or(EdgeCardinality::ManyToMany)
    }
}

/// Schema of one vertex label: its scalar fields and the outbound edges it
/// emits
///
/// Not every edge label need be declared on every vertex; only the ones the
/// vertex actually emits appear in `edges`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VertexSchema {
    /// Scalar properties of this vertex
    #[serde(default)]
    pub fields: SchemaDefinition,

    /// Outbound edges, keyed by edge label
    #[serde(default)]
    pub edges: IndexMap<EdgeLabel, EdgeRecord>,
}

impl VertexSchema {
    /// Create an empty vertex schema
    pub fn new() -> Self {
        VertexSchema::default()
    }

    /// Add a scalar field
    pub fn with_field(
        mut self,
        name: impl Into<String>,
        schema: super::field::FieldSchema,
    ) -> Self {
        self.fields.insert(name.into(), schema);
        self
    }

    /// Add an outbound edge
    pub fn with_edge(mut self, label: impl Into<EdgeLabel>, record: EdgeRecord) -> Self {
        self.edges.insert(label.into(), record);
        self
    }
}

/// Schema of one edge label, declared once per label (not per vertex)
///
/// Attaches the properties common to every use of the label and names the
/// edge label that represents its logical reverse direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeSchema {
    /// Properties shared by every edge of this label
    #[serde(default)]
    pub fields: SchemaDefinition,

    /// Label representing the opposite direction of this edge
    pub reverse: EdgeLabel,
}

impl EdgeSchema {
    /// Create an edge schema with no fields
    pub fn new(reverse: impl Into<EdgeLabel>) -> Self {
        EdgeSchema {
            fields: SchemaDefinition::new(),
            reverse: reverse.into(),
        }
    }

    /// Add a shared edge field
    pub fn with_field(
        mut self,
        name: impl Into<String>,
        schema: super::field::FieldSchema,
    ) -> Self {
        self.fields.insert(name.into(), schema);
        self
    }
}

/// The root schema object: every vertex label and every edge label in the
/// graph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDefinition {
    /// Vertex label → vertex schema
    #[serde(default)]
    pub vertices: IndexMap<VertexLabel, VertexSchema>,

    /// Edge label → edge schema
    #[serde(default)]
    pub edges: IndexMap<EdgeLabel, EdgeSchema>,
}

impl GraphDefinition {
    /// Create an empty definition
    pub fn new() -> Self {
        GraphDefinition::default()
    }

    /// Add a vertex schema
    pub fn with_vertex(mut self, label: impl Into<VertexLabel>, schema: VertexSchema) -> Self {
        self.vertices.insert(label.into(), schema);
        self
    }

    /// Add an edge schema
    pub fn with_edge(mut self, label: impl Into<EdgeLabel>, schema: EdgeSchema) -> Self {
        self.edges.insert(label.into(), schema);
        self
    }

    /// Look up the reverse label of an edge, if the edge is declared
    pub fn reverse_of(&self, label: &EdgeLabel) -> Option<&EdgeLabel> {
        self.edges.get(label).map(|schema| &schema.reverse)
    }

    /// Structural validation of the authored schema
    ///
    /// Checks, in order:
    /// - every edge record's destination is a declared vertex label;
    /// - every edge label used in a vertex edge map is a key of the global
    ///   edge map;
    /// - reverse mappings are consistent: a reverse label that is also a
    ///   primary edge label must reverse back to the edge that named it, and
    ///   no two edges may claim the same reverse label.
    ///
    /// A reverse label that is not a primary key of the edge map is
    /// introduced by the edge schema naming it, so it is never dangling by
    /// itself.
    pub fn validate(&self) -> SchemaResult<()> {
        for schema in self.vertices.values() {
            for (edge, record) in &schema.edges {
                if !self.edges.contains_key(edge) {
                    return Err(SchemaError::UnknownEdgeLabel(edge.clone()));
                }
                if !self.vertices.contains_key(&record.destination) {
                    return Err(SchemaError::UnknownVertexLabel(record.destination.clone()));
                }
            }
        }

        let mut reverse_owner: FxHashMap<&EdgeLabel, &EdgeLabel> = FxHashMap::default();
        for (edge, schema) in &self.edges {
            if let Some(peer) = self.edges.get(&schema.reverse) {
                if peer.reverse != *edge {
                    return Err(SchemaError::MissingReverse {
                        edge: edge.clone(),
                        reverse: schema.reverse.clone(),
                    });
                }
            }
            // Two primary edges mapping onto one reverse name would make the
            // inbound member ambiguous on any shared destination.
            if let Some(prior) = reverse_owner.insert(&schema.reverse, edge) {
                return Err(SchemaError::DuplicateReverse {
                    reverse: schema.reverse.clone(),
                    first: prior.clone(),
                    second: edge.clone(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::field::{FieldSchema, FieldType};

    fn minimal_def() -> GraphDefinition {
        GraphDefinition::new()
            .with_vertex(
                "dog",
                VertexSchema::new()
                    .with_field("name", FieldSchema::new(FieldType::String))
                    .with_edge("loves", EdgeRecord::new("user")),
            )
            .with_vertex("user", VertexSchema::new())
            .with_edge("loves", EdgeSchema::new("lovedBy"))
    }

    #[test]
    fn test_valid_definition_passes() {
        assert_eq!(minimal_def().validate(), Ok(()));
    }

    #[test]
    fn test_dangling_destination_rejected() {
        let def = GraphDefinition::new()
            .with_vertex(
                "dog",
                VertexSchema::new().with_edge("loves", EdgeRecord::new("ghost")),
            )
            .with_edge("loves", EdgeSchema::new("lovedBy"));

        assert_eq!(
            def.validate(),
            Err(SchemaError::UnknownVertexLabel(VertexLabel::new("ghost")))
        );
    }

    #[test]
    fn test_undeclared_edge_label_rejected() {
        let def = GraphDefinition::new()
            .with_vertex(
                "dog",
                VertexSchema::new().with_edge("eats", EdgeRecord::new("dog")),
            )
            .with_edge("loves", EdgeSchema::new("lovedBy"));

        assert_eq!(
            def.validate(),
            Err(SchemaError::UnknownEdgeLabel(EdgeLabel::new("eats")))
        );
    }

    #[test]
    fn test_asymmetric_reverse_rejected() {
        // "follows" reverses to "leads", but "leads" reverses elsewhere.
        let def = GraphDefinition::new()
            .with_vertex("user", VertexSchema::new())
            .with_edge("follows", EdgeSchema::new("leads"))
            .with_edge("leads", EdgeSchema::new("trails"));

        assert_eq!(
            def.validate(),
            Err(SchemaError::MissingReverse {
                edge: EdgeLabel::new("follows"),
                reverse: EdgeLabel::new("leads"),
            })
        );
    }

    #[test]
    fn test_symmetric_reverse_pair_accepted() {
        let def = GraphDefinition::new()
            .with_vertex("user", VertexSchema::new())
            .with_edge("follows", EdgeSchema::new("followedBy"))
            .with_edge("followedBy", EdgeSchema::new("follows"));

        assert_eq!(def.validate(), Ok(()));
    }

    #[test]
    fn test_duplicate_reverse_label_rejected() {
        let def = GraphDefinition::new()
            .with_vertex("user", VertexSchema::new())
            .with_edge("owns", EdgeSchema::new("belongsTo"))
            .with_edge("rents", EdgeSchema::new("belongsTo"));

        assert!(matches!(
            def.validate(),
            Err(SchemaError::DuplicateReverse { reverse, .. }) if reverse.as_str() == "belongsTo"
        ));
    }

    #[test]
    fn test_cardinality_inverse() {
        assert_eq!(
            EdgeCardinality::OneToMany.inverse(),
            EdgeCardinality::ManyToOne
        );
        assert_eq!(
            EdgeCardinality::ManyToOne.inverse(),
            EdgeCardinality::OneToMany
        );
        assert_eq!(
            EdgeCardinality::OneToOne.inverse(),
            EdgeCardinality::OneToOne
        );
        assert_eq!(
            EdgeCardinality::ManyToMany.inverse(),
            EdgeCardinality::ManyToMany
        );
    }

    #[test]
    fn test_effective_cardinality_defaults_to_many_to_many() {
        let record = EdgeRecord::new("dog");
        assert_eq!(
            record.effective_cardinality(),
            EdgeCardinality::ManyToMany
        );

        let record = EdgeRecord::with_cardinality("dog", EdgeCardinality::ManyToOne);
        assert_eq!(record.effective_cardinality(), EdgeCardinality::ManyToOne);
    }

    #[test]
    fn test_cardinality_serde_camel_case() {
        let json = serde_json::to_string(&EdgeCardinality::OneToMany).unwrap();
        assert_eq!(json, "\"oneToMany\"");
    }
}
