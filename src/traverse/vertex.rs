//! Checked, chained navigation over vertex and edge instances
//!
//! A [`GraphNavigator`] binds a derived surface registry to an external
//! [`Resolver`]. Every hop and field access is checked against the derived
//! surfaces at access time; an unknown member is a hard error, never a
//! silent null.

use super::resolver::{EdgeRef, FetchError, Resolver, VertexRef};
use super::value::FieldValue;
use crate::schema::{FieldSchema, SchemaError, VertexLabel};
use crate::surface::{EdgeDirection, EdgeMember, Member, NavigationSurface, SurfaceRegistry};
use futures::future::try_join_all;
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while navigating instances against a derived surface
#[derive(Error, Debug)]
pub enum TraversalError {
    #[error("no member named '{member}' on '{surface}'")]
    UnknownMember { surface: String, member: String },

    #[error("member '{member}' on '{surface}' is an edge, not a field")]
    NotAField { surface: String, member: String },

    #[error("member '{member}' on '{surface}' is a field, not an edge")]
    NotAnEdge { surface: String, member: String },

    #[error("field '{field}' on '{surface}' resolved to {actual}, expected {expected}")]
    TypeMismatch {
        surface: String,
        field: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("non-nullable field '{field}' on '{surface}' resolved to null")]
    NullViolation { surface: String, field: String },

    #[error("to-one edge '{member}' on '{surface}' resolved to {count} instances")]
    CardinalityViolation {
        surface: String,
        member: String,
        count: usize,
    },

    #[error("edge '{member}' on '{surface}' resolved to undeclared label '{label}'")]
    ForeignLabel {
        surface: String,
        member: String,
        label: VertexLabel,
    },

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

pub type TraversalResult<T> = Result<T, TraversalError>;

/// Entry point for schema-checked traversal
///
/// Cheap to clone; the registry and resolver are shared behind `Arc`s and
/// used read-only.
#[derive(Clone)]
pub struct GraphNavigator {
    registry: Arc<SurfaceRegistry>,
    resolver: Arc<dyn Resolver>,
}

impl GraphNavigator {
    pub fn new(registry: Arc<SurfaceRegistry>, resolver: Arc<dyn Resolver>) -> Self {
        GraphNavigator { registry, resolver }
    }

    /// Derived surfaces this navigator resolves against
    pub fn registry(&self) -> &SurfaceRegistry {
        &self.registry
    }

    /// Wrap a vertex instance in its navigation surface
    ///
    /// Fails if the instance's label has no derived surface.
    pub fn vertex(&self, vertex: VertexRef) -> TraversalResult<VertexHandle> {
        self.registry.surface(&vertex.label)?;
        Ok(VertexHandle {
            nav: self.clone(),
            vertex,
        })
    }
}

impl fmt::Debug for GraphNavigator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphNavigator")
            .field("surfaces", &self.registry.len())
            .finish_non_exhaustive()
    }
}

/// One vertex instance wrapped by its derived navigation surface
#[derive(Clone)]
pub struct VertexHandle {
    nav: GraphNavigator,
    vertex: VertexRef,
}

impl VertexHandle {
    /// Identity of the wrapped instance
    pub fn vertex_ref(&self) -> &VertexRef {
        &self.vertex
    }

    /// The derived surface this handle resolves members against
    pub fn surface(&self) -> TraversalResult<&NavigationSurface> {
        Ok(self.nav.registry.surface(&self.vertex.label)?)
    }

    fn member(&self, name: &str) -> TraversalResult<&Member> {
        self.surface()?
            .member(name)
            .ok_or_else(|| TraversalError::UnknownMember {
                surface: self.vertex.label.to_string(),
                member: name.to_string(),
            })
    }

    /// Lazily fetch one scalar field, checked against the declared type and
    /// nullability
    pub async fn get(&self, name: &str) -> TraversalResult<FieldValue> {
        let member = self.member(name)?;
        let field = member.as_field().ok_or_else(|| TraversalError::NotAField {
            surface: self.vertex.label.to_string(),
            member: name.to_string(),
        })?;
        let schema = field.schema;

        let value = self.nav.resolver.field(&self.vertex, name).await?;
        check_value(&self.vertex.label.to_string(), name, &schema, value)
    }

    /// Fetch every declared field concurrently
    pub async fn materialize(&self) -> TraversalResult<IndexMap<String, FieldValue>> {
        let names: Vec<String> = self
            .surface()?
            .fields()
            .map(|field| field.name.clone())
            .collect();

        let values = try_join_all(names.iter().map(|name| self.get(name))).await?;
        Ok(names.into_iter().zip(values).collect())
    }

    /// Navigate an edge or reverse-edge member, shaped by its cardinality
    pub async fn hop(&self, name: &str) -> TraversalResult<EdgeTarget> {
        let member = self.member(name)?;
        let edge = member
            .as_edge()
            .ok_or_else(|| TraversalError::NotAnEdge {
                surface: self.vertex.label.to_string(),
                member: name.to_string(),
            })?
            .clone();

        let neighbors = self
            .nav
            .resolver
            .neighbors(&self.vertex, &edge.label, edge.direction)
            .await?;

        let mut handles = Vec::with_capacity(neighbors.len());
        for neighbor in neighbors {
            if !edge.targets(&neighbor.label) {
                return Err(TraversalError::ForeignLabel {
                    surface: self.vertex.label.to_string(),
                    member: name.to_string(),
                    label: neighbor.label,
                });
            }

            // EdgeRef always records the declared direction, even when the
            // hop followed the reverse member.
            let edge_ref = match edge.direction {
                EdgeDirection::Outbound => EdgeRef {
                    source: self.vertex.clone(),
                    label: edge.label.clone(),
                    target: neighbor.clone(),
                },
                EdgeDirection::Inbound => EdgeRef {
                    source: neighbor.clone(),
                    label: edge.label.clone(),
                    target: self.vertex.clone(),
                },
            };

            handles.push(EdgeHandle {
                nav: self.nav.clone(),
                member: edge.clone(),
                edge_ref,
                destination: neighbor,
            });
        }

        if edge.is_to_many() {
            Ok(EdgeTarget::Many(handles))
        } else if handles.len() == 1 {
            let handle = handles.remove(0);
            Ok(EdgeTarget::One(handle))
        } else {
            Err(TraversalError::CardinalityViolation {
                surface: self.vertex.label.to_string(),
                member: name.to_string(),
                count: handles.len(),
            })
        }
    }
}

impl fmt::Debug for VertexHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VertexHandle")
            .field("vertex", &self.vertex)
            .finish_non_exhaustive()
    }
}

/// Result of navigating an edge member, preserving its multiplicity
///
/// To-one members resolve to exactly one handle; to-many members resolve to
/// a sequence of handles.
#[derive(Debug)]
pub enum EdgeTarget {
    One(EdgeHandle),
    Many(Vec<EdgeHandle>),
}

impl EdgeTarget {
    /// The single handle of a to-one hop
    pub fn into_one(self) -> Option<EdgeHandle> {
        match self {
            EdgeTarget::One(handle) => Some(handle),
            EdgeTarget::Many(_) => None,
        }
    }

    /// All handles, regardless of multiplicity
    pub fn into_many(self) -> Vec<EdgeHandle> {
        match self {
            EdgeTarget::One(handle) => vec![handle],
            EdgeTarget::Many(handles) => handles,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            EdgeTarget::One(_) => 1,
            EdgeTarget::Many(handles) => handles.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One traversed edge instance: its own fields plus the destination vertex
#[derive(Clone)]
pub struct EdgeHandle {
    nav: GraphNavigator,
    member: EdgeMember,
    edge_ref: EdgeRef,
    destination: VertexRef,
}

impl EdgeHandle {
    /// The surface member this hop traversed
    pub fn member(&self) -> &EdgeMember {
        &self.member
    }

    /// Identity of the traversed edge instance, in declared direction
    pub fn edge_ref(&self) -> &EdgeRef {
        &self.edge_ref
    }

    /// Lazily fetch one of the edge's own fields
    pub async fn get(&self, name: &str) -> TraversalResult<FieldValue> {
        let schema = self
            .member
            .fields
            .get(name)
            .copied()
            .ok_or_else(|| TraversalError::UnknownMember {
                surface: self.edge_ref.to_string(),
                member: name.to_string(),
            })?;

        let value = self.nav.resolver.edge_field(&self.edge_ref, name).await?;
        check_value(&self.edge_ref.to_string(), name, &schema, value)
    }

    /// Continue the chain: wrap the destination instance in its own surface
    pub fn vertex(&self) -> TraversalResult<VertexHandle> {
        self.nav.vertex(self.destination.clone())
    }
}

impl fmt::Debug for EdgeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EdgeHandle")
            .field("edge", &self.edge_ref)
            .field("destination", &self.destination)
            .finish_non_exhaustive()
    }
}

fn check_value(
    surface: &str,
    field: &str,
    schema: &FieldSchema,
    value: FieldValue,
) -> TraversalResult<FieldValue> {
    if value.is_null() && !schema.nullable {
        return Err(TraversalError::NullViolation {
            surface: surface.to_string(),
            field: field.to_string(),
        });
    }
    if !value.conforms_to(schema) {
        return Err(TraversalError::TypeMismatch {
            surface: surface.to_string(),
            field: field.to_string(),
            expected: schema.field_type.type_name(),
            actual: value.type_name(),
        });
    }
    Ok(value)
}
