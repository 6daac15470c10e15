//! In-memory reference resolver
//!
//! A small instance store backing the navigation layer with hash-map
//! adjacency lists. Useful as test backing and as the canonical example of
//! the [`Resolver`] contract; real deployments implement [`Resolver`] over
//! their own storage.

use super::resolver::{EdgeRef, FetchError, Resolver, VertexRef};
use super::value::FieldValue;
use crate::schema::{EdgeLabel, VertexLabel};
use crate::surface::EdgeDirection;
use async_trait::async_trait;
use indexmap::IndexMap;

type PropertyMap = IndexMap<String, FieldValue>;

#[derive(Debug, Clone)]
struct StoredVertex {
    label: VertexLabel,
    properties: PropertyMap,
}

#[derive(Debug, Clone)]
struct StoredEdge {
    label: EdgeLabel,
    source: u64,
    target: u64,
    properties: PropertyMap,
}

/// In-memory vertex and edge instance store implementing [`Resolver`]
///
/// Instances are added up front; navigation afterwards is read-only, so the
/// store can be shared behind an `Arc` without synchronization.
#[derive(Debug, Default)]
pub struct MemoryGraph {
    vertices: IndexMap<u64, StoredVertex>,
    edges: Vec<StoredEdge>,

    /// Outgoing edge indices per vertex (adjacency list)
    outgoing: IndexMap<u64, Vec<usize>>,

    /// Incoming edge indices per vertex (adjacency list)
    incoming: IndexMap<u64, Vec<usize>>,

    next_id: u64,
}

impl MemoryGraph {
    /// Create an empty store
    pub fn new() -> Self {
        MemoryGraph::default()
    }

    /// Add a vertex instance of the given label
    pub fn add_vertex(&mut self, label: impl Into<VertexLabel>) -> VertexRef {
        let label = label.into();
        self.next_id += 1;
        let id = self.next_id;
        self.vertices.insert(
            id,
            StoredVertex {
                label: label.clone(),
                properties: PropertyMap::new(),
            },
        );
        VertexRef { id, label }
    }

    /// Set a scalar property on a vertex instance
    pub fn set_vertex_property(
        &mut self,
        vertex: &VertexRef,
        key: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Result<(), FetchError> {
        let stored = self
            .vertices
            .get_mut(&vertex.id)
            .ok_or_else(|| FetchError::VertexNotFound(vertex.clone()))?;
        stored.properties.insert(key.into(), value.into());
        Ok(())
    }

    /// Add a directed edge instance between two stored vertices
    pub fn add_edge(
        &mut self,
        source: &VertexRef,
        label: impl Into<EdgeLabel>,
        target: &VertexRef,
    ) -> Result<(), FetchError> {
        if !self.vertices.contains_key(&source.id) {
            return Err(FetchError::VertexNotFound(source.clone()));
        }
        if !self.vertices.contains_key(&target.id) {
            return Err(FetchError::VertexNotFound(target.clone()));
        }

        let index = self.edges.len();
        self.edges.push(StoredEdge {
            label: label.into(),
            source: source.id,
            target: target.id,
            properties: PropertyMap::new(),
        });
        self.outgoing.entry(source.id).or_default().push(index);
        self.incoming.entry(target.id).or_default().push(index);
        Ok(())
    }

    /// Set a scalar property on a stored edge instance
    pub fn set_edge_property(
        &mut self,
        source: &VertexRef,
        label: impl Into<EdgeLabel>,
        target: &VertexRef,
        key: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Result<(), FetchError> {
        let label = label.into();
        let edge = self
            .edges
            .iter_mut()
            .find(|edge| {
                edge.source == source.id && edge.target == target.id && edge.label == label
            })
            .ok_or_else(|| FetchError::EdgeUnavailable {
                vertex: source.clone(),
                edge: label.clone(),
            })?;
        edge.properties.insert(key.into(), value.into());
        Ok(())
    }

    /// Number of stored vertex instances
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of stored edge instances
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn stored(&self, vertex: &VertexRef) -> Result<&StoredVertex, FetchError> {
        self.vertices
            .get(&vertex.id)
            .ok_or_else(|| FetchError::VertexNotFound(vertex.clone()))
    }

    fn vertex_ref(&self, id: u64) -> VertexRef {
        VertexRef {
            id,
            label: self.vertices[&id].label.clone(),
        }
    }
}

#[async_trait]
impl Resolver for MemoryGraph {
    async fn field(&self, vertex: &VertexRef, name: &str) -> Result<FieldValue, FetchError> {
        let stored = self.stored(vertex)?;
        // Absent values resolve to null; the navigation layer rejects null
        // on non-nullable fields.
        Ok(stored
            .properties
            .get(name)
            .cloned()
            .unwrap_or(FieldValue::Null))
    }

    async fn neighbors(
        &self,
        vertex: &VertexRef,
        edge: &EdgeLabel,
        direction: EdgeDirection,
    ) -> Result<Vec<VertexRef>, FetchError> {
        self.stored(vertex)?;

        let (adjacency, pick): (_, fn(&StoredEdge) -> u64) = match direction {
            EdgeDirection::Outbound => (&self.outgoing, |edge: &StoredEdge| edge.target),
            EdgeDirection::Inbound => (&self.incoming, |edge: &StoredEdge| edge.source),
        };

        let refs = adjacency
            .get(&vertex.id)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(|&index| &self.edges[index])
            .filter(|stored| stored.label == *edge)
            .map(|stored| self.vertex_ref(pick(stored)))
            .collect();
        Ok(refs)
    }

    async fn edge_field(&self, edge: &EdgeRef, name: &str) -> Result<FieldValue, FetchError> {
        let stored = self
            .edges
            .iter()
            .find(|stored| {
                stored.source == edge.source.id
                    && stored.target == edge.target.id
                    && stored.label == edge.label
            })
            .ok_or_else(|| FetchError::EdgeUnavailable {
                vertex: edge.source.clone(),
                edge: edge.label.clone(),
            })?;

        Ok(stored
            .properties
            .get(name)
            .cloned()
            .unwrap_or(FieldValue::Null))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (MemoryGraph, VertexRef, VertexRef, VertexRef) {
        let mut graph = MemoryGraph::new();
        let user = graph.add_vertex("user");
        let rex = graph.add_vertex("dog");
        let fido = graph.add_vertex("dog");

        graph.set_vertex_property(&rex, "name", "Rex").unwrap();
        graph.add_edge(&user, "owns", &rex).unwrap();
        graph.add_edge(&user, "owns", &fido).unwrap();

        (graph, user, rex, fido)
    }

    #[tokio::test]
    async fn test_field_lookup() {
        let (graph, _, rex, _) = sample();
        let value = graph.field(&rex, "name").await.unwrap();
        assert_eq!(value.as_string(), Some("Rex"));
    }

    #[tokio::test]
    async fn test_absent_field_resolves_to_null() {
        let (graph, user, _, _) = sample();
        let value = graph.field(&user, "name").await.unwrap();
        assert!(value.is_null());
    }

    #[tokio::test]
    async fn test_outbound_neighbors() {
        let (graph, user, rex, fido) = sample();
        let refs = graph
            .neighbors(&user, &EdgeLabel::new("owns"), EdgeDirection::Outbound)
            .await
            .unwrap();
        assert_eq!(refs, vec![rex, fido]);
    }

    #[tokio::test]
    async fn test_inbound_neighbors() {
        let (graph, user, rex, _) = sample();
        let refs = graph
            .neighbors(&rex, &EdgeLabel::new("owns"), EdgeDirection::Inbound)
            .await
            .unwrap();
        assert_eq!(refs, vec![user]);
    }

    #[tokio::test]
    async fn test_neighbors_filter_by_label() {
        let (mut graph, user, rex, _) = sample();
        graph.add_edge(&user, "fears", &rex).unwrap();

        let refs = graph
            .neighbors(&user, &EdgeLabel::new("fears"), EdgeDirection::Outbound)
            .await
            .unwrap();
        assert_eq!(refs.len(), 1);
    }

    #[tokio::test]
    async fn test_edge_field() {
        let (mut graph, user, rex, _) = sample();
        graph
            .set_edge_property(&user, "owns", &rex, "since", 2020i64)
            .unwrap();

        let edge = EdgeRef {
            source: user,
            label: EdgeLabel::new("owns"),
            target: rex,
        };
        let value = graph.edge_field(&edge, "since").await.unwrap();
        assert_eq!(value.as_number(), Some(2020.0));
    }

    #[tokio::test]
    async fn test_unknown_vertex_is_fetch_error() {
        let (graph, _, _, _) = sample();
        let ghost = VertexRef::new(999, "dog");

        let err = graph.field(&ghost, "name").await.unwrap_err();
        assert!(matches!(err, FetchError::VertexNotFound(_)));

        let err = graph
            .neighbors(&ghost, &EdgeLabel::new("owns"), EdgeDirection::Outbound)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::VertexNotFound(_)));
    }

    #[test]
    fn test_counts() {
        let (graph, _, _, _) = sample();
        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.edge_count(), 2);
    }
}
