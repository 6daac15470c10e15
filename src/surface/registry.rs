//! Navigation surface derivation
//!
//! Given a validated [`GraphDefinition`], computes the complete navigable
//! surface of every vertex label: its scalar fields as lazy accessor
//! members, its declared outbound edges, and the inbound edges inferred from
//! every other vertex whose outbound edges target it.
//!
//! Derivation is purely structural and label-indexed. It runs once at
//! schema-load time, is deterministic and idempotent, and the resulting
//! registry is shared read-only for the lifetime of the process.

use super::member::{EdgeDirection, EdgeMember, FieldMember, Member};
use crate::schema::{
    EdgeCardinality, EdgeLabel, GraphDefinition, SchemaError, SchemaResult, VertexLabel,
    VertexSchema,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// The complete set of named members available on an instance of one vertex
/// label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationSurface {
    vertex: VertexLabel,
    members: IndexMap<String, Member>,
}

impl NavigationSurface {
    /// Label of the vertex this surface describes
    pub fn vertex(&self) -> &VertexLabel {
        &self.vertex
    }

    /// Look up a member by name
    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members.get(name)
    }

    /// All member names, in derivation order (fields, outbound, inbound)
    pub fn member_names(&self) -> impl Iterator<Item = &str> {
        self.members.keys().map(String::as_str)
    }

    /// Field accessor members only
    pub fn fields(&self) -> impl Iterator<Item = &FieldMember> {
        self.members.values().filter_map(Member::as_field)
    }

    /// Edge navigation members only, outbound and inbound
    pub fn edges(&self) -> impl Iterator<Item = &EdgeMember> {
        self.members.values().filter_map(Member::as_edge)
    }

    /// Number of members on this surface
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// All navigation surfaces derived from one graph definition
///
/// Owns one [`NavigationSurface`] per vertex label. Derive once, then share
/// read-only; re-deriving from the same definition yields an identical
/// registry.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceRegistry {
    surfaces: IndexMap<VertexLabel, NavigationSurface>,
}

impl SurfaceRegistry {
    /// Validate the definition and derive the surface of every vertex label
    pub fn derive(def: &GraphDefinition) -> SchemaResult<Self> {
        def.validate()?;

        let mut surfaces = IndexMap::with_capacity(def.vertices.len());
        for (vertex, schema) in &def.vertices {
            let surface = derive_surface(def, vertex, schema)?;
            debug!(
                "Derived surface for '{}': {} members",
                vertex,
                surface.len()
            );
            surfaces.insert(vertex.clone(), surface);
        }

        let member_count: usize = surfaces.values().map(NavigationSurface::len).sum();
        info!(
            "Derived {} navigation surfaces ({} members total)",
            surfaces.len(),
            member_count
        );

        Ok(SurfaceRegistry { surfaces })
    }

    /// Surface of the given vertex label
    pub fn surface(&self, vertex: &VertexLabel) -> SchemaResult<&NavigationSurface> {
        self.surfaces
            .get(vertex)
            .ok_or_else(|| SchemaError::UnknownVertexLabel(vertex.clone()))
    }

    /// All derived surfaces, in authoring order
    pub fn surfaces(&self) -> impl Iterator<Item = &NavigationSurface> {
        self.surfaces.values()
    }

    /// Number of vertex labels in the registry
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }
}

/// Compute the member table of one vertex label
fn derive_surface(
    def: &GraphDefinition,
    vertex: &VertexLabel,
    schema: &VertexSchema,
) -> SchemaResult<NavigationSurface> {
    let mut members: IndexMap<String, Member> = IndexMap::new();

    // Scalar field accessors.
    for (name, field) in &schema.fields {
        insert_member(
            &mut members,
            vertex,
            Member::Field(FieldMember {
                name: name.clone(),
                schema: *field,
            }),
        )?;
    }

    // Declared outbound edges. Validation already guarantees the edge label
    // and destination resolve.
    for (label, record) in &schema.edges {
        let edge_schema = &def.edges[label];
        insert_member(
            &mut members,
            vertex,
            Member::Edge(EdgeMember {
                name: label.as_str().to_string(),
                label: label.clone(),
                direction: EdgeDirection::Outbound,
                cardinality: record.effective_cardinality(),
                destinations: vec![record.destination.clone()],
                fields: edge_schema.fields.clone(),
            }),
        )?;
    }

    // Inferred inbound edges: scan every vertex's outbound declarations for
    // edges targeting this label, grouping contributors by reverse name and
    // unioning their source labels.
    for inbound in infer_inbound(def, vertex) {
        insert_member(&mut members, vertex, Member::Edge(inbound))?;
    }

    Ok(NavigationSurface {
        vertex: vertex.clone(),
        members,
    })
}

/// Scan the whole vertex set for edges whose destination is `vertex`
///
/// O(|vertices| x |edges per vertex|); runs once per vertex label at
/// schema-load time, never per navigation call.
fn infer_inbound(def: &GraphDefinition, vertex: &VertexLabel) -> Vec<EdgeMember> {
    let mut inbound: IndexMap<&EdgeLabel, EdgeMember> = IndexMap::new();

    for (source, schema) in &def.vertices {
        for (label, record) in &schema.edges {
            if record.destination != *vertex {
                continue;
            }
            let edge_schema = &def.edges[label];
            let reverse = &edge_schema.reverse;
            let inverse = record.effective_cardinality().inverse();

            let member = inbound.entry(reverse).or_insert_with(|| EdgeMember {
                name: reverse.as_str().to_string(),
                label: label.clone(),
                direction: EdgeDirection::Inbound,
                cardinality: inverse,
                destinations: Vec::new(),
                fields: edge_schema.fields.clone(),
            });

            // Contributors that disagree on multiplicity widen the member to
            // the unconstrained case.
            if member.cardinality != inverse {
                member.cardinality = EdgeCardinality::ManyToMany;
            }
            member.destinations.push(source.clone());
        }
    }

    inbound.into_values().collect()
}

fn insert_member(
    members: &mut IndexMap<String, Member>,
    vertex: &VertexLabel,
    member: Member,
) -> SchemaResult<()> {
    let name = member.name().to_string();
    if members.insert(name.clone(), member).is_some() {
        return Err(SchemaError::MemberNameCollision {
            vertex: vertex.clone(),
            member: name,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{EdgeRecord, EdgeSchema, FieldSchema, FieldType};

    /// The dog/bone/user conformance schema
    fn fixture() -> GraphDefinition {
        GraphDefinition::new()
            .with_vertex(
                "dog",
                VertexSchema::new()
                    .with_field("name", FieldSchema::new(FieldType::String))
                    .with_edge("chews", EdgeRecord::new("bone"))
                    .with_edge("loves", EdgeRecord::new("user")),
            )
            .with_vertex(
                "bone",
                VertexSchema::new().with_edge("fears", EdgeRecord::new("dog")),
            )
            .with_vertex(
                "user",
                VertexSchema::new()
                    .with_edge("owns", EdgeRecord::new("dog"))
                    .with_edge("fears", EdgeRecord::new("dog")),
            )
            .with_edge(
                "chews",
                EdgeSchema::new("chewedBy").with_field("timestamp", FieldSchema::new(FieldType::Date)),
            )
            .with_edge("loves", EdgeSchema::new("lovedBy"))
            .with_edge("owns", EdgeSchema::new("ownedBy"))
            .with_edge("fears", EdgeSchema::new("fearedBy"))
    }

    #[test]
    fn test_dog_surface_member_set_is_exact() {
        let registry = SurfaceRegistry::derive(&fixture()).unwrap();
        let dog = registry.surface(&VertexLabel::new("dog")).unwrap();

        let names: Vec<&str> = dog.member_names().collect();
        assert_eq!(
            names,
            vec!["name", "chews", "loves", "ownedBy", "fearedBy"]
        );
    }

    #[test]
    fn test_outbound_member_shape() {
        let registry = SurfaceRegistry::derive(&fixture()).unwrap();
        let dog = registry.surface(&VertexLabel::new("dog")).unwrap();

        let chews = dog.member("chews").unwrap().as_edge().unwrap();
        assert_eq!(chews.direction, EdgeDirection::Outbound);
        assert_eq!(chews.destinations, vec![VertexLabel::new("bone")]);
        assert_eq!(chews.fields["timestamp"].field_type, FieldType::Date);
    }

    #[test]
    fn test_inbound_union_of_sources() {
        let registry = SurfaceRegistry::derive(&fixture()).unwrap();
        let dog = registry.surface(&VertexLabel::new("dog")).unwrap();

        // bone.fears -> dog and user.fears -> dog, unioned under the reverse
        // name in authoring order.
        let feared_by = dog.member("fearedBy").unwrap().as_edge().unwrap();
        assert_eq!(feared_by.direction, EdgeDirection::Inbound);
        assert_eq!(feared_by.label, EdgeLabel::new("fears"));
        assert_eq!(
            feared_by.destinations,
            vec![VertexLabel::new("bone"), VertexLabel::new("user")]
        );
    }

    #[test]
    fn test_round_trip_edges() {
        let registry = SurfaceRegistry::derive(&fixture()).unwrap();

        let user = registry.surface(&VertexLabel::new("user")).unwrap();
        let owns = user.member("owns").unwrap().as_edge().unwrap();
        assert_eq!(owns.destinations, vec![VertexLabel::new("dog")]);

        let dog = registry.surface(&VertexLabel::new("dog")).unwrap();
        let owned_by = dog.member("ownedBy").unwrap().as_edge().unwrap();
        assert_eq!(owned_by.destinations, vec![VertexLabel::new("user")]);
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let def = fixture();
        let first = SurfaceRegistry::derive(&def).unwrap();
        let second = SurfaceRegistry::derive(&def).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_inbound_cardinality_is_inverse_of_forward() {
        let def = GraphDefinition::new()
            .with_vertex(
                "user",
                VertexSchema::new().with_edge(
                    "owns",
                    EdgeRecord::with_cardinality("dog", EdgeCardinality::OneToMany),
                ),
            )
            .with_vertex("dog", VertexSchema::new())
            .with_edge("owns", EdgeSchema::new("ownedBy"));

        let registry = SurfaceRegistry::derive(&def).unwrap();
        let dog = registry.surface(&VertexLabel::new("dog")).unwrap();
        let owned_by = dog.member("ownedBy").unwrap().as_edge().unwrap();
        assert_eq!(owned_by.cardinality, EdgeCardinality::ManyToOne);
        assert!(!owned_by.is_to_many());
    }

    #[test]
    fn test_disagreeing_inbound_cardinalities_widen() {
        let def = GraphDefinition::new()
            .with_vertex(
                "bone",
                VertexSchema::new().with_edge(
                    "fears",
                    EdgeRecord::with_cardinality("dog", EdgeCardinality::ManyToOne),
                ),
            )
            .with_vertex(
                "user",
                VertexSchema::new().with_edge(
                    "fears",
                    EdgeRecord::with_cardinality("dog", EdgeCardinality::ManyToMany),
                ),
            )
            .with_vertex("dog", VertexSchema::new())
            .with_edge("fears", EdgeSchema::new("fearedBy"));

        let registry = SurfaceRegistry::derive(&def).unwrap();
        let dog = registry.surface(&VertexLabel::new("dog")).unwrap();
        let feared_by = dog.member("fearedBy").unwrap().as_edge().unwrap();
        assert_eq!(feared_by.cardinality, EdgeCardinality::ManyToMany);
    }

    #[test]
    fn test_field_edge_name_collision_rejected() {
        // Vertex field named like its own outbound edge.
        let def = GraphDefinition::new()
            .with_vertex(
                "dog",
                VertexSchema::new()
                    .with_field("loves", FieldSchema::new(FieldType::Boolean))
                    .with_edge("loves", EdgeRecord::new("user")),
            )
            .with_vertex("user", VertexSchema::new())
            .with_edge("loves", EdgeSchema::new("lovedBy"));

        assert!(matches!(
            SurfaceRegistry::derive(&def),
            Err(SchemaError::MemberNameCollision { vertex, member })
                if vertex == VertexLabel::new("dog") && member == "loves"
        ));
    }

    #[test]
    fn test_field_reverse_name_collision_rejected() {
        // A field on the destination vertex shadows an inferred inbound
        // member.
        let def = GraphDefinition::new()
            .with_vertex(
                "dog",
                VertexSchema::new().with_field("ownedBy", FieldSchema::new(FieldType::String)),
            )
            .with_vertex(
                "user",
                VertexSchema::new().with_edge("owns", EdgeRecord::new("dog")),
            )
            .with_edge("owns", EdgeSchema::new("ownedBy"));

        assert!(matches!(
            SurfaceRegistry::derive(&def),
            Err(SchemaError::MemberNameCollision { member, .. }) if member == "ownedBy"
        ));
    }

    #[test]
    fn test_unknown_surface_lookup() {
        let registry = SurfaceRegistry::derive(&fixture()).unwrap();
        assert_eq!(
            registry.surface(&VertexLabel::new("cat")).err(),
            Some(SchemaError::UnknownVertexLabel(VertexLabel::new("cat")))
        );
    }

    #[test]
    fn test_invalid_definition_never_derives() {
        let def = GraphDefinition::new()
            .with_vertex(
                "dog",
                VertexSchema::new().with_edge("loves", EdgeRecord::new("ghost")),
            )
            .with_edge("loves", EdgeSchema::new("lovedBy"));

        assert!(SurfaceRegistry::derive(&def).is_err());
    }

    #[test]
    fn test_self_edge_contributes_inbound_on_same_vertex() {
        let def = GraphDefinition::new()
            .with_vertex(
                "user",
                VertexSchema::new().with_edge("follows", EdgeRecord::new("user")),
            )
            .with_edge("follows", EdgeSchema::new("followedBy"));

        let registry = SurfaceRegistry::derive(&def).unwrap();
        let user = registry.surface(&VertexLabel::new("user")).unwrap();

        let names: Vec<&str> = user.member_names().collect();
        assert_eq!(names, vec!["follows", "followedBy"]);

        let followed_by = user.member("followedBy").unwrap().as_edge().unwrap();
        assert_eq!(followed_by.destinations, vec![VertexLabel::new("user")]);
    }
}
