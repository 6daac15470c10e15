//! Scalar field typing for vertex and edge properties

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Storage type of a scalar property
///
/// The closed set of scalar types a field may carry. `Number` is f64-backed
/// at the value layer; `Date` is a UTC timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Boolean,
    Date,
}

impl FieldType {
    /// Get type name as string
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Date => "date",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// Schema of a single scalar property: its storage type and nullability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Scalar storage type
    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// Whether the field may resolve to null (defaults to false)
    #[serde(default)]
    pub nullable: bool,
}

impl FieldSchema {
    /// Create a non-nullable field of the given type
    pub fn new(field_type: FieldType) -> Self {
        FieldSchema {
            field_type,
            nullable: false,
        }
    }

    /// Create a nullable field of the given type
    pub fn nullable(field_type: FieldType) -> Self {
        FieldSchema {
            field_type,
            nullable: true,
        }
    }
}

/// Field name → field schema mapping, used identically for vertex and edge
/// properties
///
/// Insertion-ordered so derived navigation surfaces list members in
/// authoring order.
pub type SchemaDefinition = IndexMap<String, FieldSchema>;
