//! Schema supply: loading a graph definition from JSON or YAML
//!
//! The definition is supplied once at process start and treated as immutable
//! for the lifetime of the program. Every loader validates before returning,
//! so a successfully loaded definition is always safe to derive from.

use super::def::{GraphDefinition, SchemaError};
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Errors raised while supplying a schema from an external source
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read schema file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse schema JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to parse schema YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("unsupported schema file extension: {0}")]
    UnsupportedExtension(String),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

pub type LoadResult<T> = Result<T, LoadError>;

impl GraphDefinition {
    /// Parse and validate a definition from a JSON document
    pub fn from_json_str(input: &str) -> LoadResult<Self> {
        let def: GraphDefinition = serde_json::from_str(input)?;
        def.validate()?;
        Ok(def)
    }

    /// Parse and validate a definition from a YAML document
    pub fn from_yaml_str(input: &str) -> LoadResult<Self> {
        let def: GraphDefinition = serde_yaml::from_str(input)?;
        def.validate()?;
        Ok(def)
    }

    /// Load and validate a definition from a file, dispatching on extension
    /// (`.json`, `.yaml`, `.yml`)
    pub fn from_path(path: impl AsRef<Path>) -> LoadResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();

        let def = match extension {
            "json" => Self::from_json_str(&contents)?,
            "yaml" | "yml" => Self::from_yaml_str(&contents)?,
            other => return Err(LoadError::UnsupportedExtension(other.to_string())),
        };

        info!(
            "Loaded graph schema from {:?}: {} vertex labels, {} edge labels",
            path,
            def.vertices.len(),
            def.edges.len()
        );
        Ok(def)
    }
}
