//! Configuration for building a hypergraph and its property stores.
//!
//! ```json
//! {
//!   "labels": { "edges": "edge_id", "nodes": "node_id" },
//!   "incidences": { "weight": 1.0, "fields": { "role": "member" } }
//! }
//! ```
//!
//! Every section is optional; omitted sections fall back to the defaults
//! (`"edges"` / `"nodes"` column names, weight 1, no user fields).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{is_reserved, Level, Value, DEFAULT_WEIGHT};
use crate::storage::Schema;
use crate::{Error, Result};

/// Column names under which raw incidence rows carry their edge and node
/// identities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelationLabels {
    pub edges: String,
    pub nodes: String,
}

impl Default for RelationLabels {
    fn default() -> Self {
        Self {
            edges: "edges".into(),
            nodes: "nodes".into(),
        }
    }
}

/// Declared defaults for one level's property store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyDefaults {
    pub weight: f64,
    /// User-defined fields and their defaults, as plain JSON values.
    pub fields: BTreeMap<String, serde_json::Value>,
}

impl Default for PropertyDefaults {
    fn default() -> Self {
        Self {
            weight: DEFAULT_WEIGHT,
            fields: BTreeMap::new(),
        }
    }
}

impl PropertyDefaults {
    /// Build the store schema these defaults describe.
    pub fn to_schema(&self) -> Result<Schema> {
        if !self.weight.is_finite() {
            return Err(Error::Config(format!("default weight must be finite, got {}", self.weight)));
        }
        let mut schema = Schema::with_weight(self.weight);
        for (name, default) in &self.fields {
            if is_reserved(name) {
                return Err(Error::Config(format!(
                    "`{name}` is reserved and cannot be declared as a user field"
                )));
            }
            schema.declare(name.clone(), Value::from_json(default));
        }
        Ok(schema)
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HypergraphConfig {
    pub labels: RelationLabels,
    pub nodes: PropertyDefaults,
    pub edges: PropertyDefaults,
    pub incidences: PropertyDefaults,
}

impl HypergraphConfig {
    /// Parse a configuration document.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn defaults_for(&self, level: Level) -> &PropertyDefaults {
        match level {
            Level::Nodes => &self.nodes,
            Level::Edges => &self.edges,
            Level::Incidences => &self.incidences,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = HypergraphConfig::from_json("{}").unwrap();
        assert_eq!(config, HypergraphConfig::default());
        assert_eq!(config.labels.edges, "edges");
        assert_eq!(config.incidences.weight, 1.0);
    }

    #[test]
    fn test_partial_document() {
        let config = HypergraphConfig::from_json(
            r#"{"labels": {"edges": "e"}, "nodes": {"weight": 0.5, "fields": {"color": "grey"}}}"#,
        )
        .unwrap();
        assert_eq!(config.labels.edges, "e");
        assert_eq!(config.labels.nodes, "nodes");

        let schema = config.defaults_for(Level::Nodes).to_schema().unwrap();
        assert_eq!(schema.weight(), 0.5);
        assert_eq!(schema.default_for("color"), Some(Value::from("grey")));
    }

    #[test]
    fn test_reserved_field_rejected() {
        let config =
            HypergraphConfig::from_json(r#"{"edges": {"fields": {"weight": 3}}}"#).unwrap();
        let err = config.defaults_for(Level::Edges).to_schema().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(HypergraphConfig::from_json("{"), Err(Error::Json(_))));
    }
}
