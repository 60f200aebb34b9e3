//! PropertyRecord: the fully specified attribute row of one element.

use serde::{Deserialize, Serialize};

use super::{PropertyMap, Value};

/// Reserved field: numeric weight, defaults to 1.
pub const WEIGHT: &str = "weight";
/// Reserved field: open map of extra attributes, defaults to `{}`.
pub const MISC_PROPERTIES: &str = "misc_properties";

/// Default weight when no store schema overrides it.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Whether `field` is one of the two reserved columns.
pub fn is_reserved(field: &str) -> bool {
    field == WEIGHT || field == MISC_PROPERTIES
}

/// Attribute record of a node, edge or incidence.
///
/// The two reserved columns are typed fields; user-defined columns live in
/// `fields`, which serialize as sibling columns of the reserved ones.
/// Records produced by a `PropertyStore` always carry a value for every
/// field of the store's schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyRecord {
    pub weight: f64,
    pub misc_properties: PropertyMap,
    #[serde(flatten)]
    pub fields: PropertyMap,
}

impl Default for PropertyRecord {
    fn default() -> Self {
        Self {
            weight: DEFAULT_WEIGHT,
            misc_properties: PropertyMap::new(),
            fields: PropertyMap::new(),
        }
    }
}

impl PropertyRecord {
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Value of a recognized column, reserved columns included.
    pub fn get(&self, field: &str) -> Option<Value> {
        match field {
            WEIGHT => Some(Value::Float(self.weight)),
            MISC_PROPERTIES => Some(Value::Map(self.misc_properties.clone())),
            _ => self.fields.get(field).cloned(),
        }
    }

    pub fn has_field(&self, field: &str) -> bool {
        is_reserved(field) || self.fields.contains_key(field)
    }
}
