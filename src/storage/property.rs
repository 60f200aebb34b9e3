//! Property store: the sparse overlay of user-set attributes.
//!
//! Only elements whose properties were explicitly set have an entry. A
//! missing entry means "use the schema defaults", which is not the same as
//! an entry that happens to hold default values: views report the latter as
//! explicit properties and the former not at all.
//!
//! ## Rectangular invariant
//!
//! Every stored record carries a value for every field the schema knows.
//! When a new field name shows up (through `set` or `set_default`) all
//! existing records are backfilled with that field's default before the call
//! returns.

use std::collections::BTreeMap;

use hashbrown::HashMap;

use crate::model::*;
use crate::{Error, Result};

// ============================================================================
// Schema
// ============================================================================

/// Field registry: the default weight plus declared user fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    weight: f64,
    fields: BTreeMap<String, Value>,
}

impl Default for Schema {
    fn default() -> Self {
        Self::with_weight(DEFAULT_WEIGHT)
    }
}

impl Schema {
    pub fn with_weight(weight: f64) -> Self {
        Self { weight, fields: BTreeMap::new() }
    }

    /// Declare (or re-declare) a user field. Returns true if the name is new.
    pub fn declare(&mut self, name: impl Into<String>, default: Value) -> bool {
        self.fields.insert(name.into(), default).is_none()
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn contains(&self, field: &str) -> bool {
        is_reserved(field) || self.fields.contains_key(field)
    }

    pub fn default_for(&self, field: &str) -> Option<Value> {
        match field {
            WEIGHT => Some(Value::Float(self.weight)),
            MISC_PROPERTIES => Some(Value::Map(PropertyMap::new())),
            _ => self.fields.get(field).cloned(),
        }
    }

    /// Reserved fields first, then user fields by name.
    pub fn field_names(&self) -> Vec<String> {
        let mut names = vec![WEIGHT.to_string(), MISC_PROPERTIES.to_string()];
        names.extend(self.fields.keys().cloned());
        names
    }

    /// A fresh record holding every default. Nothing is shared between calls.
    pub fn default_record(&self) -> PropertyRecord {
        PropertyRecord {
            weight: self.weight,
            misc_properties: PropertyMap::new(),
            fields: self.fields.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
        }
    }
}

// ============================================================================
// PropertyStore
// ============================================================================

/// Sparse map from element key to its explicitly set record.
#[derive(Debug, Clone, Default)]
pub struct PropertyStore {
    schema: Schema,
    records: HashMap<Key, PropertyRecord>,
}

/// A validated update, ready to apply without further failure.
struct Update {
    weight: Option<f64>,
    misc_properties: Option<PropertyMap>,
    fields: Vec<(String, Value)>,
}

impl PropertyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_schema(schema: Schema) -> Self {
        Self { schema, records: HashMap::new() }
    }

    /// Build a store pre-populated with partial rows.
    ///
    /// Fields a row leaves out are filled from the defaults. Rows for the
    /// same key merge, later values winning.
    pub fn from_rows<I>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Key, PropertyMap)>,
    {
        let mut store = Self::new();
        store.load(rows)?;
        Ok(store)
    }

    /// Insert partial rows into this store.
    pub fn load<I>(&mut self, rows: I) -> Result<()>
    where
        I: IntoIterator<Item = (Key, PropertyMap)>,
    {
        let mut count = 0usize;
        for (key, props) in rows {
            self.set_properties(key, props)?;
            count += 1;
        }
        tracing::debug!(rows = count, records = self.records.len(), "loaded property rows");
        Ok(())
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// The explicit record for `key`, if one was ever set.
    pub fn get(&self, key: &Key) -> Option<&PropertyRecord> {
        self.records.get(key)
    }

    /// Explicit record or a fresh default one.
    pub fn get_or_default(&self, key: &Key) -> PropertyRecord {
        self.records
            .get(key)
            .cloned()
            .unwrap_or_else(|| self.schema.default_record())
    }

    /// Single property of `key`.
    ///
    /// Names that are not schema fields are looked up in the record's
    /// `misc_properties`.
    pub fn get_property(&self, key: &Key, field: &str) -> Option<Value> {
        match self.records.get(key) {
            Some(record) => record
                .get(field)
                .or_else(|| record.misc_properties.get(field).cloned()),
            None => self.schema.default_for(field),
        }
    }

    pub fn default_for(&self, field: &str) -> Option<Value> {
        self.schema.default_for(field)
    }

    pub fn default_record(&self) -> PropertyRecord {
        self.schema.default_record()
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn field_names(&self) -> Vec<String> {
        self.schema.field_names()
    }

    pub fn contains(&self, key: &Key) -> bool {
        self.records.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.records.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Key, &PropertyRecord)> {
        self.records.iter()
    }

    // ========================================================================
    // Writes
    // ========================================================================

    /// Set one field of `key`, creating a default record first if needed.
    pub fn set(&mut self, key: Key, field: &str, value: impl Into<Value>) -> Result<()> {
        let mut props = PropertyMap::new();
        props.insert(field.to_string(), value.into());
        self.set_properties(key, props)
    }

    /// Set several fields of `key` at once. Either all are applied or none.
    pub fn set_properties(&mut self, key: Key, props: PropertyMap) -> Result<()> {
        let update = validate(props)?;

        for (name, _) in &update.fields {
            if !self.schema.contains(name) {
                self.admit_field(name.clone(), Value::Null);
            }
        }

        let schema = &self.schema;
        let record = self
            .records
            .entry(key)
            .or_insert_with(|| schema.default_record());
        if let Some(weight) = update.weight {
            record.weight = weight;
        }
        if let Some(misc) = update.misc_properties {
            record.misc_properties = misc;
        }
        for (name, value) in update.fields {
            record.fields.insert(name, value);
        }
        Ok(())
    }

    /// Declare a user field default, or change the default weight.
    ///
    /// A new field is backfilled into every stored record. Changing the
    /// default of a known field only affects records created afterwards.
    pub fn set_default(&mut self, field: &str, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        match field {
            WEIGHT => {
                self.schema.weight = weight_from(&value)?;
            }
            MISC_PROPERTIES => {
                return Err(Error::ReservedField(MISC_PROPERTIES.to_string()));
            }
            _ if self.schema.fields.contains_key(field) => {
                self.schema.declare(field, value);
            }
            _ => self.admit_field(field.to_string(), value),
        }
        Ok(())
    }

    fn admit_field(&mut self, name: String, default: Value) {
        tracing::debug!(field = %name, records = self.records.len(), "schema gained field");
        for record in self.records.values_mut() {
            record
                .fields
                .entry(name.clone())
                .or_insert_with(|| default.clone());
        }
        self.schema.declare(name, default);
    }
}

fn weight_from(value: &Value) -> Result<f64> {
    match value.as_float() {
        Some(weight) if weight.is_finite() => Ok(weight),
        Some(weight) => Err(Error::TypeError {
            expected: "finite number for `weight`".into(),
            got: weight.to_string(),
        }),
        None => Err(Error::TypeError {
            expected: "number for `weight`".into(),
            got: value.type_name().into(),
        }),
    }
}

fn validate(props: PropertyMap) -> Result<Update> {
    let mut update = Update { weight: None, misc_properties: None, fields: Vec::new() };
    for (name, value) in props {
        match name.as_str() {
            WEIGHT => update.weight = Some(weight_from(&value)?),
            MISC_PROPERTIES => match value {
                Value::Map(m) => update.misc_properties = Some(m),
                other => {
                    return Err(Error::TypeError {
                        expected: "map for `misc_properties`".into(),
                        got: other.type_name().into(),
                    });
                }
            },
            _ => update.fields.push((name, value)),
        }
    }
    Ok(update)
}
