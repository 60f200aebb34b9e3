//! # Hypergraph views
//!
//! A view merges the structural universe of one level with that level's
//! property store:
//!
//! ```text
//! IncidenceStore::key_universe(level) ──┐
//!                                       ├─► materialize() ─► PropertyTable
//! PropertyStore (explicit records) ─────┘
//! ```
//!
//! Nothing is cached. Every call reads the current state of both stores, so
//! a field added to the schema shows up in the next materialization and
//! tables produced earlier stay as they were.

pub mod table;

use std::sync::Arc;

use crate::model::*;
use crate::storage::{IncidenceStore, SharedPropertyStore};
use crate::{Error, Result};

pub use table::{FromValue, PropertyTable, TableRow};

/// Merged view over one level of a hypergraph.
#[derive(Debug, Clone)]
pub struct HypergraphView {
    incidences: Arc<IncidenceStore>,
    level: Level,
    properties: SharedPropertyStore,
}

impl HypergraphView {
    pub fn new(incidences: Arc<IncidenceStore>, level: Level, properties: SharedPropertyStore) -> Self {
        Self { incidences, level, properties }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn incidences(&self) -> &IncidenceStore {
        &self.incidences
    }

    pub fn property_store(&self) -> &SharedPropertyStore {
        &self.properties
    }

    /// Number of keys in the universe.
    pub fn len(&self) -> usize {
        self.incidences.universe_len(self.level)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, key: &Key) -> bool {
        self.incidences.contains(self.level, key)
    }

    pub fn keys(&self) -> Vec<Key> {
        self.incidences.key_universe(self.level)
    }

    pub fn field_names(&self) -> Vec<String> {
        self.properties.read().field_names()
    }

    /// Dense table with exactly one row per key of the universe.
    ///
    /// Keys with an explicit record get that record; every other key gets a
    /// fresh default record. Explicit records for keys outside the universe
    /// are ignored.
    pub fn materialize(&self) -> PropertyTable {
        let store = self.properties.read();
        let universe = self.incidences.key_universe(self.level);
        let mut table = PropertyTable::with_capacity(store.field_names(), universe.len());
        let mut explicit = 0usize;
        for key in universe {
            let record = match store.get(&key) {
                Some(record) => {
                    explicit += 1;
                    record.clone()
                }
                None => store.default_record(),
            };
            table.push(key, record);
        }
        tracing::debug!(
            level = %self.level,
            rows = table.len(),
            explicit,
            "materialized view"
        );
        table
    }

    /// Only the rows whose key has an explicit record inside the universe.
    pub fn explicit_properties(&self) -> PropertyTable {
        let store = self.properties.read();
        let mut table = PropertyTable::with_capacity(store.field_names(), store.len());
        let mut orphaned = 0usize;
        for (key, record) in store.iter() {
            if self.incidences.contains(self.level, key) {
                table.push(key.clone(), record.clone());
            } else {
                orphaned += 1;
            }
        }
        if orphaned > 0 {
            tracing::trace!(level = %self.level, orphaned, "skipped records outside the universe");
        }
        table
    }

    /// Full record of one key, defaults filled in.
    pub fn get(&self, key: &Key) -> Result<PropertyRecord> {
        self.check_key(key)?;
        Ok(self.properties.read().get_or_default(key))
    }

    /// One property of one key.
    pub fn get_property(&self, key: &Key, field: &str) -> Result<Option<Value>> {
        self.check_key(key)?;
        Ok(self.properties.read().get_property(key, field))
    }

    fn check_key(&self, key: &Key) -> Result<()> {
        if self.contains(key) {
            Ok(())
        } else {
            Err(Error::UnknownKey(format!("{key} is not one of the {}", self.level)))
        }
    }
}
