//! # hypergraph-props: property views for hypergraphs
//!
//! Attribute data for the nodes, edges and incidences of a hypergraph,
//! exposed as dense tables that merge structure with sparse user overrides.
//!
//! ## Design Principles
//!
//! 1. **Structure is immutable**: `IncidenceStore` is built once and shared
//! 2. **Overrides are sparse**: `PropertyStore` only holds what a caller set
//! 3. **Views are pure**: `HypergraphView::materialize` recomputes from the
//!    current stores on every call and never caches
//!
//! ## Quick Start
//!
//! ```rust
//! use hypergraph_props::{Hypergraph, Key, Level, WEIGHT};
//!
//! # fn example() -> hypergraph_props::Result<()> {
//! let hg = Hypergraph::from_pairs([(0, "A"), (0, "B"), (1, "A")]);
//! hg.set_property(Level::Incidences, Key::pair(0, "A"), WEIGHT, 42)?;
//!
//! let view = hg.view(Level::Incidences);
//! let table = view.materialize();
//! assert_eq!(table.len(), 3);
//! assert_eq!(table.get(&Key::pair(0, "A")).unwrap().weight, 42.0);
//! assert_eq!(view.explicit_properties().len(), 1);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod config;
pub mod storage;
pub mod view;

use std::sync::Arc;

// ============================================================================
// Re-exports
// ============================================================================

pub use model::{
    Key, Level, Uid, Value, PropertyMap, PropertyRecord,
    MISC_PROPERTIES, WEIGHT,
};
pub use config::{HypergraphConfig, PropertyDefaults, RelationLabels};
pub use storage::{IncidenceStore, PropertyStore, Schema, SharedPropertyStore};
pub use view::{HypergraphView, PropertyTable, TableRow};

// ============================================================================
// Top-level Hypergraph handle
// ============================================================================

/// The primary entry point. Owns the structural relation and one property
/// store per level, and hands out views over them.
#[derive(Debug, Clone)]
pub struct Hypergraph {
    incidences: Arc<IncidenceStore>,
    /// Indexed by `Level::index()`.
    properties: [SharedPropertyStore; 3],
}

impl Hypergraph {
    /// Create a Hypergraph with empty property stores and default schemas.
    pub fn new(incidences: IncidenceStore) -> Self {
        Self {
            incidences: Arc::new(incidences),
            properties: Level::ALL.map(|_| storage::shared(PropertyStore::new())),
        }
    }

    /// Create a Hypergraph from raw `(edge, node)` pairs.
    pub fn from_pairs<E, N>(pairs: impl IntoIterator<Item = (E, N)>) -> Self
    where
        E: Into<Uid>,
        N: Into<Uid>,
    {
        Self::new(IncidenceStore::new(pairs))
    }

    /// Create a Hypergraph whose property stores use the configured defaults.
    pub fn with_config(incidences: IncidenceStore, config: &HypergraphConfig) -> Result<Self> {
        let [nodes, edges, incidence_props] =
            Level::ALL.map(|level| config.defaults_for(level).to_schema());
        let properties = [nodes?, edges?, incidence_props?]
            .map(|schema| storage::shared(PropertyStore::with_schema(schema)));
        Ok(Self { incidences: Arc::new(incidences), properties })
    }

    /// Create a Hypergraph from labelled table rows.
    pub fn from_rows(rows: &[PropertyMap], config: &HypergraphConfig) -> Result<Self> {
        let incidences = IncidenceStore::from_rows(rows, &config.labels)?;
        Self::with_config(incidences, config)
    }

    pub fn incidences(&self) -> &IncidenceStore {
        &self.incidences
    }

    /// The property store of `level`, shared with every view of that level.
    pub fn property_store(&self, level: Level) -> SharedPropertyStore {
        Arc::clone(&self.properties[level.index()])
    }

    /// Merged view over `level`.
    pub fn view(&self, level: Level) -> HypergraphView {
        HypergraphView::new(Arc::clone(&self.incidences), level, self.property_store(level))
    }

    /// Set one property on the element `key` of `level`.
    ///
    /// Keys outside the structural universe are accepted; views skip them.
    pub fn set_property(
        &self,
        level: Level,
        key: Key,
        field: &str,
        value: impl Into<Value>,
    ) -> Result<()> {
        check_shape(level, &key)?;
        tracing::trace!(%level, %key, field, "set property");
        self.properties[level.index()].write().set(key, field, value)
    }

    /// Set several properties on the element `key` of `level`, all or none.
    pub fn set_properties(&self, level: Level, key: Key, props: PropertyMap) -> Result<()> {
        check_shape(level, &key)?;
        self.properties[level.index()].write().set_properties(key, props)
    }

    /// Swap the whole property store of `level`. Existing views see the new one.
    pub fn replace_properties(&self, level: Level, store: PropertyStore) {
        *self.properties[level.index()].write() = store;
    }
}

fn check_shape(level: Level, key: &Key) -> Result<()> {
    if key.fits(level) {
        Ok(())
    } else {
        Err(Error::KeyShape { level, key: key.to_string() })
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Malformed relation: {0}")]
    MalformedRelation(String),

    #[error("Unknown key: {0}")]
    UnknownKey(String),

    #[error("Invalid level {0}: expected 0 (nodes), 1 (edges) or 2 (incidences)")]
    InvalidLevel(u8),

    #[error("Key {key} does not address {level}")]
    KeyShape { level: Level, key: String },

    #[error("Type error: expected {expected}, got {got}")]
    TypeError { expected: String, got: String },

    #[error("Reserved field `{0}` cannot be redeclared")]
    ReservedField(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
