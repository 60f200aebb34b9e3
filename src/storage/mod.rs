//! # Stores
//!
//! The two sources of truth behind every view.
//!
//! | Store | Module | Holds |
//! |-------|--------|-------|
//! | `IncidenceStore` | `incidence` | Distinct `(edge, node)` pairs; the key universe per level |
//! | `PropertyStore` | `property` | Sparse user-set records plus the field defaults |
//!
//! The incidence store is immutable and shared through `Arc`. Property
//! stores are mutable and shared through [`SharedPropertyStore`], so views
//! observe writes made after they were created.

pub mod incidence;
pub mod property;

use std::sync::Arc;
use parking_lot::RwLock;

pub use incidence::IncidenceStore;
pub use property::{PropertyStore, Schema};

/// A property store shared between its owner and any number of views.
pub type SharedPropertyStore = Arc<RwLock<PropertyStore>>;

/// Wrap a store for sharing.
pub fn shared(store: PropertyStore) -> SharedPropertyStore {
    Arc::new(RwLock::new(store))
}
