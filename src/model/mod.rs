//! # Property Model
//!
//! Plain data types shared by the stores and views: values, element
//! identities, and property records.
//!
//! Design rule: no locks, no stores, no I/O here. This module is pure data.

pub mod value;
pub mod property_map;
pub mod key;
pub mod record;

pub use value::Value;
pub use property_map::{props, PropertyMap};
pub use key::{Key, Level, Uid};
pub use record::{is_reserved, PropertyRecord, DEFAULT_WEIGHT, MISC_PROPERTIES, WEIGHT};
