//! PropertyMap: named values on a record or inside `misc_properties`.

use std::collections::HashMap;
use super::Value;

/// A map of property names to values.
pub type PropertyMap = HashMap<String, Value>;

/// Build a PropertyMap from `(name, value)` pairs.
///
/// ```
/// use hypergraph_props::model::{props, Value};
///
/// let p = props([("weight", Value::from(2)), ("color", Value::from("red"))]);
/// assert_eq!(p.len(), 2);
/// ```
pub fn props<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> PropertyMap
where
    K: Into<String>,
    V: Into<Value>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
}
