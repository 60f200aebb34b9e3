//! Element identities: levels, uids and keys.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Value;
use crate::{Error, Result};

/// Which class of hypergraph element a store or view concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Level {
    Nodes = 0,
    Edges = 1,
    Incidences = 2,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Nodes, Level::Edges, Level::Incidences];

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<u8> for Level {
    type Error = Error;

    fn try_from(tag: u8) -> Result<Self> {
        match tag {
            0 => Ok(Level::Nodes),
            1 => Ok(Level::Edges),
            2 => Ok(Level::Incidences),
            other => Err(Error::InvalidLevel(other)),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Nodes => write!(f, "nodes"),
            Level::Edges => write!(f, "edges"),
            Level::Incidences => write!(f, "incidences"),
        }
    }
}

/// Opaque identity of a single node or edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Uid {
    Int(i64),
    Str(String),
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Uid::Int(i) => write!(f, "{i}"),
            Uid::Str(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<i32> for Uid { fn from(v: i32) -> Self { Uid::Int(v as i64) } }
impl From<i64> for Uid { fn from(v: i64) -> Self { Uid::Int(v) } }
impl From<&str> for Uid { fn from(v: &str) -> Self { Uid::Str(v.to_owned()) } }
impl From<String> for Uid { fn from(v: String) -> Self { Uid::Str(v) } }

impl From<Uid> for Value {
    fn from(uid: Uid) -> Self {
        match uid {
            Uid::Int(i) => Value::Int(i),
            Uid::Str(s) => Value::String(s),
        }
    }
}

impl Uid {
    /// Read an identity out of a table cell.
    ///
    /// `Ok(None)` means the cell is empty; non-identity types are errors.
    pub fn from_value(value: &Value) -> Result<Option<Uid>> {
        match value {
            Value::Null => Ok(None),
            Value::Int(i) => Ok(Some(Uid::Int(*i))),
            Value::String(s) => Ok(Some(Uid::Str(s.clone()))),
            other => Err(Error::MalformedRelation(format!(
                "unsupported identity type {}",
                other.type_name()
            ))),
        }
    }
}

/// Identity of an element at a given level.
///
/// Nodes and edges are addressed by a single uid; incidences by the
/// `(edge, node)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Key {
    Scalar(Uid),
    Pair(Uid, Uid),
}

impl Key {
    pub fn scalar(uid: impl Into<Uid>) -> Self {
        Key::Scalar(uid.into())
    }

    pub fn pair(edge: impl Into<Uid>, node: impl Into<Uid>) -> Self {
        Key::Pair(edge.into(), node.into())
    }

    /// Whether this key has the shape used at `level`.
    pub fn fits(&self, level: Level) -> bool {
        matches!(
            (self, level),
            (Key::Scalar(_), Level::Nodes | Level::Edges) | (Key::Pair(..), Level::Incidences)
        )
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Scalar(uid) => write!(f, "{uid}"),
            Key::Pair(edge, node) => write!(f, "({edge}, {node})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_tag() {
        assert_eq!(Level::try_from(0).unwrap(), Level::Nodes);
        assert_eq!(Level::try_from(2).unwrap(), Level::Incidences);
        assert!(matches!(Level::try_from(3), Err(Error::InvalidLevel(3))));
        assert_eq!(Level::Edges.as_u8(), 1);
    }

    #[test]
    fn test_key_shape() {
        assert!(Key::scalar("A").fits(Level::Nodes));
        assert!(Key::scalar(3).fits(Level::Edges));
        assert!(!Key::scalar(3).fits(Level::Incidences));
        assert!(Key::pair(0, "A").fits(Level::Incidences));
        assert!(!Key::pair(0, "A").fits(Level::Nodes));
    }

    #[test]
    fn test_pair_equality_is_structural() {
        assert_eq!(Key::pair(0, "A"), Key::Pair(Uid::Int(0), Uid::Str("A".into())));
        assert_ne!(Key::pair(0, "A"), Key::pair("0", "A"));
        assert_eq!(Key::pair(0, "A").to_string(), "(0, \"A\")");
    }

    #[test]
    fn test_uid_from_value() {
        assert_eq!(Uid::from_value(&Value::Int(7)).unwrap(), Some(Uid::Int(7)));
        assert_eq!(Uid::from_value(&Value::Null).unwrap(), None);
        assert!(Uid::from_value(&Value::Float(1.5)).is_err());
    }
}
