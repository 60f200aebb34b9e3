//! Materialized property table.

use hashbrown::HashMap;
use serde::Serialize;

use crate::model::*;
use crate::{Error, Result};

/// Dense table produced by a view: one row per key, every row carrying
/// the same columns.
///
/// Row order follows the structural relation and is not meaningful;
/// equality compares rows as a set.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PropertyTable {
    columns: Vec<String>,
    rows: Vec<TableRow>,
    #[serde(skip)]
    index: HashMap<Key, usize>,
}

/// A single row in the table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub key: Key,
    #[serde(flatten)]
    pub record: PropertyRecord,
}

impl TableRow {
    /// Get a typed cell from the row.
    pub fn get<T: FromValue>(&self, column: &str) -> Result<T> {
        let val = self.record.get(column)
            .ok_or_else(|| Error::NotFound(format!("Column '{column}'")))?;
        T::from_value(&val)
    }
}

impl PropertyTable {
    pub(crate) fn with_capacity(columns: Vec<String>, rows: usize) -> Self {
        Self {
            columns,
            rows: Vec::with_capacity(rows),
            index: HashMap::with_capacity(rows),
        }
    }

    pub(crate) fn push(&mut self, key: Key, record: PropertyRecord) {
        self.index.insert(key.clone(), self.rows.len());
        self.rows.push(TableRow { key, record });
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, key: &Key) -> Option<&PropertyRecord> {
        self.index.get(key).map(|&i| &self.rows[i].record)
    }

    pub fn contains(&self, key: &Key) -> bool {
        self.index.contains_key(key)
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.rows.iter().map(|row| &row.key)
    }

    /// Order rows by key.
    pub fn sort(&mut self) {
        self.rows.sort_by(|a, b| a.key.cmp(&b.key));
        self.index = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| (row.key.clone(), i))
            .collect();
    }
}

impl PartialEq for PropertyTable {
    fn eq(&self, other: &Self) -> bool {
        self.columns == other.columns
            && self.rows.len() == other.rows.len()
            && self
                .rows
                .iter()
                .all(|row| other.get(&row.key) == Some(&row.record))
    }
}

/// Convert from Value to concrete types.
pub trait FromValue: Sized {
    fn from_value(val: &Value) -> Result<Self>;
}

impl FromValue for Value {
    fn from_value(val: &Value) -> Result<Self> {
        Ok(val.clone())
    }
}

impl FromValue for f64 {
    fn from_value(val: &Value) -> Result<Self> {
        val.as_float().ok_or_else(|| Error::TypeError {
            expected: "Float".into(),
            got: val.type_name().into(),
        })
    }
}

impl FromValue for i64 {
    fn from_value(val: &Value) -> Result<Self> {
        val.as_int().ok_or_else(|| Error::TypeError {
            expected: "Integer".into(),
            got: val.type_name().into(),
        })
    }
}

impl FromValue for String {
    fn from_value(val: &Value) -> Result<Self> {
        match val {
            Value::String(s) => Ok(s.clone()),
            _ => Err(Error::TypeError {
                expected: "String".into(),
                got: val.type_name().into(),
            }),
        }
    }
}

impl FromValue for PropertyMap {
    fn from_value(val: &Value) -> Result<Self> {
        match val {
            Value::Map(m) => Ok(m.clone()),
            _ => Err(Error::TypeError {
                expected: "Map".into(),
                got: val.type_name().into(),
            }),
        }
    }
}
