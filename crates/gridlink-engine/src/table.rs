//! Column-major tabular payloads returned by engine queries.
//!
//! The engine answers every topology and extension query with a small table:
//! an index column (the row identifiers) plus named data columns. [`Table`]
//! is the owned, already-materialized form of that payload. Accessors fail
//! fast with [`GridError::MalformedTable`] naming the table and the missing
//! or mistyped column, so a misbehaving engine surfaces immediately instead
//! of corrupting downstream graph construction.

use gridlink_core::{GridError, GridResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single tabular cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            Value::Str(_) => "str",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// A named series of values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    name: String,
    values: Vec<Value>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// String column from a slice of ids.
    pub fn str(name: impl Into<String>, values: &[&str]) -> Self {
        Self::new(name, values.iter().map(|v| Value::from(*v)).collect())
    }

    /// Integer column, e.g. node numbers.
    pub fn int(name: impl Into<String>, values: &[i64]) -> Self {
        Self::new(name, values.iter().map(|v| Value::from(*v)).collect())
    }

    pub fn bool(name: impl Into<String>, values: &[bool]) -> Self {
        Self::new(name, values.iter().map(|v| Value::from(*v)).collect())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// An index column plus named data columns, all of equal length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    name: String,
    index: Column,
    columns: Vec<Column>,
}

impl Table {
    /// Assemble a table, checking that every column matches the index length.
    pub fn new(name: impl Into<String>, index: Column, columns: Vec<Column>) -> GridResult<Self> {
        let name = name.into();
        for column in &columns {
            if column.len() != index.len() {
                return Err(GridError::malformed(
                    &name,
                    format!(
                        "column '{}' has {} rows, index has {}",
                        column.name(),
                        column.len(),
                        index.len()
                    ),
                ));
            }
        }
        Ok(Self {
            name,
            index,
            columns,
        })
    }

    /// Table with an index and no data columns.
    pub fn index_only(name: impl Into<String>, index: Column) -> Self {
        Self {
            name: name.into(),
            index,
            columns: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Row identifiers.
    pub fn index(&self) -> &Column {
        &self.index
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Look up a data column by name; malformed-table error when absent.
    pub fn column(&self, name: &str) -> GridResult<&Column> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| {
                GridError::malformed(&self.name, format!("missing column '{name}'"))
            })
    }

    /// All values of a column as `&str`, erring on the first non-string cell.
    pub fn str_column(&self, name: &str) -> GridResult<Vec<&str>> {
        let column = self.column(name)?;
        column
            .values
            .iter()
            .map(|v| {
                v.as_str().ok_or_else(|| {
                    GridError::malformed(
                        &self.name,
                        format!("column '{name}': expected str, got {}", v.type_name()),
                    )
                })
            })
            .collect()
    }

    /// All values of a column as `i64`, erring on the first non-integer cell.
    pub fn int_column(&self, name: &str) -> GridResult<Vec<i64>> {
        let column = self.column(name)?;
        column
            .values
            .iter()
            .map(|v| {
                v.as_int().ok_or_else(|| {
                    GridError::malformed(
                        &self.name,
                        format!("column '{name}': expected int, got {}", v.type_name()),
                    )
                })
            })
            .collect()
    }

    /// All values of a column as `bool`.
    pub fn bool_column(&self, name: &str) -> GridResult<Vec<bool>> {
        let column = self.column(name)?;
        column
            .values
            .iter()
            .map(|v| {
                v.as_bool().ok_or_else(|| {
                    GridError::malformed(
                        &self.name,
                        format!("column '{name}': expected bool, got {}", v.type_name()),
                    )
                })
            })
            .collect()
    }

    /// Index values as `&str` (bus-breaker row ids are strings).
    pub fn str_index(&self) -> GridResult<Vec<&str>> {
        self.index
            .values
            .iter()
            .map(|v| {
                v.as_str().ok_or_else(|| {
                    GridError::malformed(
                        &self.name,
                        format!("index: expected str, got {}", v.type_name()),
                    )
                })
            })
            .collect()
    }

    /// Index values as `i64` (node-breaker row ids are node numbers).
    pub fn int_index(&self) -> GridResult<Vec<i64>> {
        self.index
            .values
            .iter()
            .map(|v| {
                v.as_int().ok_or_else(|| {
                    GridError::malformed(
                        &self.name,
                        format!("index: expected int, got {}", v.type_name()),
                    )
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn switches_table() -> Table {
        Table::new(
            "switches",
            Column::str("id", &["BR1", "BR2"]),
            vec![
                Column::str("bus1_id", &["A", "B"]),
                Column::str("bus2_id", &["B", "C"]),
                Column::bool("open", &[false, true]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_column_lookup() {
        let table = switches_table();
        assert_eq!(table.len(), 2);
        assert_eq!(table.str_column("bus1_id").unwrap(), ["A", "B"]);
        assert_eq!(table.bool_column("open").unwrap(), [false, true]);
    }

    #[test]
    fn test_missing_column_is_malformed() {
        let table = switches_table();
        let err = table.column("node1").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("switches"));
        assert!(message.contains("node1"));
    }

    #[test]
    fn test_type_mismatch_is_malformed() {
        let table = switches_table();
        let err = table.int_column("bus1_id").unwrap_err();
        assert!(err.to_string().contains("expected int"));
    }

    #[test]
    fn test_ragged_columns_rejected() {
        let result = Table::new(
            "nodes",
            Column::int("node", &[1, 2, 3]),
            vec![Column::str("connectable_id", &["LOAD"])],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_int_index() {
        let table = Table::index_only("nodes", Column::int("node", &[1, 2, 3]));
        assert_eq!(table.int_index().unwrap(), [1, 2, 3]);
        assert!(table.str_index().is_err());
    }
}
