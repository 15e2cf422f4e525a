//! Row tables handed over by the grouping stage

use std::collections::BTreeMap;

use crate::errors::{BarError, ContractViolationError};

/// One raw cell value
#[derive(Debug, Clone, PartialEq)]
pub enum Datum {
    Number(f64),
    Label(String),
}

impl From<f64> for Datum {
    fn from(v: f64) -> Self {
        Datum::Number(v)
    }
}

impl From<&str> for Datum {
    fn from(v: &str) -> Self {
        Datum::Label(v.to_string())
    }
}

/// A named column of raw values
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Numbers(Vec<f64>),
    Labels(Vec<String>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Numbers(v) => v.len(),
            Column::Labels(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `n` copies of one datum
    pub fn repeat(datum: &Datum, n: usize) -> Self {
        match datum {
            Datum::Number(v) => Column::Numbers(vec![*v; n]),
            Datum::Label(s) => Column::Labels(vec![s.clone(); n]),
        }
    }
}

impl From<Vec<f64>> for Column {
    fn from(v: Vec<f64>) -> Self {
        Column::Numbers(v)
    }
}

impl From<Vec<&str>> for Column {
    fn from(v: Vec<&str>) -> Self {
        Column::Labels(v.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for Column {
    fn from(v: Vec<String>) -> Self {
        Column::Labels(v)
    }
}

/// An ordered table of equally long columns, one row per bar
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowTable {
    len: usize,
    columns: BTreeMap<String, Column>,
}

impl RowTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(name, column)` pairs
    pub fn from_columns<I, S>(columns: I) -> Result<Self, BarError>
    where
        I: IntoIterator<Item = (S, Column)>,
        S: Into<String>,
    {
        let mut table = Self::new();
        for (name, column) in columns {
            table.insert(name, column)?;
        }
        Ok(table)
    }

    /// Add or replace a column; its length must match the table's
    pub fn insert(&mut self, name: impl Into<String>, column: Column) -> Result<(), BarError> {
        let name = name.into();
        let others = self.columns.keys().any(|k| *k != name);
        if others && column.len() != self.len {
            return Err(ContractViolationError::new(format!(
                "column `{name}` has {} rows, table has {}",
                column.len(),
                self.len
            ))
            .into());
        }
        self.len = column.len();
        self.columns.insert(name, column);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// A required numeric column
    pub fn numbers(&self, name: &str) -> Result<&[f64], BarError> {
        match self.columns.get(name) {
            Some(Column::Numbers(v)) => Ok(v),
            Some(Column::Labels(_)) => Err(ContractViolationError::new(format!(
                "column `{name}` must be numeric"
            ))
            .into()),
            None => Err(ContractViolationError::new(format!("missing column `{name}`"))
                .with_help("the layout stage must supply position, width, baseline and value columns")
                .into()),
        }
    }
}

/// Identifies one plotting surface within a [`crate::SurfaceSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(pub usize);

/// The grouping variables that produced a split
pub type GroupKey = BTreeMap<String, Datum>;

/// One `(key, rows, surface)` triple from the grouping stage
#[derive(Debug, Clone)]
pub struct Split {
    pub key: GroupKey,
    pub data: RowTable,
    pub surface: SurfaceId,
}

impl Split {
    pub fn new(data: RowTable, surface: SurfaceId) -> Self {
        Self { key: GroupKey::new(), data, surface }
    }

    pub fn with_key(mut self, key: GroupKey) -> Self {
        self.key = key;
        self
    }
}
