//! Flat tabular projection of resource graphs.
//!
//! A [`DataFrame`] is an ordered set of named columns plus rows of
//! [`Cell`]s. Builders project their object graph into one for bulk export
//! and diffing; the column sets per resource and [`TableMode`] are fixed in
//! [`schema`].

pub mod schema;

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use cxflow_types::error::TableError;

/// Selects the column set of a projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableMode {
    #[default]
    Basic,
    Advanced,
}

impl FromStr for TableMode {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(TableMode::Basic),
            "advanced" => Ok(TableMode::Advanced),
            other => Err(TableError::InvalidMode(other.to_string())),
        }
    }
}

impl fmt::Display for TableMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableMode::Basic => write!(f, "basic"),
            TableMode::Advanced => write!(f, "advanced"),
        }
    }
}

/// A single table value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Null,
    Bool(bool),
    Str(String),
}

impl Cell {
    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    /// Total order used for sorting: nulls first, then bools, then strings.
    fn sort_cmp(&self, other: &Cell) -> Ordering {
        fn rank(cell: &Cell) -> u8 {
            match cell {
                Cell::Null => 0,
                Cell::Bool(_) => 1,
                Cell::Str(_) => 2,
            }
        }
        match (self, other) {
            (Cell::Bool(a), Cell::Bool(b)) => a.cmp(b),
            (Cell::Str(a), Cell::Str(b)) => a.cmp(b),
            _ => rank(self).cmp(&rank(other)),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => Ok(()),
            Cell::Bool(b) => write!(f, "{b}"),
            Cell::Str(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Cell::Bool(value)
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Str(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Str(value.to_string())
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map_or(Cell::Null, Into::into)
    }
}

/// Ordered columns and rows of cells. Every row has one cell per column.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataFrame {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl DataFrame {
    /// An empty frame with the given columns.
    pub fn with_columns<S: AsRef<str>>(columns: &[S]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.as_ref().to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    fn ensure_column(&mut self, column: &str) -> usize {
        match self.column_index(column) {
            Some(idx) => idx,
            None => {
                self.columns.push(column.to_string());
                for row in &mut self.rows {
                    row.push(Cell::Null);
                }
                self.columns.len() - 1
            }
        }
    }

    /// Append a row given as `(column, value)` pairs. Unknown columns are
    /// added; columns not mentioned are null.
    pub fn push_row<I, K>(&mut self, cells: I)
    where
        I: IntoIterator<Item = (K, Cell)>,
        K: AsRef<str>,
    {
        let mut row = vec![Cell::Null; self.columns.len()];
        for (column, value) in cells {
            let idx = self.ensure_column(column.as_ref());
            if idx >= row.len() {
                row.resize(idx + 1, Cell::Null);
            }
            row[idx] = value;
        }
        self.rows.push(row);
    }

    /// Append the rows of `other` below these, taking the union of columns.
    pub fn concat(&mut self, other: DataFrame) {
        let mapping: Vec<usize> = other
            .columns
            .iter()
            .map(|c| self.ensure_column(c))
            .collect();
        let width = self.columns.len();
        for other_row in other.rows {
            let mut row = vec![Cell::Null; width];
            for (cell, &idx) in other_row.into_iter().zip(&mapping) {
                row[idx] = cell;
            }
            self.rows.push(row);
        }
    }

    /// Stack frames vertically, starting from an empty frame with `columns`.
    pub fn concat_all<S: AsRef<str>>(
        columns: &[S],
        frames: impl IntoIterator<Item = DataFrame>,
    ) -> DataFrame {
        let mut out = DataFrame::with_columns(columns);
        for frame in frames {
            out.concat(frame);
        }
        out
    }

    /// Set every row of `column` to `value`, adding the column if needed.
    pub fn set_column(&mut self, column: &str, value: impl Into<Cell>) {
        let value = value.into();
        let idx = self.ensure_column(column);
        for row in &mut self.rows {
            row[idx] = value.clone();
        }
    }

    /// Project onto `columns` in the given order.
    pub fn select<S: AsRef<str>>(&self, columns: &[S]) -> Result<DataFrame, TableError> {
        let indices = columns
            .iter()
            .map(|c| {
                self.column_index(c.as_ref())
                    .ok_or_else(|| TableError::UnknownColumn(c.as_ref().to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DataFrame {
            columns: columns.iter().map(|c| c.as_ref().to_string()).collect(),
            rows: self
                .rows
                .iter()
                .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
                .collect(),
        })
    }

    /// Stable sort by the given columns, ascending.
    pub fn sort_by<S: AsRef<str>>(&mut self, columns: &[S]) -> Result<(), TableError> {
        let indices = columns
            .iter()
            .map(|c| {
                self.column_index(c.as_ref())
                    .ok_or_else(|| TableError::UnknownColumn(c.as_ref().to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        self.rows.sort_by(|a, b| {
            indices
                .iter()
                .map(|&i| a[i].sort_cmp(&b[i]))
                .find(|ord| ord.is_ne())
                .unwrap_or(Ordering::Equal)
        });
        Ok(())
    }

    /// Value of `column` in row `row`.
    pub fn get(&self, row: usize, column: &str) -> Option<&Cell> {
        let idx = self.column_index(column)?;
        self.rows.get(row).map(|r| &r[idx])
    }

    /// All values of `column`, top to bottom.
    pub fn column(&self, column: &str) -> Option<Vec<&Cell>> {
        let idx = self.column_index(column)?;
        Some(self.rows.iter().map(|r| &r[idx]).collect())
    }
}
