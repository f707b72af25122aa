// src/table/mod.rs

pub mod read;
pub mod write;

use chrono::{NaiveDate, NaiveDateTime};

pub use read::read_table;
pub use write::{write_summary, write_table};

/// One loosely-typed spreadsheet cell, as handed over by a tabular source.
/// Nothing downstream of `normalize` should look at these variants directly.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl Cell {
    /// Covers blank cells and the NaN float sentinel.
    pub fn is_missing(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Float(f) => f.is_nan(),
            _ => false,
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(s.to_string())
        }
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        if s.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(s)
        }
    }
}

static EMPTY: Cell = Cell::Empty;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawTable {
    /// Column names in source order.
    pub headers: Vec<String>,
    /// Each data row, one cell per header.
    pub rows: Vec<Vec<Cell>>,
}

impl RawTable {
    /// Build a table, padding short rows with `Empty` and dropping cells past
    /// the last header.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut r| {
                r.resize(width, Cell::Empty);
                r
            })
            .collect();
        Self { headers, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Names from `required` that are not headers of this table, in the order given.
    pub fn missing_columns(&self, required: &[&str]) -> Vec<String> {
        required
            .iter()
            .filter(|c| !self.has_column(c))
            .map(|c| c.to_string())
            .collect()
    }

    /// Returns the table with header `from` renamed to `to`. No-op when `from` is absent.
    pub fn rename_column(mut self, from: &str, to: &str) -> Self {
        if let Some(idx) = self.column_index(from) {
            self.headers[idx] = to.to_string();
        }
        self
    }

    /// Returns the table with `values` as column `name`, replacing an existing
    /// column of that name or appending a new one.
    pub fn with_column(mut self, name: &str, values: Vec<Cell>) -> Self {
        debug_assert_eq!(values.len(), self.rows.len());
        match self.column_index(name) {
            Some(idx) => {
                for (row, v) in self.rows.iter_mut().zip(values) {
                    row[idx] = v;
                }
            }
            None => {
                self.headers.push(name.to_string());
                for (row, v) in self.rows.iter_mut().zip(values) {
                    row.push(v);
                }
            }
        }
        self
    }

    pub fn row(&self, idx: usize) -> Row<'_> {
        Row {
            headers: &self.headers,
            cells: &self.rows[idx],
        }
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(move |cells| Row {
            headers: &self.headers,
            cells,
        })
    }
}

/// Borrowed view of one row, addressed by header name.
#[derive(Clone, Copy)]
pub struct Row<'a> {
    headers: &'a [String],
    cells: &'a [Cell],
}

impl<'a> Row<'a> {
    /// The cell under `name`, or `Empty` when the column does not exist.
    pub fn get(&self, name: &str) -> &'a Cell {
        self.headers
            .iter()
            .position(|h| h == name)
            .and_then(|i| self.cells.get(i))
            .unwrap_or(&EMPTY)
    }
}
