//! Raw tabular dataset.
//!
//! A [`Dataset`] is what an upload looks like before validation: named
//! columns and string cells. It carries no typing; the validator decides
//! what each cell means.

use serde::{Deserialize, Serialize};

/// Rows × named columns of string cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Dataset {
    /// Creates an empty dataset with the given headers.
    ///
    /// Headers are trimmed; lookups are case-insensitive.
    #[must_use]
    pub fn new<S: AsRef<str>>(headers: &[S]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.as_ref().trim().to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a row. Short rows are padded with empty cells, long rows truncated.
    pub fn push_row<S: AsRef<str>>(&mut self, cells: &[S]) {
        let mut row: Vec<String> = cells
            .iter()
            .take(self.headers.len())
            .map(|c| c.as_ref().to_string())
            .collect();
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    /// Adds a row and returns the dataset (builder style).
    #[must_use]
    pub fn with_row<S: AsRef<str>>(mut self, cells: &[S]) -> Self {
        self.push_row(cells);
        self
    }

    /// Returns the column headers.
    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the dataset has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the index of a column (case-insensitive).
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name.trim()))
    }

    /// Returns true if the column exists.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Returns a view over row `index`.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<RowView<'_>> {
        (index < self.rows.len()).then_some(RowView {
            dataset: self,
            index,
        })
    }

    /// Iterates over all rows.
    pub fn rows(&self) -> impl Iterator<Item = RowView<'_>> {
        (0..self.rows.len()).map(move |index| RowView {
            dataset: self,
            index,
        })
    }
}

/// Borrowed view of a single dataset row.
#[derive(Debug, Clone, Copy)]
pub struct RowView<'a> {
    dataset: &'a Dataset,
    index: usize,
}

impl<'a> RowView<'a> {
    /// Zero-based row index.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the trimmed cell of `column`, or `None` if the column is
    /// missing or the cell is blank.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let col = self.dataset.column_index(column)?;
        let cell = self.dataset.rows[self.index][col].trim();
        (!cell.is_empty()).then_some(cell)
    }
}
