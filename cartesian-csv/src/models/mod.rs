//! Domain models for the Cartesian CSV node.
//!
//! - [`Group`] - One input line: CSV paths to concatenate
//! - [`Row`] - Column name to raw value mapping, in column order
//! - [`Spreadsheet`] - Concatenated rows of one group
//! - [`CombinedRowSet`] - Materialized cartesian product across groups

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::path::{Path, PathBuf};

// =============================================================================
// Group
// =============================================================================

/// Ordered CSV paths taken from one input line.
///
/// All paths of a group must share one column set; their rows are
/// concatenated in path order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
pub struct Group {
    pub paths: Vec<PathBuf>,
}

impl Group {
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter().map(PathBuf::as_path)
    }
}

// =============================================================================
// Row
// =============================================================================

/// One row: column name to raw string value.
///
/// Keeps the order in which columns were first inserted. Re-inserting an
/// existing column replaces its value in place, so merging rows keeps the
/// first group's column order while later groups win on value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    cells: Vec<(String, String)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a column value.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        let column = column.into();
        let value = value.into();
        match self.cells.iter_mut().find(|(c, _)| *c == column) {
            Some(cell) => cell.1 = value,
            None => self.cells.push((column, value)),
        }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v.as_str())
    }

    /// Overwrite this row's columns with every column of `other`.
    pub fn merge(&mut self, other: &Row) {
        for (column, value) in &other.cells {
            self.insert(column.as_str(), value.as_str());
        }
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(c, _)| c.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells.iter().map(|(c, v)| (c.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Row {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut row = Row::new();
        for (column, value) in iter {
            row.insert(column, value);
        }
        row
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (column, value) in &self.cells {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

/// A combination merged from one row of every group.
pub type CombinedRow = Row;

/// Rows of every CSV in a group, in path order.
pub type Spreadsheet = Vec<Row>;

// =============================================================================
// Combined Row Set
// =============================================================================

/// The rows the node iterates over.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct CombinedRowSet {
    rows: Vec<CombinedRow>,
}

impl CombinedRowSet {
    pub fn new(rows: Vec<CombinedRow>) -> Self {
        Self { rows }
    }

    pub fn get(&self, index: usize) -> Option<&CombinedRow> {
        self.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CombinedRow> {
        self.rows.iter()
    }

    /// Debug dump: `Row n:` blocks of `  column: value` lines.
    pub fn to_debug_text(&self) -> String {
        if self.rows.is_empty() {
            return "No combined rows available.".to_string();
        }

        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let cells: Vec<String> = row.iter().map(|(k, v)| format!("  {}: {}", k, v)).collect();
                format!("Row {}:\n{}", i + 1, cells.join("\n"))
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    #[cfg(test)]
    pub(crate) fn rows_mut(&mut self) -> &mut Vec<CombinedRow> {
        &mut self.rows
    }
}

impl From<Vec<CombinedRow>> for CombinedRowSet {
    fn from(rows: Vec<CombinedRow>) -> Self {
        Self::new(rows)
    }
}

impl<'a> IntoIterator for &'a CombinedRowSet {
    type Item = &'a CombinedRow;
    type IntoIter = std::slice::Iter<'a, CombinedRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_overwrites_in_place() {
        let mut row: Row = [("a", "1"), ("b", "2")].into_iter().collect();
        row.insert("a", "9");

        assert_eq!(row.get("a"), Some("9"));
        assert_eq!(row.columns().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_merge_last_write_wins() {
        let mut left: Row = [("N_0", "1"), ("S_0", "left")].into_iter().collect();
        let right: Row = [("S_0", "right"), ("F_0", "0.5")].into_iter().collect();
        left.merge(&right);

        assert_eq!(left.get("S_0"), Some("right"));
        assert_eq!(left.columns().collect::<Vec<_>>(), vec!["N_0", "S_0", "F_0"]);
    }

    #[test]
    fn test_debug_text() {
        let set = CombinedRowSet::new(vec![
            [("N_0", "1"), ("S_0", "x")].into_iter().collect(),
            [("N_0", "2"), ("S_0", "x")].into_iter().collect(),
        ]);

        assert_eq!(
            set.to_debug_text(),
            "Row 1:\n  N_0: 1\n  S_0: x\n\nRow 2:\n  N_0: 2\n  S_0: x"
        );
    }

    #[test]
    fn test_debug_text_empty() {
        assert_eq!(CombinedRowSet::default().to_debug_text(), "No combined rows available.");
    }

    #[test]
    fn test_row_serializes_in_order() {
        let row: Row = [("b", "2"), ("a", "1")].into_iter().collect();
        assert_eq!(serde_json::to_string(&row).unwrap(), r#"{"b":"2","a":"1"}"#);
    }
}
