//! Column-set validation for CSV groups.
//!
//! Every CSV concatenated into one group must carry the same columns. Order
//! does not matter; the first CSV with at least one data row sets the
//! expectation and header-only files are not checked.
//!
//! # Example
//!
//! ```rust,ignore
//! use cartesian_csv::validation::ColumnSet;
//!
//! let expected = ColumnSet::from_columns(["N_0", "S_0"]);
//! let found = ColumnSet::from_columns(["S_0", "N_0"]);
//! assert!(expected.check(&found, "b.csv".as_ref()).is_ok());
//! ```

use std::collections::BTreeSet;
use std::path::Path;

use crate::error::{LoadError, LoadResult};

/// An unordered set of column names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSet(BTreeSet<String>);

impl ColumnSet {
    pub fn from_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(columns.into_iter().map(Into::into).collect())
    }

    /// Sorted column names.
    pub fn sorted(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }

    /// Check `found` (read from `path`) against this expected set.
    pub fn check(&self, found: &ColumnSet, path: &Path) -> LoadResult<()> {
        if self == found {
            Ok(())
        } else {
            Err(LoadError::ColumnMismatch {
                path: path.to_path_buf(),
                expected: self.sorted(),
                found: found.sorted(),
            })
        }
    }
}
