//! Concatenate the CSVs of one group into a single spreadsheet.

use crate::error::{LoadError, LoadResult};
use crate::models::{Group, Spreadsheet};
use crate::parser::read_csv;
use crate::validation::ColumnSet;

/// Load every CSV of `group` and concatenate their rows in path order.
///
/// Fails with [`LoadError::FileNotFound`] on the first missing path and with
/// [`LoadError::ColumnMismatch`] when a non-empty CSV disagrees with the
/// columns of the first non-empty one.
pub fn load_group(group: &Group, detect_encoding: bool) -> LoadResult<Spreadsheet> {
    let mut rows = Spreadsheet::new();
    let mut expected: Option<ColumnSet> = None;

    for path in group.paths() {
        if !path.exists() {
            return Err(LoadError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let table = read_csv(path, detect_encoding)?;

        if !table.rows.is_empty() {
            let found = ColumnSet::from_columns(&table.headers);
            match &expected {
                None => expected = Some(found),
                Some(expected) => expected.check(&found, path)?,
            }
        }

        log::debug!(
            "Loaded {} rows from {} ({})",
            table.rows.len(),
            path.display(),
            table.encoding
        );
        rows.extend(table.rows);
    }

    Ok(rows)
}
