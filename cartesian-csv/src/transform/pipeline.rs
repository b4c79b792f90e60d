//! Load, validate and combine all groups of a node input.
//!
//! # Example
//!
//! ```rust,ignore
//! use cartesian_csv::transform::{combine_input, CombineOptions};
//!
//! let rows = combine_input("people.csv\nstyles.csv", &CombineOptions::default())?;
//! println!("{} combinations", rows.len());
//! ```

use serde::{Deserialize, Serialize};

use super::cartesian::cartesian_product;
use super::concat::load_group;
use crate::error::LoadResult;
use crate::models::{CombinedRowSet, Group};
use crate::parser::parse_groups;

/// Options for combining groups
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombineOptions {
    /// Decode non-UTF-8 CSVs after charset detection instead of failing
    pub detect_encoding: bool,
}

impl Default for CombineOptions {
    fn default() -> Self {
        Self {
            detect_encoding: true,
        }
    }
}

/// Load every group and combine them into the row set the node iterates.
///
/// Nothing is returned unless every group loads; the first failing group
/// aborts the whole combination.
pub fn validate_and_combine(groups: &[Group], options: &CombineOptions) -> LoadResult<CombinedRowSet> {
    let spreadsheets = groups
        .iter()
        .map(|group| load_group(group, options.detect_encoding))
        .collect::<LoadResult<Vec<_>>>()?;

    let rows = cartesian_product(&spreadsheets);
    log::debug!(
        "Combined {} group(s) ({}) into {} row(s)",
        spreadsheets.len(),
        spreadsheets
            .iter()
            .map(|s| s.len().to_string())
            .collect::<Vec<_>>()
            .join(" x "),
        rows.len()
    );

    Ok(CombinedRowSet::new(rows))
}

/// Parse the multiline node input and combine its groups.
pub fn combine_input(input: &str, options: &CombineOptions) -> LoadResult<CombinedRowSet> {
    validate_and_combine(&parse_groups(input), options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadError;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_two_groups_example() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.csv");
        let b = dir.path().join("b.csv");
        fs::write(&a, "N_0\n1\n2\n").unwrap();
        fs::write(&b, "S_0\nx\n").unwrap();

        let input = format!("{}\n{}", a.display(), b.display());
        let rows = combine_input(&input, &CombineOptions::default()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows.get(0).unwrap().get("N_0"), Some("1"));
        assert_eq!(rows.get(0).unwrap().get("S_0"), Some("x"));
        assert_eq!(rows.get(1).unwrap().get("N_0"), Some("2"));
        assert_eq!(rows.get(1).unwrap().get("S_0"), Some("x"));
    }

    #[test]
    fn test_concat_then_product() {
        let dir = tempdir().unwrap();
        let a1 = dir.path().join("a1.csv");
        let a2 = dir.path().join("a2.csv");
        let b = dir.path().join("b.csv");
        fs::write(&a1, "N_0\n1\n").unwrap();
        fs::write(&a2, "N_0\n2\n3\n").unwrap();
        fs::write(&b, "F_0\n0.5\n1.5\n").unwrap();

        let input = format!("{}, {}\n\n{}", a1.display(), a2.display(), b.display());
        let rows = combine_input(&input, &CombineOptions::default()).unwrap();

        assert_eq!(rows.len(), 6);
        assert_eq!(rows.get(5).unwrap().get("N_0"), Some("3"));
        assert_eq!(rows.get(5).unwrap().get("F_0"), Some("1.5"));
    }

    #[test]
    fn test_empty_input_is_empty_set() {
        let rows = combine_input("", &CombineOptions::default()).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_missing_path_in_later_group() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.csv");
        fs::write(&a, "N_0\n1\n").unwrap();

        let input = format!("{}\n{}", a.display(), dir.path().join("gone.csv").display());
        let err = combine_input(&input, &CombineOptions::default()).unwrap_err();
        assert!(matches!(err, LoadError::FileNotFound { .. }));
    }
}
