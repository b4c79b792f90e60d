//! Cartesian product of group spreadsheets.
//!
//! ```text
//! Group A: [a1, a2]    Group B: [b1, b2, b3]
//!
//! → a1+b1, a1+b2, a1+b3, a2+b1, a2+b2, a2+b3
//! ```
//!
//! The last group cycles fastest. Each combination is merged in group order,
//! so a later group's column overrides an earlier group's column of the same
//! name.

use crate::models::{CombinedRow, Spreadsheet};

/// Materialize the cartesian product of `spreadsheets`.
///
/// A single spreadsheet is returned unchanged. No spreadsheets, or any empty
/// spreadsheet, yields no rows.
pub fn cartesian_product(spreadsheets: &[Spreadsheet]) -> Vec<CombinedRow> {
    match spreadsheets {
        [] => Vec::new(),
        [single] => single.clone(),
        _ if spreadsheets.iter().any(Vec::is_empty) => Vec::new(),
        _ => {
            let total: usize = spreadsheets.iter().map(Vec::len).product();
            let mut combined = Vec::with_capacity(total);
            let mut indices = vec![0usize; spreadsheets.len()];

            loop {
                let mut row = CombinedRow::new();
                for (sheet, &i) in spreadsheets.iter().zip(&indices) {
                    row.merge(&sheet[i]);
                }
                combined.push(row);

                // Odometer increment, last position fastest.
                let mut pos = indices.len();
                loop {
                    if pos == 0 {
                        return combined;
                    }
                    pos -= 1;
                    indices[pos] += 1;
                    if indices[pos] < spreadsheets[pos].len() {
                        break;
                    }
                    indices[pos] = 0;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Row;

    fn sheet(column: &str, values: &[&str]) -> Spreadsheet {
        values
            .iter()
            .map(|v| [(column, *v)].into_iter().collect::<Row>())
            .collect()
    }

    #[test]
    fn test_single_group_unchanged() {
        let a = sheet("N_0", &["1", "2", "3"]);
        assert_eq!(cartesian_product(&[a.clone()]), a);
    }

    #[test]
    fn test_no_groups() {
        assert!(cartesian_product(&[]).is_empty());
    }

    #[test]
    fn test_size_and_order() {
        let a = sheet("N_0", &["1", "2"]);
        let b = sheet("S_0", &["x", "y", "z"]);

        let rows = cartesian_product(&[a, b]);

        assert_eq!(rows.len(), 6);
        let pairs: Vec<(&str, &str)> = rows
            .iter()
            .map(|r| (r.get("N_0").unwrap(), r.get("S_0").unwrap()))
            .collect();
        assert_eq!(
            pairs,
            vec![("1", "x"), ("1", "y"), ("1", "z"), ("2", "x"), ("2", "y"), ("2", "z")]
        );
    }

    #[test]
    fn test_three_groups() {
        let a = sheet("A", &["1", "2"]);
        let b = sheet("B", &["1", "2", "3"]);
        let c = sheet("C", &["1", "2"]);

        let rows = cartesian_product(&[a, b, c]);

        assert_eq!(rows.len(), 12);
        assert_eq!(rows[1].get("C"), Some("2"));
        assert_eq!(rows[2].get("B"), Some("2"));
        assert_eq!(rows[6].get("A"), Some("2"));
    }

    #[test]
    fn test_empty_factor() {
        let a = sheet("N_0", &["1", "2"]);
        let b = sheet("S_0", &[]);
        assert!(cartesian_product(&[a, b]).is_empty());
    }

    #[test]
    fn test_later_group_overrides() {
        let a: Spreadsheet = vec![[("S_0", "first"), ("N_0", "1")].into_iter().collect()];
        let b: Spreadsheet = vec![[("S_0", "second")].into_iter().collect()];

        let rows = cartesian_product(&[a, b]);

        assert_eq!(rows[0].get("S_0"), Some("second"));
        assert_eq!(rows[0].get("N_0"), Some("1"));
    }
}
