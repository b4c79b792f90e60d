//! Multiline node input to CSV groups.
//!
//! ```text
//! a.csv, b.csv      →  Group [a.csv, b.csv]   (concatenated)
//!                      (blank line dropped)
//! c.csv             →  Group [c.csv]          (combined with the group above)
//! ```

use crate::models::Group;

/// Split the node's multiline input into groups.
///
/// Every non-blank line is one group; its comma-separated entries are trimmed
/// and empty entries are dropped.
pub fn parse_groups(input: &str) -> Vec<Group> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| Group::new(line.split(',').map(str::trim).filter(|p| !p.is_empty())))
        .collect()
}

/// Every path referenced by any group, in input order.
pub fn all_paths(groups: &[Group]) -> impl Iterator<Item = &std::path::Path> {
    groups.iter().flat_map(Group::paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_one_group_per_line() {
        let groups = parse_groups("a.csv\nb.csv\n");

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].paths, vec![PathBuf::from("a.csv")]);
        assert_eq!(groups[1].paths, vec![PathBuf::from("b.csv")]);
    }

    #[test]
    fn test_blank_lines_dropped() {
        let groups = parse_groups("\n  \na.csv\n\n\t\nb.csv");
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn test_comma_separated_paths_keep_order() {
        let groups = parse_groups("  z.csv , a.csv,, m.csv ,");

        assert_eq!(groups.len(), 1);
        assert_eq!(
            groups[0].paths,
            vec![PathBuf::from("z.csv"), PathBuf::from("a.csv"), PathBuf::from("m.csv")]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_groups("").is_empty());
        assert!(parse_groups("\n\n   \n").is_empty());
    }

    #[test]
    fn test_windows_line_endings() {
        let groups = parse_groups("a.csv\r\nb.csv\r\n");
        assert_eq!(groups[1].paths, vec![PathBuf::from("b.csv")]);
    }

    #[test]
    fn test_all_paths_flattens() {
        let groups = parse_groups("a.csv,b.csv\nc.csv");
        let paths: Vec<_> = all_paths(&groups).collect();
        assert_eq!(paths.len(), 3);
        assert_eq!(paths[2], std::path::Path::new("c.csv"));
    }
}
