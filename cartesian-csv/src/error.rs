//! Error types for the Cartesian CSV node.
//!
//! - [`LoadError`] - CSV loading and group validation errors (fatal for a call)
//! - [`ExtractError`] - Per-field extraction failures (absorbed, logged)
//! - [`ConfigError`] - Invalid environment configuration
//! - [`NodeError`] - Top-level errors returned by [`crate::CartesianCsvNode::execute`]
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// Load Errors
// =============================================================================

/// Errors while loading and concatenating the CSVs of a group.
#[derive(Debug, Error)]
pub enum LoadError {
    /// A referenced CSV path does not exist.
    #[error("CSV not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// A CSV in a group does not share the group's column set.
    #[error("Mismatched columns in {}. Expected {expected:?}, got {found:?}", path.display())]
    ColumnMismatch {
        path: PathBuf,
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// Failed to read the file.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV content.
    #[error("Invalid CSV in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Bytes could not be decoded to text.
    #[error("Cannot decode {} as {encoding}", path.display())]
    Encoding { path: PathBuf, encoding: String },
}

// =============================================================================
// Extraction Errors
// =============================================================================

/// Failures while turning one cell into an output value.
///
/// These never abort a call; the mapper substitutes the slot default and
/// records the error as a diagnostic.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Error loading image from {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Error reading text file from {}: {source}", path.display())]
    Text {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid integer in {column}: '{value}'")]
    Integer { column: String, value: String },

    #[error("Invalid float in {column}: '{value}'")]
    Float { column: String, value: String },
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors while reading [`crate::config::NodeConfig`] from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: '{value}' ({reason})")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

// =============================================================================
// Node Errors (top-level)
// =============================================================================

/// Top-level node errors.
///
/// Returned by [`crate::CartesianCsvNode::execute`]; when one is returned no
/// partially combined rows have been cached.
#[derive(Debug, Error)]
pub enum NodeError {
    /// CSV loading or validation failed.
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for load operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Result type for per-field extraction.
pub type ExtractResult<T> = Result<T, ExtractError>;

/// Result type for node operations.
pub type NodeResult<T> = Result<T, NodeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        let load_err = LoadError::FileNotFound {
            path: PathBuf::from("missing.csv"),
        };
        let node_err: NodeError = load_err.into();
        assert!(node_err.to_string().contains("missing.csv"));
    }

    #[test]
    fn test_column_mismatch_format() {
        let err = LoadError::ColumnMismatch {
            path: PathBuf::from("b.csv"),
            expected: vec!["N_0".into(), "S_0".into()],
            found: vec!["N_0".into(), "S_1".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("b.csv"));
        assert!(msg.contains(r#"["N_0", "S_0"]"#));
        assert!(msg.contains(r#"["N_0", "S_1"]"#));
    }

    #[test]
    fn test_extract_error_format() {
        let err = ExtractError::Integer {
            column: "N_2".into(),
            value: "abc".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("N_2"));
        assert!(msg.contains("abc"));
    }
}
