//! # Cartesian CSV - Row iterator node for node-based authoring hosts
//!
//! Maps groups of CSV files to a fixed tuple of typed outputs, one combined
//! row per host tick.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ Input lines │────▶│   Groups    │────▶│  Cartesian  │────▶│   Cursor    │
//! │ (a.csv,b..) │     │ (concat+chk)│     │  (cached)   │     │ (row → out) │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cartesian_csv::{CartesianCsvNode, NodeInputs};
//!
//! let mut node = CartesianCsvNode::from_env()?;
//! let outputs = node.execute(&NodeInputs::new("prompts.csv\nseeds.csv"))?;
//! println!("Row {} of {}", outputs.last_row, outputs.row_count);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`models`] - Groups, rows and the combined row set
//! - [`parser`] - Input and CSV parsing
//! - [`validation`] - Column-set checks within a group
//! - [`transform`] - Concatenation and cartesian product
//! - [`cache`] - Combined-row cache and file stamps
//! - [`extract`] - Row to typed outputs
//! - [`node`] - The stateful node, its schema and re-execution hint
//! - [`config`] - Environment configuration
//! - [`diagnostics`] - Per-call log of absorbed failures

// Core modules
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod models;

// Parsing
pub mod parser;

// Validation
pub mod validation;

// Combination
pub mod transform;

// Caching
pub mod cache;

// Output mapping
pub mod extract;

// Node
pub mod node;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{ConfigError, ExtractError, LoadError, NodeError, NodeResult};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{CombinedRow, CombinedRowSet, Group, Row, Spreadsheet};

// =============================================================================
// Re-exports - Parsing & combination
// =============================================================================

pub use parser::{parse_groups, read_csv};
pub use transform::{cartesian_product, combine_input, load_group, validate_and_combine, CombineOptions};

// =============================================================================
// Re-exports - Cache
// =============================================================================

pub use cache::{FileStamps, RowCache, Staleness};

// =============================================================================
// Re-exports - Node
// =============================================================================

pub use config::NodeConfig;
pub use diagnostics::{LogEntry, LogLevel};
pub use extract::{ImageTensor, RowOutputs};
pub use node::{
    change_hint, schema, CartesianCsvNode, ChangeHint, NodeInputs, NodeOutputs, NodeSchema,
    OutputValue, PortKind,
};
