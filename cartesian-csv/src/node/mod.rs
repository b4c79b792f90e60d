//! The Cartesian CSV node.
//!
//! A [`CartesianCsvNode`] owns all state that survives between host ticks:
//! the cached combined rows, the file stamps they were built from, the
//! iteration cursor and the reset latch. Every mutation goes through
//! [`CartesianCsvNode::execute`].
//!
//! # Example
//!
//! ```rust,ignore
//! use cartesian_csv::{CartesianCsvNode, NodeConfig, NodeInputs};
//!
//! let mut node = CartesianCsvNode::new(NodeConfig::default());
//! let inputs = NodeInputs::new("subjects.csv\nstyles.csv");
//!
//! loop {
//!     let outputs = node.execute(&inputs)?;
//!     println!("row {} of {}", outputs.last_row, outputs.row_count);
//!     if outputs.no_more_rows {
//!         break;
//!     }
//! }
//! ```

pub mod cursor;
pub mod fingerprint;
pub mod outputs;
pub mod schema;

pub use cursor::{Cursor, ResetLatch, Step};
pub use fingerprint::{change_hint, ChangeHint};
pub use outputs::{NodeInputs, NodeOutputs, OutputValue};
pub use schema::{schema, NodeSchema, PortKind};

use crate::cache::{FileStamps, RowCache};
use crate::config::NodeConfig;
use crate::diagnostics::{Diagnostics, LogEntry};
use crate::error::NodeResult;
use crate::extract::map_row;
use crate::models::CombinedRowSet;
use crate::parser::parse_groups;
use crate::transform::validate_and_combine;

/// Stateful row iterator over the cartesian product of CSV groups.
#[derive(Debug, Default)]
pub struct CartesianCsvNode {
    config: NodeConfig,
    cache: RowCache,
    cursor: Cursor,
    latch: ResetLatch,
    diagnostics: Diagnostics,
}

impl CartesianCsvNode {
    pub fn new(config: NodeConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Create a node configured from the environment.
    pub fn from_env() -> NodeResult<Self> {
        Ok(Self::new(NodeConfig::from_env()?))
    }

    /// Create a node configured from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> NodeResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self::new(NodeConfig::from_lookup(lookup)?))
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    /// The cached combined rows.
    pub fn rows(&self) -> &CombinedRowSet {
        self.cache.rows()
    }

    /// Stamps of the files the cached rows were built from.
    pub fn stamps(&self) -> &FileStamps {
        self.cache.stamps()
    }

    /// Index the next un-overridden call will emit.
    pub fn cursor(&self) -> usize {
        self.cursor.position()
    }

    pub fn reset_latch(&self) -> ResetLatch {
        self.latch
    }

    /// Failures absorbed during the last call.
    pub fn diagnostics(&self) -> &[LogEntry] {
        self.diagnostics.entries()
    }

    /// Re-execution hint for `inputs`.
    pub fn is_changed(inputs: &NodeInputs) -> ChangeHint {
        change_hint(inputs)
    }

    /// Run one tick.
    ///
    /// Rebuilds the combined rows when needed, then emits the row under the
    /// cursor (or the overridden row) and advances. Load failures are
    /// returned without touching the cached rows; field failures are absorbed
    /// into [`Self::diagnostics`].
    pub fn execute(&mut self, inputs: &NodeInputs) -> NodeResult<NodeOutputs> {
        self.diagnostics.clear();
        let groups = parse_groups(&inputs.csv_files);

        if self.latch.is_held(inputs.reset) {
            log::debug!("Reset held, restarting iteration");
            self.cursor.reset();
        }

        let stamps = FileStamps::capture(&groups);
        let reason = if self.latch.is_edge(inputs.reset) {
            Some("reset requested".to_string())
        } else {
            self.cache
                .staleness(&groups, &stamps)
                .map(|staleness| staleness.to_string())
        };

        if let Some(reason) = reason {
            let rows = validate_and_combine(&groups, &self.config.combine_options())?;
            self.diagnostics.info(format!(
                "Rebuilt {} combined row(s) from {} group(s): {}",
                rows.len(),
                groups.len(),
                reason
            ));
            self.cache.store(groups, rows, stamps);
            self.cursor.reset();
            self.latch.arm();
        } else {
            log::debug!("Reusing {} cached row(s)", self.cache.rows().len());
        }

        self.latch.settle(inputs.reset);

        let rows = self.cache.rows();
        if rows.is_empty() {
            return Ok(NodeOutputs::empty(&self.config));
        }

        if let Some(index) = inputs.row_override() {
            self.cursor.jump(index % rows.len());
        }

        let step = self.cursor.step(rows.len());
        let row = match rows.get(step.last_row) {
            Some(row) => row,
            None => return Ok(NodeOutputs::empty(&self.config)),
        };

        let values = map_row(row, &self.config, &mut self.diagnostics);
        let combined_rows_text = if inputs.show_combined_text {
            rows.to_debug_text()
        } else {
            String::new()
        };

        Ok(NodeOutputs {
            values,
            row_count: rows.len(),
            combined_rows_text,
            no_more_rows: step.no_more_rows,
            last_row: step.last_row,
            next_row: step.next_row,
        })
    }
}
