//! Inputs and outputs of one node invocation.

use serde::{Deserialize, Serialize};

use crate::config::NodeConfig;
use crate::extract::{ImageTensor, RowOutputs};

/// Inputs of one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeInputs {
    /// One group per line, comma-separated paths within a line
    pub csv_files: String,

    /// Restart iteration (and rebuild on the rising edge)
    #[serde(default)]
    pub reset: bool,

    /// Row to emit instead of the cursor position, -1 for none
    #[serde(default = "no_override")]
    pub row_index: i64,

    /// Render every combined row into `combined_rows_text`
    #[serde(default)]
    pub show_combined_text: bool,
}

fn no_override() -> i64 {
    -1
}

impl NodeInputs {
    pub fn new(csv_files: impl Into<String>) -> Self {
        Self {
            csv_files: csv_files.into(),
            reset: false,
            row_index: no_override(),
            show_combined_text: false,
        }
    }

    pub fn with_reset(mut self, reset: bool) -> Self {
        self.reset = reset;
        self
    }

    pub fn with_row_index(mut self, row_index: i64) -> Self {
        self.row_index = row_index;
        self
    }

    pub fn with_combined_text(mut self, show: bool) -> Self {
        self.show_combined_text = show;
        self
    }

    /// The explicit row selection, if any.
    pub fn row_override(&self) -> Option<usize> {
        usize::try_from(self.row_index).ok()
    }
}

/// Outputs of one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeOutputs {
    /// Typed slot values of the emitted row
    pub values: RowOutputs,
    /// Number of rows in the combined set
    pub row_count: usize,
    /// Debug dump of all rows, empty unless requested
    pub combined_rows_text: String,
    /// The emitted row is the last before wrap-around
    pub no_more_rows: bool,
    /// Index of the emitted row
    pub last_row: usize,
    /// Index the next call will emit
    pub next_row: usize,
}

impl NodeOutputs {
    /// Outputs for an empty combined row set.
    pub fn empty(config: &NodeConfig) -> Self {
        Self {
            values: RowOutputs::defaults(config),
            row_count: 0,
            combined_rows_text: String::new(),
            no_more_rows: true,
            last_row: 0,
            next_row: 0,
        }
    }

    /// Flatten into the host's fixed output order.
    pub fn into_values(self) -> Vec<OutputValue> {
        let RowOutputs {
            images,
            texts,
            strings,
            integers,
            floats,
        } = self.values;

        let mut out = Vec::with_capacity(super::schema::OUTPUT_COUNT);
        out.extend(images.into_iter().map(OutputValue::Image));
        out.extend(texts.into_iter().map(OutputValue::String));
        out.extend(strings.into_iter().map(OutputValue::String));
        out.extend(integers.into_iter().map(OutputValue::Int));
        out.extend(floats.into_iter().map(OutputValue::Float));
        out.push(OutputValue::Int(self.row_count as i64));
        out.push(OutputValue::String(self.combined_rows_text));
        out.push(OutputValue::Boolean(self.no_more_rows));
        out.push(OutputValue::Int(self.last_row as i64));
        out.push(OutputValue::Int(self.next_row as i64));
        out
    }
}

/// One positional output value.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputValue {
    Image(ImageTensor),
    String(String),
    Int(i64),
    Float(f64),
    Boolean(bool),
}

impl OutputValue {
    pub fn kind(&self) -> super::schema::PortKind {
        use super::schema::PortKind;
        match self {
            OutputValue::Image(_) => PortKind::Image,
            OutputValue::String(_) => PortKind::String,
            OutputValue::Int(_) => PortKind::Int,
            OutputValue::Float(_) => PortKind::Float,
            OutputValue::Boolean(_) => PortKind::Boolean,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_override() {
        assert_eq!(NodeInputs::new("").row_override(), None);
        assert_eq!(NodeInputs::new("").with_row_index(-5).row_override(), None);
        assert_eq!(NodeInputs::new("").with_row_index(4).row_override(), Some(4));
    }

    #[test]
    fn test_inputs_deserialize_defaults() {
        let inputs: NodeInputs = serde_json::from_str(r#"{"csv_files": "a.csv"}"#).unwrap();
        assert_eq!(inputs, NodeInputs::new("a.csv"));
    }

    #[test]
    fn test_empty_outputs() {
        let config = NodeConfig::default().with_placeholder_size(1);
        let values = NodeOutputs::empty(&config).into_values();

        assert_eq!(values.len(), 40);
        assert_eq!(values[35], OutputValue::Int(0));
        assert_eq!(values[36], OutputValue::String(String::new()));
        assert_eq!(values[37], OutputValue::Boolean(true));
        assert_eq!(values[38], OutputValue::Int(0));
        assert_eq!(values[39], OutputValue::Int(0));
    }
}
