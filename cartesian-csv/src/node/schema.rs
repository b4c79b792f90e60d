//! Static description of the node for host registration.
//!
//! Mirrors the positional contract of [`super::NodeOutputs::into_values`]:
//! 5 images, 10 texts, 10 strings, 5 numbers, 5 floats, then the iteration
//! metadata.

use serde::Serialize;
use serde_json::{json, Value};

use crate::extract::{FLOAT_SLOTS, IMAGE_SLOTS, INTEGER_SLOTS, STRING_SLOTS, TEXT_SLOTS};

pub const NODE_ID: &str = "CartesianCSVNode";
pub const DISPLAY_NAME: &str = "Custom/Cartesian CSV Node";
pub const CATEGORY: &str = "SystemLevel/Complex Input";
pub const FUNCTION: &str = "execute";

/// Number of positional outputs.
pub const OUTPUT_COUNT: usize =
    IMAGE_SLOTS + TEXT_SLOTS + STRING_SLOTS + INTEGER_SLOTS + FLOAT_SLOTS + 5;

/// Value type carried by a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PortKind {
    Image,
    String,
    Int,
    Float,
    Boolean,
}

/// An input widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputPort {
    pub name: &'static str,
    pub kind: PortKind,
    /// Widget options (`default`, `min`, `multiline`, ...)
    pub options: Value,
}

impl InputPort {
    pub fn new(name: &'static str, kind: PortKind, options: Value) -> Self {
        Self { name, kind, options }
    }
}

/// A positional output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputPort {
    pub name: String,
    pub kind: PortKind,
    pub is_list: bool,
}

impl OutputPort {
    pub fn new(name: impl Into<String>, kind: PortKind) -> Self {
        Self {
            name: name.into(),
            kind,
            is_list: false,
        }
    }
}

/// Everything a host needs to register the node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeSchema {
    pub id: &'static str,
    pub display_name: &'static str,
    pub category: &'static str,
    pub function: &'static str,
    pub inputs: Vec<InputPort>,
    pub outputs: Vec<OutputPort>,
}

/// Describe the node's inputs and outputs.
pub fn schema() -> NodeSchema {
    let inputs = vec![
        InputPort::new(
            "csv_files",
            PortKind::String,
            json!({
                "multiline": true,
                "default": "",
                "placeholder": "Enter file paths, one per line (comma-separated = concatenate).",
                "lines": 10
            }),
        ),
        InputPort::new("reset", PortKind::Boolean, json!({ "default": false })),
        InputPort::new("row_index", PortKind::Int, json!({ "default": -1, "min": -1 })),
        InputPort::new(
            "show_combined_text",
            PortKind::Boolean,
            json!({ "default": false, "label": "Show Combined Rows Text" }),
        ),
    ];

    let slot_ports = [
        ("Image", PortKind::Image, IMAGE_SLOTS),
        ("Text", PortKind::String, TEXT_SLOTS),
        ("String", PortKind::String, STRING_SLOTS),
        ("Number", PortKind::Int, INTEGER_SLOTS),
        ("Float", PortKind::Float, FLOAT_SLOTS),
    ];

    let mut outputs: Vec<OutputPort> = slot_ports
        .iter()
        .flat_map(|&(label, kind, count)| {
            (0..count).map(move |i| OutputPort::new(format!("{} {}", label, i), kind))
        })
        .collect();

    outputs.extend([
        OutputPort::new("Row Count", PortKind::Int),
        OutputPort::new("Combined Rows", PortKind::String),
        OutputPort::new("No More", PortKind::Boolean),
        OutputPort::new("Last Row", PortKind::Int),
        OutputPort::new("Next Row", PortKind::Int),
    ]);

    NodeSchema {
        id: NODE_ID,
        display_name: DISPLAY_NAME,
        category: CATEGORY,
        function: FUNCTION,
        inputs,
        outputs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NodeConfig;
    use crate::node::NodeOutputs;

    #[test]
    fn test_output_count() {
        let schema = schema();
        assert_eq!(schema.outputs.len(), OUTPUT_COUNT);
        assert_eq!(OUTPUT_COUNT, 40);
        assert!(schema.outputs.iter().all(|p| !p.is_list));
    }

    #[test]
    fn test_output_names() {
        let names: Vec<String> = schema().outputs.into_iter().map(|p| p.name).collect();

        assert_eq!(names[0], "Image 0");
        assert_eq!(names[5], "Text 0");
        assert_eq!(names[15], "String 0");
        assert_eq!(names[25], "Number 0");
        assert_eq!(names[30], "Float 0");
        assert_eq!(names[35..], ["Row Count", "Combined Rows", "No More", "Last Row", "Next Row"]);
    }

    #[test]
    fn test_kinds_match_output_values() {
        let config = NodeConfig::default().with_placeholder_size(1);
        let values = NodeOutputs::empty(&config).into_values();

        for (port, value) in schema().outputs.iter().zip(&values) {
            assert_eq!(port.kind, value.kind(), "port {}", port.name);
        }
    }

    #[test]
    fn test_row_index_input() {
        let schema = schema();
        let row_index = schema.inputs.iter().find(|p| p.name == "row_index").unwrap();

        assert_eq!(row_index.kind, PortKind::Int);
        assert_eq!(row_index.options["default"], -1);
        assert_eq!(row_index.options["min"], -1);
    }
}
