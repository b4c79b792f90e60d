//! Row-to-output mapping.
//!
//! Turns one combined row into the node's typed outputs. Every field kind has
//! an extraction function returning an [`ExtractResult`]; the mapper folds
//! failures into the slot's default and records them as diagnostics, so
//! mapping a row never fails.

pub mod image;
pub mod slots;

pub use self::image::{load_image, ImageTensor};
pub use slots::{
    parse_column, SlotKind, SlotValues, FLOAT_SLOTS, IMAGE_SLOTS, INTEGER_SLOTS, STRING_SLOTS,
    TEXT_SLOTS,
};

use std::fs;
use std::path::Path;

use crate::config::NodeConfig;
use crate::diagnostics::Diagnostics;
use crate::error::{ExtractError, ExtractResult};
use crate::models::Row;

/// Typed values of every output slot.
#[derive(Debug, Clone, PartialEq)]
pub struct RowOutputs {
    pub images: Vec<ImageTensor>,
    pub texts: Vec<String>,
    pub strings: Vec<String>,
    pub integers: Vec<i64>,
    pub floats: Vec<f64>,
}

impl RowOutputs {
    /// Every slot at its default.
    pub fn defaults(config: &NodeConfig) -> Self {
        let placeholder = placeholder(config);
        Self {
            images: vec![placeholder; IMAGE_SLOTS],
            texts: vec![String::new(); TEXT_SLOTS],
            strings: vec![String::new(); STRING_SLOTS],
            integers: vec![0; INTEGER_SLOTS],
            floats: vec![0.0; FLOAT_SLOTS],
        }
    }
}

fn placeholder(config: &NodeConfig) -> ImageTensor {
    ImageTensor::placeholder(config.placeholder_size, config.placeholder_color)
}

/// Load an image slot value.
pub fn extract_image(path: &str) -> ExtractResult<ImageTensor> {
    load_image(Path::new(path)).map_err(|source| ExtractError::Image {
        path: path.into(),
        source,
    })
}

/// Read a text slot value as a UTF-8 file.
pub fn extract_text(path: &str) -> ExtractResult<String> {
    fs::read_to_string(path).map_err(|source| ExtractError::Text {
        path: path.into(),
        source,
    })
}

/// Parse an integer slot value.
pub fn extract_integer(column: &str, value: &str) -> ExtractResult<i64> {
    value.trim().parse().map_err(|_| ExtractError::Integer {
        column: column.to_string(),
        value: value.to_string(),
    })
}

/// Parse a float slot value.
pub fn extract_float(column: &str, value: &str) -> ExtractResult<f64> {
    value.trim().parse().map_err(|_| ExtractError::Float {
        column: column.to_string(),
        value: value.to_string(),
    })
}

fn or_default<T>(result: ExtractResult<T>, default: impl FnOnce() -> T, diagnostics: &mut Diagnostics) -> T {
    result.unwrap_or_else(|err| {
        diagnostics.warning(err.to_string());
        default()
    })
}

/// Map a combined row to typed outputs.
pub fn map_row(row: &Row, config: &NodeConfig, diagnostics: &mut Diagnostics) -> RowOutputs {
    let values = SlotValues::from_row(row);
    let mut outputs = RowOutputs::defaults(config);

    for (slot, value) in outputs.images.iter_mut().zip(&values.images) {
        if let Some(path) = value {
            *slot = or_default(extract_image(path), || placeholder(config), diagnostics);
        }
    }

    for (slot, value) in outputs.texts.iter_mut().zip(&values.texts) {
        if let Some(path) = value {
            *slot = or_default(extract_text(path), String::new, diagnostics);
        }
    }

    for (slot, value) in outputs.strings.iter_mut().zip(&values.strings) {
        if let Some(value) = value {
            slot.clone_from(value);
        }
    }

    for (i, (slot, value)) in outputs.integers.iter_mut().zip(&values.integers).enumerate() {
        if let Some(value) = value {
            let column = format!("{}_{}", SlotKind::Integer.prefix(), i);
            *slot = or_default(extract_integer(&column, value), || 0, diagnostics);
        }
    }

    for (i, (slot, value)) in outputs.floats.iter_mut().zip(&values.floats).enumerate() {
        if let Some(value) = value {
            let column = format!("{}_{}", SlotKind::Float.prefix(), i);
            *slot = or_default(extract_float(&column, value), || 0.0, diagnostics);
        }
    }

    outputs
}
