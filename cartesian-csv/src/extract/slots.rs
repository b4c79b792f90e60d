//! Column naming convention for output slots.
//!
//! | Prefix | Kind                | Slots |
//! |--------|---------------------|-------|
//! | `I_n`  | image file path     | 0-4   |
//! | `T_n`  | text file path      | 0-9   |
//! | `S_n`  | literal string      | 0-9   |
//! | `N_n`  | integer             | 0-4   |
//! | `F_n`  | float               | 0-4   |
//!
//! Anything after a second underscore is ignored (`S_0_title` is `S_0`).

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::Row;

pub const IMAGE_SLOTS: usize = 5;
pub const TEXT_SLOTS: usize = 10;
pub const STRING_SLOTS: usize = 10;
pub const INTEGER_SLOTS: usize = 5;
pub const FLOAT_SLOTS: usize = 5;

static COLUMN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([ITSNF])_([0-9]+)(?:_|$)").expect("valid column pattern"));

/// Kind of output a column feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotKind {
    Image,
    Text,
    String,
    Integer,
    Float,
}

impl SlotKind {
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "I" => Some(Self::Image),
            "T" => Some(Self::Text),
            "S" => Some(Self::String),
            "N" => Some(Self::Integer),
            "F" => Some(Self::Float),
            _ => None,
        }
    }

    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Image => "I",
            Self::Text => "T",
            Self::String => "S",
            Self::Integer => "N",
            Self::Float => "F",
        }
    }

    /// Number of output slots of this kind.
    pub fn slot_count(&self) -> usize {
        match self {
            Self::Image => IMAGE_SLOTS,
            Self::Text => TEXT_SLOTS,
            Self::String => STRING_SLOTS,
            Self::Integer => INTEGER_SLOTS,
            Self::Float => FLOAT_SLOTS,
        }
    }
}

/// Resolve a column name to its slot, if it addresses one.
pub fn parse_column(column: &str) -> Option<(SlotKind, usize)> {
    let caps = COLUMN_PATTERN.captures(column)?;
    let kind = SlotKind::from_prefix(caps.get(1)?.as_str())?;
    let index: usize = caps.get(2)?.as_str().parse().ok()?;
    (index < kind.slot_count()).then_some((kind, index))
}

/// Raw, non-blank cell values of one row, by slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotValues {
    pub images: [Option<String>; IMAGE_SLOTS],
    pub texts: [Option<String>; TEXT_SLOTS],
    pub strings: [Option<String>; STRING_SLOTS],
    pub integers: [Option<String>; INTEGER_SLOTS],
    pub floats: [Option<String>; FLOAT_SLOTS],
}

impl SlotValues {
    /// Collect slot values from a row.
    ///
    /// When two columns address the same slot the later column wins. Blank
    /// values leave the slot empty.
    pub fn from_row(row: &Row) -> Self {
        let mut values = Self::default();
        for (column, value) in row.iter() {
            if let Some((kind, index)) = parse_column(column) {
                let slot = match kind {
                    SlotKind::Image => &mut values.images[index],
                    SlotKind::Text => &mut values.texts[index],
                    SlotKind::String => &mut values.strings[index],
                    SlotKind::Integer => &mut values.integers[index],
                    SlotKind::Float => &mut values.floats[index],
                };
                *slot = (!value.is_empty()).then(|| value.to_string());
            }
        }
        values
    }
}
