//! Row combination.
//!
//! - Concat: CSVs of one group into one spreadsheet
//! - Cartesian: product across group spreadsheets
//! - Pipeline: parse, load and combine a whole node input

pub mod cartesian;
pub mod concat;
pub mod pipeline;

pub use cartesian::cartesian_product;
pub use concat::load_group;
pub use pipeline::{combine_input, validate_and_combine, CombineOptions};
