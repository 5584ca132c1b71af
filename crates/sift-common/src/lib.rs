//! Shared utilities for Data Sift crates.
//!
//! - [`any_to_string`] and friends turn Polars cells into text.
//! - The coercion helpers decide what a cell means to a rule: a number,
//!   a piece of normalized text, or "missing".

mod coerce;
mod polars;

pub use coerce::{
    EMPTY_SENTINEL, is_empty_sentinel, is_missing, normalize_literal, normalize_text,
    parse_number, to_number,
};
pub use polars::{any_to_f64, any_to_string, format_numeric};
