//! DataFrame helpers shared by the filter and stratification passes.

use polars::prelude::{AnyValue, Column, DataFrame, DataType, NamedFrom, PolarsResult, Series};
use sift_common::to_number;

/// Returns true if the frame has a column with this exact name.
pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.get_column_index(name).is_some()
}

/// Cell at `idx`, or `Null` when it cannot be read.
pub fn cell(column: &Column, idx: usize) -> AnyValue<'_> {
    column.get(idx).unwrap_or(AnyValue::Null)
}

/// Replaces a column with its Float64 coercion.
///
/// Cells without a numeric reading become null. Float64 columns are left
/// alone. Returns true if the column was rewritten.
pub fn coerce_numeric(df: &mut DataFrame, name: &str) -> PolarsResult<bool> {
    let column = df.column(name)?;
    if column.dtype() == &DataType::Float64 {
        return Ok(false);
    }

    let values: Vec<Option<f64>> = (0..column.len())
        .map(|idx| to_number(cell(column, idx)))
        .collect();
    let series = Series::new(column.name().clone(), values);
    df.with_column(series)?;
    Ok(true)
}
