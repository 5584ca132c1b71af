//! Shared helpers for engine integration tests.

#![allow(dead_code)]

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};
use sift_model::GlobalConfig;

/// Builds a frame of text columns, as the CSV reader produces.
pub fn test_df(columns: Vec<(&str, Vec<&str>)>) -> DataFrame {
    let cols: Vec<Column> = columns
        .into_iter()
        .map(|(name, values)| {
            Series::new(
                name.into(),
                values.iter().copied().map(String::from).collect::<Vec<_>>(),
            )
            .into_column()
        })
        .collect();
    DataFrame::new(cols).unwrap()
}

/// Text values of a column, nulls as `None`.
pub fn text_values(df: &DataFrame, name: &str) -> Vec<Option<String>> {
    let column = df.column(name).unwrap();
    (0..column.len())
        .map(|idx| {
            let value = column.get(idx).unwrap();
            if value.is_null() {
                None
            } else {
                Some(sift_common::any_to_string(value))
            }
        })
        .collect()
}

pub fn config() -> GlobalConfig {
    GlobalConfig::new("Idade", "Sexo")
}
