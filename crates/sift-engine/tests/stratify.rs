//! Integration tests for stratification.

mod common;

use common::{config, test_df, text_values};
use polars::prelude::DataType;
use sift_engine::{EngineError, EngineWarning, apply_stratification};
use sift_model::{AgeRange, GlobalConfig, Operator, StratificationRequest};

fn people() -> polars::prelude::DataFrame {
    test_df(vec![
        ("ID", vec!["1", "2", "3", "4", "5", "6"]),
        ("Idade", vec!["10", "17,5", "18", "40", "80", ""]),
        ("Sexo", vec!["F", "M", "f", "M", "F", "F"]),
    ])
}

fn minors_and_adults() -> StratificationRequest {
    StratificationRequest::new()
        .with_age(AgeRange::pair(Operator::Gte, "0", Operator::Lt, "18"))
        .with_age(AgeRange::single(Operator::Gte, "18"))
}

#[test]
fn test_cross_product_of_ages_and_categories() {
    let request = minors_and_adults().with_category("F").with_category("M");

    let outcome = apply_stratification(&people(), &request, &config()).unwrap();

    assert_eq!(outcome.planned, 4);
    assert_eq!(
        outcome.strata.names().collect::<Vec<_>>(),
        vec!["0_to_17_F", "18_and_over_F", "0_to_17_M", "18_and_over_M"]
    );
    let adult_women = outcome.strata.get("18_and_over_F").unwrap();
    assert_eq!(
        text_values(adult_women, "ID"),
        vec![Some("3".to_string()), Some("5".to_string())]
    );
    // The row with no age belongs to no age stratum.
    assert_eq!(outcome.strata.total_rows(), 5);
}

#[test]
fn test_ages_only_and_categories_only() {
    let outcome = apply_stratification(&people(), &minors_and_adults(), &config()).unwrap();
    assert_eq!(
        outcome.strata.names().collect::<Vec<_>>(),
        vec!["0_to_17", "18_and_over"]
    );

    let request = StratificationRequest::new().with_category("M");
    let outcome = apply_stratification(&people(), &request, &config()).unwrap();
    assert_eq!(outcome.strata.names().collect::<Vec<_>>(), vec!["M"]);
    assert_eq!(outcome.strata.get("M").unwrap().height(), 2);
}

#[test]
fn test_empty_strata_are_omitted() {
    let request = StratificationRequest::new()
        .with_age(AgeRange::single(Operator::Gt, "100"))
        .with_age(AgeRange::single(Operator::Gt, "75"))
        .with_category("F")
        .with_category("Other");

    let outcome = apply_stratification(&people(), &request, &config()).unwrap();

    assert_eq!(outcome.planned, 4);
    assert_eq!(outcome.strata.names().collect::<Vec<_>>(), vec!["Over_75_F"]);
    assert!(outcome.warnings.is_empty());
}

#[test]
fn test_empty_request_yields_no_strata() {
    let outcome =
        apply_stratification(&people(), &StratificationRequest::new(), &config()).unwrap();
    assert_eq!(outcome.planned, 0);
    assert!(outcome.strata.is_empty());
}

#[test]
fn test_missing_age_column_is_an_error() {
    let request = StratificationRequest::new().with_category("F");
    let err = apply_stratification(&people(), &request, &GlobalConfig::new("Age", "Sexo"))
        .unwrap_err();
    assert!(matches!(err, EngineError::MissingAgeColumn { column } if column == "Age"));
}

#[test]
fn test_missing_category_column_is_an_error() {
    let request = minors_and_adults();
    let err = apply_stratification(&people(), &request, &GlobalConfig::new("Idade", "Sex"))
        .unwrap_err();
    assert!(matches!(err, EngineError::MissingCategoryColumn { column } if column == "Sex"));
}

#[test]
fn test_non_numeric_age_bound_skips_stratum() {
    let request = StratificationRequest::new()
        .with_age(AgeRange::single(Operator::Gt, "old"))
        .with_age(AgeRange::single(Operator::Lt, "18"));

    let outcome = apply_stratification(&people(), &request, &config()).unwrap();

    assert_eq!(outcome.strata.names().collect::<Vec<_>>(), vec!["Under_18"]);
    assert_eq!(
        outcome.warnings,
        vec![EngineWarning::InvalidAgeRule {
            range: "> old".to_string(),
            value: "old".to_string()
        }]
    );
}

#[test]
fn test_invalid_range_name_is_still_emitted() {
    // No whole age fits "> 17 AND < 18", yet 17.5 satisfies both bounds.
    let request = StratificationRequest::new().with_age(AgeRange::pair(
        Operator::Gt,
        "17",
        Operator::Lt,
        "18",
    ));

    let outcome = apply_stratification(&people(), &request, &config()).unwrap();

    assert_eq!(outcome.strata.names().collect::<Vec<_>>(), vec!["Invalid_range"]);
    assert_eq!(
        text_values(outcome.strata.get("Invalid_range").unwrap(), "ID"),
        vec![Some("2".to_string())]
    );
}

#[test]
fn test_duplicate_names_keep_the_later_stratum() {
    // Both ranges name as "Over_17" after truncation but select different rows.
    let request = StratificationRequest::new()
        .with_age(AgeRange::single(Operator::Gt, "17"))
        .with_age(AgeRange::single(Operator::Gt, "17,9"));

    let outcome = apply_stratification(&people(), &request, &config()).unwrap();

    assert_eq!(outcome.strata.len(), 1);
    assert_eq!(outcome.strata.get("Over_17").unwrap().height(), 3);
    assert_eq!(
        outcome.warnings,
        vec![EngineWarning::DuplicateStratumName {
            name: "Over_17".to_string()
        }]
    );
}

#[test]
fn test_input_frame_keeps_text_ages() {
    let df = people();
    let outcome = apply_stratification(&df, &minors_and_adults(), &config()).unwrap();

    assert_eq!(df.column("Idade").unwrap().dtype(), &DataType::String);
    let minors = outcome.strata.get("0_to_17").unwrap();
    assert_eq!(minors.column("Idade").unwrap().dtype(), &DataType::Float64);
}
