//! Property tests for filter and stratification invariants.

mod common;

use common::{config, test_df};
use polars::prelude::{DataFrame, IntoColumn, NamedFrom, Series};
use proptest::prelude::*;
use sift_engine::{apply_filters, apply_stratification, between};
use sift_model::{AgeRange, CompoundLogic, ExclusionRule, Operator, StratificationRequest};

fn arb_operator() -> impl Strategy<Value = Operator> {
    prop_oneof![
        Just(Operator::Eq),
        Just(Operator::Neq),
        Just(Operator::Gt),
        Just(Operator::Lt),
        Just(Operator::Gte),
        Just(Operator::Lte),
    ]
}

/// Cell text as found in lab sheets: integers, decimal commas, blanks, junk.
fn arb_cell() -> impl Strategy<Value = String> {
    prop_oneof![
        (-50i32..150).prop_map(|n| n.to_string()),
        (-50i32..150, 0u8..10).prop_map(|(n, d)| format!("{n},{d}")),
        Just(String::new()),
        Just("n/a".to_string()),
    ]
}

fn arb_numeric_rule() -> impl Strategy<Value = ExclusionRule> {
    (
        prop_oneof![Just("A"), Just("B"), Just("A; B")],
        arb_operator(),
        -60i32..160,
    )
        .prop_map(|(columns, operator, threshold)| {
            ExclusionRule::on(columns, operator, threshold.to_string()).unwrap()
        })
}

fn sheet(a: &[String], b: &[String]) -> DataFrame {
    test_df(vec![
        ("A", a.iter().map(String::as_str).collect()),
        ("B", b.iter().map(String::as_str).collect()),
    ])
}

fn arb_sheet() -> impl Strategy<Value = DataFrame> {
    (1usize..30).prop_flat_map(|rows| {
        (
            prop::collection::vec(arb_cell(), rows),
            prop::collection::vec(arb_cell(), rows),
        )
            .prop_map(|(a, b)| sheet(&a, &b))
    })
}

proptest! {
    #[test]
    fn between_ignores_bound_order(
        values in prop::collection::vec(prop::option::of(-100.0f64..100.0), 0..40),
        first in -120.0f64..120.0,
        second in -120.0f64..120.0,
    ) {
        let column = Series::new("v".into(), values).into_column();
        prop_assert_eq!(between(&column, first, second), between(&column, second, first));
    }

    #[test]
    fn between_rule_ignores_operand_order(
        df in arb_sheet(),
        first in -60i32..160,
        second in -60i32..160,
    ) {
        let forward = ExclusionRule::on("A", Operator::Gte, first.to_string())
            .unwrap()
            .with_compound(CompoundLogic::Between, Operator::Lte, second.to_string());
        let reversed = ExclusionRule::on("A", Operator::Gte, second.to_string())
            .unwrap()
            .with_compound(CompoundLogic::Between, Operator::Lte, first.to_string());

        let forward = apply_filters(&df, &[forward], &config()).unwrap();
        let reversed = apply_filters(&df, &[reversed], &config()).unwrap();
        prop_assert!(forward.data.equals_missing(&reversed.data));
    }

    #[test]
    fn numeric_filtering_is_idempotent(
        df in arb_sheet(),
        rules in prop::collection::vec(arb_numeric_rule(), 0..6),
    ) {
        let once = apply_filters(&df, &rules, &config()).unwrap();
        let twice = apply_filters(&once.data, &rules, &config()).unwrap();
        prop_assert_eq!(twice.rows_removed(), 0);
        prop_assert!(twice.data.equals_missing(&once.data));
    }

    #[test]
    fn filtering_only_removes_rows(
        df in arb_sheet(),
        rules in prop::collection::vec(arb_numeric_rule(), 0..6),
    ) {
        let outcome = apply_filters(&df, &rules, &config()).unwrap();
        prop_assert!(outcome.rows_out() <= outcome.rows_in);
        prop_assert_eq!(
            outcome.steps.iter().map(|s| s.rows_removed).sum::<usize>(),
            outcome.rows_removed()
        );
    }

    #[test]
    fn strata_never_exceed_the_plan(
        ages in prop::collection::vec(arb_cell(), 1..30),
        thresholds in prop::collection::vec((arb_operator(), 0i32..100), 0..4),
        categories in prop::collection::vec(prop_oneof![Just("F"), Just("M"), Just("X")], 0..3),
    ) {
        let sexes: Vec<&str> = (0..ages.len())
            .map(|idx| if idx % 2 == 0 { "F" } else { "M" })
            .collect();
        let df = test_df(vec![
            ("Idade", ages.iter().map(String::as_str).collect()),
            ("Sexo", sexes),
        ]);
        let mut request = StratificationRequest::new();
        for (operator, value) in thresholds {
            request = request.with_age(AgeRange::single(operator, value.to_string()));
        }
        for category in categories {
            request = request.with_category(category);
        }

        let outcome = apply_stratification(&df, &request, &config()).unwrap();
        prop_assert!(outcome.strata.len() <= request.planned_strata());
        prop_assert_eq!(outcome.planned, request.planned_strata());
        for stratum in &outcome.strata {
            prop_assert!(stratum.data.height() > 0);
        }
    }
}
