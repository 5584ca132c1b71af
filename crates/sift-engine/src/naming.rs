//! Stratum names.
//!
//! Names are built from an age part and a category part joined with `_`:
//! `Over_75`, `0_to_17_Female`, `Male`. Naming is pure and never fails.

use sift_common::parse_number;
use sift_model::{AgeRange, Bound, CategoryRule, Operator};

/// Name for the stratum selected by an age range and/or category value.
///
/// Returns an empty string when neither part yields a label.
///
/// ```
/// use sift_engine::stratum_name;
/// use sift_model::{AgeRange, CategoryRule, Operator};
///
/// let ages = AgeRange::pair(Operator::Lt, "18", Operator::Gte, "0");
/// let female = CategoryRule::new("Female");
/// assert_eq!(stratum_name(Some(&ages), Some(&female)), "0_to_17_Female");
/// ```
pub fn stratum_name(age: Option<&AgeRange>, category: Option<&CategoryRule>) -> String {
    [age.and_then(age_label), category.and_then(category_label)]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join("_")
}

/// Age part of a stratum name.
///
/// A first bound alone names an open range (`Over_75`, `18_and_over`,
/// `Under_18`, `Up_to_17`). Two bounds name a closed integer range whatever
/// order they were written in; a range with no integer in it is
/// `Invalid_range`. A second bound without a first gives no age part.
pub fn age_label(range: &AgeRange) -> Option<String> {
    match (present(range.first.as_ref()), present(range.second.as_ref())) {
        (Some(bound), None) => open_label(bound),
        (Some(first), Some(second)) => closed_label(first, second),
        (None, _) => None,
    }
}

/// Category part of a stratum name: the value with spaces replaced by `_`.
pub fn category_label(category: &CategoryRule) -> Option<String> {
    let value = category.value.trim();
    (!value.is_empty()).then(|| value.replace(' ', "_"))
}

fn present(bound: Option<&Bound>) -> Option<&Bound> {
    bound.filter(|bound| bound.is_present())
}

fn open_label(bound: &Bound) -> Option<String> {
    let v = truncate(parse_number(&bound.value)?);
    match bound.operator {
        Operator::Gt => Some(format!("Over_{v}")),
        Operator::Gte => Some(format!("{v}_and_over")),
        Operator::Lt => Some(format!("Under_{v}")),
        Operator::Lte => Some(format!("Up_to_{v}")),
        Operator::Eq | Operator::Neq => None,
    }
}

fn closed_label(first: &Bound, second: &Bound) -> Option<String> {
    let mut ends = [
        (parse_number(&first.value)?, first.operator),
        (parse_number(&second.value)?, second.operator),
    ];
    ends.sort_by(|a, b| a.0.total_cmp(&b.0));
    let [(low_value, low_op), (high_value, high_op)] = ends;

    let low = match low_op {
        Operator::Gt => truncate(low_value + 1.0),
        _ => truncate(low_value),
    };
    let high = match high_op {
        Operator::Lt => truncate(high_value - 1.0),
        _ => truncate(high_value),
    };

    if low > high {
        Some("Invalid_range".to_string())
    } else {
        Some(format!("{low}_to_{high}"))
    }
}

#[allow(clippy::cast_possible_truncation)]
fn truncate(value: f64) -> i64 {
    value.trunc() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_ranges() {
        let cases = [
            (Operator::Gt, "75", Some("Over_75")),
            (Operator::Gte, "18", Some("18_and_over")),
            (Operator::Lt, "18", Some("Under_18")),
            (Operator::Lte, "17,9", Some("Up_to_17")),
            (Operator::Eq, "40", None),
            (Operator::Gt, "old", None),
        ];
        for (operator, value, expected) in cases {
            let range = AgeRange::single(operator, value);
            assert_eq!(age_label(&range).as_deref(), expected, "{range}");
        }
    }

    #[test]
    fn second_bound_alone_has_no_age_part() {
        let range = AgeRange {
            first: Some(Bound::new(Operator::Gt, "  ")),
            second: Some(Bound::new(Operator::Lt, "12")),
        };
        assert_eq!(age_label(&range), None);

        let range = AgeRange {
            first: None,
            second: Some(Bound::new(Operator::Gte, "65")),
        };
        let male = CategoryRule::new("M");
        assert_eq!(stratum_name(Some(&range), Some(&male)), "M");
    }

    #[test]
    fn closed_range_inclusive_defaults() {
        let range = AgeRange::pair(Operator::Eq, "20", Operator::Lte, "30");
        assert_eq!(age_label(&range).as_deref(), Some("20_to_30"));
        let range = AgeRange::pair(Operator::Gt, "17", Operator::Lt, "65");
        assert_eq!(age_label(&range).as_deref(), Some("18_to_64"));
    }

    #[test]
    fn category_spaces_become_underscores() {
        assert_eq!(
            category_label(&CategoryRule::new(" Not informed ")).as_deref(),
            Some("Not_informed")
        );
        assert_eq!(category_label(&CategoryRule::new("  ")), None);
    }

    #[test]
    fn empty_name_without_parts() {
        assert_eq!(stratum_name(None, None), "");
        assert_eq!(stratum_name(None, Some(&CategoryRule::new("M"))), "M");
    }
}
