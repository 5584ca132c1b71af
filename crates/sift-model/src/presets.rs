//! Built-in rule sets.

use crate::operator::{CompoundLogic, Operator};
use crate::rule::{ColumnSpec, ExclusionRule};

fn rule(column: &str, operator: Operator, operand: &str) -> ExclusionRule {
    ExclusionRule::new(ColumnSpec::single(column), operator, operand)
}

/// Laboratory screening rules for building a reference population.
///
/// Excludes subjects with out-of-range iron status, inflammation, anaemia,
/// leukocytosis, impaired renal function, diabetes or dysglycaemia, thyroid
/// dysfunction, age over 75, or any hemogram observation note.
pub fn laboratory_screening_rules() -> Vec<ExclusionRule> {
    vec![
        rule("CAPA.IST", Operator::Lt, "15").with_compound(CompoundLogic::Or, Operator::Gt, "50"),
        rule("Ferritina.FERRI", Operator::Lt, "15").with_compound(
            CompoundLogic::Or,
            Operator::Gt,
            "600",
        ),
        rule("Ultra-PCR.ULTRAPCR", Operator::Gt, "5"),
        rule("Hemo.#HGB", Operator::Lt, "7,0"),
        rule("Hemo.LEUCO", Operator::Gt, "11000"),
        rule("Creatinina.CRE", Operator::Gt, "1,5"),
        rule("Creatinina.eTFG2021", Operator::Lt, "60"),
        rule("HBGLI.HBGLI", Operator::Gt, "6,5"),
        rule("GLICOSE.GLI", Operator::Gt, "200").with_compound(
            CompoundLogic::Or,
            Operator::Lt,
            "65",
        ),
        rule("TSH.TSH", Operator::Gt, "10").with_compound(CompoundLogic::Or, Operator::Lt, "0,01"),
        rule("Idade", Operator::Gt, "75"),
        rule("Hemo.OBSSV", Operator::Neq, "empty"),
        rule("Hemo.OBSSB", Operator::Neq, "empty"),
        rule("Hemo.OBSSP", Operator::Neq, "empty"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn laboratory_rules_are_valid_and_enabled() {
        let rules = laboratory_screening_rules();
        assert_eq!(rules.len(), 14);
        for rule in &rules {
            assert!(rule.enabled);
            assert!(rule.gate.is_none());
            rule.validate().unwrap();
        }
        assert_eq!(rules.iter().filter(|r| r.is_expanded()).count(), 4);
    }
}
