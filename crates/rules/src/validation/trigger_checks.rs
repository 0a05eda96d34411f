//! Risk trigger validation: field paths, expected values, empty triggers.

use super::fuzzy::fuzzy_match;
use super::ValidationResult;
use crate::resolver::{known_paths, FieldPath};
use crate::schema::*;

pub(super) fn validate_trigger_rule(rule: &RiskTriggerRule, result: &mut ValidationResult) {
    validate_conditions(&rule.conditions, rule.matching_type, result);
}

pub(super) fn validate_trigger(trigger: &RiskTrigger, result: &mut ValidationResult) {
    if trigger.name.trim().is_empty() {
        result.error("name", "name must not be empty");
    }
    validate_conditions(&trigger.conditions, trigger.matching_type, result);
}

fn validate_conditions(
    conditions: &[RiskTriggerCondition],
    matching_type: TriggerMatch,
    result: &mut ValidationResult,
) {
    if conditions.is_empty() {
        result.warn(
            "conditions",
            format!("trigger has no conditions and will never match (matching_type: {matching_type})"),
        );
        return;
    }

    let paths = known_paths();
    let candidates: Vec<&str> = paths.iter().map(String::as_str).collect();

    for (i, condition) in conditions.iter().enumerate() {
        let path = format!("conditions[{i}].field");
        if FieldPath::parse(&condition.field).is_none() {
            let message = format!("Unknown field path '{}'", condition.field);
            match fuzzy_match(&condition.field, &candidates) {
                Some(s) => result.error_with_suggestion(&path, message, format!("Did you mean '{s}'?")),
                None => result.error(&path, message),
            }
        }

        if condition.value.trim().is_empty() {
            let consequence = match (condition.matching_type, condition.negated) {
                (ConditionMatch::Broad, false) => "matches every notice where the field is present",
                (ConditionMatch::Broad, true) => "only matches notices where the field is absent",
                (ConditionMatch::Exact, _) => "only compares against a blank field",
            };
            result.warn(
                format!("conditions[{i}].value"),
                format!("empty expected value {consequence}"),
            );
        }
    }
}
