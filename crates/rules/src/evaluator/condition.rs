use lumen_core::NoticeGraph;

use crate::resolver::resolve;
use crate::schema::{ConditionMatch, RiskTriggerCondition};

/// Evaluate one condition against the graph.
///
/// An absent field is a base non-match; `negated` then inverts the base
/// outcome, so a negated condition on an absent field holds.
pub fn evaluate_condition(graph: &NoticeGraph, condition: &RiskTriggerCondition) -> bool {
    let base = resolve(graph, &condition.field)
        .map(|actual| matches_value(actual, &condition.value, condition.matching_type))
        .unwrap_or(false);
    base != condition.negated
}

/// Compare a resolved value against the expected one.
///
/// `Exact` compares whole values ignoring case and surrounding whitespace;
/// `Broad` checks case-insensitive containment anywhere in the value.
pub fn matches_value(actual: &str, expected: &str, matching_type: ConditionMatch) -> bool {
    match matching_type {
        ConditionMatch::Exact => actual.trim().to_lowercase() == expected.trim().to_lowercase(),
        ConditionMatch::Broad => actual.to_lowercase().contains(&expected.to_lowercase()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::{NoticeRecord, NoticeType, PartyRecord};

    fn graph_with_title(title: &str) -> NoticeGraph {
        NoticeGraph::new(NoticeRecord::new(NoticeType::Dmca, title))
            .with_recipient(PartyRecord::named("Recipient").with_country("US"))
    }

    fn condition(field: &str, value: &str, negated: bool, m: ConditionMatch) -> RiskTriggerCondition {
        RiskTriggerCondition::new(field, value, negated, m)
    }

    #[test]
    fn exact_is_case_insensitive_whole_value() {
        assert!(matches_value("US", "us", ConditionMatch::Exact));
        assert!(matches_value(" risky1 ", "RISKY1", ConditionMatch::Exact));
        assert!(!matches_value("risky1 title", "risky1", ConditionMatch::Exact));
        assert!(!matches_value("U S", "us", ConditionMatch::Exact));
    }

    #[test]
    fn broad_is_case_insensitive_containment() {
        assert!(matches_value("I'm so risky title, woooo!", "risky", ConditionMatch::Broad));
        assert!(matches_value("RISKY", "risky", ConditionMatch::Broad));
        assert!(matches_value("brisky walk", "risky", ConditionMatch::Broad));
        assert!(!matches_value("Some harmless text", "risky", ConditionMatch::Broad));
    }

    #[test]
    fn negation_inverts_outcome() {
        let g = graph_with_title("risky1");
        let plain = condition("notice.title", "risky1", false, ConditionMatch::Exact);
        let negated = condition("notice.title", "risky1", true, ConditionMatch::Exact);
        assert!(evaluate_condition(&g, &plain));
        assert!(!evaluate_condition(&g, &negated));

        let other = condition("recipient.country_code", "us", true, ConditionMatch::Exact);
        assert!(!evaluate_condition(&g, &other));
    }

    #[test]
    fn absent_field_is_non_match_before_negation() {
        let g = graph_with_title("t");
        let missing = condition("sender.name", "anyone", false, ConditionMatch::Broad);
        let missing_negated = condition("sender.name", "anyone", true, ConditionMatch::Broad);
        let unknown = condition("notice.nonsense", "", false, ConditionMatch::Broad);
        assert!(!evaluate_condition(&g, &missing));
        assert!(evaluate_condition(&g, &missing_negated));
        assert!(!evaluate_condition(&g, &unknown));
    }

    #[test]
    fn negation_property_holds_across_inputs() {
        let graphs = [graph_with_title("risky"), graph_with_title("calm"), NoticeGraph::default()];
        let fields = ["notice.title", "recipient.country_code", "entity.name", "bogus"];
        for g in &graphs {
            for field in fields {
                for m in [ConditionMatch::Exact, ConditionMatch::Broad] {
                    let plain = condition(field, "us", false, m);
                    let negated = condition(field, "us", true, m);
                    assert_eq!(
                        evaluate_condition(g, &negated),
                        !evaluate_condition(g, &plain),
                        "field {field} with {m}"
                    );
                }
            }
        }
    }
}
