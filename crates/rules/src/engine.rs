//! Risk decision engine.
//!
//! [`assess`] runs the categorical exemption check, evaluates every trigger,
//! and applies the force-not-risky override:
//!
//! 1. exempt notice → not risky, nothing matched
//! 2. any matched trigger with `force_not_risky` → not risky
//! 3. otherwise risky iff at least one trigger matched
//!
//! The result does not depend on trigger order; the override is an
//! existential check over the matched set.

use lumen_core::NoticeGraph;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::evaluator::evaluate_trigger;
use crate::exemption::ExemptionContext;
use crate::schema::RiskTrigger;

/// Outcome of one assessment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessmentResult {
    pub is_risky: bool,
    /// One name per matched trigger, in rule-set order. Triggers sharing a
    /// name appear once each. Kept even when an override made the notice
    /// not risky.
    pub matched_triggers: Vec<String>,
    /// Matched triggers carrying `force_not_risky`.
    pub overridden_by: Vec<String>,
    /// The notice skipped trigger evaluation via the exemption policy.
    pub exempt: bool,
}

impl RiskAssessmentResult {
    fn exempt() -> Self {
        Self {
            exempt: true,
            ..Self::default()
        }
    }

    pub fn is_overridden(&self) -> bool {
        !self.overridden_by.is_empty()
    }
}

/// Assess one notice graph against a rule set.
///
/// Pure: no I/O, no shared state, safe to call concurrently and to retry.
pub fn assess(
    graph: &NoticeGraph,
    triggers: &[RiskTrigger],
    exemption: Option<&ExemptionContext>,
) -> RiskAssessmentResult {
    if exemption.is_some_and(|ctx| ctx.exempts(graph)) {
        debug!(
            notice_type = %graph.notice.notice_type,
            submitted_by = graph.submitted_by.as_deref().unwrap_or(""),
            "notice exempt from risk assessment"
        );
        return RiskAssessmentResult::exempt();
    }

    let mut matched_triggers = Vec::new();
    let mut overridden_by = Vec::new();
    for trigger in triggers.iter().filter(|t| evaluate_trigger(graph, t)) {
        debug!(trigger = %trigger.name, force_not_risky = trigger.force_not_risky, "trigger matched");
        if trigger.force_not_risky {
            overridden_by.push(trigger.name.clone());
        }
        matched_triggers.push(trigger.name.clone());
    }

    let is_risky = overridden_by.is_empty() && !matched_triggers.is_empty();
    debug!(
        is_risky,
        matched = matched_triggers.len(),
        overridden = !overridden_by.is_empty(),
        "risk assessment complete"
    );

    RiskAssessmentResult {
        is_risky,
        matched_triggers,
        overridden_by,
        exempt: false,
    }
}

/// Assess many notice graphs against the same rule set in parallel.
///
/// Results are returned in the order of `graphs`.
pub fn assess_batch(
    graphs: &[NoticeGraph],
    triggers: &[RiskTrigger],
    exemption: Option<&ExemptionContext>,
) -> Vec<RiskAssessmentResult> {
    graphs
        .par_iter()
        .map(|graph| assess(graph, triggers, exemption))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ConditionMatch, RiskTriggerCondition, TriggerMatch};
    use lumen_core::{NoticeRecord, NoticeType, PartyRecord};

    fn exact(field: &str, value: &str) -> RiskTriggerCondition {
        RiskTriggerCondition::new(field, value, false, ConditionMatch::Exact)
    }

    fn trigger(name: &str, conditions: Vec<RiskTriggerCondition>, force: bool) -> RiskTrigger {
        RiskTrigger::new(name, TriggerMatch::All, conditions).force_not_risky(force)
    }

    fn notice(title: &str, source: &str) -> NoticeGraph {
        NoticeGraph::new(
            NoticeRecord::new(NoticeType::Dmca, title)
                .with_body("Some harmless text")
                .with_source(source),
        )
        .with_recipient(PartyRecord::named("Recipient").with_country("US"))
    }

    #[test]
    fn no_triggers_is_not_risky() {
        let result = assess(&notice("t", "s"), &[], None);
        assert_eq!(result, RiskAssessmentResult::default());
    }

    #[test]
    fn single_match_is_risky() {
        let triggers = vec![trigger("Risky title", vec![exact("notice.title", "risky1")], false)];
        let result = assess(&notice("risky1", "web"), &triggers, None);
        assert!(result.is_risky);
        assert_eq!(result.matched_triggers, vec!["Risky title"]);
        assert!(!result.is_overridden());
    }

    #[test]
    fn force_not_risky_vetoes_other_matches() {
        let triggers = vec![
            trigger("Risky title", vec![exact("notice.title", "risky1")], false),
            trigger("Trusted source", vec![exact("notice.source", "risky2")], true),
            trigger("Also risky", vec![exact("recipient.country_code", "us")], false),
        ];
        let result = assess(&notice("risky1", "risky2"), &triggers, None);
        assert!(!result.is_risky);
        assert_eq!(result.matched_triggers.len(), 3);
        assert_eq!(result.overridden_by, vec!["Trusted source"]);
    }

    #[test]
    fn unmatched_force_trigger_has_no_effect() {
        let triggers = vec![
            trigger("Risky title", vec![exact("notice.title", "risky1")], false),
            trigger("Trusted source", vec![exact("notice.source", "risky2")], true),
        ];
        let result = assess(&notice("risky1", "web form"), &triggers, None);
        assert!(result.is_risky);
        assert_eq!(result.matched_triggers, vec!["Risky title"]);
    }

    #[test]
    fn matched_force_trigger_alone_is_not_risky() {
        let triggers = vec![trigger("Trusted", vec![exact("notice.source", "risky2")], true)];
        let result = assess(&notice("x", "risky2"), &triggers, None);
        assert!(!result.is_risky);
        assert_eq!(result.matched_triggers, vec!["Trusted"]);
    }

    #[test]
    fn decision_is_independent_of_trigger_order() {
        let triggers = vec![
            trigger("a", vec![exact("notice.title", "risky1")], false),
            trigger("b", vec![exact("notice.source", "risky2")], true),
            trigger("c", vec![exact("recipient.country_code", "us")], false),
        ];
        let graph = notice("risky1", "risky2");
        let baseline = assess(&graph, &triggers, None).is_risky;

        let mut rotated = triggers.clone();
        for _ in 0..triggers.len() {
            rotated.rotate_left(1);
            assert_eq!(assess(&graph, &rotated, None).is_risky, baseline);
        }
        let mut reversed = triggers;
        reversed.reverse();
        assert_eq!(assess(&graph, &reversed, None).is_risky, baseline);
    }

    #[test]
    fn exemption_short_circuits_with_empty_match_set() {
        let triggers = vec![trigger("Risky title", vec![exact("notice.title", "risky1")], false)];
        let mut graph = notice("risky1", "web");
        graph.notice.notice_type = NoticeType::Defamation;
        let graph = graph.submitted_by("google");
        let context = ExemptionContext::new().trust(NoticeType::Defamation, "google");

        let result = assess(&graph, &triggers, Some(&context));
        assert!(!result.is_risky);
        assert!(result.exempt);
        assert!(result.matched_triggers.is_empty());

        // Missing context falls through to normal evaluation.
        assert!(assess(&graph, &triggers, None).is_risky);
    }

    #[test]
    fn same_named_triggers_are_listed_once_each() {
        let triggers = vec![
            trigger("Risky stuff", vec![exact("notice.title", "risky1")], false),
            trigger("Risky stuff", vec![exact("notice.source", "risky2")], true),
        ];
        let result = assess(&notice("risky1", "risky2"), &triggers, None);
        assert_eq!(result.matched_triggers, vec!["Risky stuff", "Risky stuff"]);
        assert_eq!(result.overridden_by, vec!["Risky stuff"]);
    }

    #[test]
    fn batch_preserves_input_order() {
        let triggers = vec![trigger("Risky title", vec![exact("notice.title", "risky1")], false)];
        let graphs = vec![notice("risky1", "a"), notice("calm", "b"), notice("RISKY1", "c")];
        let results = assess_batch(&graphs, &triggers, None);
        let flags: Vec<bool> = results.iter().map(|r| r.is_risky).collect();
        assert_eq!(flags, vec![true, false, true]);
    }
}
