use lumen_core::NoticeGraph;

use super::condition::evaluate_condition;
use crate::schema::{RiskTrigger, TriggerMatch};

/// Evaluate a trigger against the graph.
///
/// A trigger with no conditions never matches, whatever its matching type.
pub fn evaluate_trigger(graph: &NoticeGraph, trigger: &RiskTrigger) -> bool {
    if trigger.conditions.is_empty() {
        return false;
    }
    let mut outcomes = trigger
        .conditions
        .iter()
        .map(|c| evaluate_condition(graph, c));
    match trigger.matching_type {
        TriggerMatch::All => outcomes.all(|matched| matched),
        TriggerMatch::Any => outcomes.any(|matched| matched),
    }
}
