//! Immutable rule-set snapshot handed to assessments.

use std::collections::HashMap;

use lumen_core::NoticeGraph;

use crate::engine::{assess, assess_batch, RiskAssessmentResult};
use crate::exemption::ExemptionContext;
use crate::schema::{RiskTrigger, RuleDocument};

/// Enabled triggers plus the merged exemption policy, frozen at the moment
/// the snapshot was taken.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    triggers: Vec<RiskTrigger>,
    exemption: ExemptionContext,
}

impl RuleSet {
    pub fn new(triggers: Vec<RiskTrigger>, exemption: ExemptionContext) -> Self {
        Self { triggers, exemption }
    }

    /// Build a snapshot from loaded documents. Disabled documents are left
    /// out; triggers are ordered by document id so snapshots are stable.
    pub fn from_documents(documents: &HashMap<String, RuleDocument>) -> Self {
        let mut ids: Vec<&String> = documents
            .iter()
            .filter(|(_, doc)| doc.metadata().enabled)
            .map(|(id, _)| id)
            .collect();
        ids.sort();

        let mut triggers = Vec::new();
        let mut policies = Vec::new();
        for id in ids {
            match &documents[id] {
                RuleDocument::RiskTrigger(rule) => triggers.push(rule.to_trigger()),
                RuleDocument::ExemptionPolicy(policy) => policies.push(policy),
            }
        }

        Self {
            triggers,
            exemption: ExemptionContext::from_policies(policies),
        }
    }

    pub fn triggers(&self) -> &[RiskTrigger] {
        &self.triggers
    }

    pub fn exemption(&self) -> &ExemptionContext {
        &self.exemption
    }

    pub fn assess(&self, graph: &NoticeGraph) -> RiskAssessmentResult {
        assess(graph, &self.triggers, Some(&self.exemption))
    }

    pub fn assess_batch(&self, graphs: &[NoticeGraph]) -> Vec<RiskAssessmentResult> {
        assess_batch(graphs, &self.triggers, Some(&self.exemption))
    }
}
