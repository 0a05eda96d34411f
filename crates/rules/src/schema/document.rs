//! Multi-kind rule document container and accessors.

use super::{CommonMetadata, ExemptionPolicyRule, RiskTriggerRule, RuleKind};

/// A fully deserialized rule of any supported kind.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleDocument {
    /// Risk trigger -- conditions, all/any aggregation, force-not-risky flag.
    RiskTrigger(RiskTriggerRule),
    /// Exemption policy -- trusted submitters per notice type.
    ExemptionPolicy(ExemptionPolicyRule),
}

impl RuleDocument {
    /// Get the rule's metadata regardless of kind.
    pub fn metadata(&self) -> &CommonMetadata {
        match self {
            RuleDocument::RiskTrigger(rule) => &rule.metadata,
            RuleDocument::ExemptionPolicy(rule) => &rule.metadata,
        }
    }

    /// Get the rule kind.
    pub fn kind(&self) -> RuleKind {
        match self {
            RuleDocument::RiskTrigger(_) => RuleKind::RiskTrigger,
            RuleDocument::ExemptionPolicy(_) => RuleKind::ExemptionPolicy,
        }
    }

    /// Try to extract as a `RiskTriggerRule` reference.
    pub fn as_risk_trigger(&self) -> Option<&RiskTriggerRule> {
        match self {
            RuleDocument::RiskTrigger(rule) => Some(rule),
            _ => None,
        }
    }

    /// Try to extract as an `ExemptionPolicyRule` reference.
    pub fn as_exemption_policy(&self) -> Option<&ExemptionPolicyRule> {
        match self {
            RuleDocument::ExemptionPolicy(rule) => Some(rule),
            _ => None,
        }
    }
}
