//! Risk trigger and condition types.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::CommonMetadata;

/// How a trigger combines the outcomes of its conditions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerMatch {
    /// Every condition must hold.
    #[default]
    All,
    /// At least one condition must hold.
    Any,
}

impl fmt::Display for TriggerMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriggerMatch::All => write!(f, "all"),
            TriggerMatch::Any => write!(f, "any"),
        }
    }
}

/// How a condition compares the resolved field against its expected value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionMatch {
    /// Case-insensitive whole-value equality.
    #[default]
    Exact,
    /// Case-insensitive substring containment.
    Broad,
}

impl fmt::Display for ConditionMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConditionMatch::Exact => write!(f, "exact"),
            ConditionMatch::Broad => write!(f, "broad"),
        }
    }
}

/// A single field test against a notice graph.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RiskTriggerCondition {
    /// Dotted `<object>.<attribute>` path, e.g. `recipient.country_code`.
    pub field: String,
    pub value: String,
    #[serde(default)]
    pub negated: bool,
    #[serde(default)]
    pub matching_type: ConditionMatch,
}

impl RiskTriggerCondition {
    pub fn new(
        field: impl Into<String>,
        value: impl Into<String>,
        negated: bool,
        matching_type: ConditionMatch,
    ) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            negated,
            matching_type,
        }
    }
}

/// A named rule: conditions combined with all/any, optionally vetoing risk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RiskTrigger {
    pub name: String,
    #[serde(default)]
    pub matching_type: TriggerMatch,
    #[serde(default)]
    pub conditions: Vec<RiskTriggerCondition>,
    /// When this trigger matches, the notice is not risky no matter what
    /// else matched.
    #[serde(default, alias = "force_not_risky_assessment")]
    pub force_not_risky: bool,
}

impl RiskTrigger {
    pub fn new(
        name: impl Into<String>,
        matching_type: TriggerMatch,
        conditions: Vec<RiskTriggerCondition>,
    ) -> Self {
        Self {
            name: name.into(),
            matching_type,
            conditions,
            force_not_risky: false,
        }
    }

    pub fn force_not_risky(mut self, force: bool) -> Self {
        self.force_not_risky = force;
        self
    }
}

// ── YAML document ───────────────────────────────────────────────────

/// A `kind: RiskTrigger` rule file.
///
/// The trigger's name comes from `metadata.name`; the remaining trigger
/// fields sit at the document top level.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RiskTriggerRule {
    #[serde(rename = "apiVersion")]
    pub api_version: String,
    pub kind: String,
    pub metadata: CommonMetadata,
    #[serde(default)]
    pub matching_type: TriggerMatch,
    #[serde(default)]
    pub conditions: Vec<RiskTriggerCondition>,
    #[serde(default, alias = "force_not_risky_assessment")]
    pub force_not_risky: bool,
}

impl RiskTriggerRule {
    /// Build the in-memory trigger evaluated by the engine.
    pub fn to_trigger(&self) -> RiskTrigger {
        RiskTrigger {
            name: self.metadata.name.clone(),
            matching_type: self.matching_type,
            conditions: self.conditions.clone(),
            force_not_risky: self.force_not_risky,
        }
    }
}
