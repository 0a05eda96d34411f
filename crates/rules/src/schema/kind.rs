//! Rule kind enum for two-pass deserialization dispatch.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported rule kinds for two-pass deserialization dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleKind {
    RiskTrigger,
    ExemptionPolicy,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleKind::RiskTrigger => write!(f, "RiskTrigger"),
            RuleKind::ExemptionPolicy => write!(f, "ExemptionPolicy"),
        }
    }
}

impl FromStr for RuleKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "RiskTrigger" => Ok(RuleKind::RiskTrigger),
            "ExemptionPolicy" => Ok(RuleKind::ExemptionPolicy),
            other => Err(format!("unknown rule kind: '{}'", other)),
        }
    }
}
