//! YAML DSL schema types with serde deserialization.
//!
//! Defines the type hierarchy for rule documents:
//! - `RuleEnvelope`: lightweight first-pass header (apiVersion, kind, metadata)
//! - `RuleDocument`: enum dispatching to kind-specific types
//! - `RiskTriggerRule`: one risk trigger per file
//! - `ExemptionPolicyRule`: trusted submitters keyed by notice type

mod document;
mod envelope;
mod exemption;
mod kind;
mod metadata;
mod trigger;

pub use document::*;
pub use envelope::*;
pub use exemption::*;
pub use kind::*;
pub use metadata::*;
pub use trigger::*;

#[cfg(test)]
mod tests;
