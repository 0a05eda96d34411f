//! Risk-assessment rule engine for submitted legal notices.
//!
//! This crate provides:
//! - YAML rule documents (risk triggers, exemption policies) with serde deserialization
//! - Field path resolution over a notice graph via a closed lookup table
//! - Condition (exact/broad, negated) and trigger (all/any) evaluation
//! - The risk decision engine with force-not-risky override and trusted-submitter exemption
//! - Filesystem loader with hot-reload via `notify` watcher and immutable rule-set snapshots
//! - Rule validation with "did you mean" suggestions

pub mod engine;
pub mod evaluator;
pub mod exemption;
pub mod loader;
pub mod publication;
pub mod resolver;
pub mod schema;
pub mod validation;

pub use engine::{assess, assess_batch, RiskAssessmentResult};
pub use exemption::ExemptionContext;
pub use loader::{RuleLoader, RuleSet};
pub use publication::{public_body, PublicationDecision};
