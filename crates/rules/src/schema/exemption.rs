//! Trusted-submitter exemption policy document.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::CommonMetadata;

/// A `kind: ExemptionPolicy` rule file.
///
/// Maps a notice type name (e.g. `Defamation`) to the submitting accounts
/// whose notices of that type skip risk assessment entirely. Keys are kept
/// as strings here so validation can point at unknown types; they are
/// parsed into `NoticeType` when the policy is turned into an
/// [`ExemptionContext`](crate::exemption::ExemptionContext).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ExemptionPolicyRule {
    #[serde(rename = "apiVersion")]
    pub api_version: String,
    pub kind: String,
    pub metadata: CommonMetadata,
    #[serde(default)]
    pub trusted_submitters: BTreeMap<String, Vec<String>>,
}
