//! Categorical exemption from risk assessment.
//!
//! Some notice types from trusted submitting accounts (e.g. defamation
//! notices sent in by a known search provider) are never held for review.
//! The allow-list is plain data handed to [`assess`](crate::engine::assess)
//! on every call.

use std::collections::{HashMap, HashSet};

use lumen_core::{NoticeGraph, NoticeType};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::schema::ExemptionPolicyRule;

/// Trusted submitting accounts keyed by notice type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExemptionContext {
    trusted_submitters: HashMap<NoticeType, HashSet<String>>,
}

fn normalize(account: &str) -> String {
    account.trim().to_lowercase()
}

impl ExemptionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a trusted account for one notice type.
    pub fn trust(mut self, notice_type: NoticeType, account: impl AsRef<str>) -> Self {
        self.insert(notice_type, account.as_ref());
        self
    }

    fn insert(&mut self, notice_type: NoticeType, account: &str) {
        let account = normalize(account);
        if account.is_empty() {
            return;
        }
        self.trusted_submitters
            .entry(notice_type)
            .or_default()
            .insert(account);
    }

    /// Merge one or more exemption policy documents.
    ///
    /// Unknown notice type keys are skipped with a warning; validation
    /// reports them as errors before they get this far.
    pub fn from_policies<'a>(policies: impl IntoIterator<Item = &'a ExemptionPolicyRule>) -> Self {
        let mut context = Self::default();
        for policy in policies {
            for (type_name, accounts) in &policy.trusted_submitters {
                match type_name.parse::<NoticeType>() {
                    Ok(notice_type) => {
                        for account in accounts {
                            context.insert(notice_type, account);
                        }
                    }
                    Err(e) => {
                        warn!(policy_id = %policy.metadata.id, error = %e, "skipping exemption entry");
                    }
                }
            }
        }
        context
    }

    /// Whether the graph's notice type and submitting account are on the
    /// allow-list. A notice without a known submitting account is never
    /// exempt.
    pub fn exempts(&self, graph: &NoticeGraph) -> bool {
        let Some(account) = graph.submitted_by.as_deref() else {
            return false;
        };
        self.trusted_submitters
            .get(&graph.notice.notice_type)
            .map(|accounts| accounts.contains(&normalize(account)))
            .unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        self.trusted_submitters.values().all(HashSet::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::CommonMetadata;
    use lumen_core::NoticeRecord;
    use std::collections::BTreeMap;

    fn notice(notice_type: NoticeType, submitted_by: Option<&str>) -> NoticeGraph {
        let graph = NoticeGraph::new(NoticeRecord::new(notice_type, "title"));
        match submitted_by {
            Some(account) => graph.submitted_by(account),
            None => graph,
        }
    }

    #[test]
    fn exempts_trusted_submitter_for_listed_type_only() {
        let context = ExemptionContext::new().trust(NoticeType::Defamation, "Google");
        assert!(context.exempts(&notice(NoticeType::Defamation, Some("google"))));
        assert!(context.exempts(&notice(NoticeType::Defamation, Some("  GOOGLE "))));
        assert!(!context.exempts(&notice(NoticeType::Dmca, Some("google"))));
        assert!(!context.exempts(&notice(NoticeType::Defamation, Some("someone-else"))));
        assert!(!context.exempts(&notice(NoticeType::Defamation, None)));
    }

    #[test]
    fn empty_context_exempts_nothing() {
        let context = ExemptionContext::new();
        assert!(context.is_empty());
        assert!(!context.exempts(&notice(NoticeType::Defamation, Some("google"))));
    }

    fn policy(id: &str, entries: Vec<(&str, Vec<&str>)>) -> ExemptionPolicyRule {
        ExemptionPolicyRule {
            api_version: "v1".to_string(),
            kind: "ExemptionPolicy".to_string(),
            metadata: CommonMetadata {
                id: id.to_string(),
                name: id.to_string(),
                description: None,
                tags: None,
                enabled: true,
            },
            trusted_submitters: entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.into_iter().map(str::to_string).collect()))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    #[test]
    fn merges_policy_documents_and_skips_unknown_types() {
        let first = policy("first", vec![("Defamation", vec!["google"]), ("Parking", vec!["x"])]);
        let second = policy("second", vec![("court_order", vec!["bing"])]);

        let context = ExemptionContext::from_policies([&first, &second]);
        assert!(context.exempts(&notice(NoticeType::Defamation, Some("google"))));
        assert!(context.exempts(&notice(NoticeType::CourtOrder, Some("bing"))));
        assert!(!context.exempts(&notice(NoticeType::CourtOrder, Some("google"))));
    }
}
