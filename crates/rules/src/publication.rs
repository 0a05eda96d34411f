//! Publication decision derived from a risk assessment.

use std::fmt;

use lumen_core::{NoticeRecord, UNDER_REVIEW_VALUE};
use serde::{Deserialize, Serialize};

use crate::engine::RiskAssessmentResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublicationDecision {
    /// Notice needs human review before its body is shown.
    HeldForReview,
    Publish,
}

impl From<&RiskAssessmentResult> for PublicationDecision {
    fn from(result: &RiskAssessmentResult) -> Self {
        if result.is_risky {
            PublicationDecision::HeldForReview
        } else {
            PublicationDecision::Publish
        }
    }
}

impl fmt::Display for PublicationDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublicationDecision::HeldForReview => write!(f, "held_for_review"),
            PublicationDecision::Publish => write!(f, "publish"),
        }
    }
}

/// Body text shown publicly for a notice under the given decision.
pub fn public_body(notice: &NoticeRecord, decision: PublicationDecision) -> &str {
    match decision {
        PublicationDecision::HeldForReview => UNDER_REVIEW_VALUE,
        PublicationDecision::Publish => notice.body.as_deref().unwrap_or(""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::NoticeType;

    #[test]
    fn risky_result_holds_and_masks_body() {
        let result = RiskAssessmentResult {
            is_risky: true,
            matched_triggers: vec!["Non US risk trigger".to_string()],
            ..RiskAssessmentResult::default()
        };
        let decision = PublicationDecision::from(&result);
        assert_eq!(decision, PublicationDecision::HeldForReview);

        let notice = NoticeRecord::new(NoticeType::Dmca, "t").with_body("Some harmless text");
        assert_eq!(public_body(&notice, decision), UNDER_REVIEW_VALUE);
    }

    #[test]
    fn not_risky_result_publishes_body() {
        let decision = PublicationDecision::from(&RiskAssessmentResult::default());
        assert_eq!(decision, PublicationDecision::Publish);

        let notice = NoticeRecord::new(NoticeType::Dmca, "t").with_body("Some harmless text");
        assert_eq!(public_body(&notice, decision), "Some harmless text");
        assert_eq!(public_body(&NoticeRecord::default(), decision), "");
    }
}
