use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::notice::NoticeRecord;
use crate::party::PartyRecord;

/// Read-only snapshot of a submitted notice and the records around it.
///
/// Built by the submission side once per notice and handed to the risk
/// engine by reference; nothing in the engine mutates it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoticeGraph {
    pub notice: NoticeRecord,
    #[serde(default)]
    pub recipient: Option<PartyRecord>,
    #[serde(default)]
    pub sender: Option<PartyRecord>,
    #[serde(default)]
    pub submitter: Option<PartyRecord>,
    #[serde(default)]
    pub entities: Vec<PartyRecord>,
    /// Identity of the account that submitted the notice.
    #[serde(default)]
    pub submitted_by: Option<String>,
}

impl NoticeGraph {
    pub fn new(notice: NoticeRecord) -> Self {
        Self {
            notice,
            ..Self::default()
        }
    }

    pub fn with_recipient(mut self, recipient: PartyRecord) -> Self {
        self.recipient = Some(recipient);
        self
    }

    pub fn with_sender(mut self, sender: PartyRecord) -> Self {
        self.sender = Some(sender);
        self
    }

    pub fn with_submitter(mut self, submitter: PartyRecord) -> Self {
        self.submitter = Some(submitter);
        self
    }

    pub fn with_entity(mut self, entity: PartyRecord) -> Self {
        self.entities.push(entity);
        self
    }

    pub fn submitted_by(mut self, account: impl Into<String>) -> Self {
        self.submitted_by = Some(account.into());
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notice::NoticeType;

    #[test]
    fn builder_collects_related_records() {
        let graph = NoticeGraph::new(NoticeRecord::new(NoticeType::Dmca, "Takedown"))
            .with_recipient(PartyRecord::named("Recipient").with_country("US"))
            .with_entity(PartyRecord::named("Principal"))
            .with_entity(PartyRecord::named("Agent"))
            .submitted_by("google");

        assert_eq!(graph.recipient.as_ref().unwrap().country_code.as_deref(), Some("US"));
        assert!(graph.sender.is_none());
        assert_eq!(graph.entities.len(), 2);
        assert_eq!(graph.submitted_by.as_deref(), Some("google"));
    }

    #[test]
    fn parses_minimal_json() {
        let graph = NoticeGraph::from_json_str(
            r#"{
                "notice": {"type": "DMCA", "title": "Copyright claim", "body": "text"},
                "recipient": {"name": "Example Corp", "country_code": "ES", "kind": "organization"}
            }"#,
        )
        .unwrap();

        assert_eq!(graph.notice.notice_type, NoticeType::Dmca);
        assert_eq!(graph.recipient.unwrap().name, "Example Corp");
        assert!(graph.entities.is_empty());
        assert!(graph.submitted_by.is_none());
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(NoticeGraph::from_json_str("{\"notice\": 3}").is_err());
    }
}
