use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Public placeholder shown instead of the body of a notice held for review.
pub const UNDER_REVIEW_VALUE: &str = "Under review";

/// Kind of legal notice. Drives the trusted-submitter exemption lookup and is
/// what `notice.type` resolves to in trigger conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum NoticeType {
    Dmca,
    Defamation,
    CourtOrder,
    LawEnforcementRequest,
    PrivateInformation,
    Trademark,
    GovernmentRequest,
    DataProtection,
    Counterfeit,
    Counternotice,
    #[default]
    Other,
}

impl NoticeType {
    pub const ALL: [NoticeType; 11] = [
        NoticeType::Dmca,
        NoticeType::Defamation,
        NoticeType::CourtOrder,
        NoticeType::LawEnforcementRequest,
        NoticeType::PrivateInformation,
        NoticeType::Trademark,
        NoticeType::GovernmentRequest,
        NoticeType::DataProtection,
        NoticeType::Counterfeit,
        NoticeType::Counternotice,
        NoticeType::Other,
    ];

    /// Canonical display name, e.g. `"Defamation"` or `"DMCA"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeType::Dmca => "DMCA",
            NoticeType::Defamation => "Defamation",
            NoticeType::CourtOrder => "CourtOrder",
            NoticeType::LawEnforcementRequest => "LawEnforcementRequest",
            NoticeType::PrivateInformation => "PrivateInformation",
            NoticeType::Trademark => "Trademark",
            NoticeType::GovernmentRequest => "GovernmentRequest",
            NoticeType::DataProtection => "DataProtection",
            NoticeType::Counterfeit => "Counterfeit",
            NoticeType::Counternotice => "Counternotice",
            NoticeType::Other => "Other",
        }
    }
}

impl fmt::Display for NoticeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NoticeType {
    type Err = CoreError;

    /// Case-insensitive; `_`, `-` and spaces are ignored so `court_order`
    /// and `Court Order` both parse as [`NoticeType::CourtOrder`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_lowercase();
        NoticeType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().to_lowercase() == wanted)
            .ok_or_else(|| CoreError::UnknownNoticeType(s.to_string()))
    }
}

impl TryFrom<String> for NoticeType {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<NoticeType> for String {
    fn from(value: NoticeType) -> Self {
        value.as_str().to_string()
    }
}

/// Root record of a submitted notice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoticeRecord {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(rename = "type", default)]
    pub notice_type: NoticeType,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    /// How the notice reached the submitter ("sent via").
    #[serde(default, alias = "sent_via")]
    pub source: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

impl NoticeRecord {
    pub fn new(notice_type: NoticeType, title: impl Into<String>) -> Self {
        Self {
            notice_type,
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}
