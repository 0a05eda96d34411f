//! Field path resolution against a [`NoticeGraph`].
//!
//! A field path is `<object>.<attribute>`. The set of valid paths is the
//! closed table below; anything outside it resolves to `None` rather than
//! failing, so a mistyped rule simply never matches (before negation).

use std::fmt;

use lumen_core::{NoticeGraph, PartyRecord};

// ── Lookup table ────────────────────────────────────────────────────

/// Attributes readable on the root notice record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeAttribute {
    Title,
    Body,
    Source,
    Type,
    Subject,
    Language,
}

/// Related records reachable from a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartyRole {
    Recipient,
    Sender,
    Submitter,
    /// First associated entity.
    Entity,
}

/// Attributes readable on a recipient, sender, submitter or entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartyAttribute {
    Name,
    Kind,
    AddressLine1,
    AddressLine2,
    City,
    State,
    Zip,
    CountryCode,
    Phone,
    Email,
    Url,
}

const NOTICE_SELECTOR: &str = "notice";

const NOTICE_ATTRIBUTES: &[(&str, NoticeAttribute)] = &[
    ("title", NoticeAttribute::Title),
    ("body", NoticeAttribute::Body),
    ("source", NoticeAttribute::Source),
    ("sent_via", NoticeAttribute::Source),
    ("type", NoticeAttribute::Type),
    ("subject", NoticeAttribute::Subject),
    ("language", NoticeAttribute::Language),
];

const PARTY_ROLES: &[(&str, PartyRole)] = &[
    ("recipient", PartyRole::Recipient),
    ("sender", PartyRole::Sender),
    ("submitter", PartyRole::Submitter),
    ("entity", PartyRole::Entity),
];

const PARTY_ATTRIBUTES: &[(&str, PartyAttribute)] = &[
    ("name", PartyAttribute::Name),
    ("kind", PartyAttribute::Kind),
    ("address_line_1", PartyAttribute::AddressLine1),
    ("address_line_2", PartyAttribute::AddressLine2),
    ("city", PartyAttribute::City),
    ("state", PartyAttribute::State),
    ("zip", PartyAttribute::Zip),
    ("country_code", PartyAttribute::CountryCode),
    ("phone", PartyAttribute::Phone),
    ("email", PartyAttribute::Email),
    ("url", PartyAttribute::Url),
];

fn lookup<T: Copy>(table: &[(&str, T)], key: &str) -> Option<T> {
    table.iter().find(|(name, _)| *name == key).map(|(_, v)| *v)
}

fn name_of<T: Copy + PartialEq>(table: &[(&'static str, T)], value: T) -> &'static str {
    // Every variant has at least one entry; the first is canonical.
    table
        .iter()
        .find(|(_, v)| *v == value)
        .map(|(name, _)| *name)
        .unwrap_or("?")
}

// ── Field path ──────────────────────────────────────────────────────

/// A parsed, known-valid field path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldPath {
    Notice(NoticeAttribute),
    Party(PartyRole, PartyAttribute),
}

impl FieldPath {
    /// Parse a dotted path. Returns `None` for unknown selectors, unknown
    /// attributes, or anything that is not exactly two non-empty segments.
    pub fn parse(path: &str) -> Option<Self> {
        let (object, attribute) = path.trim().split_once('.')?;
        if object.is_empty() || attribute.is_empty() || attribute.contains('.') {
            return None;
        }
        if object == NOTICE_SELECTOR {
            return lookup(NOTICE_ATTRIBUTES, attribute).map(FieldPath::Notice);
        }
        let role = lookup(PARTY_ROLES, object)?;
        let attr = lookup(PARTY_ATTRIBUTES, attribute)?;
        Some(FieldPath::Party(role, attr))
    }

    /// Read this path from the graph. `None` when the related record is
    /// missing or the attribute is unset on it.
    pub fn resolve<'a>(&self, graph: &'a NoticeGraph) -> Option<&'a str> {
        match *self {
            FieldPath::Notice(attr) => notice_value(graph, attr),
            FieldPath::Party(role, attr) => party(graph, role).and_then(|p| party_value(p, attr)),
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            FieldPath::Notice(attr) => {
                write!(f, "{}.{}", NOTICE_SELECTOR, name_of(NOTICE_ATTRIBUTES, attr))
            }
            FieldPath::Party(role, attr) => write!(
                f,
                "{}.{}",
                name_of(PARTY_ROLES, role),
                name_of(PARTY_ATTRIBUTES, attr)
            ),
        }
    }
}

/// Resolve a dotted path string against the graph.
pub fn resolve<'a>(graph: &'a NoticeGraph, path: &str) -> Option<&'a str> {
    FieldPath::parse(path)?.resolve(graph)
}

/// Every path string [`FieldPath::parse`] accepts, aliases included.
pub fn known_paths() -> Vec<String> {
    let mut paths: Vec<String> = NOTICE_ATTRIBUTES
        .iter()
        .map(|(attr, _)| format!("{NOTICE_SELECTOR}.{attr}"))
        .collect();
    for (role, _) in PARTY_ROLES {
        for (attr, _) in PARTY_ATTRIBUTES {
            paths.push(format!("{role}.{attr}"));
        }
    }
    paths
}

fn notice_value(graph: &NoticeGraph, attr: NoticeAttribute) -> Option<&str> {
    let notice = &graph.notice;
    match attr {
        NoticeAttribute::Title => Some(notice.title.as_str()),
        NoticeAttribute::Body => notice.body.as_deref(),
        NoticeAttribute::Source => notice.source.as_deref(),
        NoticeAttribute::Type => Some(notice.notice_type.as_str()),
        NoticeAttribute::Subject => notice.subject.as_deref(),
        NoticeAttribute::Language => notice.language.as_deref(),
    }
}

fn party(graph: &NoticeGraph, role: PartyRole) -> Option<&PartyRecord> {
    match role {
        PartyRole::Recipient => graph.recipient.as_ref(),
        PartyRole::Sender => graph.sender.as_ref(),
        PartyRole::Submitter => graph.submitter.as_ref(),
        PartyRole::Entity => graph.entities.first(),
    }
}

fn party_value(party: &PartyRecord, attr: PartyAttribute) -> Option<&str> {
    match attr {
        PartyAttribute::Name => Some(party.name.as_str()),
        PartyAttribute::Kind => party.kind.map(|k| k.as_str()),
        PartyAttribute::AddressLine1 => party.address_line_1.as_deref(),
        PartyAttribute::AddressLine2 => party.address_line_2.as_deref(),
        PartyAttribute::City => party.city.as_deref(),
        PartyAttribute::State => party.state.as_deref(),
        PartyAttribute::Zip => party.zip.as_deref(),
        PartyAttribute::CountryCode => party.country_code.as_deref(),
        PartyAttribute::Phone => party.phone.as_deref(),
        PartyAttribute::Email => party.email.as_deref(),
        PartyAttribute::Url => party.url.as_deref(),
    }
}
