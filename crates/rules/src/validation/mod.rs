//! Rule validation with structured errors and suggestions.
//!
//! Checks risk trigger and exemption policy documents for authoring mistakes
//! the engine would otherwise silently tolerate (an unknown field path just
//! never matches). Returns a [`ValidationResult`] with errors (should block
//! publishing the rule) and warnings (advisory).

mod exemption_checks;
mod trigger_checks;

pub mod fuzzy;

use std::collections::{BTreeMap, HashMap};

use crate::schema::*;
use fuzzy::is_kebab_case;
use serde::{Deserialize, Serialize};

// ── Result types ────────────────────────────────────────────────────

/// Overall validation outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

/// A blocking validation error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationError {
    /// Path-like location, e.g. `"conditions[0].field"`.
    pub path: String,
    pub message: String,
    /// Optional "Did you mean …?" suggestion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// A non-blocking advisory warning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationResult {
    pub(crate) fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub(crate) fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.valid = false;
        self.errors.push(ValidationError {
            path: path.into(),
            message: message.into(),
            suggestion: None,
        });
    }

    pub(crate) fn error_with_suggestion(
        &mut self,
        path: impl Into<String>,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) {
        self.valid = false;
        self.errors.push(ValidationError {
            path: path.into(),
            message: message.into(),
            suggestion: Some(suggestion.into()),
        });
    }

    pub(crate) fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ValidationWarning {
            path: path.into(),
            message: message.into(),
        });
    }

    /// Fold another result into this one, prefixing its paths.
    fn absorb(&mut self, prefix: &str, other: ValidationResult) {
        self.valid &= other.valid;
        self.errors.extend(other.errors.into_iter().map(|mut e| {
            e.path = join_path(prefix, &e.path);
            e
        }));
        self.warnings.extend(other.warnings.into_iter().map(|mut w| {
            w.path = join_path(prefix, &w.path);
            w
        }));
    }
}

fn join_path(prefix: &str, path: &str) -> String {
    if path.is_empty() {
        prefix.to_string()
    } else {
        format!("{prefix}: {path}")
    }
}

// ── Shared header checks ────────────────────────────────────────────

fn validate_header(
    api_version: &str,
    kind: &str,
    expected_kind: RuleKind,
    metadata: &CommonMetadata,
    result: &mut ValidationResult,
) {
    if api_version != "v1" {
        result.error(
            "apiVersion",
            format!("apiVersion must be 'v1', got '{api_version}'"),
        );
    }

    if kind != expected_kind.to_string() {
        result.error(
            "kind",
            format!("kind must be '{expected_kind}', got '{kind}'"),
        );
    }

    if !is_kebab_case(&metadata.id) {
        result.error(
            "metadata.id",
            format!(
                "id must be kebab-case (lowercase alphanumeric + hyphens), got '{}'",
                metadata.id
            ),
        );
    }

    if metadata.name.trim().is_empty() {
        result.error("metadata.name", "name must not be empty");
    }
}

// ── Public API ──────────────────────────────────────────────────────

/// Validate any [`RuleDocument`] variant, dispatching to the appropriate validator.
pub fn validate_document(doc: &RuleDocument) -> ValidationResult {
    let mut result = ValidationResult::new();
    match doc {
        RuleDocument::RiskTrigger(rule) => {
            validate_header(&rule.api_version, &rule.kind, RuleKind::RiskTrigger, &rule.metadata, &mut result);
            trigger_checks::validate_trigger_rule(rule, &mut result);
        }
        RuleDocument::ExemptionPolicy(rule) => {
            validate_header(&rule.api_version, &rule.kind, RuleKind::ExemptionPolicy, &rule.metadata, &mut result);
            exemption_checks::validate_exemption_policy(rule, &mut result);
        }
    }
    result
}

/// Validate a bare in-memory trigger (no YAML envelope).
pub fn validate_trigger(trigger: &RiskTrigger) -> ValidationResult {
    let mut result = ValidationResult::new();
    trigger_checks::validate_trigger(trigger, &mut result);
    result
}

/// Validate every loaded document, then check cross-document constraints.
///
/// Paths in the returned result are prefixed with the document id.
pub fn validate_documents(documents: &HashMap<String, RuleDocument>) -> ValidationResult {
    let mut result = ValidationResult::new();
    let sorted: BTreeMap<&String, &RuleDocument> = documents.iter().collect();

    let mut trigger_names: HashMap<String, Vec<&str>> = HashMap::new();
    for (id, doc) in &sorted {
        result.absorb(id, validate_document(doc));
        if let RuleDocument::RiskTrigger(rule) = doc {
            if rule.metadata.enabled {
                trigger_names
                    .entry(rule.metadata.name.trim().to_lowercase())
                    .or_default()
                    .push(id.as_str());
            }
        }
    }

    let mut duplicates: Vec<_> = trigger_names.into_iter().filter(|(_, ids)| ids.len() > 1).collect();
    duplicates.sort();
    for (name, ids) in duplicates {
        result.warn(
            ids.join(", "),
            format!("trigger name '{name}' is used by {} enabled triggers; matched-trigger reports will be ambiguous", ids.len()),
        );
    }

    result
}

/// Parse raw YAML and validate. Returns parse errors merged with validation errors.
pub fn validate_yaml(yaml: &str) -> ValidationResult {
    let parsed = serde_yaml::from_str::<RuleEnvelope>(yaml)
        .map_err(|e| format!("YAML parse error: {e}"))
        .and_then(|envelope| envelope.parse_full());
    match parsed {
        Ok(doc) => validate_document(&doc),
        Err(e) => {
            let mut result = ValidationResult::new();
            result.error("", e);
            result
        }
    }
}
