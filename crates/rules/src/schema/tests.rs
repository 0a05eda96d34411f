//! Tests for schema types.

use super::*;

const NON_US_TRIGGER_YAML: &str = r#"
apiVersion: v1
kind: RiskTrigger
metadata:
  id: non-us-recipient
  name: Non US risk trigger
  description: Hold notices whose recipient is outside the United States
  tags: [geography]
  enabled: true
matching_type: all
conditions:
  - field: recipient.country_code
    value: us
    negated: true
    matching_type: exact
"#;

const FORCE_TRIGGER_YAML: &str = r#"
apiVersion: v1
kind: RiskTrigger
metadata:
  id: trusted-source
  name: Trusted source
force_not_risky_assessment: true
matching_type: any
conditions:
  - field: notice.source
    value: court portal
    matching_type: broad
  - field: submitter.name
    value: Known Counsel LLP
"#;

const EXEMPTION_YAML: &str = r#"
apiVersion: v1
kind: ExemptionPolicy
metadata:
  id: trusted-submitters
  name: Trusted submitters
trusted_submitters:
  Defamation: [google]
  CourtOrder: [google, bing]
"#;

#[test]
fn parse_trigger_rule() {
    let rule: RiskTriggerRule = serde_yaml::from_str(NON_US_TRIGGER_YAML).unwrap();
    assert_eq!(rule.api_version, "v1");
    assert_eq!(rule.metadata.id, "non-us-recipient");
    assert!(rule.metadata.enabled);
    assert_eq!(rule.matching_type, TriggerMatch::All);
    assert!(!rule.force_not_risky);
    assert_eq!(rule.conditions.len(), 1);

    let condition = &rule.conditions[0];
    assert_eq!(condition.field, "recipient.country_code");
    assert_eq!(condition.value, "us");
    assert!(condition.negated);
    assert_eq!(condition.matching_type, ConditionMatch::Exact);

    let trigger = rule.to_trigger();
    assert_eq!(trigger.name, "Non US risk trigger");
    assert_eq!(trigger.conditions, rule.conditions);
}

#[test]
fn condition_defaults_and_force_alias() {
    let rule: RiskTriggerRule = serde_yaml::from_str(FORCE_TRIGGER_YAML).unwrap();
    assert!(rule.force_not_risky);
    assert!(rule.metadata.enabled, "enabled defaults to true");
    assert_eq!(rule.matching_type, TriggerMatch::Any);

    let second = &rule.conditions[1];
    assert!(!second.negated);
    assert_eq!(second.matching_type, ConditionMatch::Exact);
    assert_eq!(rule.conditions[0].matching_type, ConditionMatch::Broad);
}

#[test]
fn trigger_without_conditions_parses_empty() {
    let rule: RiskTriggerRule = serde_yaml::from_str(
        r#"
apiVersion: v1
kind: RiskTrigger
metadata:
  id: empty
  name: Empty
"#,
    )
    .unwrap();
    assert!(rule.conditions.is_empty());
    assert_eq!(rule.matching_type, TriggerMatch::All);
}

#[test]
fn unknown_condition_field_is_rejected() {
    let result: Result<RiskTriggerRule, _> = serde_yaml::from_str(
        r#"
apiVersion: v1
kind: RiskTrigger
metadata:
  id: bad
  name: Bad
conditions:
  - field: notice.title
    value: x
    fuzzy: true
"#,
    );
    assert!(result.is_err());
}

#[test]
fn unknown_matching_type_is_rejected() {
    let result: Result<RiskTrigger, _> = serde_yaml::from_str(
        r#"
name: Bad
matching_type: most
conditions: []
"#,
    );
    assert!(result.is_err());
}

#[test]
fn envelope_dispatches_by_kind() {
    let envelope: RuleEnvelope = serde_yaml::from_str(NON_US_TRIGGER_YAML).unwrap();
    assert_eq!(envelope.rule_kind().unwrap(), RuleKind::RiskTrigger);
    let doc = envelope.parse_full().unwrap();
    assert_eq!(doc.kind(), RuleKind::RiskTrigger);
    assert_eq!(doc.metadata().id, "non-us-recipient");
    assert!(doc.as_risk_trigger().is_some());
    assert!(doc.as_exemption_policy().is_none());

    let envelope: RuleEnvelope = serde_yaml::from_str(EXEMPTION_YAML).unwrap();
    let doc = envelope.parse_full().unwrap();
    let policy = doc.as_exemption_policy().unwrap();
    assert_eq!(policy.trusted_submitters["Defamation"], vec!["google"]);
    assert_eq!(policy.trusted_submitters["CourtOrder"].len(), 2);
}

#[test]
fn envelope_rejects_unknown_kind() {
    let envelope: RuleEnvelope = serde_yaml::from_str(
        r#"
apiVersion: v1
kind: RetentionPolicy
metadata:
  id: other
  name: Other
"#,
    )
    .unwrap();
    let err = envelope.parse_full().unwrap_err();
    assert!(err.contains("unknown rule kind"));
}

#[test]
fn rule_kind_display_round_trips() {
    for kind in [RuleKind::RiskTrigger, RuleKind::ExemptionPolicy] {
        assert_eq!(kind.to_string().parse::<RuleKind>().unwrap(), kind);
    }
}
