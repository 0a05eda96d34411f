//! Exemption policy validation: notice type keys and account lists.

use lumen_core::NoticeType;

use super::fuzzy::fuzzy_match;
use super::ValidationResult;
use crate::schema::ExemptionPolicyRule;

pub(super) fn validate_exemption_policy(rule: &ExemptionPolicyRule, result: &mut ValidationResult) {
    if rule.trusted_submitters.is_empty() {
        result.warn("trusted_submitters", "policy lists no trusted submitters and exempts nothing");
        return;
    }

    let type_names: Vec<&str> = NoticeType::ALL.iter().map(|t| t.as_str()).collect();

    for (type_name, accounts) in &rule.trusted_submitters {
        let path = format!("trusted_submitters.{type_name}");

        if type_name.parse::<NoticeType>().is_err() {
            let message = format!("Unknown notice type '{type_name}'");
            match fuzzy_match(type_name, &type_names) {
                Some(s) => result.error_with_suggestion(&path, message, format!("Did you mean '{s}'?")),
                None => result.error(&path, message),
            }
        }

        if accounts.is_empty() {
            result.warn(&path, "no accounts listed");
        }
        for (i, account) in accounts.iter().enumerate() {
            if account.trim().is_empty() {
                result.error(format!("{path}[{i}]"), "account must not be blank");
            }
        }
    }
}
