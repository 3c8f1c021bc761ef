use thiserror::Error;

use crate::domain::rule::RuleId;

/// Rule-authoring and invariant failures. These never escape a price
/// calculation; they surface from validation entry points only.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid pricing rule `{rule_id}`: {}", issues.join("; "))]
    InvalidRule { rule_id: RuleId, issues: Vec<String> },
    #[error("volume rule `{rule_id}` has overlapping quantity tiers")]
    OverlappingVolumeTiers { rule_id: RuleId },
    #[error("domain invariant violation: {0}")]
    InvariantViolation(String),
}

#[cfg(test)]
mod tests {
    use crate::domain::rule::RuleId;

    use super::DomainError;

    #[test]
    fn invalid_rule_error_lists_issues() {
        let error = DomainError::InvalidRule {
            rule_id: RuleId("r-1".to_string()),
            issues: vec!["name is empty".to_string(), "value is negative".to_string()],
        };

        assert_eq!(
            error.to_string(),
            "invalid pricing rule `r-1`: name is empty; value is negative"
        );
    }
}
