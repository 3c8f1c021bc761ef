use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::context::PricingContext;
use crate::domain::product::Product;
use crate::domain::rule::PricingRule;
use crate::engine::conditions::evaluate_condition;

/// Filter a rule set down to the rules applicable to one calculation:
/// active status, scope match, date window containing `now`, and every
/// condition true. An empty condition list is applicable. The returned
/// slice preserves the source set's order, so earlier rules win ties.
pub fn applicable_rules<'a>(
    rules: &'a [PricingRule],
    product: &Product,
    context: &PricingContext,
    now: DateTime<Utc>,
) -> Vec<&'a PricingRule> {
    rules
        .iter()
        .filter(|rule| {
            if !rule.is_effective_at(now) {
                return false;
            }
            if !rule.scope.matches(product) {
                return false;
            }
            let matched = rule
                .conditions
                .iter()
                .all(|condition| evaluate_condition(condition, product, context, now));
            if matched {
                debug!(rule_id = %rule.id, rule = %rule.name, "rule conditions satisfied");
            }
            matched
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use rust_decimal::Decimal;

    use crate::domain::context::PricingContext;
    use crate::domain::product::{Product, ProductId};
    use crate::domain::rule::{
        Condition, ContextField, DiscountAction, FieldRef, Predicate, PricingRule, RuleId,
        RuleKind, RuleStatus,
    };
    use crate::domain::scope::RuleScope;

    use super::applicable_rules;

    fn product() -> Product {
        Product {
            id: ProductId("flower-001".to_string()),
            name: "Indica Flower 3.5g".to_string(),
            base_price: Decimal::new(4500, 2),
            category: "Flower".to_string(),
            brand: "Greenhouse".to_string(),
            inventory_count: 80,
            thc_percentage: Decimal::new(1800, 2),
            expiration_date: None,
        }
    }

    fn rule(id: &str, conditions: Vec<Condition>) -> PricingRule {
        PricingRule {
            id: RuleId(id.to_string()),
            name: id.to_string(),
            kind: RuleKind::Customer,
            priority: 5,
            scope: RuleScope::Global,
            conditions,
            action: DiscountAction::percentage(Decimal::from(10)),
            status: RuleStatus::Active,
            start_date: None,
            end_date: None,
        }
    }

    #[test]
    fn empty_condition_list_is_applicable() {
        let rules = vec![rule("always", Vec::new())];
        let context = PricingContext::new(ProductId("flower-001".to_string()), 1, "IL");

        let matched = applicable_rules(&rules, &product(), &context, Utc::now());
        assert_eq!(matched.len(), 1);
    }

    #[test]
    fn inactive_and_expired_rules_are_excluded() {
        let now = Utc::now();
        let mut inactive = rule("inactive", Vec::new());
        inactive.status = RuleStatus::Inactive;
        let mut expired = rule("expired", Vec::new());
        expired.end_date = Some(now - Duration::days(1));

        let rules = vec![inactive, expired, rule("live", Vec::new())];
        let context = PricingContext::new(ProductId("flower-001".to_string()), 1, "IL");

        let matched = applicable_rules(&rules, &product(), &context, now);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id.0, "live");
    }

    #[test]
    fn scope_mismatch_excludes_rule() {
        let mut scoped = rule("other-brand", Vec::new());
        scoped.scope = RuleScope::Brand("Sweetleaf".to_string());
        let rules = vec![scoped];
        let context = PricingContext::new(ProductId("flower-001".to_string()), 1, "IL");

        assert!(applicable_rules(&rules, &product(), &context, Utc::now()).is_empty());
    }

    #[test]
    fn every_condition_must_hold() {
        let rules = vec![rule(
            "bulk-il",
            vec![
                Condition::new(
                    FieldRef::Context(ContextField::OrderQuantity),
                    Predicate::GreaterThan(Decimal::from(10)),
                ),
                Condition::new(
                    FieldRef::Context(ContextField::Market),
                    Predicate::Equals(crate::domain::rule::FieldValue::Text("IL".to_string())),
                ),
            ],
        )];

        let matching = PricingContext::new(ProductId("flower-001".to_string()), 20, "IL");
        let wrong_market = PricingContext::new(ProductId("flower-001".to_string()), 20, "NJ");

        assert_eq!(applicable_rules(&rules, &product(), &matching, Utc::now()).len(), 1);
        assert!(applicable_rules(&rules, &product(), &wrong_market, Utc::now()).is_empty());
    }

    #[test]
    fn insertion_order_is_preserved() {
        let rules = vec![rule("first", Vec::new()), rule("second", Vec::new())];
        let context = PricingContext::new(ProductId("flower-001".to_string()), 1, "IL");

        let matched = applicable_rules(&rules, &product(), &context, Utc::now());
        assert_eq!(matched[0].id.0, "first");
        assert_eq!(matched[1].id.0, "second");
    }
}
