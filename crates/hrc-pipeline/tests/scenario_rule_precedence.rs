mod common;

use common::{fresh_core, seed_trades};
use hrc_schemas::{AccountId, RoutingAction, RuleFilters, Side};
use hrc_pipeline::NewRule;

#[test]
fn a_high_priority_rule_overrides_classification() {
    let core = fresh_core();
    let aid = AccountId(7);
    // Otherwise classifies RETAIL.
    seed_trades(&core, aid, "EURUSD", 0, 0.0, 60, -1.0, 1000);

    core.add_rule(NewRule {
        priority: 100,
        filters: RuleFilters { account_ids: Some(vec![aid]), ..Default::default() },
        action: RoutingAction::ABook,
        target_lp: None,
        hedge_percent: 100.0,
        enabled: true,
        description: "VIP account override".to_string(),
    })
    .unwrap();

    let decision = core.route(aid, "u7", "gina", "EURUSD", Side::Buy, 1.0, 0.01, 1_700_000_000).unwrap();

    assert_eq!(decision.action, RoutingAction::ABook);
    assert_eq!(decision.a_book_percent, 100.0);
    assert_eq!(decision.b_book_percent, 0.0);
    assert!(decision.reason.starts_with("Matched rule:"));
}
