mod common;

use common::fresh_core;
use hrc_schemas::{AccountId, RoutingAction, Side, TradeRecord};

/// Crafts a profile whose toxicity score clears 80 via condition (1) of
/// the classification cascade (high win rate + high Sharpe) and condition
/// (3) (high cancellation-driven order-to-fill ratio), then checks the
/// pipeline rejects outright rather than routing.
#[test]
fn toxic_client_over_reject_threshold_is_rejected() {
    let core = fresh_core();
    let aid = AccountId(4);

    for i in 0..58 {
        let t = TradeRecord::new(format!("w{i}"), "EURUSD", 1.0, 1.0, 51.0, 50.0, 0, 0);
        core.record_trade(aid, t, 1_700_000_000);
    }
    for i in 0..2 {
        let t = TradeRecord::new(format!("l{i}"), "EURUSD", 1.0, 1.0, 0.0, -1.0, 0, 0);
        core.record_trade(aid, t, 1_700_000_000);
    }
    for _ in 0..100 {
        core.record_cancellation(aid);
    }

    let profile = core.get_profile(aid).unwrap();
    assert!(profile.toxicity_score > 80.0, "expected toxicity > 80, got {}", profile.toxicity_score);

    let decision = core.route(aid, "u4", "dave", "EURUSD", Side::Buy, 1.0, 0.01, 1_700_000_000).unwrap();

    assert_eq!(decision.action, RoutingAction::Reject);
    assert_eq!(decision.a_book_percent, 0.0);
    assert_eq!(decision.b_book_percent, 0.0);
    assert!(decision.reason.to_lowercase().contains("toxicity score"));
}
