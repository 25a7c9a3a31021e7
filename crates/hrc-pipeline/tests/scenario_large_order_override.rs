mod common;

use common::{fresh_core, seed_trades};
use hrc_schemas::{AccountId, RoutingAction, Side};

#[test]
fn large_volume_forces_full_a_book() {
    let core = fresh_core();
    let aid = AccountId(2);
    // 60 losing trades -> win_rate 0%, classifies RETAIL.
    seed_trades(&core, aid, "EURUSD", 0, 0.0, 60, -1.0, 1000);

    let decision = core.route(aid, "u2", "bob", "EURUSD", Side::Buy, 10.0, 0.01, 1_700_000_000).unwrap();

    assert_eq!(decision.action, RoutingAction::ABook);
    assert_eq!(decision.a_book_percent, 100.0);
    assert_eq!(decision.b_book_percent, 0.0);
    assert!(decision.reason.contains("Large volume"));
}

#[test]
fn volume_exactly_at_threshold_triggers_the_override() {
    let core = fresh_core();
    let aid = AccountId(20);
    seed_trades(&core, aid, "EURUSD", 0, 0.0, 60, -1.0, 1000);

    let decision = core.route(aid, "u20", "b20", "EURUSD", Side::Buy, 10.0, 0.0, 1_700_000_000).unwrap();
    assert_eq!(decision.action, RoutingAction::ABook);
}
