mod common;

use common::{fresh_core, seed_trades};
use hrc_schemas::{AccountId, RoutingAction, Side};

#[test]
fn elevated_volatility_adds_thirty_points_to_a_book() {
    let core = fresh_core();
    core.enable_ml(false);
    let aid = AccountId(6);
    // 25 winners / 25 losers -> win_rate 50%, classifies SEMI_PRO.
    seed_trades(&core, aid, "EURUSD", 25, 1.0, 25, -1.0, 1000);

    let decision = core.route(aid, "u6", "frank", "EURUSD", Side::Buy, 1.0, 0.025, 1_700_000_000).unwrap();

    assert_eq!(decision.action, RoutingAction::PartialHedge);
    assert_eq!(decision.a_book_percent, 80.0);
    assert_eq!(decision.b_book_percent, 20.0);
}

#[test]
fn volatility_exactly_at_threshold_does_not_bump() {
    let core = fresh_core();
    core.enable_ml(false);
    let aid = AccountId(60);
    seed_trades(&core, aid, "EURUSD", 25, 1.0, 25, -1.0, 1000);

    let decision = core.route(aid, "u60", "f60", "EURUSD", Side::Buy, 1.0, 0.02, 1_700_000_000).unwrap();
    assert_eq!(decision.a_book_percent, 50.0);
}
