mod common;

use common::{fresh_core, seed_trades};
use hrc_schemas::{AccountId, ExposureLimit, RoutingAction, Side};

#[test]
fn breaching_auto_hedge_level_forces_full_a_book() {
    let core = fresh_core();
    let aid = AccountId(3);
    seed_trades(&core, aid, "EURUSD", 0, 0.0, 60, -1.0, 1000);

    core.set_exposure_limit("EURUSD", ExposureLimit { max_net: 500.0, max_gross: 1000.0, auto_hedge_level: 300.0 });
    core.apply_fill("EURUSD", Side::Buy, 290.0, 1).unwrap();

    let decision = core.route(aid, "u3", "carol", "EURUSD", Side::Buy, 15.0, 0.01, 1_700_000_000).unwrap();

    assert_eq!(decision.action, RoutingAction::ABook);
    assert_eq!(decision.a_book_percent, 100.0);
    assert_eq!(decision.b_book_percent, 0.0);
}

/// Isolates the exposure adjustment from the large-volume override by
/// keeping the order below `largeOrderLots` — the auto-hedge trigger alone
/// must force full A-Book.
#[test]
fn auto_hedge_trigger_fires_even_for_a_small_order() {
    let core = fresh_core();
    let aid = AccountId(30);
    seed_trades(&core, aid, "EURUSD", 0, 0.0, 60, -1.0, 1000);

    core.set_exposure_limit("EURUSD", ExposureLimit { max_net: 500.0, max_gross: 1000.0, auto_hedge_level: 300.0 });
    core.apply_fill("EURUSD", Side::Buy, 295.0, 1).unwrap();

    let decision = core.route(aid, "u30", "c30", "EURUSD", Side::Buy, 9.0, 0.01, 1_700_000_000).unwrap();
    assert_eq!(decision.action, RoutingAction::ABook);
}

/// Exactly at the auto-hedge boundary, the override must NOT fire.
#[test]
fn auto_hedge_boundary_is_exclusive() {
    let core = fresh_core();
    let aid = AccountId(31);
    core.enable_ml(false);
    seed_trades(&core, aid, "EURUSD", 0, 0.0, 60, -1.0, 1000);

    core.set_exposure_limit("EURUSD", ExposureLimit { max_net: 500.0, max_gross: 1000.0, auto_hedge_level: 300.0 });
    core.apply_fill("EURUSD", Side::Buy, 299.0, 1).unwrap();

    let decision = core.route(aid, "u31", "c31", "EURUSD", Side::Buy, 1.0, 0.01, 1_700_000_000).unwrap();
    assert_ne!(decision.action, RoutingAction::ABook);
}
