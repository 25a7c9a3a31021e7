mod common;

use common::fresh_core;
use hrc_schemas::{AccountId, RoutingAction, Side, TradeOutcome, TradeRecord};
use hrc_pipeline::NewRule;

#[test]
fn export_then_import_is_an_identity_on_weights() {
    let core = fresh_core();
    let before = core.export_model();
    core.import_model(before.clone());
    let after = core.export_model();
    assert_eq!(before.weights, after.weights);
}

#[test]
fn adding_then_deleting_a_rule_restores_prior_state() {
    let core = fresh_core();
    let before = core.list_rules();

    let rule = core
        .add_rule(NewRule {
            priority: 1,
            filters: Default::default(),
            action: RoutingAction::BBook,
            target_lp: None,
            hedge_percent: 0.0,
            enabled: true,
            description: "temp".to_string(),
        })
        .unwrap();
    core.delete_rule(rule.id).unwrap();

    assert_eq!(core.list_rules(), before);
}

#[test]
fn deleting_an_unknown_rule_is_not_found() {
    let core = fresh_core();
    assert!(core.delete_rule(999_999).is_err());
}

#[test]
fn record_trade_counters_never_decrease() {
    let core = fresh_core();
    let aid = AccountId(50);
    let mut last_trades = 0;
    let mut last_volume = 0.0;
    for i in 0..10 {
        let t = TradeRecord::new(format!("t{i}"), "EURUSD", 2.0, 1.0, 1.5, -0.5, 0, 10);
        let p = core.record_trade(aid, t, 1_700_000_000);
        assert!(p.total_trades as i64 >= last_trades);
        assert!(p.total_volume >= last_volume);
        last_trades = p.total_trades as i64;
        last_volume = p.total_volume;
    }
}

#[test]
fn outcome_attachment_is_keyed_by_decision_id_and_single_use() {
    let core = fresh_core();
    let aid = AccountId(51);
    let decision = core.route(aid, "u51", "n51", "EURUSD", Side::Buy, 1.0, 0.0, 1_700_000_000).unwrap();

    let outcome = TradeOutcome {
        trade_id: "t1".to_string(),
        closed_at: 1_700_000_100,
        close_price: 1.2345,
        realized_pnl: 10.0,
        hold_seconds: 100.0,
        executed_action: decision.action,
        was_optimal: false,
    };
    core.record_outcome(decision.decision_id, outcome.clone(), 1_700_000_100).unwrap();

    // A second attachment to the same decision is rejected: no matching
    // unresolved record remains.
    let err = core.record_outcome(decision.decision_id, outcome, 1_700_000_200);
    assert!(err.is_err());
}

#[test]
fn outcome_attachment_to_unknown_decision_is_not_found() {
    let core = fresh_core();
    let outcome = TradeOutcome {
        trade_id: "ghost".to_string(),
        closed_at: 0,
        close_price: 0.0,
        realized_pnl: 0.0,
        hold_seconds: 0.0,
        executed_action: RoutingAction::BBook,
        was_optimal: false,
    };
    let result = core.record_outcome(uuid::Uuid::new_v4(), outcome, 0);
    assert!(result.is_err());
}

#[test]
fn routing_decision_percentages_always_sum_to_100_unless_rejected() {
    let core = fresh_core();
    let aid = AccountId(52);
    for i in 0..5 {
        let d = core
            .route(aid, "u52", "n52", "EURUSD", Side::Buy, 1.0 + i as f64, 0.01, 1_700_000_000 + i)
            .unwrap();
        if d.action != RoutingAction::Reject {
            assert!((d.a_book_percent + d.b_book_percent - 100.0).abs() < 1e-6);
        } else {
            assert_eq!(d.a_book_percent, 0.0);
            assert_eq!(d.b_book_percent, 0.0);
        }
    }
}
