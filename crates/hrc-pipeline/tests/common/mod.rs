use hrc_pipeline::{ClassificationThresholds, PipelineConfig, RoutingCore};
use hrc_schemas::{AccountId, TradeRecord};

pub fn fresh_core() -> RoutingCore {
    RoutingCore::new(PipelineConfig::sane_defaults(), ClassificationThresholds::sane_defaults())
}

/// Records `winners` trades with `win_pnl` and `losers` trades with
/// `loss_pnl`, all on `symbol` with the given hold time, directly via the
/// pipeline so derived metrics/classification recompute exactly as `route`
/// would observe them.
pub fn seed_trades(
    core: &RoutingCore,
    aid: AccountId,
    symbol: &str,
    winners: u32,
    win_pnl: f64,
    losers: u32,
    loss_pnl: f64,
    hold_seconds: i64,
) {
    for i in 0..winners {
        let t = TradeRecord::new(format!("w{i}"), symbol, 1.0, 1.0, 1.0 + win_pnl, win_pnl, 0, hold_seconds);
        core.record_trade(aid, t, 1_700_000_000);
    }
    for i in 0..losers {
        let t = TradeRecord::new(format!("l{i}"), symbol, 1.0, 1.0, 1.0 + loss_pnl, loss_pnl, 0, hold_seconds);
        core.record_trade(aid, t, 1_700_000_000);
    }
}
