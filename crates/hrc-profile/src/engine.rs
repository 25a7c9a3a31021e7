use std::collections::VecDeque;

use hrc_schemas::{ClientClassification, ClientProfile, TradeRecord};

use crate::thresholds::ClassificationThresholds;

/// Bounded history capacity per account.
pub const HISTORY_CAPACITY: usize = 1000;

/// An account's full internal state: the public snapshot plus the bounded
/// FIFO history the derived metrics are recomputed from. Never exposed
/// outside this crate — `ProfileStore` hands out clones of `profile` only.
pub struct ProfileRecord {
    pub profile: ClientProfile,
    pub history: VecDeque<TradeRecord>,
}

impl ProfileRecord {
    pub fn new(profile: ClientProfile) -> Self {
        ProfileRecord { profile, history: VecDeque::new() }
    }
}

/// Appends `trade` to `rec`'s history (evicting the oldest past
/// `HISTORY_CAPACITY`), recomputes every derived metric, and reclassifies
/// if the trade count has reached the threshold. Pure aside from mutating
/// `rec` in place.
pub fn record_trade(rec: &mut ProfileRecord, trade: TradeRecord, cfg: &ClassificationThresholds) {
    let p = &mut rec.profile;
    p.total_trades += 1;
    if trade.is_winner {
        p.winning_trades += 1;
    } else {
        p.losing_trades += 1;
    }
    p.total_volume += trade.volume;
    p.total_pnl += trade.pnl;
    *p.instrument_volume.entry(trade.symbol.clone()).or_insert(0.0) += trade.volume;

    let hour = ((trade.close_time / 3600).rem_euclid(24)) as usize;
    p.hourly_pattern[hour] += 1;

    rec.history.push_back(trade);
    while rec.history.len() > HISTORY_CAPACITY {
        rec.history.pop_front();
    }

    recompute_derived(rec);
    reclassify(rec, cfg);
}

/// Updates the order-to-fill ratio running estimate after a cancelled
/// order and reclassifies. The ratio itself is recomputed by
/// `recompute_order_to_fill_ratio`, shared with `record_trade` — without
/// that sharing, an account that cancels a handful of orders early and
/// then settles into ordinary trading would keep the stale ratio from its
/// first cancellation forever, since `total_trades` only grows on the
/// `record_trade` path.
pub fn record_cancellation(rec: &mut ProfileRecord, cfg: &ClassificationThresholds) {
    rec.profile.cancellations += 1;
    recompute_order_to_fill_ratio(rec);
    recompute_toxicity(rec);
    reclassify(rec, cfg);
}

/// `cancellations / (cancellations + totalTrades)`, clamped to `[0,1]`.
fn recompute_order_to_fill_ratio(rec: &mut ProfileRecord) {
    let p = &mut rec.profile;
    let denom = p.cancellations + p.total_trades;
    p.order_to_fill_ratio = if denom == 0 {
        0.0
    } else {
        (p.cancellations as f64 / denom as f64).clamp(0.0, 1.0)
    };
}

fn recompute_derived(rec: &mut ProfileRecord) {
    let p = &mut rec.profile;
    p.win_rate = if p.total_trades == 0 {
        0.0
    } else {
        p.winning_trades as f64 / p.total_trades as f64 * 100.0
    };
    p.avg_trade_size = if p.total_trades == 0 {
        0.0
    } else {
        p.total_volume / p.total_trades as f64
    };

    let n = rec.history.len();
    p.avg_hold_seconds = if n == 0 {
        0.0
    } else {
        rec.history.iter().map(|t| t.hold_seconds).sum::<f64>() / n as f64
    };

    p.sharpe_ratio = compute_sharpe(&rec.history);
    p.max_drawdown = compute_max_drawdown(&rec.history);

    recompute_order_to_fill_ratio(rec);
    recompute_toxicity(rec);
}

fn compute_sharpe(history: &VecDeque<TradeRecord>) -> f64 {
    let n = history.len();
    if n < 2 {
        return 0.0;
    }
    let mean = history.iter().map(|t| t.pnl).sum::<f64>() / n as f64;
    let variance = history.iter().map(|t| (t.pnl - mean).powi(2)).sum::<f64>() / n as f64;
    let stddev = variance.sqrt();
    if stddev == 0.0 {
        0.0
    } else {
        mean / stddev
    }
}

fn compute_max_drawdown(history: &VecDeque<TradeRecord>) -> f64 {
    let mut peak = 0.0_f64;
    let mut cumulative = 0.0_f64;
    let mut max_dd = 0.0_f64;
    for t in history {
        cumulative += t.pnl;
        if cumulative > peak {
            peak = cumulative;
        }
        let dd = peak - cumulative;
        if dd > max_dd {
            max_dd = dd;
        }
    }
    max_dd
}

fn recompute_toxicity(rec: &mut ProfileRecord) {
    let p = &mut rec.profile;
    let mut score = 0.0_f64;

    if p.win_rate > 55.0 {
        score += (3.0 * (p.win_rate - 55.0)).min(30.0);
    }
    if p.sharpe_ratio > 1.5 {
        score += (10.0 * (p.sharpe_ratio - 1.5)).min(20.0);
    }
    if p.order_to_fill_ratio > 0.2 {
        score += (100.0 * p.order_to_fill_ratio).min(20.0);
    }
    if p.avg_hold_seconds < 300.0 {
        score += ((300.0 - p.avg_hold_seconds) / 20.0).min(15.0);
    }
    let concentration_pct = p.max_instrument_share() * 100.0;
    if concentration_pct > 60.0 {
        score += (0.5 * (concentration_pct - 60.0)).min(15.0);
    }

    p.toxicity_score = score.clamp(0.0, 100.0);
}

/// Evaluates the classification cascade, first match wins. A no-op until
/// `total_trades >= min_trades_for_classification`.
fn reclassify(rec: &mut ProfileRecord, cfg: &ClassificationThresholds) {
    let p = &mut rec.profile;
    if p.total_trades < cfg.min_trades_for_classification {
        p.classification = ClientClassification::Unknown;
        return;
    }

    p.classification = if p.win_rate > cfg.toxic_win_rate && p.sharpe_ratio > cfg.toxic_sharpe {
        ClientClassification::Toxic
    } else if p.avg_hold_seconds < cfg.latency_arb_hold_seconds
        && p.win_rate > cfg.latency_arb_win_rate
    {
        ClientClassification::Toxic
    } else if p.order_to_fill_ratio > cfg.toxic_order_to_fill_ratio {
        ClientClassification::Toxic
    } else if p.win_rate > cfg.pro_win_rate
        && p.total_trades > cfg.pro_min_trades
        && p.sharpe_ratio > cfg.pro_sharpe
        && p.toxicity_score < cfg.pro_max_toxicity
    {
        ClientClassification::Professional
    } else if p.win_rate >= cfg.semi_pro_min_win_rate && p.win_rate <= cfg.pro_win_rate {
        ClientClassification::SemiPro
    } else {
        ClientClassification::Retail
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use hrc_schemas::AccountId;

    fn rec() -> ProfileRecord {
        ProfileRecord::new(ClientProfile::new(AccountId(1), "u1", "alice"))
    }

    fn winner(sym: &str, pnl: f64, hold: i64) -> TradeRecord {
        TradeRecord::new("t", sym, 1.0, 1.0, 1.0 + pnl, pnl, 0, hold)
    }

    #[test]
    fn win_rate_and_counters_track_trades() {
        let mut r = rec();
        let cfg = ClassificationThresholds::sane_defaults();
        record_trade(&mut r, winner("EURUSD", 10.0, 100), &cfg);
        record_trade(&mut r, winner("EURUSD", -5.0, 100), &cfg);
        assert_eq!(r.profile.total_trades, 2);
        assert_eq!(r.profile.winning_trades, 1);
        assert_eq!(r.profile.losing_trades, 1);
        assert!((r.profile.win_rate - 50.0).abs() < 1e-9);
    }

    #[test]
    fn history_is_capped_at_1000() {
        let mut r = rec();
        let cfg = ClassificationThresholds::sane_defaults();
        for i in 0..1100 {
            record_trade(&mut r, winner("EURUSD", 1.0, 100 + i), &cfg);
        }
        assert_eq!(r.history.len(), HISTORY_CAPACITY);
        assert_eq!(r.profile.total_trades, 1100);
    }

    #[test]
    fn stays_unknown_below_classification_threshold() {
        let mut r = rec();
        let cfg = ClassificationThresholds::sane_defaults();
        for _ in 0..49 {
            record_trade(&mut r, winner("EURUSD", 1.0, 1000), &cfg);
        }
        assert_eq!(r.profile.classification, ClientClassification::Unknown);
    }

    #[test]
    fn order_to_fill_ratio_decays_as_ordinary_trades_accumulate() {
        let mut r = rec();
        let cfg = ClassificationThresholds::sane_defaults();
        for _ in 0..10 {
            record_cancellation(&mut r, &cfg);
        }
        assert!((r.profile.order_to_fill_ratio - 1.0).abs() < 1e-9);

        for i in 0..500 {
            record_trade(&mut r, winner("EURUSD", 1.0, 1000 + i), &cfg);
        }
        assert!(
            r.profile.order_to_fill_ratio < 0.1,
            "expected ratio to decay toward 0 as trades accumulate, got {}",
            r.profile.order_to_fill_ratio
        );
    }

    #[test]
    fn toxicity_score_stays_within_bounds() {
        let mut r = rec();
        let cfg = ClassificationThresholds::sane_defaults();
        for _ in 0..60 {
            record_trade(&mut r, winner("EURUSD", 50.0, 5), &cfg);
        }
        assert!(r.profile.toxicity_score >= 0.0 && r.profile.toxicity_score <= 100.0);
    }
}
