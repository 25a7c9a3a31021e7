use std::collections::BTreeMap;

use crate::ids::AccountId;

/// One closed trade. Immutable once recorded.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TradeRecord {
    pub trade_id: String,
    pub symbol: String,
    pub volume: f64,
    pub open_price: f64,
    pub close_price: f64,
    pub pnl: f64,
    pub open_time: i64,
    pub close_time: i64,
    pub hold_seconds: f64,
    pub is_winner: bool,
}

impl TradeRecord {
    /// Builds a record from the raw fields a gateway observes on close,
    /// deriving `is_winner` and `hold_seconds` instead of trusting the
    /// caller to keep them consistent with `pnl`/`open_time`/`close_time`.
    pub fn new(
        trade_id: impl Into<String>,
        symbol: impl Into<String>,
        volume: f64,
        open_price: f64,
        close_price: f64,
        pnl: f64,
        open_time: i64,
        close_time: i64,
    ) -> Self {
        TradeRecord {
            trade_id: trade_id.into(),
            symbol: symbol.into(),
            volume,
            open_price,
            close_price,
            pnl,
            open_time,
            close_time,
            hold_seconds: (close_time - open_time).max(0) as f64,
            is_winner: pnl > 0.0,
        }
    }
}

/// Closed, exhaustively-matched classification tag. Never represented as a
/// string internally, so a new variant forces every `match` on it to be
/// updated rather than silently falling through to `Unknown`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ClientClassification {
    Unknown,
    Retail,
    SemiPro,
    Professional,
    Toxic,
}

impl Default for ClientClassification {
    fn default() -> Self {
        ClientClassification::Unknown
    }
}

/// Snapshot of one account's behavioral statistics and classification.
///
/// Returned by `ProfileStore` queries as an owned clone taken under the
/// account's lock; the bounded trade-history ring itself is an internal
/// detail of the store, not part of this snapshot.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ClientProfile {
    pub aid: AccountId,
    pub user_id: String,
    pub username: String,

    pub total_trades: u64,
    pub winning_trades: u64,
    pub losing_trades: u64,
    pub total_volume: f64,
    pub total_pnl: f64,
    pub cancellations: u64,

    pub win_rate: f64,
    pub avg_trade_size: f64,
    pub avg_hold_seconds: f64,
    pub sharpe_ratio: f64,
    pub max_drawdown: f64,
    pub order_to_fill_ratio: f64,
    pub toxicity_score: f64,

    pub instrument_volume: BTreeMap<String, f64>,
    pub hourly_pattern: [u64; 24],

    pub classification: ClientClassification,
}

impl ClientProfile {
    pub fn new(aid: AccountId, user_id: impl Into<String>, username: impl Into<String>) -> Self {
        ClientProfile {
            aid,
            user_id: user_id.into(),
            username: username.into(),
            total_trades: 0,
            winning_trades: 0,
            losing_trades: 0,
            total_volume: 0.0,
            total_pnl: 0.0,
            cancellations: 0,
            win_rate: 0.0,
            avg_trade_size: 0.0,
            avg_hold_seconds: 0.0,
            sharpe_ratio: 0.0,
            max_drawdown: 0.0,
            order_to_fill_ratio: 0.0,
            toxicity_score: 0.0,
            instrument_volume: BTreeMap::new(),
            hourly_pattern: [0; 24],
            classification: ClientClassification::Unknown,
        }
    }

    /// Share of total lots concentrated in the single most-traded instrument.
    pub fn max_instrument_share(&self) -> f64 {
        if self.total_volume <= 0.0 {
            return 0.0;
        }
        let max_lots = self
            .instrument_volume
            .values()
            .cloned()
            .fold(0.0_f64, f64::max);
        max_lots / self.total_volume
    }
}
