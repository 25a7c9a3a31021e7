use crate::decision::RoutingAction;

/// Human-readable names for the 10 feature slots, in positional order.
/// Purely a debugging/export aid — the model itself only ever indexes by
/// position.
pub const FEATURE_NAMES: [&str; 10] = [
    "win_rate",
    "sharpe_normalized",
    "log_avg_hold_seconds",
    "order_to_fill_ratio",
    "max_instrument_share",
    "log_total_volume",
    "toxicity_score",
    "max_drawdown_clipped",
    "log_avg_trade_size",
    "time_consistency",
];

pub const FEATURE_COUNT: usize = 10;

/// Output of a predictor evaluation for one profile.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PredictorOutput {
    pub predicted_win_rate: f64,
    pub confidence: f64,
    pub risk_score: f64,
    pub recommended_action: RoutingAction,
    pub recommended_hedge: f64,
}

/// Model weights plus provenance, as exchanged at the `ExportModel`/
/// `ImportModel` boundary. The positional vector is the source of truth;
/// `to_named`/`from_named` in `hrc-predictor` do the name <-> index mapping.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ModelWeightsExport {
    pub version: u32,
    pub trained_at: i64,
    pub weights: [f64; FEATURE_COUNT],
}
