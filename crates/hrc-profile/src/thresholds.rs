/// Tunables for classification and toxicity, injected into `ProfileStore`
/// at construction and hot-updatable via `update_thresholds`. A plain
/// struct with a named constructor rather than a config file — the caller
/// owns loading and wiring, this type just owns the values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClassificationThresholds {
    pub min_trades_for_classification: u64,
    pub toxic_win_rate: f64,
    pub toxic_sharpe: f64,
    pub latency_arb_hold_seconds: f64,
    pub latency_arb_win_rate: f64,
    pub toxic_order_to_fill_ratio: f64,
    pub pro_win_rate: f64,
    pub pro_min_trades: u64,
    pub pro_sharpe: f64,
    pub pro_max_toxicity: f64,
    pub semi_pro_min_win_rate: f64,
}

impl ClassificationThresholds {
    pub fn sane_defaults() -> Self {
        ClassificationThresholds {
            min_trades_for_classification: 50,
            toxic_win_rate: 55.0,
            toxic_sharpe: 2.0,
            latency_arb_hold_seconds: 60.0,
            latency_arb_win_rate: 60.0,
            toxic_order_to_fill_ratio: 0.5,
            pro_win_rate: 52.0,
            pro_min_trades: 100,
            pro_sharpe: 1.0,
            pro_max_toxicity: 50.0,
            semi_pro_min_win_rate: 48.0,
        }
    }

    /// Rejects an update that would make classification undecidable (a
    /// threshold must not be negative, and the professional win-rate floor
    /// must stay above the semi-pro one).
    pub fn validate(&self) -> Result<(), hrc_schemas::RoutingError> {
        let fields_nonneg = [
            self.toxic_sharpe,
            self.latency_arb_hold_seconds,
            self.toxic_order_to_fill_ratio,
            self.pro_sharpe,
            self.pro_max_toxicity,
        ];
        if fields_nonneg.iter().any(|v| *v < 0.0) {
            return Err(hrc_schemas::RoutingError::invalid(
                "ClassificationThresholds",
                "threshold fields must be non-negative",
            ));
        }
        if self.pro_win_rate <= self.semi_pro_min_win_rate {
            return Err(hrc_schemas::RoutingError::invalid(
                "ClassificationThresholds",
                "pro_win_rate must exceed semi_pro_min_win_rate",
            ));
        }
        Ok(())
    }
}

impl Default for ClassificationThresholds {
    fn default() -> Self {
        Self::sane_defaults()
    }
}
