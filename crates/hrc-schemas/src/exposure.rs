/// Per-symbol net/gross position tracking. Created lazily with zero lots.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SymbolExposure {
    pub long_lots: f64,
    pub short_lots: f64,
    pub last_updated: i64,
}

impl Default for SymbolExposure {
    fn default() -> Self {
        SymbolExposure { long_lots: 0.0, short_lots: 0.0, last_updated: 0 }
    }
}

impl SymbolExposure {
    pub fn net(&self) -> f64 {
        self.long_lots - self.short_lots
    }

    pub fn gross(&self) -> f64 {
        self.long_lots + self.short_lots
    }
}

/// Per-symbol exposure limits. `0 < auto_hedge_level < max_net <= max_gross`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ExposureLimit {
    pub max_net: f64,
    pub max_gross: f64,
    pub auto_hedge_level: f64,
}

impl Default for ExposureLimit {
    fn default() -> Self {
        ExposureLimit { max_net: 500.0, max_gross: 1000.0, auto_hedge_level: 300.0 }
    }
}
