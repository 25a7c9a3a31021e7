use dashmap::DashMap;
use parking_lot::RwLock;

use hrc_schemas::{ExposureLimit, RoutingError, Side, SymbolExposure};

use crate::engine;

/// Concurrent per-symbol exposure ledger; one lock per symbol, so updates
/// to one symbol never contend with reads or writes on another.
pub struct ExposureLedger {
    exposures: DashMap<String, RwLock<SymbolExposure>>,
    limits: DashMap<String, RwLock<ExposureLimit>>,
}

impl ExposureLedger {
    pub fn new() -> Self {
        ExposureLedger { exposures: DashMap::new(), limits: DashMap::new() }
    }

    pub fn get(&self, symbol: &str) -> SymbolExposure {
        *self
            .exposures
            .entry(symbol.to_string())
            .or_insert_with(|| RwLock::new(SymbolExposure::default()))
            .read()
    }

    pub fn get_limit(&self, symbol: &str) -> ExposureLimit {
        *self
            .limits
            .entry(symbol.to_string())
            .or_insert_with(|| RwLock::new(ExposureLimit::default()))
            .read()
    }

    pub fn set_limit(&self, symbol: &str, limit: ExposureLimit) {
        *self
            .limits
            .entry(symbol.to_string())
            .or_insert_with(|| RwLock::new(ExposureLimit::default()))
            .write() = limit;
    }

    pub fn apply_fill(
        &self,
        symbol: &str,
        side: Side,
        lots: f64,
        now: i64,
    ) -> Result<SymbolExposure, RoutingError> {
        let entry = self
            .exposures
            .entry(symbol.to_string())
            .or_insert_with(|| RwLock::new(SymbolExposure::default()));
        let mut guard = entry.write();
        engine::apply_fill(&mut guard, side, lots, now)?;
        Ok(*guard)
    }

    pub fn all_exposures(&self) -> Vec<(String, SymbolExposure)> {
        self.exposures.iter().map(|e| (e.key().clone(), *e.value().read())).collect()
    }
}

impl Default for ExposureLedger {
    fn default() -> Self {
        Self::new()
    }
}
