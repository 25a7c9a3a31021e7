use std::collections::BTreeMap;

use parking_lot::RwLock;

use hrc_schemas::{ClientProfile, ModelWeightsExport, PredictorOutput, RoutingError};

use crate::features;
use crate::model::{self, Trainer};

/// Online-learned profitability predictor. The weight vector and training
/// buffer are one shared resource (not a keyed aggregate), so a single
/// `RwLock` guards the whole `Trainer`.
pub struct Predictor {
    trainer: RwLock<Trainer>,
}

impl Predictor {
    pub fn new() -> Self {
        Predictor { trainer: RwLock::new(Trainer::new()) }
    }

    /// Evaluates the model for `profile`. Returns `None` only when the
    /// caller should treat ML as unavailable; the pipeline additionally
    /// gates this behind its own `ml_enabled` toggle and a
    /// `confidence > 0` check.
    pub fn predict(&self, profile: &ClientProfile) -> PredictorOutput {
        let features = features::extract(profile);
        let trainer = self.trainer.read();
        model::build_output(&trainer, &features, profile.toxicity_score)
    }

    /// Trains on one closed-trade sample: `label = 1.0` if the profile's
    /// current win rate exceeds 50, else `0.0`.
    pub fn train(&self, profile: &ClientProfile, now: i64) {
        let features = features::extract(profile);
        let label = if profile.win_rate > 50.0 { 1.0 } else { 0.0 };
        let mut trainer = self.trainer.write();
        trainer.train_one(features, label, now);
    }

    pub fn export(&self) -> ModelWeightsExport {
        self.trainer.read().export()
    }

    pub fn import(&self, payload: ModelWeightsExport) {
        self.trainer.write().import(payload);
    }

    pub fn export_named(&self) -> BTreeMap<String, f64> {
        self.trainer.read().to_named()
    }

    pub fn import_named(&self, named: &BTreeMap<String, f64>, version: u32, trained_at: i64) -> Result<(), RoutingError> {
        let weights = model::from_named(named)?;
        self.trainer.write().import(ModelWeightsExport { version, trained_at, weights });
        Ok(())
    }

    pub fn total_samples(&self) -> usize {
        self.trainer.read().total_samples()
    }
}

impl Default for Predictor {
    fn default() -> Self {
        Self::new()
    }
}
