use dashmap::DashMap;
use parking_lot::RwLock;

use hrc_schemas::{AccountId, ClientClassification, ClientProfile, RoutingError, TradeRecord};

use crate::engine::{self, ProfileRecord};
use crate::thresholds::ClassificationThresholds;

/// Concurrent per-account behavioral store.
///
/// Each account is an independent aggregate behind its own `RwLock`
/// (grounded on the `DashMap<Symbol, RwLock<_>>` shape used for per-symbol
/// aggregates in the pack's risk gate) so that updates to one account never
/// contend with reads or writes on another.
pub struct ProfileStore {
    accounts: DashMap<AccountId, RwLock<ProfileRecord>>,
    thresholds: RwLock<ClassificationThresholds>,
}

impl ProfileStore {
    pub fn new(thresholds: ClassificationThresholds) -> Self {
        ProfileStore { accounts: DashMap::new(), thresholds: RwLock::new(thresholds) }
    }

    /// Idempotent: returns the existing profile if already created,
    /// otherwise creates one with zeroed counters.
    pub fn get_or_create(&self, aid: AccountId, user_id: &str, username: &str) -> ClientProfile {
        let entry = self
            .accounts
            .entry(aid)
            .or_insert_with(|| RwLock::new(ProfileRecord::new(ClientProfile::new(aid, user_id, username))));
        entry.read().profile.clone()
    }

    pub fn get(&self, aid: AccountId) -> Option<ClientProfile> {
        self.accounts.get(&aid).map(|e| e.read().profile.clone())
    }

    pub fn record_trade(&self, aid: AccountId, trade: TradeRecord) -> ClientProfile {
        let cfg = *self.thresholds.read();
        let entry = self
            .accounts
            .entry(aid)
            .or_insert_with(|| RwLock::new(ProfileRecord::new(ClientProfile::new(aid, "", ""))));
        let mut guard = entry.write();
        engine::record_trade(&mut guard, trade, &cfg);
        guard.profile.clone()
    }

    pub fn record_cancellation(&self, aid: AccountId) -> ClientProfile {
        let cfg = *self.thresholds.read();
        let entry = self
            .accounts
            .entry(aid)
            .or_insert_with(|| RwLock::new(ProfileRecord::new(ClientProfile::new(aid, "", ""))));
        let mut guard = entry.write();
        engine::record_cancellation(&mut guard, &cfg);
        guard.profile.clone()
    }

    pub fn update_thresholds(&self, new_cfg: ClassificationThresholds) -> Result<(), RoutingError> {
        new_cfg.validate()?;
        *self.thresholds.write() = new_cfg;
        Ok(())
    }

    pub fn thresholds(&self) -> ClassificationThresholds {
        *self.thresholds.read()
    }

    pub fn get_by_classification(&self, classification: ClientClassification) -> Vec<ClientProfile> {
        self.accounts
            .iter()
            .map(|e| e.read().profile.clone())
            .filter(|p| p.classification == classification)
            .collect()
    }

    pub fn get_all(&self) -> Vec<ClientProfile> {
        self.accounts.iter().map(|e| e.read().profile.clone()).collect()
    }
}

impl Default for ProfileStore {
    fn default() -> Self {
        Self::new(ClassificationThresholds::sane_defaults())
    }
}
