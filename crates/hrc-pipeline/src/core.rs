use std::collections::{BTreeMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use uuid::Uuid;

use hrc_audit::AuditRecorder;
use hrc_exposure::ExposureLedger;
use hrc_predictor::Predictor;
use hrc_profile::{ClassificationThresholds, ProfileStore};
use hrc_rules::{NewRule, RulesEvaluator};

use hrc_schemas::{
    AccountId, Alert, AlertSeverity, AuditRecord, ClientClassification, ClientProfile,
    ExposureLimit, ModelWeightsExport, RoutingAction, RoutingDecision, RoutingError, RoutingRule,
    Side, SymbolExposure, TradeOutcome, TradeRecord,
};

use crate::config::PipelineConfig;
use crate::fatal::fatal_invariant;

/// Facade orchestrating every component behind the 10-step `route()`
/// algorithm and the rest of the external interface.
///
/// Acquires at most one aggregate lock at a time: `route` reads the
/// profile, then reads exposure, then reads rules, then reads the
/// predictor, then writes the audit log, releasing each before acquiring
/// the next.
pub struct RoutingCore {
    profiles: ProfileStore,
    exposures: ExposureLedger,
    rules: RulesEvaluator,
    predictor: Predictor,
    audit: AuditRecorder,
    config: PipelineConfig,
    decision_history: Mutex<VecDeque<RoutingDecision>>,
    ml_enabled: AtomicBool,
    auto_learning_enabled: AtomicBool,
    strict_compliance_enabled: AtomicBool,
}

impl RoutingCore {
    pub fn new(config: PipelineConfig, thresholds: ClassificationThresholds) -> Self {
        RoutingCore {
            profiles: ProfileStore::new(thresholds),
            exposures: ExposureLedger::new(),
            rules: RulesEvaluator::new(),
            predictor: Predictor::new(),
            audit: AuditRecorder::new(),
            config,
            decision_history: Mutex::new(VecDeque::new()),
            ml_enabled: AtomicBool::new(true),
            auto_learning_enabled: AtomicBool::new(true),
            strict_compliance_enabled: AtomicBool::new(false),
        }
    }

    pub fn set_alert_sink(&self, sink: Box<dyn Fn(&Alert) + Send + Sync>) {
        self.audit.set_alert_sink(sink);
    }

    // ---- DecisionPipeline --------------------------------------------------

    #[allow(clippy::too_many_arguments)]
    pub fn route(
        &self,
        aid: AccountId,
        user_id: &str,
        username: &str,
        symbol: &str,
        side: Side,
        volume: f64,
        volatility: f64,
        now: i64,
    ) -> Result<RoutingDecision, RoutingError> {
        if volume <= 0.0 {
            return Err(RoutingError::invalid("Route", "volume must be positive"));
        }
        if volatility < 0.0 {
            return Err(RoutingError::invalid("Route", "volatility must be non-negative"));
        }

        // Step 1: profile lookup, new-client shortcut.
        let profile = self.profiles.get_or_create(aid, user_id, username);
        if profile.total_trades == 0 {
            let decision = RoutingDecision {
                decision_id: Uuid::new_v4(),
                action: RoutingAction::PartialHedge,
                target_lp: Some(self.config.default_target_lp.clone()),
                a_book_percent: 50.0,
                b_book_percent: 50.0,
                reason: "New client - conservative default".to_string(),
                toxicity_score: profile.toxicity_score,
                exposure_risk: 0.0,
                decision_time: now,
            };
            return Ok(self.finalize(aid, user_id, symbol, side, volume, decision, profile, None, now));
        }

        // Step 2: predictor output, gated by the ML toggle and a usable confidence.
        let predictor_output = if self.ml_enabled.load(Ordering::Relaxed) {
            let out = self.predictor.predict(&profile);
            if out.confidence > 0.0 {
                Some(out)
            } else {
                None
            }
        } else {
            None
        };

        // Step 3: rule match shortcut.
        if let Some(mut decision) = self.rules.match_rule(aid, symbol, volume, Some(&profile)) {
            decision.decision_id = Uuid::new_v4();
            decision.decision_time = now;
            let decision = decision.normalize(&self.config.default_target_lp);
            return Ok(self.finalize(aid, user_id, symbol, side, volume, decision, profile, predictor_output, now));
        }

        // Step 4: classification-based base decision. A TOXIC client over
        // the reject threshold is a terminal REJECT: percentages alone
        // cannot represent REJECT (0% a-book also means plain B_BOOK), so
        // this short-circuits immediately rather than flowing through the
        // volume/exposure/volatility/ML adjustments below.
        if profile.classification == ClientClassification::Toxic && profile.toxicity_score > 80.0 {
            let decision = RoutingDecision {
                decision_id: Uuid::new_v4(),
                action: RoutingAction::Reject,
                target_lp: None,
                a_book_percent: 0.0,
                b_book_percent: 0.0,
                reason: format!("Toxic client rejected (toxicity score {:.1})", profile.toxicity_score),
                toxicity_score: profile.toxicity_score,
                exposure_risk: 0.0,
                decision_time: now,
            };
            return Ok(self.finalize(aid, user_id, symbol, side, volume, decision, profile, predictor_output, now));
        }

        let mut a_book_percent = match profile.classification {
            ClientClassification::Toxic => 100.0,
            ClientClassification::Professional => 80.0,
            ClientClassification::SemiPro => 50.0,
            ClientClassification::Retail => 10.0,
            ClientClassification::Unknown => 40.0,
        };
        let mut reason = match profile.classification {
            ClientClassification::Toxic => "Toxic client routed to A-Book".to_string(),
            ClientClassification::Professional => "Professional client".to_string(),
            ClientClassification::SemiPro => "Semi-professional client".to_string(),
            ClientClassification::Retail => "Retail client default hedge".to_string(),
            ClientClassification::Unknown => "Unknown classification conservative default".to_string(),
        };
        let mut exposure_risk = 0.0_f64;

        // Step 5: volume override, short-circuits straight to normalization.
        let mut short_circuited = false;
        if volume >= self.config.large_order_lots {
            a_book_percent = 100.0;
            reason.push_str(" | Large volume override");
            short_circuited = true;
        }

        // Step 6: exposure adjustment.
        if !short_circuited {
            let exposure = self.exposures.get(symbol);
            let limit = self.exposures.get_limit(symbol);
            let signed_volume = match side {
                Side::Buy => volume,
                Side::Sell => -volume,
            };
            let projected_net = exposure.net() + signed_volume;
            exposure_risk = (projected_net.abs() / limit.max_net * 100.0).max(0.0);

            if projected_net.abs() > limit.auto_hedge_level {
                a_book_percent = 100.0;
                reason.push_str(" | Exposure auto-hedge triggered");
                short_circuited = true;
            } else if projected_net.abs() > 0.7 * limit.auto_hedge_level {
                let bump = (30.0 * projected_net.abs() / limit.auto_hedge_level).min(100.0 - a_book_percent);
                a_book_percent += bump;
                reason.push_str(" | Exposure proximity adjustment");
            }
        }

        // Step 7: volatility adjustment.
        if !short_circuited && volatility > self.config.vol_threshold {
            a_book_percent = (a_book_percent + 30.0).min(100.0);
            reason.push_str(" | Volatility adjustment");
        }

        // Step 8: ML override.
        if !short_circuited {
            if let Some(out) = &predictor_output {
                let b_book_percent_now = 100.0 - a_book_percent;
                if self.ml_enabled.load(Ordering::Relaxed)
                    && out.confidence > 0.7
                    && out.risk_score > 60.0
                    && b_book_percent_now > 50.0
                {
                    if out.recommended_action == RoutingAction::Reject {
                        let decision = RoutingDecision {
                            decision_id: Uuid::new_v4(),
                            action: RoutingAction::Reject,
                            target_lp: None,
                            a_book_percent: 0.0,
                            b_book_percent: 0.0,
                            reason: format!("{reason} | [ML override: risk={:.1}] rejected", out.risk_score),
                            toxicity_score: profile.toxicity_score,
                            exposure_risk,
                            decision_time: now,
                        };
                        return Ok(self.finalize(aid, user_id, symbol, side, volume, decision, profile, predictor_output, now));
                    }
                    a_book_percent = out.recommended_hedge;
                    reason.push_str(&format!(" | [ML override: risk={:.1}]", out.risk_score));
                }
            }
        }

        // Step 9: normalize action/percentages/target LP from a_book_percent.
        let decision = RoutingDecision {
            decision_id: Uuid::new_v4(),
            action: RoutingAction::PartialHedge,
            target_lp: None,
            a_book_percent,
            b_book_percent: 100.0 - a_book_percent,
            reason,
            toxicity_score: profile.toxicity_score,
            exposure_risk,
            decision_time: now,
        }
        .normalize(&self.config.default_target_lp);

        Ok(self.finalize(aid, user_id, symbol, side, volume, decision, profile, predictor_output, now))
    }

    #[allow(clippy::too_many_arguments)]
    fn finalize(
        &self,
        aid: AccountId,
        user_id: &str,
        symbol: &str,
        side: Side,
        volume: f64,
        decision: RoutingDecision,
        profile: ClientProfile,
        predictor_output: Option<hrc_schemas::PredictorOutput>,
        now: i64,
    ) -> RoutingDecision {
        if decision.action != RoutingAction::Reject {
            let sum = decision.a_book_percent + decision.b_book_percent;
            if (sum - 100.0).abs() > 1e-6 {
                fatal_invariant("routing decision percentages do not sum to 100");
            }
        }

        {
            let mut history = self.decision_history.lock();
            history.push_back(decision.clone());
            while history.len() > self.config.decision_history_capacity {
                history.pop_front();
            }
        }

        self.audit.log_decision(
            aid,
            user_id,
            symbol,
            side,
            volume,
            decision.clone(),
            profile,
            predictor_output,
            now,
        );

        decision
    }

    // ---- Trade lifecycle ---------------------------------------------------

    pub fn record_trade(&self, aid: AccountId, trade: TradeRecord, now: i64) -> ClientProfile {
        let profile = self.profiles.record_trade(aid, trade);
        if self.auto_learning_enabled.load(Ordering::Relaxed) {
            self.predictor.train(&profile, now);
        }
        profile
    }

    pub fn record_cancellation(&self, aid: AccountId) -> ClientProfile {
        self.profiles.record_cancellation(aid)
    }

    /// Attaches a realized outcome keyed by the `decision_id` `route`
    /// returned, rather than an ambiguous "most recent record for this
    /// account" lookup.
    pub fn record_outcome(&self, decision_id: Uuid, outcome: TradeOutcome, now: i64) -> Result<(), RoutingError> {
        self.audit.attach_outcome(decision_id, outcome, now)
    }

    /// Applies the B-Book portion of an executed order to the symbol's
    /// exposure ledger.
    pub fn apply_fill(&self, symbol: &str, side: Side, lots: f64, now: i64) -> Result<SymbolExposure, RoutingError> {
        self.exposures.apply_fill(symbol, side, lots, now)
    }

    // ---- Rule CRUD ----------------------------------------------------------

    pub fn add_rule(&self, rule: NewRule) -> Result<RoutingRule, RoutingError> {
        self.rules.add_rule(rule)
    }

    pub fn update_rule(&self, id: u64, f: impl FnOnce(&mut RoutingRule)) -> Result<RoutingRule, RoutingError> {
        self.rules.update_rule(id, f)
    }

    pub fn delete_rule(&self, id: u64) -> Result<(), RoutingError> {
        self.rules.delete_rule(id)
    }

    pub fn list_rules(&self) -> Vec<RoutingRule> {
        self.rules.list_rules()
    }

    // ---- Exposure limits ------------------------------------------------------

    pub fn set_exposure_limit(&self, symbol: &str, limit: ExposureLimit) {
        self.exposures.set_limit(symbol, limit);
    }

    pub fn get_exposure(&self, symbol: &str) -> SymbolExposure {
        self.exposures.get(symbol)
    }

    pub fn get_exposure_limit(&self, symbol: &str) -> ExposureLimit {
        self.exposures.get_limit(symbol)
    }

    pub fn get_all_exposures(&self) -> Vec<(String, SymbolExposure)> {
        self.exposures.all_exposures()
    }

    // ---- Classification thresholds ---------------------------------------------

    pub fn update_classification_thresholds(&self, thresholds: ClassificationThresholds) -> Result<(), RoutingError> {
        self.profiles.update_thresholds(thresholds)
    }

    // ---- Feature toggles ---------------------------------------------------

    pub fn enable_ml(&self, on: bool) {
        self.ml_enabled.store(on, Ordering::Relaxed);
    }

    pub fn enable_auto_learning(&self, on: bool) {
        self.auto_learning_enabled.store(on, Ordering::Relaxed);
    }

    pub fn enable_strict_compliance(&self, on: bool) {
        self.strict_compliance_enabled.store(on, Ordering::Relaxed);
        self.audit.set_strict_compliance(on);
    }

    // ---- Model export/import -------------------------------------------------

    pub fn export_model(&self) -> ModelWeightsExport {
        self.predictor.export()
    }

    pub fn import_model(&self, payload: ModelWeightsExport) {
        self.predictor.import(payload);
    }

    pub fn export_model_named(&self) -> BTreeMap<String, f64> {
        self.predictor.export_named()
    }

    pub fn import_model_named(&self, named: &BTreeMap<String, f64>, version: u32, trained_at: i64) -> Result<(), RoutingError> {
        self.predictor.import_named(named, version, trained_at)
    }

    // ---- Queries -------------------------------------------------------------

    pub fn get_profile(&self, aid: AccountId) -> Option<ClientProfile> {
        self.profiles.get(aid)
    }

    pub fn get_all_profiles(&self) -> Vec<ClientProfile> {
        self.profiles.get_all()
    }

    pub fn get_profiles_by_classification(&self, classification: ClientClassification) -> Vec<ClientProfile> {
        self.profiles.get_by_classification(classification)
    }

    pub fn get_audit_records(
        &self,
        aid: Option<AccountId>,
        time_range: Option<(i64, i64)>,
        limit: usize,
    ) -> Vec<AuditRecord> {
        self.audit.get_records(aid, time_range, limit)
    }

    pub fn get_alerts(&self, severity: Option<AlertSeverity>, resolved: Option<bool>, limit: usize) -> Vec<Alert> {
        self.audit.get_alerts(severity, resolved, limit)
    }

    pub fn resolve_alert(&self, id: u64) -> Result<(), RoutingError> {
        self.audit.resolve_alert(id)
    }

    pub fn get_decision_history(&self, limit: usize) -> Vec<RoutingDecision> {
        let history = self.decision_history.lock();
        history.iter().rev().take(limit).cloned().collect()
    }
}
