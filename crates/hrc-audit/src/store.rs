use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{Mutex, RwLock};
use uuid::Uuid;

use hrc_schemas::{
    AccountId, Alert, AlertSeverity, AuditRecord, ClientProfile, ComplianceFlag, PredictorOutput,
    RoutingDecision, RoutingError, Side, TradeOutcome,
};

use crate::compliance;

const RECORD_CAPACITY: usize = 100_000;
const ALERT_CAPACITY: usize = 100_000;

type AlertSink = dyn Fn(&Alert) + Send + Sync;

/// Append-only decision log plus compliance flagging and alerting.
/// Ring buffers are owned exclusively by this component.
pub struct AuditRecorder {
    records: Mutex<VecDeque<AuditRecord>>,
    alerts: Mutex<VecDeque<Alert>>,
    next_record_id: AtomicU64,
    next_alert_id: AtomicU64,
    alert_sink: RwLock<Option<Box<AlertSink>>>,
    strict_compliance: std::sync::atomic::AtomicBool,
}

impl AuditRecorder {
    pub fn new() -> Self {
        AuditRecorder {
            records: Mutex::new(VecDeque::new()),
            alerts: Mutex::new(VecDeque::new()),
            next_record_id: AtomicU64::new(1),
            next_alert_id: AtomicU64::new(1),
            alert_sink: RwLock::new(None),
            strict_compliance: std::sync::atomic::AtomicBool::new(false),
        }
    }

    pub fn set_alert_sink(&self, sink: Box<AlertSink>) {
        *self.alert_sink.write() = Some(sink);
    }

    pub fn set_strict_compliance(&self, on: bool) {
        self.strict_compliance.store(on, Ordering::Relaxed);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn log_decision(
        &self,
        aid: AccountId,
        user_id: &str,
        symbol: &str,
        side: Side,
        volume: f64,
        decision: RoutingDecision,
        profile_snapshot: ClientProfile,
        predictor_snapshot: Option<PredictorOutput>,
        now: i64,
    ) -> AuditRecord {
        let strict = self.strict_compliance.load(Ordering::Relaxed);
        let flag_pairs = compliance::evaluate_flags(&decision, volume, profile_snapshot.toxicity_score, strict);
        let compliance_flags: Vec<ComplianceFlag> = flag_pairs.iter().map(|(f, _)| *f).collect();

        let id = self.next_record_id.fetch_add(1, Ordering::Relaxed);
        let record = AuditRecord {
            id,
            aid,
            user_id: user_id.to_string(),
            symbol: symbol.to_string(),
            side,
            volume,
            decision,
            profile_snapshot,
            predictor_snapshot,
            compliance_flags,
            outcome: None,
            created_at: now,
        };

        {
            let mut records = self.records.lock();
            records.push_back(record.clone());
            while records.len() > RECORD_CAPACITY {
                records.pop_front();
            }
        }

        for (flag, severity) in flag_pairs {
            self.emit_alert(aid, flag, severity, now);
        }

        record
    }

    fn emit_alert(&self, aid: AccountId, flag: ComplianceFlag, severity: AlertSeverity, now: i64) {
        let id = self.next_alert_id.fetch_add(1, Ordering::Relaxed);
        let alert = Alert {
            id,
            severity,
            flag,
            aid,
            message: format!("{flag:?} for account {aid}"),
            created_at: now,
            resolved: false,
        };

        {
            let mut alerts = self.alerts.lock();
            alerts.push_back(alert.clone());
            while alerts.len() > ALERT_CAPACITY {
                alerts.pop_front();
            }
        }

        if matches!(severity, AlertSeverity::Critical | AlertSeverity::Warning) {
            if let Some(sink) = self.alert_sink.read().as_ref() {
                sink(&alert);
            } else {
                tracing::warn!(aid = %aid, ?severity, ?flag, "compliance alert");
            }
        }
    }

    /// Attaches a realized outcome to the record identified by
    /// `decision_id`, keying on the id `route()` returned rather than a
    /// "most recent record for this account" heuristic, which is ambiguous
    /// under concurrent closes. Fails with `NotFound` when no such record
    /// exists or it already carries an outcome.
    pub fn attach_outcome(&self, decision_id: Uuid, outcome: TradeOutcome, now: i64) -> Result<(), RoutingError> {
        let mut records = self.records.lock();
        let record = records
            .iter_mut()
            .rev()
            .find(|r| r.decision.decision_id == decision_id && r.outcome.is_none())
            .ok_or_else(|| RoutingError::not_found("AuditRecord", decision_id))?;

        let optimal = compliance::was_optimal(
            outcome.realized_pnl,
            record.decision.b_book_percent,
            record.profile_snapshot.classification,
        );
        let aid = record.aid;
        let mut outcome = outcome;
        outcome.was_optimal = optimal;
        record.outcome = Some(outcome);
        drop(records);

        if !optimal {
            self.emit_alert(aid, ComplianceFlag::SuboptimalRouting, AlertSeverity::Warning, now);
        }
        Ok(())
    }

    /// `time_range`, when given, is an inclusive `(from, to)` window tested
    /// against `created_at`.
    pub fn get_records(
        &self,
        aid: Option<AccountId>,
        time_range: Option<(i64, i64)>,
        limit: usize,
    ) -> Vec<AuditRecord> {
        let records = self.records.lock();
        records
            .iter()
            .rev()
            .filter(|r| aid.map(|a| a == r.aid).unwrap_or(true))
            .filter(|r| time_range.map(|(from, to)| r.created_at >= from && r.created_at <= to).unwrap_or(true))
            .take(limit)
            .cloned()
            .collect()
    }

    pub fn get_alerts(&self, severity: Option<AlertSeverity>, resolved: Option<bool>, limit: usize) -> Vec<Alert> {
        let alerts = self.alerts.lock();
        alerts
            .iter()
            .rev()
            .filter(|a| severity.map(|s| s == a.severity).unwrap_or(true))
            .filter(|a| resolved.map(|r| r == a.resolved).unwrap_or(true))
            .take(limit)
            .cloned()
            .collect()
    }

    pub fn resolve_alert(&self, id: u64) -> Result<(), RoutingError> {
        let mut alerts = self.alerts.lock();
        let alert = alerts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| RoutingError::not_found("Alert", id))?;
        alert.resolved = true;
        Ok(())
    }
}

impl Default for AuditRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hrc_schemas::{ClientProfile, RoutingAction};

    fn decision(now: i64) -> RoutingDecision {
        RoutingDecision {
            decision_id: Uuid::new_v4(),
            action: RoutingAction::BBook,
            target_lp: None,
            a_book_percent: 0.0,
            b_book_percent: 100.0,
            reason: String::new(),
            toxicity_score: 0.0,
            exposure_risk: 0.0,
            decision_time: now,
        }
    }

    #[test]
    fn get_records_filters_by_time_range() {
        let recorder = AuditRecorder::new();
        let aid = AccountId(1);
        let profile = ClientProfile::new(aid, "u", "n");
        for now in [100, 200, 300] {
            recorder.log_decision(aid, "u", "EURUSD", Side::Buy, 1.0, decision(now), profile.clone(), None, now);
        }

        let windowed = recorder.get_records(Some(aid), Some((150, 250)), 10);
        assert_eq!(windowed.len(), 1);
        assert_eq!(windowed[0].created_at, 200);

        let all = recorder.get_records(Some(aid), None, 10);
        assert_eq!(all.len(), 3);
    }
}
