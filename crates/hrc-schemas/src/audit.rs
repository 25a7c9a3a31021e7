use crate::decision::RoutingDecision;
use crate::ids::AccountId;
use crate::profile::ClientProfile;
use crate::predictor::PredictorOutput;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ComplianceFlag {
    LargeBBookOrder,
    ExcessiveBBook,
    ToxicBBook,
    QuestionableReject,
    SuboptimalRouting,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Alert {
    pub id: u64,
    pub severity: AlertSeverity,
    pub flag: ComplianceFlag,
    pub aid: AccountId,
    pub message: String,
    pub created_at: i64,
    pub resolved: bool,
}

/// Realized outcome of a previously-routed trade, attached to its
/// `AuditRecord` by `decision_id` rather than an ambiguous "most recent
/// record for this account" lookup.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TradeOutcome {
    pub trade_id: String,
    pub closed_at: i64,
    pub close_price: f64,
    pub realized_pnl: f64,
    pub hold_seconds: f64,
    pub executed_action: crate::decision::RoutingAction,
    pub was_optimal: bool,
}

/// Append-only audit entry: a decision snapshot plus the profile and
/// predictor state it was made from, mutated exactly once when an outcome
/// is attached.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AuditRecord {
    pub id: u64,
    pub aid: AccountId,
    pub user_id: String,
    pub symbol: String,
    pub side: crate::ids::Side,
    pub volume: f64,
    pub decision: RoutingDecision,
    pub profile_snapshot: ClientProfile,
    pub predictor_snapshot: Option<PredictorOutput>,
    pub compliance_flags: Vec<ComplianceFlag>,
    pub outcome: Option<TradeOutcome>,
    pub created_at: i64,
}
