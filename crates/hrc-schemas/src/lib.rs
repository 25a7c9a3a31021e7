//! Shared data-transfer types for the hybrid order-routing decision core.
//!
//! Every `hrc-*` component crate depends on this crate for the records it
//! exchanges across component boundaries; it never depends on any of them.

mod audit;
mod decision;
mod error;
mod exposure;
mod ids;
mod predictor;
mod profile;
mod rule;

pub use audit::{Alert, AlertSeverity, AuditRecord, ComplianceFlag, TradeOutcome};
pub use decision::{RoutingAction, RoutingDecision};
pub use error::RoutingError;
pub use exposure::{ExposureLimit, SymbolExposure};
pub use ids::{AccountId, Side};
pub use predictor::{ModelWeightsExport, PredictorOutput, FEATURE_COUNT, FEATURE_NAMES};
pub use profile::{ClientClassification, ClientProfile, TradeRecord};
pub use rule::{RoutingRule, RuleFilters};
