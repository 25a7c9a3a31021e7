use crate::decision::RoutingAction;
use crate::ids::AccountId;
use crate::profile::ClientClassification;

/// Filters a `RoutingRule` tests against an intake. `None` on any field
/// means "unbounded" on that side; `0` for `min_toxicity`/`max_toxicity`
/// likewise means unbounded.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RuleFilters {
    pub account_ids: Option<Vec<AccountId>>,
    /// Symbols this rule applies to; `"*"` matches any symbol.
    pub symbols: Option<Vec<String>>,
    pub min_volume: Option<f64>,
    pub max_volume: Option<f64>,
    pub classifications: Option<Vec<ClientClassification>>,
    pub min_toxicity: f64,
    pub max_toxicity: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RoutingRule {
    pub id: u64,
    pub priority: i64,
    pub filters: RuleFilters,
    pub action: RoutingAction,
    pub target_lp: Option<String>,
    pub hedge_percent: f64,
    pub enabled: bool,
    pub description: String,
    /// Insertion sequence, used only to break priority ties deterministically.
    pub sequence: u64,
}
