use parking_lot::RwLock;

use hrc_schemas::{AccountId, ClientProfile, RoutingDecision, RoutingError, RoutingRule};

use crate::engine;

/// A new rule's fields, before an id and insertion sequence are assigned.
#[derive(Clone, Debug)]
pub struct NewRule {
    pub priority: i64,
    pub filters: hrc_schemas::RuleFilters,
    pub action: hrc_schemas::RoutingAction,
    pub target_lp: Option<String>,
    pub hedge_percent: f64,
    pub enabled: bool,
    pub description: String,
}

/// Priority-ordered rule store, thread-safe against concurrent reads and
/// evaluation. A single `RwLock` guards the whole rule set — it is one
/// shared resource, not a keyed aggregate (unlike profiles/exposures).
pub struct RulesEvaluator {
    rules: RwLock<Vec<RoutingRule>>,
    next_id: RwLock<u64>,
    next_sequence: RwLock<u64>,
}

impl RulesEvaluator {
    pub fn new() -> Self {
        RulesEvaluator {
            rules: RwLock::new(Vec::new()),
            next_id: RwLock::new(1),
            next_sequence: RwLock::new(0),
        }
    }

    pub fn add_rule(&self, new_rule: NewRule) -> Result<RoutingRule, RoutingError> {
        if !(0.0..=100.0).contains(&new_rule.hedge_percent) {
            return Err(RoutingError::invalid("RoutingRule", "hedgePercent must be in [0,100]"));
        }
        let mut id_guard = self.next_id.write();
        let mut seq_guard = self.next_sequence.write();
        let rule = RoutingRule {
            id: *id_guard,
            priority: new_rule.priority,
            filters: new_rule.filters,
            action: new_rule.action,
            target_lp: new_rule.target_lp,
            hedge_percent: new_rule.hedge_percent,
            enabled: new_rule.enabled,
            description: new_rule.description,
            sequence: *seq_guard,
        };
        *id_guard += 1;
        *seq_guard += 1;
        drop(id_guard);
        drop(seq_guard);

        let mut rules = self.rules.write();
        rules.push(rule.clone());
        engine::sort_rules(&mut rules);
        Ok(rule)
    }

    pub fn update_rule(&self, id: u64, f: impl FnOnce(&mut RoutingRule)) -> Result<RoutingRule, RoutingError> {
        let mut rules = self.rules.write();
        let rule = rules
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| RoutingError::not_found("RoutingRule", id))?;
        f(rule);
        if !(0.0..=100.0).contains(&rule.hedge_percent) {
            return Err(RoutingError::invalid("RoutingRule", "hedgePercent must be in [0,100]"));
        }
        let updated = rule.clone();
        engine::sort_rules(&mut rules);
        Ok(updated)
    }

    pub fn delete_rule(&self, id: u64) -> Result<(), RoutingError> {
        let mut rules = self.rules.write();
        let before = rules.len();
        rules.retain(|r| r.id != id);
        if rules.len() == before {
            return Err(RoutingError::not_found("RoutingRule", id));
        }
        Ok(())
    }

    pub fn list_rules(&self) -> Vec<RoutingRule> {
        self.rules.read().clone()
    }

    pub fn match_rule(
        &self,
        aid: AccountId,
        symbol: &str,
        volume: f64,
        profile: Option<&ClientProfile>,
    ) -> Option<RoutingDecision> {
        let rules = self.rules.read();
        engine::match_rule(&rules, aid, symbol, volume, profile)
    }
}

impl Default for RulesEvaluator {
    fn default() -> Self {
        Self::new()
    }
}
