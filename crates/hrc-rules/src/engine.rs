use hrc_schemas::{AccountId, ClientProfile, RoutingAction, RoutingDecision, RoutingRule};
use uuid::Uuid;

/// Tests `rule`'s filters against an intake. Toxicity filters only apply
/// when a profile is present; `0` on either side of the toxicity range
/// means unbounded on that side.
fn rule_matches(rule: &RoutingRule, aid: AccountId, symbol: &str, volume: f64, profile: Option<&ClientProfile>) -> bool {
    if !rule.enabled {
        return false;
    }
    let f = &rule.filters;

    if let Some(ids) = &f.account_ids {
        if !ids.contains(&aid) {
            return false;
        }
    }
    if let Some(symbols) = &f.symbols {
        let matches_symbol = symbols.iter().any(|s| s == "*" || s == symbol);
        if !matches_symbol {
            return false;
        }
    }
    if let Some(min_vol) = f.min_volume {
        if volume < min_vol {
            return false;
        }
    }
    if let Some(max_vol) = f.max_volume {
        if volume > max_vol {
            return false;
        }
    }
    if let Some(classifications) = &f.classifications {
        match profile {
            Some(p) if classifications.contains(&p.classification) => {}
            _ => return false,
        }
    }
    if let Some(p) = profile {
        if f.min_toxicity > 0.0 && p.toxicity_score < f.min_toxicity {
            return false;
        }
        if f.max_toxicity > 0.0 && p.toxicity_score > f.max_toxicity {
            return false;
        }
    }
    true
}

/// Snapshots `rules` (assumed already sorted priority desc, insertion order
/// asc as the tiebreak) and returns the first match.
pub fn match_rule(
    rules: &[RoutingRule],
    aid: AccountId,
    symbol: &str,
    volume: f64,
    profile: Option<&ClientProfile>,
) -> Option<RoutingDecision> {
    let rule = rules.iter().find(|r| rule_matches(r, aid, symbol, volume, profile))?;

    let (a_pct, b_pct) = match rule.action {
        RoutingAction::ABook => (100.0, 0.0),
        RoutingAction::BBook => (0.0, 100.0),
        RoutingAction::PartialHedge => (rule.hedge_percent, 100.0 - rule.hedge_percent),
        RoutingAction::Reject => (0.0, 0.0),
    };

    Some(RoutingDecision {
        decision_id: Uuid::nil(),
        action: rule.action,
        target_lp: rule.target_lp.clone(),
        a_book_percent: a_pct,
        b_book_percent: b_pct,
        reason: format!("Matched rule: {} ({})", rule.id, rule.description),
        toxicity_score: profile.map(|p| p.toxicity_score).unwrap_or(0.0),
        exposure_risk: 0.0,
        decision_time: 0,
    })
}

/// Sorts rules by priority descending, tiebreak by insertion sequence
/// ascending. Called after every mutating CRUD operation, not on every
/// `match_rule` call — re-sorting a handful of rules on every mutation is
/// cheap and keeps the hot evaluation path a plain linear scan.
pub fn sort_rules(rules: &mut [RoutingRule]) {
    rules.sort_by(|a, b| b.priority.cmp(&a.priority).then(a.sequence.cmp(&b.sequence)));
}
