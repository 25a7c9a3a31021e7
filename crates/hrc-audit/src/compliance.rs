use hrc_schemas::{AlertSeverity, ComplianceFlag, RoutingAction, RoutingDecision, RoutingAction::*};

/// Evaluates the compliance-flag rule set for one logged decision.
/// `strict_compliance` additionally escalates `QuestionableReject`/
/// `ExcessiveBBook` to `Critical` regardless of the table below.
pub fn evaluate_flags(
    decision: &RoutingDecision,
    volume: f64,
    toxicity_score: f64,
    strict_compliance: bool,
) -> Vec<(ComplianceFlag, AlertSeverity)> {
    let mut flags = Vec::new();

    if decision.action == BBook && volume >= 5.0 {
        flags.push((ComplianceFlag::LargeBBookOrder, AlertSeverity::Critical));
    }
    if decision.action == BBook && volume > 10.0 {
        flags.push((ComplianceFlag::ExcessiveBBook, AlertSeverity::Critical));
    }
    if toxicity_score > 60.0 && decision.b_book_percent > 50.0 {
        flags.push((ComplianceFlag::ToxicBBook, AlertSeverity::Warning));
    }
    if decision.action == Reject && toxicity_score < 70.0 {
        let severity = if strict_compliance { AlertSeverity::Critical } else { AlertSeverity::Info };
        flags.push((ComplianceFlag::QuestionableReject, severity));
    }

    if strict_compliance {
        for (flag, severity) in flags.iter_mut() {
            if matches!(flag, ComplianceFlag::ExcessiveBBook | ComplianceFlag::QuestionableReject) {
                *severity = AlertSeverity::Critical;
            }
        }
    }

    flags
}

/// Determines whether a closed trade was routed optimally: a winning
/// trade that was majority-internalized, or a losing trade that was
/// majority-hedged for a retail client, is suboptimal; otherwise optimal.
///
/// "Majority" is read off the routed decision's own percentages rather
/// than its coarse `action` tag: a `PartialHedge` at 80/20 is an A-Book
/// majority decision, and treating every `PartialHedge` as both majorities
/// at once (as `action` alone would) misjudges optimality on every split
/// order.
pub fn was_optimal(
    realized_pnl: f64,
    b_book_percent: f64,
    classification: hrc_schemas::ClientClassification,
) -> bool {
    use hrc_schemas::ClientClassification::Retail;

    let was_bbook_majority = b_book_percent > 50.0;
    let was_abook_majority = b_book_percent < 50.0;

    if realized_pnl > 0.0 && was_bbook_majority {
        return false;
    }
    if realized_pnl < 0.0 && was_abook_majority && classification == Retail {
        return false;
    }
    true
}
