use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RoutingAction {
    ABook,
    BBook,
    PartialHedge,
    Reject,
}

/// The pipeline's output for one intake. Never mutated after creation.
///
/// Invariant: when `action != Reject`, `a_book_percent + b_book_percent ==
/// 100` and both are in `[0, 100]`; when `action == Reject` both are `0`;
/// the action is consistent with the percentages (100/0 -> ABook, 0/100 ->
/// BBook, otherwise PartialHedge).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RoutingDecision {
    pub decision_id: Uuid,
    pub action: RoutingAction,
    pub target_lp: Option<String>,
    pub a_book_percent: f64,
    pub b_book_percent: f64,
    pub reason: String,
    pub toxicity_score: f64,
    pub exposure_risk: f64,
    pub decision_time: i64,
}

impl RoutingDecision {
    /// Derives `action` from percentages and fixes up LP targeting, so the
    /// action tag and the split it describes can never drift apart. Call
    /// once at the end of the pipeline, never mid-flight.
    pub fn normalize(mut self, default_target_lp: &str) -> Self {
        if self.action == RoutingAction::Reject {
            self.a_book_percent = 0.0;
            self.b_book_percent = 0.0;
            self.target_lp = None;
            return self;
        }
        self.a_book_percent = self.a_book_percent.clamp(0.0, 100.0);
        self.b_book_percent = 100.0 - self.a_book_percent;
        self.action = if self.a_book_percent >= 100.0 {
            RoutingAction::ABook
        } else if self.a_book_percent <= 0.0 {
            RoutingAction::BBook
        } else {
            RoutingAction::PartialHedge
        };
        if self.a_book_percent > 0.0 && self.target_lp.is_none() {
            self.target_lp = Some(default_target_lp.to_string());
        }
        self
    }
}
