/// Pipeline-level tunables, injected at construction rather than read from
/// global mutable state, so multiple `RoutingCore` instances in the same
/// process (tests, multi-tenant embedding) never fight over one config.
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineConfig {
    pub large_order_lots: f64,
    pub vol_threshold: f64,
    pub default_target_lp: String,
    pub decision_history_capacity: usize,
}

impl PipelineConfig {
    pub fn sane_defaults() -> Self {
        PipelineConfig {
            large_order_lots: 10.0,
            vol_threshold: 0.02,
            default_target_lp: "LP-PRIMARY".to_string(),
            decision_history_capacity: 10_000,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::sane_defaults()
    }
}
