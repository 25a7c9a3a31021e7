//! Orchestrates profile lookup, rule matching, classification, exposure and
//! volatility adjustment, and ML override into a single routing decision,
//! recording every decision to the audit trail.

mod config;
mod core;
mod fatal;

pub use config::PipelineConfig;
pub use core::RoutingCore;
pub use fatal::fatal_invariant;

// Re-exported so a caller only needs this one crate plus `hrc-schemas` for
// the DTOs it passes in and out.
pub use hrc_profile::ClassificationThresholds;
pub use hrc_rules::NewRule;
