//! Priority-ordered rule matching producing forced routing decisions.

mod engine;
mod store;

pub use store::{NewRule, RulesEvaluator};
