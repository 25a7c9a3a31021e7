//! Online-learned profitability predictor: feature extraction, a linear
//! classifier trained by SGD with periodic deterministic mini-batch
//! retraining, and tiered hedge recommendations.

mod features;
mod model;
mod store;

pub use store::Predictor;
