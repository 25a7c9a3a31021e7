use std::collections::{BTreeMap, VecDeque};

use hrc_schemas::{ModelWeightsExport, PredictorOutput, RoutingAction, RoutingError, FEATURE_COUNT, FEATURE_NAMES};

const LEARNING_RATE: f64 = 0.01;
const L2_LAMBDA: f64 = 0.001;
const RETRAIN_EVERY: usize = 100;
const RETRAIN_EPOCHS: usize = 10;
const BATCH_SIZE: usize = 32;
const BUFFER_CAPACITY: usize = 10_000;
const MIN_SAMPLES_FOR_CONFIDENCE: usize = 50;

/// Seeded, informed prior: positive weight on features that correlate with
/// a client being profitable against the broker (win rate, sharpe, quick
/// round-trips via the order-to-fill ratio, high toxicity already baked in
/// as a feature), negative weight on drawdown. There is no seed table to
/// carry over from upstream material, so these are a deliberate starting
/// point rather than a derived constant.
fn seed_weights() -> [f64; FEATURE_COUNT] {
    [
        1.2,  // win_rate
        0.8,  // sharpe_normalized
        -0.3, // log_avg_hold_seconds (shorter holds skew toxic)
        0.6,  // order_to_fill_ratio
        0.2,  // max_instrument_share
        0.1,  // log_total_volume
        0.9,  // toxicity_score
        -0.4, // max_drawdown_clipped
        0.1,  // log_avg_trade_size
        0.2,  // time_consistency
    ]
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Small, fully deterministic PRNG used only to permute the mini-batch
/// training buffer. No external `rand` dependency and no OS entropy —
/// retraining on the same history always visits examples in the same
/// order, so two replicas fed identical inputs converge to identical
/// weights.
struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    fn new(seed: u64) -> Self {
        XorShift64 { state: seed.max(1) }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    fn gen_range(&mut self, bound: usize) -> usize {
        (self.next_u64() % bound as u64) as usize
    }
}

/// Fisher-Yates shuffle with a fixed seed derived from the call count, so
/// the same sequence of training calls always produces the same mini-batch
/// order. Resolves Redesign Flag (b): "the source's mini-batch shuffle is a
/// no-op — use a proper permutation."
fn deterministic_permutation(len: usize, seed: u64) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..len).collect();
    let mut rng = XorShift64::new(seed);
    for i in (1..len).rev() {
        let j = rng.gen_range(i + 1);
        indices.swap(i, j);
    }
    indices
}

pub struct Trainer {
    pub weights: [f64; FEATURE_COUNT],
    pub version: u32,
    pub trained_at: i64,
    buffer: VecDeque<([f64; FEATURE_COUNT], f64)>,
    samples_seen_since_retrain: usize,
    total_samples: usize,
}

impl Trainer {
    pub fn new() -> Self {
        Trainer {
            weights: seed_weights(),
            version: 0,
            trained_at: 0,
            buffer: VecDeque::new(),
            samples_seen_since_retrain: 0,
            total_samples: 0,
        }
    }

    pub fn total_samples(&self) -> usize {
        self.total_samples
    }

    fn predict_raw(&self, features: &[f64; FEATURE_COUNT]) -> f64 {
        let s: f64 = self.weights.iter().zip(features.iter()).map(|(w, x)| w * x).sum();
        sigmoid(s)
    }

    pub fn predicted_win_rate(&self, features: &[f64; FEATURE_COUNT]) -> f64 {
        self.predict_raw(features) * 100.0
    }

    fn sgd_step(weights: &mut [f64; FEATURE_COUNT], features: &[f64; FEATURE_COUNT], label: f64) {
        let pred = {
            let s: f64 = weights.iter().zip(features.iter()).map(|(w, x)| w * x).sum();
            sigmoid(s)
        };
        let err = pred - label;
        for i in 0..FEATURE_COUNT {
            weights[i] -= LEARNING_RATE * (err * features[i] + L2_LAMBDA * weights[i]);
        }
    }

    /// Records one training sample (an online SGD step), and every
    /// `RETRAIN_EVERY` samples runs a deterministic mini-batch pass over
    /// the bounded buffer. Runs inline — predictions made during retraining
    /// must see either the pre- or post-retrain weights, never a torn read;
    /// `Trainer` lives behind a single `RwLock` in `Predictor`, so the
    /// retrain holds the write lock for its duration.
    pub fn train_one(&mut self, features: [f64; FEATURE_COUNT], label: f64, now: i64) {
        Self::sgd_step(&mut self.weights, &features, label);

        self.buffer.push_back((features, label));
        while self.buffer.len() > BUFFER_CAPACITY {
            self.buffer.pop_front();
        }

        self.total_samples += 1;
        self.samples_seen_since_retrain += 1;
        if self.samples_seen_since_retrain >= RETRAIN_EVERY {
            self.samples_seen_since_retrain = 0;
            self.mini_batch_retrain(now);
        }
        self.trained_at = now;
    }

    fn mini_batch_retrain(&mut self, now: i64) {
        let n = self.buffer.len();
        if n == 0 {
            return;
        }
        let samples: Vec<_> = self.buffer.iter().cloned().collect();

        for epoch in 0..RETRAIN_EPOCHS {
            let seed = (now as u64)
                .wrapping_mul(31)
                .wrapping_add(self.total_samples as u64)
                .wrapping_add(epoch as u64);
            let order = deterministic_permutation(n, seed);

            for batch in order.chunks(BATCH_SIZE) {
                let mut grad = [0.0_f64; FEATURE_COUNT];
                for &idx in batch {
                    let (features, label) = &samples[idx];
                    let s: f64 = self.weights.iter().zip(features.iter()).map(|(w, x)| w * x).sum();
                    let pred = sigmoid(s);
                    let err = pred - label;
                    for i in 0..FEATURE_COUNT {
                        grad[i] += err * features[i];
                    }
                }
                let batch_len = batch.len() as f64;
                for i in 0..FEATURE_COUNT {
                    let avg_grad = grad[i] / batch_len;
                    self.weights[i] -= LEARNING_RATE * (avg_grad + L2_LAMBDA * self.weights[i]);
                }
            }
        }
        self.version += 1;
    }

    pub fn export(&self) -> ModelWeightsExport {
        ModelWeightsExport { version: self.version, trained_at: self.trained_at, weights: self.weights }
    }

    pub fn import(&mut self, payload: ModelWeightsExport) {
        self.weights = payload.weights;
        self.version = payload.version;
        self.trained_at = payload.trained_at;
    }

    pub fn to_named(&self) -> BTreeMap<String, f64> {
        FEATURE_NAMES
            .iter()
            .zip(self.weights.iter())
            .map(|(name, w)| (name.to_string(), *w))
            .collect()
    }
}

impl Default for Trainer {
    fn default() -> Self {
        Self::new()
    }
}

pub fn from_named(named: &BTreeMap<String, f64>) -> Result<[f64; FEATURE_COUNT], RoutingError> {
    let mut weights = [0.0_f64; FEATURE_COUNT];
    for (i, name) in FEATURE_NAMES.iter().enumerate() {
        weights[i] = *named
            .get(*name)
            .ok_or_else(|| RoutingError::invalid("ModelWeightsExport", format!("missing feature '{name}'")))?;
    }
    Ok(weights)
}

pub fn confidence(total_samples: usize) -> f64 {
    if total_samples < MIN_SAMPLES_FOR_CONFIDENCE {
        total_samples as f64 / MIN_SAMPLES_FOR_CONFIDENCE as f64
    } else {
        (0.7 + 0.3 * (total_samples as f64).ln() / 1000_f64.ln()).min(1.0)
    }
}

pub fn risk_score(predicted_win_rate: f64, toxicity_score: f64, confidence: f64) -> f64 {
    (predicted_win_rate + 0.3 * toxicity_score + 20.0 * (1.0 - confidence)).clamp(0.0, 100.0)
}

/// Recommendation tiers, evaluated top to bottom.
pub fn recommend(risk_score: f64, predicted_win_rate: f64, toxicity_score: f64) -> (RoutingAction, f64) {
    if risk_score > 80.0 || toxicity_score > 80.0 {
        if toxicity_score > 90.0 {
            (RoutingAction::Reject, 0.0)
        } else {
            (RoutingAction::ABook, 100.0)
        }
    } else if risk_score > 60.0 || predicted_win_rate > 55.0 {
        (RoutingAction::PartialHedge, 80.0)
    } else if risk_score > 40.0 || predicted_win_rate > 52.0 {
        (RoutingAction::PartialHedge, 60.0)
    } else if risk_score < 30.0 && predicted_win_rate < 48.0 {
        (RoutingAction::BBook, 10.0)
    } else {
        (RoutingAction::PartialHedge, 40.0)
    }
}

pub fn build_output(trainer: &Trainer, features: &[f64; FEATURE_COUNT], toxicity_score: f64) -> PredictorOutput {
    let predicted_win_rate = trainer.predicted_win_rate(features);
    let conf = confidence(trainer.total_samples());
    let risk = risk_score(predicted_win_rate, toxicity_score, conf);
    let (action, hedge) = recommend(risk, predicted_win_rate, toxicity_score);
    PredictorOutput {
        predicted_win_rate,
        confidence: conf,
        risk_score: risk,
        recommended_action: action,
        recommended_hedge: hedge,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_ramps_up_with_samples() {
        assert!((confidence(0) - 0.0).abs() < 1e-9);
        assert!(confidence(25) < confidence(50));
        assert!(confidence(1000) <= 1.0);
    }

    #[test]
    fn export_import_round_trips_weights() {
        let mut t = Trainer::new();
        t.train_one([0.1; FEATURE_COUNT], 1.0, 100);
        let exported = t.export();
        let mut t2 = Trainer::new();
        t2.import(exported.clone());
        assert_eq!(t2.weights, exported.weights);
        assert_eq!(t2.version, exported.version);
    }

    #[test]
    fn permutation_is_deterministic_for_same_seed() {
        let a = deterministic_permutation(50, 7);
        let b = deterministic_permutation(50, 7);
        assert_eq!(a, b);
        let mut sorted = a.clone();
        sorted.sort();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn high_toxicity_recommends_reject_or_full_hedge() {
        let (action, hedge) = recommend(85.0, 50.0, 95.0);
        assert_eq!(action, RoutingAction::Reject);
        assert_eq!(hedge, 0.0);
    }
}
