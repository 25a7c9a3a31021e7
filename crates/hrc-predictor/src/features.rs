use hrc_schemas::{ClientProfile, FEATURE_COUNT};

/// Extracts the 10 normalized input features, each scaled to roughly
/// `[0,1]` (feature 2 is the exception, min-max mapped from `[-3,3]` but
/// still landing in `[0,1]` after the map).
pub fn extract(p: &ClientProfile) -> [f64; FEATURE_COUNT] {
    let f1 = p.win_rate / 100.0;

    let sharpe_clipped = p.sharpe_ratio.clamp(-3.0, 3.0);
    let f2 = (sharpe_clipped + 3.0) / 6.0;

    let f3 = if p.avg_hold_seconds > 0.0 {
        p.avg_hold_seconds.ln() / 604_800_f64.ln()
    } else {
        0.0
    };

    let f4 = p.order_to_fill_ratio.clamp(0.0, 1.0);

    let f5 = p.max_instrument_share();

    let f6 = (p.total_volume + 1.0).ln() / 10_000_f64.ln();

    let f7 = p.toxicity_score / 100.0;

    let f8 = (p.max_drawdown / 10_000.0).clamp(0.0, 1.0);

    let f9 = if p.avg_trade_size > 0.0 {
        (p.avg_trade_size + 1.0).ln() / 100_f64.ln()
    } else {
        0.0
    };

    let f10 = time_consistency(&p.hourly_pattern);

    [f1, f2, f3, f4, f5, f6, f7, f8, f9, f10]
}

fn time_consistency(hourly_pattern: &[u64; 24]) -> f64 {
    let total: u64 = hourly_pattern.iter().sum();
    if total == 0 {
        return 1.0;
    }
    let total = total as f64;
    let mean = total / 24.0;
    let variance = hourly_pattern
        .iter()
        .map(|&c| (c as f64 - mean).powi(2))
        .sum::<f64>()
        / 24.0;
    let max_var = total * total / 24.0;
    if max_var <= 0.0 {
        return 1.0;
    }
    1.0 - (variance / max_var).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hrc_schemas::AccountId;

    #[test]
    fn features_stay_in_expected_range_for_fresh_profile() {
        let p = ClientProfile::new(AccountId(1), "u", "n");
        let f = extract(&p);
        for x in f {
            assert!(x.is_finite());
        }
    }

    #[test]
    fn evenly_spread_hours_give_high_time_consistency() {
        let pattern = [10u64; 24];
        assert!(time_consistency(&pattern) > 0.9);
    }

    #[test]
    fn concentrated_hour_gives_low_time_consistency() {
        let mut pattern = [0u64; 24];
        pattern[0] = 240;
        assert!(time_consistency(&pattern) < 0.2);
    }
}
