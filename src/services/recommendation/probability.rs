/// Probability when the examinee's rank equals the historical average
pub const BASE_PROBABILITY: f64 = 0.70;
/// Probability reached one margin better than the historical average
pub const UPPER_PROBABILITY: f64 = 0.80;
/// Probability reached one margin worse than the historical average
pub const LOWER_PROBABILITY: f64 = 0.35;

/// Rank distance treated as one full step of probability change.
///
/// Keyed on the examinee's rank: a fixed gap matters less the further down
/// the ranking the examinee sits.
pub fn margin_for_rank(user_rank: i64) -> f64 {
    match user_rank {
        r if r < 300 => 60.0,
        r if r < 1_000 => 200.0,
        r if r < 5_000 => 300.0,
        r if r < 20_000 => 1_200.0,
        _ => 2_000.0,
    }
}

/// Rounds to four decimal places
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Estimates the chance of admission from the gap between the examinee's rank
/// and an institution's average admitted rank.
///
/// Linear in the gap on each side of the average. A better rank saturates at
/// [`UPPER_PROBABILITY`]; a worse rank keeps decaying until the final clamp to
/// [0, 1]. Rounded to four decimals, exactly [`BASE_PROBABILITY`] at zero gap.
pub fn admission_probability(user_rank: i64, average_rank: f64) -> f64 {
    let margin = margin_for_rank(user_rank);
    let diff = user_rank as f64 - average_rank;

    let probability = if diff < 0.0 {
        let t = -diff / margin;
        (BASE_PROBABILITY + t * (UPPER_PROBABILITY - BASE_PROBABILITY)).min(UPPER_PROBABILITY)
    } else {
        let t = diff / margin;
        BASE_PROBABILITY - t * (BASE_PROBABILITY - LOWER_PROBABILITY)
    };

    round4(probability.clamp(0.0, 1.0))
}
