use super::probability::round4;

/// Blends admission probability with the subjective preference score.
///
/// The objective weight is clamped into [0, 1]; the result is rounded to four
/// decimals and stays in [0, 1] whenever both inputs do.
pub fn match_score(objective_weight: f64, probability: f64, preference: f64) -> f64 {
    let w = objective_weight.clamp(0.0, 1.0);
    round4(w * probability + (1.0 - w) * preference)
}
