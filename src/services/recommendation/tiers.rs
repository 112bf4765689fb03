use std::cmp::Ordering;
use std::collections::HashMap;

use crate::models::{ScoredResult, Tier};

/// Results kept from each tier
pub const PER_TIER_LIMIT: usize = 5;

/// Buckets an admission probability into its risk tier
pub fn classify(probability: f64) -> Tier {
    if probability >= 0.75 {
        Tier::Safe
    } else if probability >= 0.40 {
        Tier::Stable
    } else if probability >= 0.20 {
        Tier::Rush
    } else {
        Tier::Reference
    }
}

/// Picks the best [`PER_TIER_LIMIT`] results of each tier by match score and
/// concatenates them in [`Tier::OUTPUT_ORDER`].
///
/// Results are grouped by their `tier` field. Ties keep their input order.
pub fn select_top_per_tier(results: Vec<ScoredResult>) -> Vec<ScoredResult> {
    let mut buckets: HashMap<Tier, Vec<ScoredResult>> = HashMap::new();
    for result in results {
        buckets.entry(result.tier).or_default().push(result);
    }

    Tier::OUTPUT_ORDER
        .iter()
        .flat_map(|tier| {
            let mut bucket = buckets.remove(tier).unwrap_or_default();
            bucket.sort_by(|a, b| {
                b.match_score
                    .partial_cmp(&a.match_score)
                    .unwrap_or(Ordering::Equal)
            });
            bucket.truncate(PER_TIER_LIMIT);
            bucket
        })
        .collect()
}
