use crate::models::{InstitutionProfile, UserQuery};

/// Which subjective preferences an institution satisfies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreferenceMatch {
    pub region: bool,
    pub tier: bool,
    pub major: bool,
}

impl PreferenceMatch {
    pub fn evaluate(query: &UserQuery, institution: &InstitutionProfile) -> Self {
        let tiers = query.tiers;
        Self {
            region: query
                .target_regions
                .iter()
                .any(|region| *region == institution.province),
            tier: (tiers.prefer_985 && institution.is_985)
                || (tiers.prefer_211 && institution.is_211)
                || (tiers.prefer_dfc && institution.is_dfc),
            // The store already restricted rows to the requested major
            major: query.major.as_deref().is_some_and(|m| !m.is_empty()),
        }
    }
}

/// Weighted share of the subjective preferences an institution meets, in [0, 1]
pub fn preference_score(query: &UserQuery, institution: &InstitutionProfile) -> f64 {
    let matched = PreferenceMatch::evaluate(query, institution);
    let weights = query.weights;

    let total = weights.total();
    if total <= 0.0 {
        return 0.0;
    }

    let mut raw = 0.0;
    if matched.region {
        raw += weights.region;
    }
    if matched.tier {
        raw += weights.tier;
    }
    if matched.major {
        raw += weights.major;
    }

    raw / total
}
