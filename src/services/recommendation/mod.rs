//! College recommendation engine
//!
//! Turns the joined admission rows for one source province into a tiered,
//! ranked list of institutions:
//!
//! 1. [`aggregator`] groups rows per institution and averages the recent ranks
//! 2. [`probability`] converts the rank gap into an admission probability
//! 3. [`preference`] scores how well the institution fits stated preferences
//! 4. [`combiner`] blends the two into a single match score
//! 5. [`tiers`] buckets by probability and keeps the best of each bucket
//!
//! Everything here is synchronous and pure; rows are fetched by the caller.

pub mod aggregator;
pub mod combiner;
pub mod preference;
pub mod probability;
pub mod tiers;

use crate::models::{HistoryEntry, JoinedAdmission, ScoredResult, UserQuery};

pub use aggregator::{aggregate, AggregatedCandidate};

/// Inclusive range of admission years considered
pub const FIRST_YEAR: i32 = 2017;
pub const LAST_YEAR: i32 = 2020;

/// Scores one aggregated institution against the query
pub fn score_candidate(candidate: &AggregatedCandidate, query: &UserQuery) -> ScoredResult {
    let probability = probability::admission_probability(query.rank, candidate.average_rank);
    let preference = preference::preference_score(query, &candidate.institution);
    let match_score = combiner::match_score(query.objective_weight, probability, preference);

    let institution = &candidate.institution;
    ScoredResult {
        college_code: institution.college_code,
        college_name: institution.college_name.clone(),
        province: institution.province.clone(),
        is_985: institution.is_985,
        is_211: institution.is_211,
        is_dfc: institution.is_dfc,
        probability,
        match_score,
        tier: tiers::classify(probability),
        history: candidate.history.iter().map(HistoryEntry::from).collect(),
    }
}

/// Runs the full pipeline over freshly fetched rows
pub fn recommend(rows: Vec<JoinedAdmission>, query: &UserQuery) -> Vec<ScoredResult> {
    let row_count = rows.len();
    let candidates = aggregate(rows);

    tracing::debug!(
        rows = row_count,
        candidates = candidates.len(),
        "Aggregated admission history"
    );

    let scored = candidates
        .iter()
        .map(|candidate| score_candidate(candidate, query))
        .collect();

    tiers::select_top_per_tier(scored)
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::models::{
        AdmissionRecord, InstitutionProfile, JoinedAdmission, SubjectiveWeights, TierPreference,
        UserQuery,
    };

    pub fn institution(code: i64, province: &str) -> InstitutionProfile {
        InstitutionProfile {
            college_code: code,
            college_name: format!("College {}", code),
            province: province.to_string(),
            is_985: false,
            is_211: false,
            is_dfc: false,
        }
    }

    pub fn row(
        institution: &InstitutionProfile,
        year: i32,
        min_rank: Option<f64>,
    ) -> JoinedAdmission {
        JoinedAdmission {
            institution: institution.clone(),
            record: AdmissionRecord {
                college_code: institution.college_code,
                year,
                min_rank,
                min_score: Some(600),
                major_name: "计算机科学与技术".to_string(),
                province: "河南".to_string(),
            },
        }
    }

    pub fn query(rank: i64) -> UserQuery {
        UserQuery {
            rank,
            province: "河南".to_string(),
            objective_weight: 0.8,
            weights: SubjectiveWeights::default(),
            target_regions: vec![],
            tiers: TierPreference::default(),
            major: None,
        }
    }
}
