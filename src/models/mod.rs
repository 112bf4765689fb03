use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub mod province;
pub mod query;

pub use province::normalize_province;
pub use query::{RecommendationParams, SubjectiveWeights, TierPreference, UserQuery};

/// National enrolment code identifying an institution
pub type CollegeCode = i64;

/// Reference data for one institution, joined onto every admission row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InstitutionProfile {
    pub college_code: CollegeCode,
    pub college_name: String,
    pub province: String,
    pub is_985: bool,
    pub is_211: bool,
    /// "Double First-Class" national priority designation
    pub is_dfc: bool,
}

/// One historical admission line (institution × year × major) for a source province
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdmissionRecord {
    pub college_code: CollegeCode,
    pub year: i32,
    /// Lowest admitted rank; absent when the source did not publish one
    pub min_rank: Option<f64>,
    pub min_score: Option<i32>,
    pub major_name: String,
    pub province: String,
}

impl AdmissionRecord {
    /// Rank usable for averaging, if present and finite
    pub fn usable_rank(&self) -> Option<f64> {
        self.min_rank.filter(|rank| rank.is_finite())
    }
}

/// Admission row joined with its institution metadata, as returned by the data store
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedAdmission {
    pub institution: InstitutionProfile,
    pub record: AdmissionRecord,
}

/// Saved examinee details used when a request omits rank or province
#[derive(Debug, Clone, PartialEq)]
pub struct ExamineeProfile {
    pub exam_rank: Option<i64>,
    pub source_province: Option<String>,
}

/// Risk bucket a recommendation falls into, by admission probability
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Probability below 0.20
    Reference,
    /// Probability in [0.20, 0.40)
    Rush,
    /// Probability in [0.40, 0.75)
    Stable,
    /// Probability of 0.75 or more
    Safe,
}

impl Tier {
    /// Order in which tiers appear in the response
    pub const OUTPUT_ORDER: [Tier; 4] = [Tier::Reference, Tier::Rush, Tier::Stable, Tier::Safe];
}

impl Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Tier::Reference => "reference",
            Tier::Rush => "rush",
            Tier::Stable => "stable",
            Tier::Safe => "safe",
        };
        write!(f, "{}", label)
    }
}

/// Historical admission entry exposed in the response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub year: i32,
    pub min_score: Option<i32>,
    pub min_rank: Option<f64>,
    pub major_name: String,
}

impl From<&AdmissionRecord> for HistoryEntry {
    fn from(record: &AdmissionRecord) -> Self {
        Self {
            year: record.year,
            min_score: record.min_score,
            min_rank: record.min_rank,
            major_name: record.major_name.clone(),
        }
    }
}

/// A scored institution returned to the client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoredResult {
    pub college_code: CollegeCode,
    pub college_name: String,
    pub province: String,
    pub is_985: bool,
    pub is_211: bool,
    pub is_dfc: bool,
    pub probability: f64,
    pub match_score: f64,
    pub tier: Tier,
    pub history: Vec<HistoryEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_serializes_lowercase() {
        let json = serde_json::to_string(&Tier::Reference).unwrap();
        assert_eq!(json, "\"reference\"");
        assert_eq!(Tier::Safe.to_string(), "safe");
    }

    #[test]
    fn test_usable_rank_rejects_missing_and_non_finite() {
        let mut record = AdmissionRecord {
            college_code: 10001,
            year: 2020,
            min_rank: None,
            min_score: Some(680),
            major_name: "数学类".to_string(),
            province: "河南".to_string(),
        };
        assert_eq!(record.usable_rank(), None);

        record.min_rank = Some(f64::NAN);
        assert_eq!(record.usable_rank(), None);

        record.min_rank = Some(f64::INFINITY);
        assert_eq!(record.usable_rank(), None);

        record.min_rank = Some(152.0);
        assert_eq!(record.usable_rank(), Some(152.0));
    }

    #[test]
    fn test_scored_result_uses_camel_case_fields() {
        let result = ScoredResult {
            college_code: 10003,
            college_name: "清华大学".to_string(),
            province: "北京".to_string(),
            is_985: true,
            is_211: true,
            is_dfc: true,
            probability: 0.7,
            match_score: 0.76,
            tier: Tier::Stable,
            history: vec![],
        };

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["matchScore"], 0.76);
        assert_eq!(value["is985"], true);
        assert_eq!(value["isDfc"], true);
        assert_eq!(value["tier"], "stable");
    }
}
