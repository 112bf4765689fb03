use serde::Deserialize;

use crate::error::{AppError, AppResult};

use super::{province::normalize_province, ExamineeProfile};

/// Objective weight used when the caller does not supply a usable one
pub const DEFAULT_OBJECTIVE_WEIGHT: f64 = 0.8;

/// Relative weights of the three subjective preference signals
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubjectiveWeights {
    pub region: f64,
    pub tier: f64,
    pub major: f64,
}

impl Default for SubjectiveWeights {
    fn default() -> Self {
        Self {
            region: 0.4,
            tier: 0.35,
            major: 0.25,
        }
    }
}

impl SubjectiveWeights {
    /// Builds weights from caller input, falling back to the defaults as a group.
    ///
    /// Missing components take their default value and negative components count
    /// as zero. If any component is non-finite, or the resulting sum is not
    /// positive, all three defaults are used instead.
    pub fn normalized(region: Option<f64>, tier: Option<f64>, major: Option<f64>) -> Self {
        let defaults = Self::default();
        let supplied = [region, tier, major];

        if supplied.iter().flatten().any(|w| !w.is_finite()) {
            return defaults;
        }

        let weights = Self {
            region: region.unwrap_or(defaults.region).max(0.0),
            tier: tier.unwrap_or(defaults.tier).max(0.0),
            major: major.unwrap_or(defaults.major).max(0.0),
        };

        let total = weights.total();
        if !total.is_finite() || total <= 0.0 {
            return defaults;
        }

        weights
    }

    pub fn total(&self) -> f64 {
        self.region + self.tier + self.major
    }
}

/// Prestige designations the examinee would like to see
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TierPreference {
    pub prefer_985: bool,
    pub prefer_211: bool,
    pub prefer_dfc: bool,
}

impl TierPreference {
    pub fn any(&self) -> bool {
        self.prefer_985 || self.prefer_211 || self.prefer_dfc
    }
}

/// Fully validated recommendation query handed to the engine
#[derive(Debug, Clone, PartialEq)]
pub struct UserQuery {
    /// Exam rank within the source province; smaller is more competitive
    pub rank: i64,
    /// Normalized source province
    pub province: String,
    /// Share of the match score taken by admission probability, in [0, 1]
    pub objective_weight: f64,
    pub weights: SubjectiveWeights,
    pub target_regions: Vec<String>,
    pub tiers: TierPreference,
    /// Case-sensitive substring the major name must contain
    pub major: Option<String>,
}

/// Clamps the objective weight into [0, 1], defaulting when absent or non-finite
pub fn normalize_objective_weight(weight: Option<f64>) -> f64 {
    match weight {
        Some(w) if w.is_finite() => w.clamp(0.0, 1.0),
        _ => DEFAULT_OBJECTIVE_WEIGHT,
    }
}

/// Raw query-string parameters of the recommendation endpoint.
///
/// Everything arrives as text so that malformed values degrade to defaults
/// instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationParams {
    pub rank: Option<String>,
    pub province: Option<String>,
    pub objective_weight: Option<String>,
    pub region_weight: Option<String>,
    pub tier_weight: Option<String>,
    pub major_weight: Option<String>,
    pub regions: Option<String>,
    pub prefer_985: Option<String>,
    pub prefer_211: Option<String>,
    pub prefer_dfc: Option<String>,
    pub major: Option<String>,
}

impl RecommendationParams {
    /// Rank supplied on the request, if it parses as a positive integer
    pub fn explicit_rank(&self) -> Option<i64> {
        self.rank.as_deref().and_then(parse_rank)
    }

    /// Normalized province supplied on the request, if non-blank
    pub fn explicit_province(&self) -> Option<String> {
        self.province.as_deref().and_then(parse_province)
    }

    /// True when rank or province must come from the saved profile
    pub fn needs_profile(&self) -> bool {
        self.explicit_rank().is_none() || self.explicit_province().is_none()
    }

    /// Validates the parameters into a [`UserQuery`].
    ///
    /// Explicit values win over the saved profile. Fails with
    /// [`AppError::InvalidInput`] when rank or province stays undetermined.
    pub fn into_query(self, profile: Option<&ExamineeProfile>) -> AppResult<UserQuery> {
        let rank = self
            .explicit_rank()
            .or_else(|| profile.and_then(|p| p.exam_rank).filter(|r| *r > 0));
        let province = self.explicit_province().or_else(|| {
            profile
                .and_then(|p| p.source_province.as_deref())
                .and_then(parse_province)
        });

        let (rank, province) = match (rank, province) {
            (Some(rank), Some(province)) => (rank, province),
            (None, None) => {
                return Err(AppError::InvalidInput(
                    "rank and province are required".to_string(),
                ))
            }
            (None, _) => return Err(AppError::InvalidInput("rank is required".to_string())),
            (_, None) => {
                return Err(AppError::InvalidInput(
                    "province is required".to_string(),
                ))
            }
        };

        let weights = SubjectiveWeights::normalized(
            parse_weight(self.region_weight.as_deref()),
            parse_weight(self.tier_weight.as_deref()),
            parse_weight(self.major_weight.as_deref()),
        );

        Ok(UserQuery {
            rank,
            province,
            objective_weight: normalize_objective_weight(parse_weight(
                self.objective_weight.as_deref(),
            )),
            weights,
            target_regions: parse_regions(self.regions.as_deref()),
            tiers: TierPreference {
                prefer_985: parse_flag(self.prefer_985.as_deref()),
                prefer_211: parse_flag(self.prefer_211.as_deref()),
                prefer_dfc: parse_flag(self.prefer_dfc.as_deref()),
            },
            major: self.major.filter(|m| !m.trim().is_empty()),
        })
    }
}

fn parse_rank(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok().filter(|rank| *rank > 0)
}

fn parse_province(raw: &str) -> Option<String> {
    let normalized = normalize_province(raw);
    (!normalized.is_empty()).then_some(normalized)
}

fn parse_weight(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
}

fn parse_flag(raw: Option<&str>) -> bool {
    matches!(
        raw.map(|s| s.trim().to_ascii_lowercase()).as_deref(),
        Some("true" | "1" | "yes" | "on")
    )
}

fn parse_regions(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|region| !region.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}
