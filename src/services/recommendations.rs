use uuid::Uuid;

use crate::{
    db::{AdmissionFilter, AdmissionRepository, ProfileRepository},
    error::AppResult,
    models::{RecommendationParams, ScoredResult, UserQuery},
    services::recommendation::{self, FIRST_YEAR, LAST_YEAR},
};

/// Resolves the request into a [`UserQuery`], consulting the saved profile of
/// the authenticated examinee only when rank or province is missing.
pub async fn resolve_query(
    profiles: &dyn ProfileRepository,
    params: RecommendationParams,
    user_id: Option<Uuid>,
) -> AppResult<UserQuery> {
    let profile = match user_id {
        Some(user_id) if params.needs_profile() => profiles.fetch_profile(user_id).await?,
        _ => None,
    };

    params.into_query(profile.as_ref())
}

/// Produces tiered college recommendations for a validated query
///
/// Fetches the province's admission history for the fixed year window (and
/// optional major filter), then scores it from scratch. Nothing is cached
/// between calls.
pub async fn recommend_colleges(
    admissions: &dyn AdmissionRepository,
    query: &UserQuery,
) -> AppResult<Vec<ScoredResult>> {
    let filter = AdmissionFilter {
        province: query.province.clone(),
        first_year: FIRST_YEAR,
        last_year: LAST_YEAR,
        major: query.major.clone(),
    };

    let rows = admissions.fetch_admissions(&filter).await?;
    let results = recommendation::recommend(rows, query);

    tracing::info!(
        province = %query.province,
        rank = query.rank,
        results = results.len(),
        "Recommendations computed"
    );

    Ok(results)
}
