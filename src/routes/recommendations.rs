use axum::{
    extract::{Query, State},
    http::HeaderMap,
    Extension, Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{RecommendationParams, ScoredResult, Tier},
    routes::AppState,
    services::recommendations,
};

/// Header carrying the examinee ID, set by the upstream auth gateway
pub const USER_ID_HEADER: &str = "x-user-id";

/// Handler for the recommendations endpoint
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    headers: HeaderMap,
    Query(params): Query<RecommendationParams>,
) -> AppResult<Json<Vec<ScoredResult>>> {
    let user_id = session_user_id(&headers);

    let query = recommendations::resolve_query(state.profiles.as_ref(), params, user_id).await?;

    tracing::info!(
        request_id = %request_id,
        rank = query.rank,
        province = %query.province,
        objective_weight = query.objective_weight,
        regions = query.target_regions.len(),
        major = ?query.major,
        "Processing recommendation request"
    );

    let results = recommendations::recommend_colleges(state.admissions.as_ref(), &query).await?;

    let count = |tier: Tier| results.iter().filter(|r| r.tier == tier).count();
    tracing::info!(
        request_id = %request_id,
        reference = count(Tier::Reference),
        rush = count(Tier::Rush),
        stable = count(Tier::Stable),
        safe = count(Tier::Safe),
        "Recommendation completed"
    );

    Ok(Json(results))
}

fn session_user_id(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get(USER_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| Uuid::parse_str(s.trim()).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_session_user_id_parses_uuid_header() {
        let id = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_ID_HEADER,
            HeaderValue::from_str(&id.to_string()).unwrap(),
        );
        assert_eq!(session_user_id(&headers), Some(id));
    }

    #[test]
    fn test_session_user_id_ignores_garbage() {
        let mut headers = HeaderMap::new();
        assert_eq!(session_user_id(&headers), None);

        headers.insert(USER_ID_HEADER, HeaderValue::from_static("not-a-uuid"));
        assert_eq!(session_user_id(&headers), None);
    }
}
