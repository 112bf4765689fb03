use sqlx::PgPool;
use uuid::Uuid;

use crate::{error::AppResult, models::ExamineeProfile};

/// Lookup of the rank and province an authenticated examinee saved earlier
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn fetch_profile(&self, user_id: Uuid) -> AppResult<Option<ExamineeProfile>>;
}

#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    exam_rank: Option<i32>,
    source_province: Option<String>,
}

/// PostgreSQL-backed profile repository
#[derive(Clone)]
pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ProfileRepository for PgProfileRepository {
    async fn fetch_profile(&self, user_id: Uuid) -> AppResult<Option<ExamineeProfile>> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT exam_rank, source_province
            FROM user_profile
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| ExamineeProfile {
            exam_rank: r.exam_rank.map(i64::from),
            source_province: r.source_province,
        }))
    }
}
