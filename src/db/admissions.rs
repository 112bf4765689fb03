use sqlx::PgPool;

use crate::{
    error::AppResult,
    models::{AdmissionRecord, InstitutionProfile, JoinedAdmission},
};

/// Selection applied to the historical admission rows
#[derive(Debug, Clone, PartialEq)]
pub struct AdmissionFilter {
    /// Normalized source province of the examinee
    pub province: String,
    pub first_year: i32,
    pub last_year: i32,
    /// Case-sensitive substring of the major name, passed to LIKE as-is
    pub major: Option<String>,
}

/// Source of historical admission rows joined with institution metadata
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait AdmissionRepository: Send + Sync {
    /// Fetches every admission row matching the filter
    async fn fetch_admissions(&self, filter: &AdmissionFilter) -> AppResult<Vec<JoinedAdmission>>;
}

/// Flat row produced by the joined admissions query
#[derive(Debug, sqlx::FromRow)]
struct AdmissionRow {
    college_code: i64,
    college_name: String,
    college_province: String,
    is_985: bool,
    is_211: bool,
    is_dfc: bool,
    admission_year: i32,
    min_rank: Option<i32>,
    min_score: Option<i32>,
    major_name: String,
    admission_province: String,
}

impl From<AdmissionRow> for JoinedAdmission {
    fn from(row: AdmissionRow) -> Self {
        JoinedAdmission {
            institution: InstitutionProfile {
                college_code: row.college_code,
                college_name: row.college_name,
                province: row.college_province,
                is_985: row.is_985,
                is_211: row.is_211,
                is_dfc: row.is_dfc,
            },
            record: AdmissionRecord {
                college_code: row.college_code,
                year: row.admission_year,
                min_rank: row.min_rank.map(f64::from),
                min_score: row.min_score,
                major_name: row.major_name,
                province: row.admission_province,
            },
        }
    }
}

/// PostgreSQL-backed admission repository
#[derive(Clone)]
pub struct PgAdmissionRepository {
    pool: PgPool,
}

impl PgAdmissionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl AdmissionRepository for PgAdmissionRepository {
    async fn fetch_admissions(&self, filter: &AdmissionFilter) -> AppResult<Vec<JoinedAdmission>> {
        let rows = sqlx::query_as::<_, AdmissionRow>(
            r#"
            SELECT
                c.college_code,
                c.college_name,
                c.province AS college_province,
                c.is_985,
                c.is_211,
                c.is_dfc,
                s.admission_year,
                s.min_rank,
                s.min_score,
                s.major_name,
                s.province AS admission_province
            FROM college_admission_score s
            JOIN college_info c ON c.college_code = s.college_code
            WHERE s.province = $1
              AND s.admission_year BETWEEN $2 AND $3
              AND ($4::TEXT IS NULL OR s.major_name LIKE '%' || $4 || '%')
            ORDER BY c.college_code, s.admission_year DESC, s.min_rank
            "#,
        )
        .bind(&filter.province)
        .bind(filter.first_year)
        .bind(filter.last_year)
        .bind(filter.major.as_deref())
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!(
            province = %filter.province,
            major = ?filter.major,
            rows = rows.len(),
            "Fetched admission rows"
        );

        Ok(rows.into_iter().map(JoinedAdmission::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_conversion_splits_institution_and_record() {
        let row = AdmissionRow {
            college_code: 10001,
            college_name: "北京大学".to_string(),
            college_province: "北京".to_string(),
            is_985: true,
            is_211: true,
            is_dfc: true,
            admission_year: 2019,
            min_rank: Some(42),
            min_score: Some(690),
            major_name: "数学类".to_string(),
            admission_province: "河南".to_string(),
        };

        let joined = JoinedAdmission::from(row);
        assert_eq!(joined.institution.college_code, 10001);
        assert_eq!(joined.institution.province, "北京");
        assert!(joined.institution.is_985);
        assert_eq!(joined.record.year, 2019);
        assert_eq!(joined.record.min_rank, Some(42.0));
        assert_eq!(joined.record.province, "河南");
    }

    #[test]
    fn test_missing_rank_stays_missing() {
        let row = AdmissionRow {
            college_code: 10002,
            college_name: "中国人民大学".to_string(),
            college_province: "北京".to_string(),
            is_985: true,
            is_211: true,
            is_dfc: true,
            admission_year: 2018,
            min_rank: None,
            min_score: Some(650),
            major_name: "法学".to_string(),
            admission_province: "河南".to_string(),
        };

        assert_eq!(JoinedAdmission::from(row).record.min_rank, None);
    }
}
