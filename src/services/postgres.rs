use crate::models::{EmployerProfile, InternProfile, Location, Posting};
use crate::services::store::{CandidateStore, StoreError};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use std::collections::HashSet;
use std::time::Duration;

const POSTING_COLUMNS: &str = r#"
    p.id::bigint AS id,
    p.employer_id::bigint AS employer_id,
    e.company_name,
    p.title,
    p.description,
    p.requirements,
    p.responsibilities,
    p.industry_id::bigint AS industry_id,
    p.municipality,
    p.province,
    p.duration_months,
    p.stipend::float8 AS stipend,
    p.start_date,
    p.application_deadline,
    p.is_active,
    p.is_published,
    ARRAY(
        SELECT s.skill_id::bigint
        FROM core_internshippost_skills_required s
        WHERE s.internshippost_id = p.id
    ) AS skill_ids
"#;

const INTERN_COLUMNS: &str = r#"
    ip.id::bigint AS id,
    u.username,
    u.email,
    u.email_confirmed,
    ip.full_name,
    ip.phone,
    ip.bio,
    ip.current_municipality,
    ip.current_province,
    ARRAY(
        SELECT s.skill_id::bigint
        FROM core_internprofile_skills s
        WHERE s.internprofile_id = ip.id
    ) AS skill_ids,
    ARRAY(
        SELECT i.industry_id::bigint
        FROM core_internprofile_industries i
        WHERE i.internprofile_id = ip.id
    ) AS industry_ids,
    COALESCE((
        SELECT json_agg(json_build_object(
            'id', l.id, 'municipality', l.municipality, 'province', l.province
        ) ORDER BY l.id)
        FROM core_internprofile_preferred_locations pl
        JOIN core_location l ON l.id = pl.location_id
        WHERE pl.internprofile_id = ip.id
    ), '[]'::json) AS preferred_locations,
    (SELECT COUNT(*) FROM core_education ed WHERE ed.intern_id = ip.id) AS education_count,
    (SELECT COUNT(*) FROM core_workexperience we WHERE we.intern_id = ip.id) AS experience_count
"#;

/// PostgreSQL reader for the marketplace schema
///
/// Profiles, postings and their reference tables are owned by the main
/// marketplace application. This client only reads them.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }
}

fn to_count(value: i64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

fn posting_from_row(row: &PgRow) -> Result<Posting, StoreError> {
    let duration: i32 = row.try_get("duration_months")?;
    let skill_ids: Vec<i64> = row.try_get("skill_ids")?;

    Ok(Posting {
        id: row.try_get("id")?,
        employer_id: row.try_get("employer_id")?,
        company_name: row.try_get("company_name")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        requirements: row.try_get("requirements")?,
        responsibilities: row.try_get("responsibilities")?,
        required_skill_ids: skill_ids.into_iter().collect(),
        industry_id: row.try_get("industry_id")?,
        municipality: row.try_get("municipality")?,
        province: row.try_get("province")?,
        duration_months: u32::try_from(duration)
            .map_err(|_| StoreError::Decode(format!("negative duration {}", duration)))?,
        stipend: row.try_get("stipend")?,
        start_date: row.try_get("start_date")?,
        application_deadline: row.try_get("application_deadline")?,
        is_active: row.try_get("is_active")?,
        is_published: row.try_get("is_published")?,
    })
}

fn intern_from_row(row: &PgRow) -> Result<InternProfile, StoreError> {
    let skill_ids: Vec<i64> = row.try_get("skill_ids")?;
    let industry_ids: Vec<i64> = row.try_get("industry_ids")?;
    let Json(preferred_locations): Json<Vec<Location>> = row.try_get("preferred_locations")?;

    Ok(InternProfile {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        email: row.try_get("email")?,
        email_confirmed: row.try_get("email_confirmed")?,
        full_name: row.try_get("full_name")?,
        phone: row.try_get("phone")?,
        bio: row.try_get("bio")?,
        current_municipality: row.try_get("current_municipality")?,
        current_province: row.try_get("current_province")?,
        skill_ids: skill_ids.into_iter().collect(),
        industry_ids: industry_ids.into_iter().collect(),
        preferred_locations,
        education_count: to_count(row.try_get("education_count")?),
        experience_count: to_count(row.try_get("experience_count")?),
    })
}

impl CandidateStore for PostgresClient {
    /// Active and published postings, newest first
    async fn listed_postings(&self) -> Result<Vec<Posting>, StoreError> {
        let query = format!(
            r#"
            SELECT {POSTING_COLUMNS}
            FROM core_internshippost p
            JOIN core_employerprofile e ON e.id = p.employer_id
            WHERE p.is_active = TRUE AND p.is_published = TRUE
            ORDER BY p.created_at DESC, p.id
            "#
        );

        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;
        let postings = rows.iter().map(posting_from_row).collect::<Result<Vec<_>, _>>()?;

        tracing::debug!("Fetched {} listed postings", postings.len());
        Ok(postings)
    }

    /// Intern profiles whose user confirmed their email, newest first
    async fn confirmed_interns(&self) -> Result<Vec<InternProfile>, StoreError> {
        let query = format!(
            r#"
            SELECT {INTERN_COLUMNS}
            FROM core_internprofile ip
            JOIN accounts_customuser u ON u.id = ip.user_id
            WHERE u.email_confirmed = TRUE
            ORDER BY ip.created_at DESC, ip.id
            "#
        );

        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;
        let interns = rows.iter().map(intern_from_row).collect::<Result<Vec<_>, _>>()?;

        tracing::debug!("Fetched {} confirmed interns", interns.len());
        Ok(interns)
    }

    async fn intern_profile(&self, id: i64) -> Result<InternProfile, StoreError> {
        let query = format!(
            r#"
            SELECT {INTERN_COLUMNS}
            FROM core_internprofile ip
            JOIN accounts_customuser u ON u.id = ip.user_id
            WHERE ip.id = $1
            "#
        );

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("intern profile {}", id)))?;

        intern_from_row(&row)
    }

    async fn employer_profile(&self, id: i64) -> Result<EmployerProfile, StoreError> {
        let query = r#"
            SELECT
                e.id::bigint AS id,
                e.company_name,
                e.municipality,
                e.province,
                ARRAY(
                    SELECT i.industry_id::bigint
                    FROM core_employerprofile_industries i
                    WHERE i.employerprofile_id = e.id
                ) AS industry_ids
            FROM core_employerprofile e
            WHERE e.id = $1
        "#;

        let row = sqlx::query(query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("employer profile {}", id)))?;

        let industry_ids: Vec<i64> = row.try_get("industry_ids")?;

        Ok(EmployerProfile {
            id: row.try_get("id")?,
            company_name: row.try_get("company_name")?,
            municipality: row.try_get("municipality")?,
            province: row.try_get("province")?,
            industry_ids: industry_ids.into_iter().collect::<HashSet<_>>(),
        })
    }

    /// Health check for the database connection
    async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
