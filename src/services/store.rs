use crate::models::{EmployerProfile, InternProfile, Posting};
use thiserror::Error;

/// Errors that can occur when reading marketplace data
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid row: {0}")]
    Decode(String),
}

/// Read-only access to the profiles and postings owned by the marketplace.
///
/// Implementations return candidate universes already narrowed to eligible
/// rows: active and published postings, email-confirmed interns.
#[allow(async_fn_in_trait)]
pub trait CandidateStore {
    async fn listed_postings(&self) -> Result<Vec<Posting>, StoreError>;

    async fn confirmed_interns(&self) -> Result<Vec<InternProfile>, StoreError>;

    async fn intern_profile(&self, id: i64) -> Result<InternProfile, StoreError>;

    async fn employer_profile(&self, id: i64) -> Result<EmployerProfile, StoreError>;

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}
