use crate::core::ExploreMode;
use crate::models::domain::{MatchResult, Posting, ScoreBreakdown};
use crate::services::Exploration;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One explore result. Score and breakdown are present in ranked mode only.
#[derive(Debug, Clone, Serialize)]
pub struct ExploreEntry<T> {
    #[serde(flatten)]
    pub item: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<ScoreBreakdown>,
}

impl<T> ExploreEntry<T> {
    pub fn unranked(item: T) -> Self {
        Self {
            item,
            score: None,
            breakdown: None,
        }
    }

    pub fn ranked<C>(result: MatchResult<C>, map: impl FnOnce(C) -> T) -> Self {
        Self {
            item: map(result.candidate),
            score: Some(result.score),
            breakdown: Some(result.breakdown),
        }
    }
}

/// Posting enriched with its application window
#[derive(Debug, Clone, Serialize)]
pub struct PostingCard {
    #[serde(flatten)]
    pub posting: Posting,
    #[serde(rename = "daysUntilDeadline")]
    pub days_until_deadline: i64,
    #[serde(rename = "acceptingApplications")]
    pub accepting_applications: bool,
}

impl PostingCard {
    pub fn new(posting: Posting, today: NaiveDate) -> Self {
        Self {
            days_until_deadline: posting.days_until_deadline(today),
            accepting_applications: posting.is_accepting_applications(today),
            posting,
        }
    }
}

/// Response for the explore endpoints
#[derive(Debug, Clone, Serialize)]
pub struct ExploreResponse<T> {
    #[serde(rename = "requestId")]
    pub request_id: String,
    pub mode: ExploreMode,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
    pub results: Vec<ExploreEntry<T>>,
}

impl<T> ExploreResponse<T> {
    /// Build a response, mapping each candidate into its presented form
    pub fn from_exploration<C>(
        request_id: String,
        exploration: Exploration<C>,
        map: impl Fn(C) -> T,
    ) -> Self {
        let mode = exploration.mode();
        let (total_candidates, results) = match exploration {
            Exploration::Ranked(ranking) => (
                ranking.total_candidates,
                ranking
                    .matches
                    .into_iter()
                    .map(|m| ExploreEntry::ranked(m, &map))
                    .collect(),
            ),
            Exploration::Filtered(items) => (
                items.len(),
                items
                    .into_iter()
                    .map(|item| ExploreEntry::unranked(map(item)))
                    .collect(),
            ),
        };

        Self {
            request_id,
            mode,
            total_candidates,
            results,
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
