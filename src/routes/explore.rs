use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use std::collections::HashMap;

use crate::config::MatchingSettings;
use crate::core::Ranking;
use crate::models::{
    ErrorResponse, ExploreResponse, HealthResponse, InternSearchParams, ParamError, PostingCard,
    PostingSearchParams,
};
use crate::services::{CandidateStore, Exploration, Explorer, StoreError};

/// Application state shared across all handlers
pub struct AppState<S> {
    pub explorer: Explorer<S>,
    pub matching: MatchingSettings,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            explorer: self.explorer.clone(),
            matching: self.matching.clone(),
        }
    }
}

/// Optional result limit for the ranked match endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<usize>,
}

/// Configure all explore and match routes
pub fn configure<S: CandidateStore + 'static>(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check::<S>))
        .route("/interns/{id}/explore", web::get().to(explore_postings::<S>))
        .route("/interns/{id}/matches", web::get().to(intern_matches::<S>))
        .route("/interns/{id}/matches/preview", web::get().to(intern_preview::<S>))
        .route("/employers/{id}/explore", web::get().to(explore_interns::<S>))
        .route("/employers/{id}/matches", web::get().to(employer_matches::<S>));
}

fn request_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn today() -> chrono::NaiveDate {
    chrono::Utc::now().date_naive()
}

fn store_error(context: &str, err: StoreError) -> HttpResponse {
    match err {
        StoreError::NotFound(what) => HttpResponse::NotFound().json(ErrorResponse {
            error: "Not found".to_string(),
            message: what,
            status_code: 404,
        }),
        other => {
            tracing::error!("{}: {}", context, other);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: context.to_string(),
                message: other.to_string(),
                status_code: 500,
            })
        }
    }
}

fn param_error(err: ParamError) -> HttpResponse {
    tracing::info!("Rejected search parameters: {}", err);
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Invalid filters".to_string(),
        message: err.to_string(),
        status_code: 400,
    })
}

/// Health check endpoint
async fn health_check<S: CandidateStore>(state: web::Data<AppState<S>>) -> impl Responder {
    let healthy = state.explorer.store().health_check().await.unwrap_or(false);

    let status = if healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Intern explore endpoint
///
/// GET /api/v1/interns/{id}/explore
///
/// Without parameters the best matching postings are returned with scores.
/// Any non-empty parameter (`query`, `skills`, `industry`, `province`,
/// `municipality`, `stipend_min`, `stipend_max`, `duration_min`,
/// `duration_max`, `start_date_from`, `start_date_to`) switches to an
/// unranked filtered search.
async fn explore_postings<S: CandidateStore>(
    state: web::Data<AppState<S>>,
    path: web::Path<i64>,
    raw: web::Query<HashMap<String, String>>,
    params: web::Query<PostingSearchParams>,
) -> HttpResponse {
    let intern_id = path.into_inner();

    let (query, filters) = match params.into_inner().into_filters() {
        Ok(parsed) => parsed,
        Err(e) => return param_error(e),
    };

    let intern = match state.explorer.store().intern_profile(intern_id).await {
        Ok(intern) => intern,
        Err(e) => return store_error("Failed to fetch intern profile", e),
    };

    let exploration = match state
        .explorer
        .explore_postings(&intern, raw.values(), &query, &filters)
        .await
    {
        Ok(exploration) => exploration,
        Err(e) => return store_error("Failed to explore postings", e),
    };

    tracing::info!(
        "Returning {} postings for intern {} ({} mode)",
        exploration.len(),
        intern_id,
        exploration.mode().as_str()
    );

    let today = today();
    HttpResponse::Ok().json(ExploreResponse::from_exploration(
        request_id(),
        exploration,
        |posting| PostingCard::new(posting, today),
    ))
}

/// Employer explore endpoint
///
/// GET /api/v1/employers/{id}/explore
///
/// Filter parameters: `query`, `skills`, `industries`, `province`,
/// `municipality`, `has_experience`, `has_education`.
async fn explore_interns<S: CandidateStore>(
    state: web::Data<AppState<S>>,
    path: web::Path<i64>,
    raw: web::Query<HashMap<String, String>>,
    params: web::Query<InternSearchParams>,
) -> HttpResponse {
    let employer_id = path.into_inner();

    let (query, filters) = match params.into_inner().into_filters() {
        Ok(parsed) => parsed,
        Err(e) => return param_error(e),
    };

    let employer = match state.explorer.store().employer_profile(employer_id).await {
        Ok(employer) => employer,
        Err(e) => return store_error("Failed to fetch employer profile", e),
    };

    let exploration = match state
        .explorer
        .explore_interns(&employer, raw.values(), &query, &filters)
        .await
    {
        Ok(exploration) => exploration,
        Err(e) => return store_error("Failed to explore interns", e),
    };

    tracing::info!(
        "Returning {} interns for employer {} ({} mode)",
        exploration.len(),
        employer_id,
        exploration.mode().as_str()
    );

    HttpResponse::Ok().json(ExploreResponse::from_exploration(
        request_id(),
        exploration,
        |intern| intern,
    ))
}

async fn ranked_postings<S: CandidateStore>(
    state: &AppState<S>,
    intern_id: i64,
    limit: usize,
) -> Result<Ranking<crate::models::Posting>, HttpResponse> {
    let intern = state
        .explorer
        .store()
        .intern_profile(intern_id)
        .await
        .map_err(|e| store_error("Failed to fetch intern profile", e))?;

    state
        .explorer
        .rank_postings_for_intern(&intern, limit)
        .await
        .map_err(|e| store_error("Failed to rank postings", e))
}

fn ranked_posting_response(ranking: Ranking<crate::models::Posting>) -> HttpResponse {
    let today = today();
    HttpResponse::Ok().json(ExploreResponse::from_exploration(
        request_id(),
        Exploration::Ranked(ranking),
        |posting| PostingCard::new(posting, today),
    ))
}

/// Ranked postings for an intern
///
/// GET /api/v1/interns/{id}/matches?limit=20
async fn intern_matches<S: CandidateStore>(
    state: web::Data<AppState<S>>,
    path: web::Path<i64>,
    query: web::Query<LimitQuery>,
) -> HttpResponse {
    let limit = state
        .matching
        .cap(query.limit.unwrap_or(state.matching.default_limit));

    match ranked_postings(&state, path.into_inner(), limit).await {
        Ok(ranking) => ranked_posting_response(ranking),
        Err(response) => response,
    }
}

/// Dashboard preview: the top few postings for an intern
///
/// GET /api/v1/interns/{id}/matches/preview
async fn intern_preview<S: CandidateStore>(
    state: web::Data<AppState<S>>,
    path: web::Path<i64>,
) -> HttpResponse {
    let limit = state.matching.preview_limit;

    match ranked_postings(&state, path.into_inner(), limit).await {
        Ok(ranking) => ranked_posting_response(ranking),
        Err(response) => response,
    }
}

/// Ranked interns for an employer
///
/// GET /api/v1/employers/{id}/matches?limit=20
async fn employer_matches<S: CandidateStore>(
    state: web::Data<AppState<S>>,
    path: web::Path<i64>,
    query: web::Query<LimitQuery>,
) -> HttpResponse {
    let limit = state
        .matching
        .cap(query.limit.unwrap_or(state.matching.default_limit));

    let employer = match state.explorer.store().employer_profile(path.into_inner()).await {
        Ok(employer) => employer,
        Err(e) => return store_error("Failed to fetch employer profile", e),
    };

    match state.explorer.rank_interns_for_employer(&employer, limit).await {
        Ok(ranking) => HttpResponse::Ok().json(ExploreResponse::from_exploration(
            request_id(),
            Exploration::Ranked(ranking),
            |intern| intern,
        )),
        Err(e) => store_error("Failed to rank interns", e),
    }
}
