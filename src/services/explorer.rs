use crate::core::{
    search_interns, search_postings, select_mode, ExploreMode, InternFilters, InternMatcher,
    PostingFilters, PostingMatcher, Ranking,
};
use crate::models::{EmployerProfile, InternProfile, Posting};
use crate::services::store::{CandidateStore, StoreError};
use std::sync::Arc;

/// Outcome of an explore request
#[derive(Debug, Clone)]
pub enum Exploration<C> {
    Ranked(Ranking<C>),
    Filtered(Vec<C>),
}

impl<C> Exploration<C> {
    pub fn mode(&self) -> ExploreMode {
        match self {
            Exploration::Ranked(_) => ExploreMode::Ranked,
            Exploration::Filtered(_) => ExploreMode::Filtered,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Exploration::Ranked(ranking) => ranking.matches.len(),
            Exploration::Filtered(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Entry point for browsing: ranked matching, filtered search, and the
/// per-request choice between them.
///
/// Every call reads a fresh snapshot from the store; nothing is retained
/// between calls.
pub struct Explorer<S> {
    store: Arc<S>,
    postings: PostingMatcher,
    interns: InternMatcher,
    default_limit: usize,
}

impl<S> Clone for Explorer<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            postings: self.postings.clone(),
            interns: self.interns.clone(),
            default_limit: self.default_limit,
        }
    }
}

impl<S: CandidateStore> Explorer<S> {
    pub fn new(
        store: Arc<S>,
        postings: PostingMatcher,
        interns: InternMatcher,
        default_limit: usize,
    ) -> Self {
        Self {
            store,
            postings,
            interns,
            default_limit,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Rank active, published postings for an intern
    pub async fn rank_postings_for_intern(
        &self,
        intern: &InternProfile,
        limit: usize,
    ) -> Result<Ranking<Posting>, StoreError> {
        let candidates = self.store.listed_postings().await?;
        tracing::debug!(
            "Ranking {} postings for intern {}",
            candidates.len(),
            intern.id
        );

        Ok(self.postings.rank(intern, candidates, limit))
    }

    /// Rank email-confirmed interns for an employer
    pub async fn rank_interns_for_employer(
        &self,
        employer: &EmployerProfile,
        limit: usize,
    ) -> Result<Ranking<InternProfile>, StoreError> {
        let candidates = self.store.confirmed_interns().await?;
        tracing::debug!(
            "Ranking {} interns for employer {}",
            candidates.len(),
            employer.id
        );

        Ok(self.interns.rank(employer, candidates, limit))
    }

    pub async fn search_postings(
        &self,
        query: &str,
        filters: &PostingFilters,
    ) -> Result<Vec<Posting>, StoreError> {
        let candidates = self.store.listed_postings().await?;
        Ok(search_postings(candidates, query, filters))
    }

    pub async fn search_interns(
        &self,
        query: &str,
        filters: &InternFilters,
    ) -> Result<Vec<InternProfile>, StoreError> {
        let candidates = self.store.confirmed_interns().await?;
        Ok(search_interns(candidates, query, filters))
    }

    /// Serve an intern's explore request
    ///
    /// `raw_values` are the request's parameter values as received; any
    /// non-empty value switches to filtered search.
    pub async fn explore_postings<I, V>(
        &self,
        intern: &InternProfile,
        raw_values: I,
        query: &str,
        filters: &PostingFilters,
    ) -> Result<Exploration<Posting>, StoreError>
    where
        I: IntoIterator<Item = V>,
        V: AsRef<str>,
    {
        let mode = select_mode(raw_values);
        tracing::debug!("Explore postings for intern {} in {:?} mode", intern.id, mode);

        match mode {
            ExploreMode::Ranked => self
                .rank_postings_for_intern(intern, self.default_limit)
                .await
                .map(Exploration::Ranked),
            ExploreMode::Filtered => self
                .search_postings(query, filters)
                .await
                .map(Exploration::Filtered),
        }
    }

    /// Serve an employer's explore request
    pub async fn explore_interns<I, V>(
        &self,
        employer: &EmployerProfile,
        raw_values: I,
        query: &str,
        filters: &InternFilters,
    ) -> Result<Exploration<InternProfile>, StoreError>
    where
        I: IntoIterator<Item = V>,
        V: AsRef<str>,
    {
        let mode = select_mode(raw_values);
        tracing::debug!(
            "Explore interns for employer {} in {:?} mode",
            employer.id,
            mode
        );

        match mode {
            ExploreMode::Ranked => self
                .rank_interns_for_employer(employer, self.default_limit)
                .await
                .map(Exploration::Ranked),
            ExploreMode::Filtered => self
                .search_interns(query, filters)
                .await
                .map(Exploration::Filtered),
        }
    }
}
