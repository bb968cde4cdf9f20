//! Lwazi Match - matching and search engine for the Lwazi Blue internship marketplace
//!
//! Ranks open postings for an intern and intern candidates for an employer
//! with a weighted four-factor score (skills, industry, location,
//! qualification), and serves the unranked filtered search used whenever a
//! browse request carries explicit filters.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{ExploreMode, InternFilters, InternMatcher, PostingFilters, PostingMatcher, Ranking};
pub use models::{EmployerProfile, InternProfile, MatchResult, Posting, ScoringWeights};
pub use services::{CandidateStore, Exploration, Explorer};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let matcher = PostingMatcher::default();
        assert_eq!(matcher.weights(), &ScoringWeights::default());
    }
}
