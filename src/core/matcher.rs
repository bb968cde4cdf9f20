use crate::core::scoring::{score_intern_for_employer, score_posting_for_intern};
use crate::models::{
    EmployerProfile, InternProfile, MatchResult, Posting, ScoreBreakdown, ScoringWeights,
    WeightsError,
};
use std::cmp::Ordering;

/// Default number of ranked results per request
pub const DEFAULT_LIMIT: usize = 20;

/// Result of a ranking pass
#[derive(Debug, Clone)]
pub struct Ranking<C> {
    pub matches: Vec<MatchResult<C>>,
    pub total_candidates: usize,
}

impl<C> Ranking<C> {
    fn empty(total_candidates: usize) -> Self {
        Self {
            matches: Vec::new(),
            total_candidates,
        }
    }
}

/// Score every candidate, sort by score descending and keep the top `limit`.
///
/// The sort is stable, so tied candidates keep their original order.
fn rank_by<C, F>(candidates: Vec<C>, limit: usize, score: F) -> Ranking<C>
where
    F: Fn(&C) -> (f64, ScoreBreakdown),
{
    let total_candidates = candidates.len();
    if limit == 0 {
        return Ranking::empty(total_candidates);
    }

    let mut matches: Vec<MatchResult<C>> = candidates
        .into_iter()
        .map(|candidate| {
            let (score, breakdown) = score(&candidate);
            MatchResult {
                candidate,
                score,
                breakdown,
            }
        })
        .collect();

    matches.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    matches.truncate(limit);

    Ranking {
        matches,
        total_candidates,
    }
}

fn warn_if_unbalanced(weights: &ScoringWeights) {
    let sum = weights.sum();
    if (sum - 1.0).abs() > 1e-6 {
        tracing::warn!("Scoring weights sum to {:.4} instead of 1.0: {:?}", sum, weights);
    }
}

/// Ranks open postings for an intern
#[derive(Debug, Clone)]
pub struct PostingMatcher {
    weights: ScoringWeights,
}

impl PostingMatcher {
    pub fn new(weights: ScoringWeights) -> Self {
        warn_if_unbalanced(&weights);
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    /// Build from a weight table, failing on an incomplete table
    pub fn from_table(
        table: Option<&std::collections::HashMap<String, f64>>,
    ) -> Result<Self, WeightsError> {
        Ok(Self::new(ScoringWeights::from_table(table)?))
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Rank postings for an intern
    ///
    /// # Arguments
    /// * `intern` - The intern browsing opportunities
    /// * `candidates` - Active and published postings
    /// * `limit` - Maximum number of matches to return
    pub fn rank(
        &self,
        intern: &InternProfile,
        candidates: Vec<Posting>,
        limit: usize,
    ) -> Ranking<Posting> {
        rank_by(candidates, limit, |posting| {
            score_posting_for_intern(posting, intern, &self.weights)
        })
    }
}

impl Default for PostingMatcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

/// Ranks intern candidates for an employer
#[derive(Debug, Clone)]
pub struct InternMatcher {
    weights: ScoringWeights,
}

impl InternMatcher {
    pub fn new(weights: ScoringWeights) -> Self {
        warn_if_unbalanced(&weights);
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    pub fn from_table(
        table: Option<&std::collections::HashMap<String, f64>>,
    ) -> Result<Self, WeightsError> {
        Ok(Self::new(ScoringWeights::from_table(table)?))
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Rank interns (email-confirmed) for an employer
    pub fn rank(
        &self,
        employer: &EmployerProfile,
        candidates: Vec<InternProfile>,
        limit: usize,
    ) -> Ranking<InternProfile> {
        rank_by(candidates, limit, |intern| {
            score_intern_for_employer(intern, employer, &self.weights)
        })
    }
}

impl Default for InternMatcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
