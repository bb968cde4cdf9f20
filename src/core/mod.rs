// Core algorithm exports
pub mod filters;
pub mod location;
pub mod matcher;
pub mod mode;
pub mod scoring;
pub mod search;

pub use filters::{matches_intern_filters, matches_posting_filters, InternFilters, PostingFilters};
pub use location::location_score;
pub use matcher::{InternMatcher, PostingMatcher, Ranking, DEFAULT_LIMIT};
pub use mode::{select_mode, ExploreMode};
pub use scoring::{score_intern_for_employer, score_posting_for_intern};
pub use search::{search_interns, search_postings};
