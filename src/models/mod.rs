// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    EmployerProfile, IndustryId, InternProfile, Location, LocationId, MatchResult,
    Posting, ScoreBreakdown, ScoringWeights, SkillId, WeightsError,
};
pub use requests::{InternSearchParams, ParamError, PostingSearchParams};
pub use responses::{ErrorResponse, ExploreEntry, ExploreResponse, HealthResponse, PostingCard};
