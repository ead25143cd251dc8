// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    BrandPreference, BrandPreferences, CatalogRecord, GenderLine, RecommendationRequest,
    ScoreBreakdown, ScoredCandidate, ScoringWeights, ShoeSize, Width,
};
pub use requests::RecommendRequest;
pub use responses::{ErrorResponse, HealthResponse, Recommendation, RecommendResponse};
