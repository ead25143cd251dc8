use serde::{Deserialize, Serialize};

use crate::models::domain::{GenderLine, ScoreBreakdown, ScoredCandidate, ShoeSize, Width};

/// One recommended shoe variant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    pub brand: String,
    pub model: String,
    #[serde(rename = "genderLine")]
    pub gender_line: GenderLine,
    pub width: Option<Width>,
    pub colors: Vec<String>,
    pub sizes: Vec<ShoeSize>,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

impl From<&ScoredCandidate<'_>> for Recommendation {
    fn from(candidate: &ScoredCandidate<'_>) -> Self {
        let record = candidate.record;
        Self {
            id: record.id.clone(),
            brand: record.brand.clone(),
            model: record.model.clone(),
            gender_line: record.gender_line,
            width: record.width,
            colors: record.colors.clone(),
            sizes: record.sizes.iter().copied().collect(),
            score: candidate.score,
            breakdown: candidate.breakdown,
        }
    }
}

/// Response for the recommendations endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub results: Vec<Recommendation>,
    #[serde(rename = "totalMatches")]
    pub total_matches: usize,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "catalogSize")]
    pub catalog_size: usize,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
