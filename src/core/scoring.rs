use crate::models::{CatalogRecord, RecommendationRequest, ScoreBreakdown, ScoringWeights};

/// Calculate a match score (0.0-1.0) for a candidate
///
/// Scoring formula:
/// score = (
///     brand_affinity * 0.6 +     # include-list hit beats "brand allowed"
///     color_affinity * 0.4       # earlier preferred colors score higher
/// )
///
/// The weights come from `ScoringWeights`; the defaults are shown above.
pub fn calculate_match_score(
    record: &CatalogRecord,
    request: &RecommendationRequest,
    weights: &ScoringWeights,
) -> (f64, ScoreBreakdown) {
    let breakdown = ScoreBreakdown {
        brand: calculate_brand_affinity(record, request, weights.brand_only),
        color: calculate_color_affinity(&record.colors, &request.color_preferences),
    };

    let total_score = breakdown.brand * weights.brand + breakdown.color * weights.color;

    (total_score.clamp(0.0, 1.0), breakdown)
}

/// Calculate brand affinity (0-1)
///
/// No brand preferences carries no signal and scores the full 1.0. An
/// include-list hit scores 1.0, and a brand accepted without a model list
/// scores `brand_only`.
#[inline]
pub fn calculate_brand_affinity(
    record: &CatalogRecord,
    request: &RecommendationRequest,
    brand_only: f64,
) -> f64 {
    if request.brand_preferences.is_empty() {
        return 1.0;
    }

    match request.brand_preferences.get(&record.brand) {
        Some(preference) if preference.includes(&record.model) => 1.0,
        Some(preference) if preference.include_models.is_empty() => brand_only,
        // Unreachable for candidates that passed the filter stage
        _ => 0.0,
    }
}

/// Calculate color affinity (0-1)
///
/// Uses the position of the highest-priority preferred color that the
/// record offers: `(N - position) / N`.
#[inline]
pub fn calculate_color_affinity(colors: &[String], preferences: &[String]) -> f64 {
    if preferences.is_empty() {
        return 1.0;
    }

    let n = preferences.len() as f64;
    preferences
        .iter()
        .position(|preferred| colors.iter().any(|c| c.eq_ignore_ascii_case(preferred)))
        .map(|position| (n - position as f64) / n)
        .unwrap_or(0.0)
}
