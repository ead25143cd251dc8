use crate::core::{filters::filter_catalog, ranking::ResultSet, scoring::calculate_match_score};
use crate::error::ValidationError;
use crate::models::{
    BrandPreferences, CatalogRecord, GenderLine, RecommendationRequest, ScoredCandidate,
    ScoringWeights, ShoeSize, Width,
};

/// Main recommendation orchestrator
///
/// # Pipeline Stages
/// 1. Request validation
/// 2. Hard-constraint filtering (gender, size, width, brand rules)
/// 3. Brand and color scoring
/// 4. Ranking
///
/// The recommender holds only its weights, so a single instance can be
/// shared across threads and calls.
#[derive(Debug, Clone)]
pub struct Recommender {
    weights: ScoringWeights,
}

impl Recommender {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Rank the catalog against a request
    ///
    /// # Arguments
    /// * `catalog` - Every record to consider; never modified
    /// * `request` - The shopper's preferences
    ///
    /// # Returns
    /// A ResultSet borrowing from `catalog`, or a validation error when the
    /// request is malformed. An empty catalog gives an empty ResultSet.
    pub fn recommend<'a>(
        &self,
        catalog: &'a [CatalogRecord],
        request: &RecommendationRequest,
    ) -> Result<ResultSet<'a>, ValidationError> {
        request.validate()?;

        let candidates = filter_catalog(catalog, request);

        tracing::debug!(
            "{} of {} catalog records passed filtering",
            candidates.len(),
            catalog.len()
        );

        let scored: Vec<ScoredCandidate<'a>> = candidates
            .into_iter()
            .map(|record| {
                let (score, breakdown) = calculate_match_score(record, request, &self.weights);
                ScoredCandidate {
                    record,
                    score,
                    breakdown,
                }
            })
            .collect();

        Ok(ResultSet::new(scored, catalog.len()))
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

/// Recommend with default weights from loose arguments
///
/// Absent brand preferences place no brand restriction; absent color
/// preferences apply no color weighting.
pub fn recommend<'a>(
    catalog: &'a [CatalogRecord],
    target_gender: GenderLine,
    target_size: f64,
    target_width: Option<Width>,
    brand_preferences: Option<BrandPreferences>,
    color_preferences: Option<Vec<String>>,
) -> Result<ResultSet<'a>, ValidationError> {
    let mut request = RecommendationRequest::new(target_gender, ShoeSize::try_from(target_size)?)
        .with_brand_preferences(brand_preferences.unwrap_or_default())
        .with_colors(color_preferences.unwrap_or_default());

    if let Some(width) = target_width {
        request = request.with_width(width);
    }

    Recommender::with_default_weights().recommend(catalog, &request)
}
