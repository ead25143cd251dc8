use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::config::RecommendationSettings;
use crate::core::Recommender;
use crate::models::{
    CatalogRecord, ErrorResponse, HealthResponse, RecommendRequest, Recommendation,
    RecommendResponse, RecommendationRequest,
};
use crate::services::CatalogRepository;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Vec<CatalogRecord>>,
    pub recommender: Recommender,
    pub limits: RecommendationSettings,
    /// Absent when the catalog was supplied in memory
    pub repository: Option<Arc<CatalogRepository>>,
}

/// Configure all recommendation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/recommendations", web::post().to(recommend));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let db_healthy = match &state.repository {
        Some(repository) => repository.health_check().await.unwrap_or(false),
        None => true,
    };

    let status = if db_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        catalog_size: state.catalog.len(),
    })
}

/// Recommendations endpoint
///
/// POST /api/v1/recommendations
///
/// Request body:
/// ```json
/// {
///   "targetGender": "Women's",
///   "targetSize": 7.5,
///   "targetWidth": "medium",
///   "brandPreferences": {"nike": {"models": ["dunk"], "exclude": ["air max"]}},
///   "colorPreferences": ["pink", "white"],
///   "limit": 10
/// }
/// ```
async fn recommend(
    state: web::Data<AppState>,
    req: web::Json<RecommendRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for recommend request: field_errors={:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let request = match RecommendationRequest::try_from(&*req) {
        Ok(request) => request,
        Err(e) => {
            tracing::info!("Rejected recommend request: {}", e);
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid request".to_string(),
                message: e.to_string(),
                status_code: 400,
            });
        }
    };

    let limit = req
        .limit
        .unwrap_or(state.limits.default_limit)
        .min(state.limits.max_limit) as usize;

    tracing::info!(
        "Recommending for gender={}, size={}, width={:?}, brands={}, colors={}, limit={}",
        request.target_gender,
        request.target_size,
        request.target_width,
        request.brand_preferences.len(),
        request.color_preferences.len(),
        limit
    );

    let results = match state.recommender.recommend(&state.catalog, &request) {
        Ok(results) => results,
        Err(e) => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid request".to_string(),
                message: e.to_string(),
                status_code: 400,
            });
        }
    };

    let response = RecommendResponse {
        results: results.top(limit).iter().map(Recommendation::from).collect(),
        total_matches: results.len(),
        total_candidates: results.total_candidates(),
    };

    tracing::info!(
        "Returning {} recommendations ({} matches from {} catalog records)",
        response.results.len(),
        response.total_matches,
        response.total_candidates
    );

    HttpResponse::Ok().json(response)
}
