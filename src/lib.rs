//! Shoe Match - shoe recommendation service
//!
//! This library provides the matching-and-ranking engine that turns a shoe
//! catalog and a shopper's preferences into a ranked shortlist. Records pass
//! through a filter stage (hard constraints), a scoring stage (brand and
//! color affinity) and a deterministic ranking stage.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{recommend, Recommender, ResultSet};
pub use error::{CatalogError, ValidationError};
pub use models::{
    BrandPreference, BrandPreferences, CatalogRecord, GenderLine, RecommendationRequest,
    ScoreBreakdown, ScoredCandidate, ScoringWeights, ShoeSize, Width,
};
