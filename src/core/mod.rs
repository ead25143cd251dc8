// Core algorithm exports
pub mod filters;
pub mod ranking;
pub mod recommender;
pub mod scoring;

pub use filters::{filter_catalog, matches_brand_rules, matches_request};
pub use ranking::ResultSet;
pub use recommender::{recommend, Recommender};
pub use scoring::{calculate_brand_affinity, calculate_color_affinity, calculate_match_score};
