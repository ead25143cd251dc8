use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::ValidationError;
use crate::models::domain::{BrandPreferences, RecommendationRequest, ShoeSize};

/// Request to get shoe recommendations
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "target_gender", rename = "targetGender")]
    pub target_gender: String,
    #[serde(alias = "target_size", rename = "targetSize")]
    pub target_size: f64,
    #[serde(default)]
    #[serde(alias = "target_width", rename = "targetWidth")]
    pub target_width: Option<String>,
    #[serde(default)]
    #[serde(alias = "brand_preferences", rename = "brandPreferences")]
    pub brand_preferences: BrandPreferences,
    #[serde(default)]
    #[serde(alias = "color_preferences", rename = "colorPreferences")]
    pub color_preferences: Vec<String>,
    #[serde(default)]
    #[serde(alias = "top_k", rename = "limit")]
    pub limit: Option<u16>,
}

impl TryFrom<&RecommendRequest> for RecommendationRequest {
    type Error = ValidationError;

    fn try_from(req: &RecommendRequest) -> Result<Self, Self::Error> {
        let gender = req.target_gender.parse()?;
        let size = ShoeSize::try_from(req.target_size)?;

        let mut request = RecommendationRequest::new(gender, size)
            .with_brand_preferences(req.brand_preferences.clone())
            .with_colors(&req.color_preferences);

        // A blank width is treated the same as no width
        if let Some(width) = req.target_width.as_deref().filter(|w| !w.trim().is_empty()) {
            request = request.with_width(width.parse()?);
        }

        request.validate()?;
        Ok(request)
    }
}
