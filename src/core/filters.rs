use crate::models::{CatalogRecord, RecommendationRequest};

/// Check if a record satisfies every hard constraint of the request
///
/// A record passes when its gender line, size availability, width and brand
/// rules all fit. Failing any one of them drops the record.
#[inline]
pub fn matches_request(record: &CatalogRecord, request: &RecommendationRequest) -> bool {
    matches_gender(record, request)
        && matches_size(record, request)
        && matches_width(record, request)
        && matches_brand_rules(record, request)
}

/// Gender line equals the target, or the record is Unisex
#[inline]
pub fn matches_gender(record: &CatalogRecord, request: &RecommendationRequest) -> bool {
    record.gender_line.satisfies(request.target_gender)
}

/// Exact membership on the half-size grid, no substitution
#[inline]
pub fn matches_size(record: &CatalogRecord, request: &RecommendationRequest) -> bool {
    record.has_size(request.target_size)
}

/// Records without a declared width fit any target width
#[inline]
pub fn matches_width(record: &CatalogRecord, request: &RecommendationRequest) -> bool {
    match (request.target_width, record.width) {
        (None, _) | (Some(_), None) => true,
        (Some(target), Some(width)) => target == width,
    }
}

/// Check brand eligibility and the brand's model rules
///
/// With no brand preferences every brand is eligible. Otherwise the brand
/// must be a key, none of its exclude rules may match the model, and when it
/// lists models to include at least one of them must match.
pub fn matches_brand_rules(record: &CatalogRecord, request: &RecommendationRequest) -> bool {
    if request.brand_preferences.is_empty() {
        return true;
    }

    let Some(preference) = request.brand_preferences.get(&record.brand) else {
        return false;
    };

    if preference.excludes(&record.model) {
        return false;
    }

    preference.include_models.is_empty() || preference.includes(&record.model)
}

/// Run the filter stage over a catalog, preserving catalog order
pub fn filter_catalog<'a>(
    catalog: &'a [CatalogRecord],
    request: &RecommendationRequest,
) -> Vec<&'a CatalogRecord> {
    catalog
        .iter()
        .filter(|record| matches_request(record, request))
        .collect()
}
