use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use crate::error::{CatalogError, ValidationError};

/// Marketed fit category of a shoe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GenderLine {
    #[serde(rename = "Men's")]
    Mens,
    #[serde(rename = "Women's")]
    Womens,
    #[serde(rename = "Unisex")]
    Unisex,
    #[serde(rename = "Kids'")]
    Kids,
}

impl GenderLine {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenderLine::Mens => "Men's",
            GenderLine::Womens => "Women's",
            GenderLine::Unisex => "Unisex",
            GenderLine::Kids => "Kids'",
        }
    }

    /// Unisex lines satisfy any target gender
    #[inline]
    pub fn satisfies(&self, target: GenderLine) -> bool {
        *self == target || *self == GenderLine::Unisex
    }
}

impl fmt::Display for GenderLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GenderLine {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "men's" | "mens" | "men" | "male" => Ok(GenderLine::Mens),
            "women's" | "womens" | "women" | "female" => Ok(GenderLine::Womens),
            "unisex" => Ok(GenderLine::Unisex),
            "kids'" | "kids" | "kid's" | "kid" => Ok(GenderLine::Kids),
            _ => Err(ValidationError::UnknownGender(s.to_string())),
        }
    }
}

/// Shoe width category, orthogonal to size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Width {
    Narrow,
    Medium,
    Wide,
    #[serde(rename = "extra wide")]
    ExtraWide,
}

impl Width {
    pub fn as_str(&self) -> &'static str {
        match self {
            Width::Narrow => "narrow",
            Width::Medium => "medium",
            Width::Wide => "wide",
            Width::ExtraWide => "extra wide",
        }
    }
}

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Width {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "narrow" => Ok(Width::Narrow),
            "medium" | "regular" | "medium (regular)" => Ok(Width::Medium),
            "wide" => Ok(Width::Wide),
            "extra wide" | "extra-wide" | "x-wide" => Ok(Width::ExtraWide),
            _ => Err(ValidationError::UnknownWidth(s.to_string())),
        }
    }
}

/// A shoe size on the half-size grid, stored as a count of half sizes
///
/// `7.5` is stored as `15`. Membership tests compare integers, so a size is
/// either in a record's size set or it is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ShoeSize(u16);

impl ShoeSize {
    pub fn from_half_sizes(halves: u16) -> Self {
        Self(halves)
    }

    pub fn half_sizes(&self) -> u16 {
        self.0
    }

    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 2.0
    }
}

impl TryFrom<f64> for ShoeSize {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() || value <= 0.0 {
            return Err(ValidationError::NonPositiveSize(value));
        }

        let halves = value * 2.0;
        if halves.round() > u16::MAX as f64 {
            return Err(ValidationError::SizeOutOfRange(value));
        }
        if (halves - halves.round()).abs() > 1e-9 {
            return Err(ValidationError::OffGridSize(value));
        }

        Ok(Self(halves.round() as u16))
    }
}

impl From<ShoeSize> for f64 {
    fn from(size: ShoeSize) -> Self {
        size.as_f64()
    }
}

impl fmt::Display for ShoeSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 2 == 0 {
            write!(f, "{}", self.0 / 2)
        } else {
            write!(f, "{}.5", self.0 / 2)
        }
    }
}

/// One purchasable shoe variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub id: String,
    pub brand: String,
    pub model: String,
    #[serde(rename = "genderLine")]
    pub gender_line: GenderLine,
    pub sizes: BTreeSet<ShoeSize>,
    #[serde(default)]
    pub width: Option<Width>,
    #[serde(default)]
    pub colors: Vec<String>,
}

impl CatalogRecord {
    /// Check the record invariants: non-empty brand, model and size set
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.brand.trim().is_empty() {
            return Err(CatalogError::EmptyBrand { id: self.id.clone() });
        }
        if self.model.trim().is_empty() {
            return Err(CatalogError::EmptyModel { id: self.id.clone() });
        }
        if self.sizes.is_empty() {
            return Err(CatalogError::NoSizes { id: self.id.clone() });
        }
        Ok(())
    }

    #[inline]
    pub fn has_size(&self, size: ShoeSize) -> bool {
        self.sizes.contains(&size)
    }
}

/// Model inclusion/exclusion rules for a single brand
///
/// Entries are matched as case-insensitive substrings of the record's model.
/// An empty include list accepts any model of the brand. Exclusion always
/// wins over inclusion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandPreference {
    #[serde(rename = "models", alias = "includeModels", default)]
    pub include_models: BTreeSet<String>,
    #[serde(rename = "exclude", alias = "excludeModels", default)]
    pub exclude_models: BTreeSet<String>,
}

impl BrandPreference {
    pub fn new<I, E, S, T>(include: I, exclude: E) -> Self
    where
        I: IntoIterator<Item = S>,
        E: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        Self {
            include_models: include.into_iter().map(|m| normalize(m.as_ref())).collect(),
            exclude_models: exclude.into_iter().map(|m| normalize(m.as_ref())).collect(),
        }
    }

    /// Accept every model of the brand
    pub fn any_model() -> Self {
        Self::default()
    }

    fn normalized(self) -> Self {
        Self::new(self.include_models, self.exclude_models)
    }

    pub fn excludes(&self, model: &str) -> bool {
        let model = model.to_lowercase();
        self.exclude_models.iter().any(|rule| model.contains(rule.as_str()))
    }

    pub fn includes(&self, model: &str) -> bool {
        let model = model.to_lowercase();
        self.include_models.iter().any(|rule| model.contains(rule.as_str()))
    }

    fn merge(&mut self, other: BrandPreference) {
        self.include_models.extend(other.include_models);
        self.exclude_models.extend(other.exclude_models);
    }
}

/// Brand rules keyed by normalized brand name
///
/// An empty map places no restriction on brands. A non-empty map makes
/// every brand that is not a key ineligible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, BrandPreference>")]
pub struct BrandPreferences(BTreeMap<String, BrandPreference>);

impl BrandPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert rules for `brand`; rules for a brand that is already present
    /// (after normalization) are merged.
    pub fn insert(&mut self, brand: &str, preference: BrandPreference) {
        self.0
            .entry(normalize(brand))
            .or_default()
            .merge(preference.normalized());
    }

    pub fn get(&self, brand: &str) -> Option<&BrandPreference> {
        self.0.get(&normalize(brand))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &BrandPreference)> {
        self.0.iter()
    }
}

impl From<BTreeMap<String, BrandPreference>> for BrandPreferences {
    fn from(map: BTreeMap<String, BrandPreference>) -> Self {
        map.into_iter().collect()
    }
}

impl<S: AsRef<str>> FromIterator<(S, BrandPreference)> for BrandPreferences {
    fn from_iter<T: IntoIterator<Item = (S, BrandPreference)>>(iter: T) -> Self {
        let mut prefs = BrandPreferences::new();
        for (brand, preference) in iter {
            prefs.insert(brand.as_ref(), preference);
        }
        prefs
    }
}

/// A shopper's recommendation query
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationRequest {
    pub target_gender: GenderLine,
    pub target_size: ShoeSize,
    pub target_width: Option<Width>,
    pub brand_preferences: BrandPreferences,
    /// Normalized color names, highest priority first
    pub color_preferences: Vec<String>,
}

impl RecommendationRequest {
    pub fn new(target_gender: GenderLine, target_size: ShoeSize) -> Self {
        Self {
            target_gender,
            target_size,
            target_width: None,
            brand_preferences: BrandPreferences::new(),
            color_preferences: Vec::new(),
        }
    }

    pub fn with_width(mut self, width: Width) -> Self {
        self.target_width = Some(width);
        self
    }

    pub fn with_brand(mut self, brand: &str, preference: BrandPreference) -> Self {
        self.brand_preferences.insert(brand, preference);
        self
    }

    pub fn with_brand_preferences(mut self, preferences: BrandPreferences) -> Self {
        self.brand_preferences = preferences;
        self
    }

    pub fn with_colors<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.color_preferences = colors.into_iter().map(|c| normalize(c.as_ref())).collect();
        self
    }

    /// Reject requests whose rules would match ambiguously
    ///
    /// An empty model rule is a substring of every model, so it would either
    /// exclude a whole brand or include all of it silently.
    pub fn validate(&self) -> Result<(), ValidationError> {
        // `from_half_sizes` bypasses the positive-size check in `try_from`
        if self.target_size.half_sizes() == 0 {
            return Err(ValidationError::NonPositiveSize(self.target_size.as_f64()));
        }

        for (brand, preference) in self.brand_preferences.iter() {
            if brand.is_empty() {
                return Err(ValidationError::EmptyBrandKey);
            }
            let has_blank_rule = preference
                .include_models
                .iter()
                .chain(preference.exclude_models.iter())
                .any(|rule| rule.is_empty());
            if has_blank_rule {
                return Err(ValidationError::EmptyModelRule { brand: brand.clone() });
            }
        }

        if self.color_preferences.iter().any(|c| c.is_empty()) {
            return Err(ValidationError::EmptyColor);
        }

        Ok(())
    }
}

/// Per-component scores behind a combined score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub brand: f64,
    pub color: f64,
}

/// A candidate that survived filtering, with its score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCandidate<'a> {
    pub record: &'a CatalogRecord,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

/// Scoring weights
///
/// `brand` and `color` weight the two affinities in the combined score.
/// `brand_only` is the brand affinity given to a record whose brand is
/// allowed without a model list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub brand: f64,
    pub color: f64,
    pub brand_only: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            brand: 0.6,
            color: 0.4,
            brand_only: 0.5,
        }
    }
}

/// Trim and lowercase a brand, model rule or color name
pub fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shoe_size_grid() {
        assert_eq!(ShoeSize::try_from(7.5).unwrap().half_sizes(), 15);
        assert_eq!(ShoeSize::try_from(8.0).unwrap().to_string(), "8");
        assert_eq!(ShoeSize::try_from(10.5).unwrap().to_string(), "10.5");
        assert_eq!(ShoeSize::try_from(7.25), Err(ValidationError::OffGridSize(7.25)));
        assert_eq!(ShoeSize::try_from(0.0), Err(ValidationError::NonPositiveSize(0.0)));
        assert_eq!(ShoeSize::try_from(40000.0), Err(ValidationError::SizeOutOfRange(40000.0)));
        assert_eq!(ShoeSize::try_from(32767.5).unwrap().half_sizes(), u16::MAX);
        assert!(ShoeSize::try_from(f64::NAN).is_err());
    }

    #[test]
    fn test_gender_parsing() {
        assert_eq!("Women's".parse::<GenderLine>().unwrap(), GenderLine::Womens);
        assert_eq!("MEN'S".parse::<GenderLine>().unwrap(), GenderLine::Mens);
        assert_eq!("female".parse::<GenderLine>().unwrap(), GenderLine::Womens);
        assert!("other".parse::<GenderLine>().is_err());
    }

    #[test]
    fn test_unisex_satisfies_any_target() {
        assert!(GenderLine::Unisex.satisfies(GenderLine::Mens));
        assert!(GenderLine::Unisex.satisfies(GenderLine::Womens));
        assert!(GenderLine::Womens.satisfies(GenderLine::Womens));
        assert!(!GenderLine::Womens.satisfies(GenderLine::Unisex));
        assert!(!GenderLine::Mens.satisfies(GenderLine::Womens));
    }

    #[test]
    fn test_width_parsing() {
        assert_eq!("Medium (Regular)".parse::<Width>().unwrap(), Width::Medium);
        assert_eq!("regular".parse::<Width>().unwrap(), Width::Medium);
        assert_eq!("Extra Wide".parse::<Width>().unwrap(), Width::ExtraWide);
        assert!("roomy".parse::<Width>().is_err());
    }

    #[test]
    fn test_brand_keys_are_normalized_and_merged() {
        let prefs: BrandPreferences = vec![
            ("  Nike ", BrandPreference::new(["Dunk"], Vec::<&str>::new())),
            ("NIKE", BrandPreference::new(Vec::<&str>::new(), ["Air Max"])),
        ]
        .into_iter()
        .collect();

        assert_eq!(prefs.len(), 1);
        let nike = prefs.get("nike").unwrap();
        assert!(nike.include_models.contains("dunk"));
        assert!(nike.exclude_models.contains("air max"));
    }

    #[test]
    fn test_brand_preferences_deserialize_normalized() {
        let prefs: BrandPreferences = serde_json::from_str(
            r#"{"Nike": {"models": ["Dunk"], "exclude": ["Air Max"]}}"#,
        )
        .unwrap();

        let nike = prefs.get("NIKE").unwrap();
        assert!(nike.includes("Dunk Low"));
        assert!(nike.excludes("AIR MAX 90"));
    }

    #[test]
    fn test_validate_rejects_blank_rules() {
        let request = RecommendationRequest::new(GenderLine::Mens, ShoeSize::from_half_sizes(20))
            .with_brand("nike", BrandPreference::new([" "], Vec::<&str>::new()));

        assert_eq!(
            request.validate(),
            Err(ValidationError::EmptyModelRule { brand: "nike".to_string() })
        );
    }

    #[test]
    fn test_validate_rejects_zero_size() {
        let request = RecommendationRequest::new(GenderLine::Womens, ShoeSize::from_half_sizes(0));

        assert_eq!(request.validate(), Err(ValidationError::NonPositiveSize(0.0)));
    }

    #[test]
    fn test_validate_rejects_blank_colors() {
        let request = RecommendationRequest::new(GenderLine::Mens, ShoeSize::from_half_sizes(20))
            .with_colors(["black", ""]);

        assert_eq!(request.validate(), Err(ValidationError::EmptyColor));
    }

    #[test]
    fn test_record_invariants() {
        let mut record = CatalogRecord {
            id: "1".to_string(),
            brand: "nike".to_string(),
            model: "dunk low".to_string(),
            gender_line: GenderLine::Womens,
            sizes: BTreeSet::new(),
            width: None,
            colors: vec![],
        };
        assert_eq!(record.validate(), Err(CatalogError::NoSizes { id: "1".to_string() }));

        record.sizes.insert(ShoeSize::from_half_sizes(15));
        assert!(record.validate().is_ok());

        record.model = "  ".to_string();
        assert_eq!(record.validate(), Err(CatalogError::EmptyModel { id: "1".to_string() }));
    }
}
