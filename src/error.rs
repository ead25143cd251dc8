use thiserror::Error;

/// Errors raised while validating a recommendation request
///
/// All of these are local to the request and surface before any catalog
/// record is looked at.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("target size must be a positive number, got {0}")]
    NonPositiveSize(f64),

    #[error("target size {0} is not on the half-size grid")]
    OffGridSize(f64),

    #[error("target size {0} is larger than any supported size")]
    SizeOutOfRange(f64),

    #[error("unknown gender line: {0:?}")]
    UnknownGender(String),

    #[error("unknown width: {0:?}")]
    UnknownWidth(String),

    #[error("brand preference keys must not be empty")]
    EmptyBrandKey,

    #[error("brand {brand:?} has an empty model rule")]
    EmptyModelRule { brand: String },

    #[error("color preferences must not contain empty entries")]
    EmptyColor,
}

/// Errors raised when a catalog record breaks its invariants
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("record {id}: brand is empty")]
    EmptyBrand { id: String },

    #[error("record {id}: model is empty")]
    EmptyModel { id: String },

    #[error("record {id}: no sizes available")]
    NoSizes { id: String },

    #[error("record {id}: gender line could not be determined")]
    UnknownGender { id: String },

    #[error("record {id}: unrecognized width {width:?}")]
    UnknownWidth { id: String, width: String },
}
