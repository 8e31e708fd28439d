//! Resolution of loosely-typed search parameters into a [`SearchCriteria`]
//! tagged union.
//!
//! The wire accepts `postalCode`, `regionCode`, `lat`, `lng` and `radius` as
//! optional strings; exactly one variant wins, in precedence order: postal
//! code, then region code, then coordinate+radius. Conflicting extra fields
//! are ignored, never merged.

use thiserror::Error;

use crate::geo::{Coordinates, GeoError};

/// Default search radius in miles when the coordinate variant omits one.
pub const DEFAULT_RADIUS_MILES: f64 = 10.0;

#[derive(Debug, Error, PartialEq)]
pub enum SearchError {
    #[error("'{field}' must be a number, got '{value}'")]
    InvalidNumber { field: &'static str, value: String },
    #[error(transparent)]
    CoordinateOutOfRange(#[from] GeoError),
    #[error("'radius' must be greater than zero, got {0}")]
    NonPositiveRadius(f64),
}

/// Raw query-string values, exactly as received.
#[derive(Debug, Default, Clone)]
pub struct RawSearchQuery<'a> {
    pub postal_code: Option<&'a str>,
    pub region_code: Option<&'a str>,
    pub lat: Option<&'a str>,
    pub lng: Option<&'a str>,
    pub radius: Option<&'a str>,
}

/// Resolved user intent for a single search request. Exactly one variant.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchCriteria {
    /// Exact match on a 5-digit postal code.
    PostalCode(String),
    /// Exact match on a 2-letter region code (normalized to uppercase).
    Region(String),
    /// All markets within `radius_miles` of `origin`, nearest first.
    Near {
        origin: Coordinates,
        radius_miles: f64,
    },
    /// No recognized signal: the whole collection is returned.
    ///
    /// Long-standing behavior inherited from the first version of this API:
    /// an unrecognized or empty query silently matches everything instead of
    /// erroring. Kept as an explicit variant (and pinned by tests) so a
    /// future change to reject such queries is deliberate.
    Unfiltered,
}

impl SearchCriteria {
    /// Resolve raw string parameters into one criteria variant.
    ///
    /// Values that fail to match the postal or region shape simply do not
    /// select that variant and fall through; only malformed *numeric* fields
    /// (`lat`, `lng`, `radius`), out-of-range coordinates, and non-positive
    /// radii reject the request.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] for unparseable or out-of-range numeric input.
    pub fn resolve(raw: &RawSearchQuery<'_>) -> Result<Self, SearchError> {
        if let Some(zip) = raw.postal_code.map(str::trim) {
            if is_postal_code(zip) {
                return Ok(Self::PostalCode(zip.to_owned()));
            }
        }

        if let Some(region) = raw.region_code.map(str::trim) {
            if is_region_code(region) {
                return Ok(Self::Region(region.to_uppercase()));
            }
        }

        if let (Some(lat), Some(lng)) = (raw.lat, raw.lng) {
            let latitude = parse_f64("lat", lat)?;
            let longitude = parse_f64("lng", lng)?;
            let origin = Coordinates::new(latitude, longitude)?;

            let radius_miles = match raw.radius {
                Some(r) => parse_f64("radius", r)?,
                None => DEFAULT_RADIUS_MILES,
            };
            if radius_miles <= 0.0 {
                return Err(SearchError::NonPositiveRadius(radius_miles));
            }

            return Ok(Self::Near {
                origin,
                radius_miles,
            });
        }

        Ok(Self::Unfiltered)
    }
}

fn is_postal_code(value: &str) -> bool {
    value.len() == 5 && value.bytes().all(|b| b.is_ascii_digit())
}

fn is_region_code(value: &str) -> bool {
    value.len() == 2 && value.bytes().all(|b| b.is_ascii_alphabetic())
}

fn parse_f64(field: &'static str, value: &str) -> Result<f64, SearchError> {
    let parsed = value
        .trim()
        .parse::<f64>()
        .map_err(|_| SearchError::InvalidNumber {
            field,
            value: value.to_owned(),
        })?;
    // f64::parse accepts "NaN" and "inf"; neither is a usable coordinate or radius.
    if parsed.is_finite() {
        Ok(parsed)
    } else {
        Err(SearchError::InvalidNumber {
            field,
            value: value.to_owned(),
        })
    }
}
