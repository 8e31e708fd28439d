//! Great-circle distance math and the nearest-first ranking used by the
//! market search endpoints.
//!
//! Distances are Haversine over a spherical Earth (R = 3958.8 statute miles)
//! and are rounded to one decimal place before filtering and sorting, so two
//! markets that display the same distance keep their input order.
//!
//! # Coordinate System
//!
//! - Latitude: degrees north (-90 to 90)
//! - Longitude: degrees east (-180 to 180)
//! - Distance: statute miles

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Mean Earth radius in statute miles.
pub const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Conversion factor for backing stores that take metric distances.
pub const METERS_PER_MILE: f64 = 1609.34;

#[derive(Debug, Error, PartialEq)]
pub enum GeoError {
    #[error("latitude {0} out of range (-90..90)")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} out of range (-180..180)")]
    LongitudeOutOfRange(f64),
}

/// A validated geographic point.
///
/// Construction through [`Coordinates::new`] guarantees both components are
/// finite and in range, so distance math downstream never sees a malformed
/// point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// # Errors
    ///
    /// Returns [`GeoError`] if either component is non-finite or outside the
    /// valid geographic range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(GeoError::LatitudeOutOfRange(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(GeoError::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// A latitude/longitude rectangle that fully contains a radius around a point.
///
/// Used as a cheap SQL prefilter; exact radius filtering happens in
/// [`rank_by_distance`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

// Slightly below the true minimum miles-per-degree of latitude so the box
// over-covers rather than clipping in-radius points.
const MILES_PER_DEGREE: f64 = 68.7;

/// Compute a bounding box guaranteed to contain every point within
/// `radius_miles` of `origin`.
///
/// Longitude bounds are clamped to the -180..180 range rather than wrapping
/// across the antimeridian; for a directory of US markets the wrap case does
/// not occur.
#[must_use]
pub fn bounding_box(origin: Coordinates, radius_miles: f64) -> BoundingBox {
    let lat_delta = radius_miles / MILES_PER_DEGREE;
    // Degrees of longitude shrink with latitude; clamp the cosine away from
    // zero so the box stays finite near the poles.
    let cos_lat = origin.latitude.to_radians().cos().max(0.01);
    let lng_delta = radius_miles / (MILES_PER_DEGREE * cos_lat);

    BoundingBox {
        min_latitude: (origin.latitude - lat_delta).max(-90.0),
        max_latitude: (origin.latitude + lat_delta).min(90.0),
        min_longitude: (origin.longitude - lng_delta).max(-180.0),
        max_longitude: (origin.longitude + lng_delta).min(180.0),
    }
}

/// Haversine great-circle distance between two points, in statute miles,
/// rounded to one decimal place.
#[must_use]
pub fn distance_miles(a: Coordinates, b: Coordinates) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lng = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos() * b.latitude.to_radians().cos() * (d_lng / 2.0).sin().powi(2);

    // atan2 is well-defined even when h rounds to exactly 0 or 1 (coincident
    // or antipodal points), so this never divides by zero or yields NaN.
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    round_to_tenth(EARTH_RADIUS_MILES * c)
}

/// Convert a radius in miles to meters for metric proximity operators.
#[must_use]
pub fn miles_to_meters(miles: f64) -> f64 {
    miles * METERS_PER_MILE
}

/// A candidate annotated with its computed distance from the search origin.
///
/// Transient: built per request, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedMatch<T> {
    pub item: T,
    pub distance_miles: f64,
}

/// Rank `candidates` by distance from `origin`, nearest first.
///
/// Candidates farther than `max_distance_miles` (after rounding to one
/// decimal place) are dropped; a candidate at exactly the maximum is kept.
/// The sort is stable, so equal rounded distances preserve input order.
pub fn rank_by_distance<T, F>(
    origin: Coordinates,
    candidates: Vec<T>,
    max_distance_miles: f64,
    coords_of: F,
) -> Vec<RankedMatch<T>>
where
    F: Fn(&T) -> Coordinates,
{
    let mut matches: Vec<RankedMatch<T>> = candidates
        .into_iter()
        .map(|item| {
            let distance_miles = distance_miles(origin, coords_of(&item));
            RankedMatch {
                item,
                distance_miles,
            }
        })
        .filter(|m| m.distance_miles <= max_distance_miles)
        .collect();

    matches.sort_by(|a, b| a.distance_miles.total_cmp(&b.distance_miles));
    matches
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
