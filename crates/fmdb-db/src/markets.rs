//! Database operations for the `markets` table.

use chrono::{DateTime, Utc};
use fmdb_core::geo::BoundingBox;
use sqlx::PgPool;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row and input types
// ---------------------------------------------------------------------------

const MARKET_COLUMNS: &str = "id, name, address, state, zip_code, latitude, longitude, \
     usda_listing_id, phone, website, image_url, google_maps_link, google_place_id, \
     rating, products, created_at, updated_at";

/// A row from the `markets` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MarketRow {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub state: String,
    pub zip_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub usda_listing_id: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub image_url: Option<String>,
    pub google_maps_link: Option<String>,
    pub google_place_id: Option<String>,
    pub rating: Option<f64>,
    pub products: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Field set for inserting or fully replacing a market. Validation (state
/// shape, coordinate ranges, both-or-neither point) happens at the API
/// boundary; the table constraints back it up.
#[derive(Debug, Clone)]
pub struct MarketRecord {
    pub name: String,
    pub address: String,
    pub state: String,
    pub zip_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub usda_listing_id: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub image_url: Option<String>,
    pub google_maps_link: Option<String>,
    pub google_place_id: Option<String>,
    pub rating: Option<f64>,
    pub products: Vec<String>,
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Returns all markets, ordered by name.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_markets(pool: &PgPool) -> Result<Vec<MarketRow>, DbError> {
    let rows = sqlx::query_as::<_, MarketRow>(&format!(
        "SELECT {MARKET_COLUMNS} FROM markets ORDER BY name"
    ))
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Returns a single market by id, or `None` if not found.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_market(pool: &PgPool, id: i64) -> Result<Option<MarketRow>, DbError> {
    let row = sqlx::query_as::<_, MarketRow>(&format!(
        "SELECT {MARKET_COLUMNS} FROM markets WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Returns markets whose postal code equals `zip_code` exactly, ordered by name.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn find_markets_by_zip(pool: &PgPool, zip_code: &str) -> Result<Vec<MarketRow>, DbError> {
    let rows = sqlx::query_as::<_, MarketRow>(&format!(
        "SELECT {MARKET_COLUMNS} FROM markets WHERE zip_code = $1 ORDER BY name"
    ))
    .bind(zip_code)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Returns markets in the given 2-letter state code, ordered by name.
///
/// The stored `state` column is uppercase; callers normalize before querying.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn find_markets_by_state(pool: &PgPool, state: &str) -> Result<Vec<MarketRow>, DbError> {
    let rows = sqlx::query_as::<_, MarketRow>(&format!(
        "SELECT {MARKET_COLUMNS} FROM markets WHERE state = $1 ORDER BY name"
    ))
    .bind(state)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Returns markets whose stored point falls inside the bounding box.
///
/// This is the storage half of the proximity search: a coarse rectangle
/// prefilter over the `(latitude, longitude)` index. Exact radius filtering
/// and nearest-first ordering happen in `fmdb_core::geo::rank_by_distance`,
/// so the Haversine formula lives in exactly one place.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_markets_in_bbox(
    pool: &PgPool,
    bbox: &BoundingBox,
) -> Result<Vec<MarketRow>, DbError> {
    let rows = sqlx::query_as::<_, MarketRow>(&format!(
        "SELECT {MARKET_COLUMNS} FROM markets \
         WHERE latitude BETWEEN $1 AND $2 \
           AND longitude BETWEEN $3 AND $4 \
         ORDER BY id"
    ))
    .bind(bbox.min_latitude)
    .bind(bbox.max_latitude)
    .bind(bbox.min_longitude)
    .bind(bbox.max_longitude)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Inserts a new market and returns the full inserted row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails (including unique and CHECK
/// constraint violations).
pub async fn create_market(pool: &PgPool, record: &MarketRecord) -> Result<MarketRow, DbError> {
    let row = sqlx::query_as::<_, MarketRow>(&format!(
        "INSERT INTO markets (name, address, state, zip_code, latitude, longitude, \
             usda_listing_id, phone, website, image_url, google_maps_link, google_place_id, \
             rating, products) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) \
         RETURNING {MARKET_COLUMNS}"
    ))
    .bind(&record.name)
    .bind(&record.address)
    .bind(&record.state)
    .bind(&record.zip_code)
    .bind(record.latitude)
    .bind(record.longitude)
    .bind(&record.usda_listing_id)
    .bind(&record.phone)
    .bind(&record.website)
    .bind(&record.image_url)
    .bind(&record.google_maps_link)
    .bind(&record.google_place_id)
    .bind(record.rating)
    .bind(&record.products)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Fully replaces a market's fields, returning the updated row or `None`
/// if no market has that id.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn replace_market(
    pool: &PgPool,
    id: i64,
    record: &MarketRecord,
) -> Result<Option<MarketRow>, DbError> {
    let row = sqlx::query_as::<_, MarketRow>(&format!(
        "UPDATE markets SET \
             name = $2, address = $3, state = $4, zip_code = $5, latitude = $6, \
             longitude = $7, usda_listing_id = $8, phone = $9, website = $10, \
             image_url = $11, google_maps_link = $12, google_place_id = $13, \
             rating = $14, products = $15, updated_at = NOW() \
         WHERE id = $1 \
         RETURNING {MARKET_COLUMNS}"
    ))
    .bind(id)
    .bind(&record.name)
    .bind(&record.address)
    .bind(&record.state)
    .bind(&record.zip_code)
    .bind(record.latitude)
    .bind(record.longitude)
    .bind(&record.usda_listing_id)
    .bind(&record.phone)
    .bind(&record.website)
    .bind(&record.image_url)
    .bind(&record.google_maps_link)
    .bind(&record.google_place_id)
    .bind(record.rating)
    .bind(&record.products)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Deletes a market by id. Returns `true` if a row was removed.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn delete_market(pool: &PgPool, id: i64) -> Result<bool, DbError> {
    let result = sqlx::query("DELETE FROM markets WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
