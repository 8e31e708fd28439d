use fmdb_core::markets::MarketConfig;
use sqlx::PgPool;

use crate::DbError;

/// Upsert markets from the seed file into the database.
///
/// Returns the number of markets processed (inserted or updated).
/// All upserts run inside a single transaction; if any operation fails
/// the entire batch is rolled back.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any database operation fails.
pub async fn seed_markets(pool: &PgPool, markets: &[MarketConfig]) -> Result<usize, DbError> {
    let mut tx = pool.begin().await?;
    let mut count = 0usize;

    for market in markets {
        let state = market.state.to_uppercase();

        sqlx::query(
            "INSERT INTO markets (name, address, state, zip_code, latitude, longitude, \
                 usda_listing_id, phone, website, image_url, google_maps_link, \
                 google_place_id, rating, products) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) \
             ON CONFLICT (name, address) DO UPDATE SET \
                 state = EXCLUDED.state, \
                 zip_code = EXCLUDED.zip_code, \
                 latitude = EXCLUDED.latitude, \
                 longitude = EXCLUDED.longitude, \
                 usda_listing_id = EXCLUDED.usda_listing_id, \
                 phone = EXCLUDED.phone, \
                 website = EXCLUDED.website, \
                 image_url = EXCLUDED.image_url, \
                 google_maps_link = EXCLUDED.google_maps_link, \
                 google_place_id = EXCLUDED.google_place_id, \
                 rating = EXCLUDED.rating, \
                 products = EXCLUDED.products, \
                 updated_at = NOW()",
        )
        .bind(&market.name)
        .bind(&market.address)
        .bind(&state)
        .bind(&market.zip_code)
        .bind(market.latitude)
        .bind(market.longitude)
        .bind(&market.usda_listing_id)
        .bind(&market.phone)
        .bind(&market.website)
        .bind(&market.image_url)
        .bind(&market.google_maps_link)
        .bind(&market.google_place_id)
        .bind(market.rating)
        .bind(&market.products)
        .execute(&mut *tx)
        .await?;

        count += 1;
    }

    tx.commit().await?;
    Ok(count)
}
