//! Market directory API handlers.
//!
//! - `GET /api/v1/markets`             — full market list
//! - `GET /api/v1/markets/search`      — postal / region / proximity search
//! - `GET /api/v1/markets/{id}`        — single market
//! - `POST /api/v1/markets`            — create (bearer auth)
//! - `PUT /api/v1/markets/{id}`        — full replace (bearer auth)
//! - `DELETE /api/v1/markets/{id}`     — delete (bearer auth)

mod detail;
mod list;
mod search;
mod write;

pub(super) use detail::get_market;
pub(super) use list::list_markets;
pub(super) use search::search_markets;
pub(super) use write::{create_market, delete_market, replace_market};

use serde::Serialize;

use fmdb_db::MarketRow;

/// Wire representation of a market. `distance_miles` is populated only by
/// proximity search; all other routes omit it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct MarketItem {
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
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_miles: Option<f64>,
}

impl From<MarketRow> for MarketItem {
    fn from(row: MarketRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            address: row.address,
            state: row.state,
            zip_code: row.zip_code,
            latitude: row.latitude,
            longitude: row.longitude,
            usda_listing_id: row.usda_listing_id,
            phone: row.phone,
            website: row.website,
            image_url: row.image_url,
            google_maps_link: row.google_maps_link,
            google_place_id: row.google_place_id,
            rating: row.rating,
            products: row.products,
            distance_miles: None,
        }
    }
}
