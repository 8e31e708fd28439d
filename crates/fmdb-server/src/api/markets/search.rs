//! GET /api/v1/markets/search — postal / region / proximity search.
//!
//! Raw query parameters are resolved into a single `SearchCriteria` variant
//! in `fmdb_core::search`; this handler only dispatches the resolved variant
//! to the matching storage query. The proximity variant pulls a coarse
//! bounding-box candidate set from Postgres and hands it to
//! `fmdb_core::geo::rank_by_distance` for exact filtering and ordering.

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;

use fmdb_core::geo::{bounding_box, rank_by_distance, Coordinates};
use fmdb_core::search::{RawSearchQuery, SearchCriteria};
use fmdb_db::MarketRow;

use crate::middleware::RequestId;

use super::super::{map_db_error, ApiError, ApiResponse, AppState, ResponseMeta};
use super::MarketItem;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(in crate::api) struct SearchParams {
    postal_code: Option<String>,
    region_code: Option<String>,
    lat: Option<String>,
    lng: Option<String>,
    radius: Option<String>,
}

pub(in crate::api) async fn search_markets(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<Vec<MarketItem>>>, ApiError> {
    let raw = RawSearchQuery {
        postal_code: params.postal_code.as_deref(),
        region_code: params.region_code.as_deref(),
        lat: params.lat.as_deref(),
        lng: params.lng.as_deref(),
        radius: params.radius.as_deref(),
    };
    let criteria = SearchCriteria::resolve(&raw)
        .map_err(|e| ApiError::new(req_id.0.clone(), "validation_error", e.to_string()))?;

    let data = match criteria {
        SearchCriteria::PostalCode(zip) => fmdb_db::find_markets_by_zip(&state.pool, &zip)
            .await
            .map_err(|e| map_db_error(req_id.0.clone(), &e))?
            .into_iter()
            .map(MarketItem::from)
            .collect(),
        SearchCriteria::Region(region) => fmdb_db::find_markets_by_state(&state.pool, &region)
            .await
            .map_err(|e| map_db_error(req_id.0.clone(), &e))?
            .into_iter()
            .map(MarketItem::from)
            .collect(),
        SearchCriteria::Near {
            origin,
            radius_miles,
        } => search_near(&state, origin, radius_miles, &req_id.0).await?,
        SearchCriteria::Unfiltered => fmdb_db::list_markets(&state.pool)
            .await
            .map_err(|e| map_db_error(req_id.0.clone(), &e))?
            .into_iter()
            .map(MarketItem::from)
            .collect(),
    };

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

async fn search_near(
    state: &AppState,
    origin: Coordinates,
    radius_miles: f64,
    request_id: &str,
) -> Result<Vec<MarketItem>, ApiError> {
    let bbox = bounding_box(origin, radius_miles);
    let rows = fmdb_db::list_markets_in_bbox(&state.pool, &bbox)
        .await
        .map_err(|e| map_db_error(request_id.to_owned(), &e))?;

    // The bbox query only returns rows with both coordinates set, but the
    // row type still carries them as Options; rows lacking a point are
    // excluded from ranking rather than defaulted.
    let candidates: Vec<(MarketRow, Coordinates)> = rows
        .into_iter()
        .filter_map(|row| {
            let point = match (row.latitude, row.longitude) {
                (Some(lat), Some(lng)) => Coordinates::new(lat, lng).ok(),
                _ => None,
            };
            point.map(|p| (row, p))
        })
        .collect();

    let ranked = rank_by_distance(origin, candidates, radius_miles, |(_, point)| *point);

    Ok(ranked
        .into_iter()
        .map(|m| {
            let mut item = MarketItem::from(m.item.0);
            item.distance_miles = Some(m.distance_miles);
            item
        })
        .collect())
}
