//! GET /api/v1/markets/{id} — single market lookup.

use axum::{
    extract::{Path, State},
    Extension, Json,
};

use crate::middleware::RequestId;

use super::super::{map_db_error, ApiError, ApiResponse, AppState, ResponseMeta};
use super::MarketItem;

pub(in crate::api) async fn get_market(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<MarketItem>>, ApiError> {
    let row = fmdb_db::get_market(&state.pool, id)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?
        .ok_or_else(|| {
            ApiError::new(req_id.0.clone(), "not_found", format!("market {id} not found"))
        })?;

    Ok(Json(ApiResponse {
        data: MarketItem::from(row),
        meta: ResponseMeta::new(req_id.0),
    }))
}
