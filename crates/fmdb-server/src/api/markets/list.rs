//! GET /api/v1/markets — full market list, ordered by name.

use axum::{extract::State, Extension, Json};

use crate::middleware::RequestId;

use super::super::{map_db_error, ApiError, ApiResponse, AppState, ResponseMeta};
use super::MarketItem;

pub(in crate::api) async fn list_markets(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<Vec<MarketItem>>>, ApiError> {
    let rows = fmdb_db::list_markets(&state.pool)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let data: Vec<MarketItem> = rows.into_iter().map(MarketItem::from).collect();

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}
