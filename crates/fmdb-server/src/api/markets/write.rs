//! Mutating market routes (bearer auth): create, full replace, delete.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use serde::Deserialize;

use fmdb_core::geo::Coordinates;
use fmdb_db::{DbError, MarketRecord};

use crate::middleware::RequestId;

use super::super::{map_db_error, ApiError, ApiResponse, AppState, ResponseMeta};
use super::MarketItem;

/// Full field set for POST and PUT. Both routes replace the whole record, so
/// they share one body shape.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub(in crate::api) struct MarketBody {
    name: String,
    address: String,
    state: String,
    zip_code: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    usda_listing_id: Option<String>,
    phone: Option<String>,
    website: Option<String>,
    image_url: Option<String>,
    google_maps_link: Option<String>,
    google_place_id: Option<String>,
    rating: Option<f64>,
    #[serde(default)]
    products: Vec<String>,
}

impl MarketBody {
    /// Validate and normalize into a storage record. The state code is
    /// uppercased here so region search stays a plain equality match.
    fn into_record(self, request_id: &str) -> Result<MarketRecord, ApiError> {
        let invalid =
            |message: String| ApiError::new(request_id, "validation_error", message);

        let name = self.name.trim().to_owned();
        if name.is_empty() || name.len() > 200 {
            return Err(invalid("'name' must be 1-200 characters".to_owned()));
        }

        let address = self.address.trim().to_owned();
        if address.is_empty() || address.len() > 500 {
            return Err(invalid("'address' must be 1-500 characters".to_owned()));
        }

        let state = self.state.trim().to_uppercase();
        if state.len() != 2 || !state.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(invalid(format!(
                "'state' must be a 2-letter code, got '{}'",
                self.state
            )));
        }

        if let Some(ref zip) = self.zip_code {
            if zip.len() != 5 || !zip.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid(format!(
                    "'zipCode' must be exactly 5 digits, got '{zip}'"
                )));
            }
        }

        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => {
                Coordinates::new(lat, lng).map_err(|e| invalid(e.to_string()))?;
            }
            (None, None) => {}
            _ => {
                return Err(invalid(
                    "'latitude' and 'longitude' must be provided together".to_owned(),
                ));
            }
        }

        if let Some(rating) = self.rating {
            if !(0.0..=5.0).contains(&rating) {
                return Err(invalid(format!(
                    "'rating' must be between 0 and 5, got {rating}"
                )));
            }
        }

        if let Some(ref website) = self.website {
            reqwest::Url::parse(website)
                .map_err(|_| invalid(format!("'website' is not a valid URL: '{website}'")))?;
        }

        Ok(MarketRecord {
            name,
            address,
            state,
            zip_code: self.zip_code,
            latitude: self.latitude,
            longitude: self.longitude,
            usda_listing_id: self.usda_listing_id,
            phone: self.phone,
            website: self.website,
            image_url: self.image_url,
            google_maps_link: self.google_maps_link,
            google_place_id: self.google_place_id,
            rating: self.rating,
            products: self.products,
        })
    }
}

/// Map a write-path database error, turning unique-constraint violations on
/// `(name, address)` into a 409 instead of a generic 500.
fn map_write_db_error(request_id: String, error: &DbError) -> ApiError {
    if let DbError::Sqlx(sqlx::Error::Database(db_err)) = error {
        if db_err.is_unique_violation() {
            return ApiError::new(
                request_id,
                "conflict",
                "a market with this name and address already exists",
            );
        }
    }
    map_db_error(request_id, error)
}

pub(in crate::api) async fn create_market(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<MarketBody>,
) -> Result<impl IntoResponse, ApiError> {
    let record = body.into_record(&req_id.0)?;

    let row = fmdb_db::create_market(&state.pool, &record)
        .await
        .map_err(|e| map_write_db_error(req_id.0.clone(), &e))?;

    tracing::info!(id = row.id, name = %row.name, "market created");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            data: MarketItem::from(row),
            meta: ResponseMeta::new(req_id.0),
        }),
    ))
}

pub(in crate::api) async fn replace_market(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<MarketBody>,
) -> Result<Json<ApiResponse<MarketItem>>, ApiError> {
    let record = body.into_record(&req_id.0)?;

    let row = fmdb_db::replace_market(&state.pool, id, &record)
        .await
        .map_err(|e| map_write_db_error(req_id.0.clone(), &e))?
        .ok_or_else(|| {
            ApiError::new(req_id.0.clone(), "not_found", format!("market {id} not found"))
        })?;

    tracing::info!(id = row.id, name = %row.name, "market replaced");

    Ok(Json(ApiResponse {
        data: MarketItem::from(row),
        meta: ResponseMeta::new(req_id.0),
    }))
}

#[derive(Debug, serde::Serialize)]
pub(in crate::api) struct DeleteAck {
    pub message: &'static str,
}

pub(in crate::api) async fn delete_market(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<DeleteAck>>, ApiError> {
    let removed = fmdb_db::delete_market(&state.pool, id)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    if !removed {
        return Err(ApiError::new(
            req_id.0,
            "not_found",
            format!("market {id} not found"),
        ));
    }

    tracing::info!(id, "market deleted");

    Ok(Json(ApiResponse {
        data: DeleteAck {
            message: "Market deleted successfully",
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(name: &str, state: &str) -> MarketBody {
        MarketBody {
            name: name.to_owned(),
            address: "1 Main St".to_owned(),
            state: state.to_owned(),
            zip_code: None,
            latitude: None,
            longitude: None,
            usda_listing_id: None,
            phone: None,
            website: None,
            image_url: None,
            google_maps_link: None,
            google_place_id: None,
            rating: None,
            products: vec![],
        }
    }

    #[test]
    fn into_record_uppercases_state() {
        let record = body("Market", "ny").into_record("req").expect("valid body");
        assert_eq!(record.state, "NY");
    }

    #[test]
    fn into_record_rejects_blank_name() {
        let result = body("   ", "NY").into_record("req");
        assert!(result.is_err());
    }

    #[test]
    fn into_record_rejects_three_letter_state() {
        let result = body("Market", "NEW").into_record("req");
        assert!(result.is_err());
    }

    #[test]
    fn into_record_rejects_longitude_without_latitude() {
        let mut b = body("Market", "NY");
        b.longitude = Some(-73.99);
        assert!(b.into_record("req").is_err());
    }

    #[test]
    fn into_record_rejects_out_of_range_rating() {
        let mut b = body("Market", "NY");
        b.rating = Some(5.5);
        assert!(b.into_record("req").is_err());
    }

    #[test]
    fn into_record_rejects_malformed_website() {
        let mut b = body("Market", "NY");
        b.website = Some("not a url".to_owned());
        assert!(b.into_record("req").is_err());
    }

    #[test]
    fn into_record_accepts_full_point() {
        let mut b = body("Market", "NY");
        b.latitude = Some(40.7359);
        b.longitude = Some(-73.9911);
        assert!(b.into_record("req").is_ok());
    }
}
