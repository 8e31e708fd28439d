//! POST /api/v1/contact — market listing request form.
//!
//! Validation failures reject the request, but a relay failure does not: the
//! submission is already acknowledged to the visitor, so delivery problems
//! are logged for the operator instead of bounced back to the form.

use axum::{extract::State, Extension, Json};
use serde::Serialize;

use fmdb_mailer::{render_contact_email, ContactForm};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct ContactAck {
    pub success: bool,
    pub message: &'static str,
}

pub(super) async fn submit_contact_form(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(form): Json<ContactForm>,
) -> Result<Json<ApiResponse<ContactAck>>, ApiError> {
    form.validate()
        .map_err(|e| ApiError::new(req_id.0.clone(), "validation_error", e.to_string()))?;

    let contact = &state.contact;
    let email = render_contact_email(&form, &contact.sender, &contact.recipient);

    match contact.mailer.as_deref() {
        Some(mailer) => {
            if let Err(e) = mailer.send(&email).await {
                tracing::error!(
                    error = %e,
                    market = %form.market_name,
                    "contact email relay failed; submission acknowledged anyway"
                );
            }
        }
        None => {
            tracing::info!(
                market = %form.market_name,
                from = %form.email,
                "contact submission received (no mail relay configured)"
            );
        }
    }

    Ok(Json(ApiResponse {
        data: ContactAck {
            success: true,
            message: "Thank you for your interest! We will review your market listing request.",
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}
