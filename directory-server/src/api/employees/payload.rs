//! Request body extractor for employee writes

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use http::header::CONTENT_TYPE;
use serde_json::{Map, Value};
use shared::{AppError, EmployeeProfile, ErrorCode};

/// Employee record sent to `POST` / `PUT`
///
/// Any JSON object is accepted and off-type fields are stored as sent. A body
/// without a JSON content type counts as an empty object. A client `id` is
/// dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeePayload(pub EmployeeProfile);

fn is_json(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .is_some_and(|mime| {
            let mime = mime.trim();
            mime == "application/json" || mime.ends_with("+json")
        })
}

impl<S: Send + Sync> FromRequest<S> for EmployeePayload {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let json = is_json(&req);
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::with_message(ErrorCode::InvalidRequest, e.body_text()))?;

        let fields = if json && !bytes.is_empty() {
            serde_json::from_slice::<Map<String, Value>>(&bytes).map_err(|e| {
                tracing::debug!(error = %e, "Rejected employee payload");
                AppError::new(ErrorCode::InvalidRequest)
            })?
        } else {
            Map::new()
        };

        Ok(Self(EmployeeProfile::from(fields).without_id()))
    }
}
