//! HTTP mapping of chat errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::proxy::ChatError;

/// Message returned to clients when the completion API fails.
pub const UPSTREAM_ERROR_MESSAGE: &str = "Failed to get a response from the AI service";

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(error) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": error }))).into_response()
            }
            Self::Upstream(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": UPSTREAM_ERROR_MESSAGE,
                    "details": e.to_string(),
                })),
            )
                .into_response(),
            Self::Session(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response(),
        }
    }
}
