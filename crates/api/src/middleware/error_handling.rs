//! # Error Handling Middleware
//!
//! This module provides a standardized way to handle errors in the Tutorcal API.
//! It maps domain-specific errors to appropriate HTTP status codes and JSON
//! error responses, ensuring a consistent error handling experience across
//! the entire API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tutorcal_core::errors::SlotError;

/// Application error wrapper that provides HTTP status code mapping
///
/// `AppError` wraps domain-specific `SlotError` instances and implements
/// `IntoResponse` to convert them into HTTP responses with appropriate
/// status codes and JSON payloads.
///
/// # Example
///
/// ```
/// use axum::Json;
/// use tutorcal_api::middleware::error_handling::AppError;
/// use tutorcal_core::{TimeSlot, errors::SlotError};
///
/// async fn handler(slots: Vec<TimeSlot>, id: String) -> Result<Json<TimeSlot>, AppError> {
///     let slot = slots
///         .into_iter()
///         .find(|slot| slot.id == id)
///         .ok_or_else(|| SlotError::NotFound(format!("Slot with ID {} not found", id)))?;
///
///     Ok(Json(slot))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub SlotError);

/// Converts application errors to HTTP responses
///
/// This implementation maps each error type to the appropriate HTTP status code
/// and formats the error message into a JSON response body.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map error types to HTTP status codes
        let status = match &self.0 {
            SlotError::NotFound(_) => StatusCode::NOT_FOUND,
            SlotError::Validation(_) => StatusCode::BAD_REQUEST,
            SlotError::Transport(_) => StatusCode::BAD_GATEWAY,
            SlotError::Malformed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SlotError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SlotError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!("Request failed: {:?}", self.0);
        }

        // Get the error message and format as JSON
        let message = self.0.to_string();
        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}

/// Automatic conversion from SlotError to AppError
///
/// This implementation allows using `?` operator with functions that return
/// `Result<T, SlotError>` in handler functions that return `Result<T, AppError>`.
impl From<SlotError> for AppError {
    fn from(err: SlotError) -> Self {
        AppError(err)
    }
}

/// Automatic conversion from eyre::Report to AppError
///
/// Wraps the report in a `SlotError::Storage` variant.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(SlotError::Storage(err))
    }
}

/// Maps a SlotError to an HTTP response
///
/// Free-function form of the `IntoResponse` implementation.
///
/// # Arguments
///
/// * `err` - The SlotError to convert
///
/// # Returns
///
/// * `Response` - An HTTP response with appropriate status code and body
pub fn map_error(err: SlotError) -> Response {
    AppError(err).into_response()
}
