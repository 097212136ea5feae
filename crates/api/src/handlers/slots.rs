//! # Slot Handlers
//!
//! CRUD handlers over the slot collection. Every handler delegates to the
//! shared [`SlotRepository`](tutorcal_store::SlotRepository); none of them
//! validates field shapes or slot-state consistency.
//!
//! Listing never fails outright: when the store cannot be read or healed the
//! handler still answers with a freshly generated week, under a 500 status.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Local;
use std::sync::Arc;
use tracing::{error, info};
use tutorcal_core::{DeleteSlotResponse, TimeSlot, TimeSlotPatch, generator::generate_week};

use crate::{ApiState, middleware::error_handling::AppError};

/// Lists every slot.
///
/// # Endpoint
///
/// ```text
/// GET /slots
/// ```
///
/// Returns `200` with the stored array. On an I/O failure the response is
/// `500` with a best-effort generated week as the body.
#[axum::debug_handler]
pub async fn list_slots(State(state): State<Arc<ApiState>>) -> Response {
    match state.store.list().await {
        Ok(slots) => Json(slots).into_response(),
        Err(err) => {
            error!("Error reading slots: {:?}", err);
            let fallback = generate_week(Local::now().date_naive());
            (StatusCode::INTERNAL_SERVER_ERROR, Json(fallback)).into_response()
        }
    }
}

/// Creates a slot from arbitrary partial fields under a server-assigned id.
#[axum::debug_handler]
pub async fn create_slot(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<TimeSlotPatch>,
) -> Result<Json<TimeSlot>, AppError> {
    let slot = state.store.create(payload).await?;
    info!("Created slot {} ({} {})", slot.id, slot.day, slot.time);

    Ok(Json(slot))
}

#[axum::debug_handler]
pub async fn get_slot(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<TimeSlot>, AppError> {
    let slot = state.store.get(&id).await?;

    Ok(Json(slot))
}

/// Shallow-merges the payload onto an existing slot.
///
/// This is also how a booking is persisted: the client sends
/// `{"isAvailable": false, "booking": {...}}`.
#[axum::debug_handler]
pub async fn update_slot(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
    Json(payload): Json<TimeSlotPatch>,
) -> Result<Json<TimeSlot>, AppError> {
    let slot = state.store.update(&id, payload).await?;

    if let Some(booking) = &slot.booking {
        info!(
            "Slot {} now held by {} for {}",
            slot.id, booking.student_name, booking.subject
        );
    }

    Ok(Json(slot))
}

#[axum::debug_handler]
pub async fn delete_slot(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteSlotResponse>, AppError> {
    state.store.delete(&id).await?;
    info!("Deleted slot {}", id);

    Ok(Json(DeleteSlotResponse {
        message: "Slot deleted successfully".to_string(),
    }))
}
