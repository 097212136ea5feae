use std::sync::Arc;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tutorcal_core::{Booking, DeleteSlotResponse, SlotError, TimeSlot, TimeSlotPatch};
use tutorcal_store::{SlotRepository, mock::repositories::MockSlotRepo};

use crate::test_utils::{TestContext, server_with};

#[tokio::test]
async fn test_list_slots_seeds_a_week() {
    let ctx = TestContext::new();

    let response = ctx.server.get("/slots").await;

    response.assert_status_ok();
    let slots: Vec<TimeSlot> = response.json();
    assert_eq!(slots.len(), 63);
    assert_eq!(ctx.store.list().await.unwrap(), slots);
}

#[tokio::test]
async fn test_list_slots_falls_back_with_500_on_storage_failure() {
    let mut store = MockSlotRepo::new();
    store
        .expect_list()
        .times(1)
        .returning(|| Err(SlotError::Storage(eyre::eyre!("permission denied"))));
    let server = server_with(Arc::new(store));

    let response = server.get("/slots").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let slots: Vec<TimeSlot> = response.json();
    assert_eq!(slots.len(), 63);
}

#[tokio::test]
async fn test_get_slot() {
    let ctx = TestContext::new();

    let response = ctx.server.get("/slots/monday-1000am").await;

    response.assert_status_ok();
    let slot: TimeSlot = response.json();
    assert_eq!(slot.day, "Monday");
    assert_eq!(slot.time, "10:00 AM");
    assert_eq!(slot.booking.unwrap().student_name, "Alice Johnson");
}

#[tokio::test]
async fn test_get_missing_slot_returns_404() {
    let ctx = TestContext::new();

    let response = ctx.server.get("/slots/slot-42").await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("slot-42"));
}

#[tokio::test]
async fn test_update_slot_persists_booking() {
    let ctx = TestContext::new();
    let booking = Booking::new("Zoe", "Art");

    let response = ctx
        .server
        .put("/slots/monday-1100am")
        .json(&TimeSlotPatch::book(booking.clone()))
        .await;

    response.assert_status_ok();
    let updated: TimeSlot = response.json();
    assert_eq!(updated.id, "monday-1100am");
    assert_eq!(updated.day, "Monday");
    assert_eq!(updated.time, "11:00 AM");
    assert!(!updated.is_available);
    assert_eq!(updated.booking, Some(booking));

    let fetched: TimeSlot = ctx.server.get("/slots/monday-1100am").await.json();
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn test_update_ignores_id_in_body() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .put("/slots/tuesday-900am")
        .json(&json!({ "id": "hijacked", "isAvailable": false }))
        .await;

    response.assert_status_ok();
    let updated: TimeSlot = response.json();
    assert_eq!(updated.id, "tuesday-900am");
    ctx.server.get("/slots/hijacked").await.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_missing_slot_returns_404() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .put("/slots/slot-0")
        .json(&json!({ "isAvailable": false }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_with_malformed_body_is_rejected() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .put("/slots/monday-1100am")
        .bytes("{not json".into())
        .content_type("application/json")
        .await;

    assert!(response.status_code().is_client_error());
    let slot = ctx.store.get("monday-1100am").await.unwrap();
    assert!(slot.is_available);
}

#[tokio::test]
async fn test_create_slot_assigns_server_id() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/slots")
        .json(&json!({ "id": "mine", "day": "Saturday", "time": "5:00 PM", "isAvailable": true }))
        .await;

    response.assert_status_ok();
    let created: TimeSlot = response.json();
    assert!(created.id.starts_with("slot-"));
    assert_eq!(created.day, "Saturday");

    let slots: Vec<TimeSlot> = ctx.server.get("/slots").await.json();
    assert_eq!(slots.len(), 64);
    assert_eq!(slots.last(), Some(&created));
}

#[tokio::test]
async fn test_create_slot_failure_returns_500() {
    let mut store = MockSlotRepo::new();
    store
        .expect_create()
        .times(1)
        .returning(|_| Err(SlotError::Storage(eyre::eyre!("read-only filesystem"))));
    let server = server_with(Arc::new(store));

    let response = server.post("/slots").json(&json!({})).await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("read-only filesystem"));
}

#[tokio::test]
async fn test_delete_slot_then_404() {
    let ctx = TestContext::new();

    let response = ctx.server.delete("/slots/sunday-900am").await;
    response.assert_status_ok();
    let body: DeleteSlotResponse = response.json();
    assert_eq!(body.message, "Slot deleted successfully");

    ctx.server.get("/slots/sunday-900am").await.assert_status(StatusCode::NOT_FOUND);
    ctx.server.delete("/slots/sunday-900am").await.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_and_version() {
    let ctx = TestContext::new();

    let health: Value = ctx.server.get("/health").await.json();
    let version: Value = ctx.server.get("/version").await.json();

    assert_eq!(health, json!({ "status": "ok" }));
    assert_eq!(version["version"], json!(env!("CARGO_PKG_VERSION")));
}
