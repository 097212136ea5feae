use std::path::PathBuf;
use std::sync::Arc;

use pretty_assertions::assert_eq;
use rstest::rstest;
use tempfile::TempDir;
use tutorcal_core::{Booking, SlotError, SlotState, TimeSlot, TimeSlotPatch};
use tutorcal_store::{FileSlotStore, SlotRepository, seed::initialize_store};

fn temp_store() -> (TempDir, FileSlotStore) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store = FileSlotStore::new(dir.path().join("data").join("db.json"));
    (dir, store)
}

fn read_file(path: &std::path::Path) -> Vec<TimeSlot> {
    let raw = std::fs::read_to_string(path).expect("slot file should exist");
    serde_json::from_str(&raw).expect("slot file should hold a slot array")
}

#[test_log::test(tokio::test)]
async fn test_list_heals_missing_file() {
    let (_dir, store) = temp_store();

    let slots = store.list().await.expect("list should self-heal");

    assert_eq!(slots.len(), 63);
    assert_eq!(read_file(store.path()), slots);
}

#[rstest]
#[case("")]
#[case("not json at all")]
#[case(r#"{"slots": []}"#)]
#[tokio::test]
async fn test_list_heals_corrupt_file_repeatedly(#[case] contents: &str) {
    let (_dir, store) = temp_store();
    std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();

    std::fs::write(store.path(), contents).unwrap();
    let first = store.list().await.expect("first list should self-heal");

    std::fs::write(store.path(), contents).unwrap();
    let second = store.list().await.expect("second list should self-heal");

    assert_eq!(first.len(), 63);
    assert_eq!(second.len(), 63);
}

#[test_log::test(tokio::test)]
async fn test_list_skips_bad_record_without_losing_bookings() {
    let (_dir, store) = temp_store();
    store
        .update("tuesday-900am", TimeSlotPatch::book(Booking::new("Zoe", "Art")))
        .await
        .unwrap();

    let mut records: Vec<serde_json::Value> =
        serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
    records.push(serde_json::json!({"id": "x", "day": "Monday", "time": "6:00 PM"}));
    let contents = serde_json::to_string(&records).unwrap();
    std::fs::write(store.path(), &contents).unwrap();

    let slots = store.list().await.expect("list should tolerate a bad record");

    assert_eq!(slots.len(), 63);
    let booked = slots.iter().find(|slot| slot.id == "tuesday-900am").unwrap();
    assert_eq!(booked.booking.as_ref().unwrap().student_name, "Zoe");
    // Reads never rewrite a well-formed array
    assert_eq!(std::fs::read_to_string(store.path()).unwrap(), contents);

    // The next write keeps the booking and drops only the bad record
    store.delete("sunday-500pm").await.unwrap();
    let on_disk = read_file(store.path());
    assert_eq!(on_disk.len(), 62);
    assert_eq!(
        on_disk
            .iter()
            .find(|slot| slot.id == "tuesday-900am")
            .and_then(|slot| slot.booking.as_ref())
            .map(|booking| booking.student_name.as_str()),
        Some("Zoe")
    );
}

#[tokio::test]
async fn test_list_keeps_valid_empty_array() {
    let (_dir, store) = temp_store();
    store.replace_all(&[]).await.unwrap();

    assert!(store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_persisted_file_uses_camel_case() {
    let (_dir, store) = temp_store();
    store.list().await.unwrap();

    let raw = std::fs::read_to_string(store.path()).unwrap();
    assert!(raw.contains("\"isAvailable\""));
    assert!(raw.contains("\"studentName\""));
    assert!(raw.contains("\"bookingId\""));
}

#[tokio::test]
async fn test_get_missing_slot_is_not_found() {
    let (_dir, store) = temp_store();

    let result = store.get("nowhere-900am").await;

    assert!(matches!(result, Err(SlotError::NotFound(_))));
}

#[tokio::test]
async fn test_update_then_get_returns_merged_slot() {
    let (_dir, store) = temp_store();
    let before = store.get("tuesday-900am").await.unwrap();
    let booking = Booking::new("Zoe", "Art");

    let updated = store
        .update("tuesday-900am", TimeSlotPatch::book(booking.clone()))
        .await
        .unwrap();
    let fetched = store.get("tuesday-900am").await.unwrap();

    assert_eq!(updated, fetched);
    assert_eq!(fetched.id, before.id);
    assert_eq!(fetched.day, before.day);
    assert_eq!(fetched.time, before.time);
    assert!(!fetched.is_available);
    assert_eq!(fetched.booking, Some(booking));
    assert_eq!(read_file(store.path()).iter().find(|s| s.id == "tuesday-900am"), Some(&fetched));
}

#[tokio::test]
async fn test_update_can_clear_booking_explicitly() {
    let (_dir, store) = temp_store();
    let patch: TimeSlotPatch = serde_json::from_str(r#"{"isAvailable": true, "booking": null}"#).unwrap();

    let updated = store.update("monday-1000am", patch).await.unwrap();

    assert_eq!(updated.state(), SlotState::Available);
    assert!(updated.booking.is_none());
}

#[tokio::test]
async fn test_update_missing_slot_is_not_found() {
    let (_dir, store) = temp_store();

    let result = store.update("slot-0", TimeSlotPatch::default()).await;

    assert!(matches!(result, Err(SlotError::NotFound(_))));
}

#[tokio::test]
async fn test_delete_is_not_found_the_second_time() {
    let (_dir, store) = temp_store();

    store.delete("sunday-500pm").await.expect("first delete should succeed");

    assert!(matches!(store.get("sunday-500pm").await, Err(SlotError::NotFound(_))));
    assert!(matches!(store.delete("sunday-500pm").await, Err(SlotError::NotFound(_))));
    assert_eq!(store.list().await.unwrap().len(), 62);
}

#[tokio::test]
async fn test_create_assigns_unique_slot_ids() {
    let (_dir, store) = temp_store();
    let patch = TimeSlotPatch {
        day: Some("Monday".to_string()),
        time: Some("9:00 AM".to_string()),
        ..Default::default()
    };

    let first = store.create(patch.clone()).await.unwrap();
    let second = store.create(patch).await.unwrap();

    assert!(first.id.starts_with("slot-"));
    assert_ne!(first.id, second.id);
    assert_eq!(first.day, "Monday");
    assert!(first.is_available);

    let slots = store.list().await.unwrap();
    assert_eq!(slots.len(), 65);
    assert_eq!(slots[63], first);
    assert_eq!(slots[64], second);
}

#[tokio::test]
async fn test_concurrent_updates_are_not_lost() {
    let (_dir, store) = temp_store();
    let store = Arc::new(store);
    let ids: Vec<String> = store
        .list()
        .await
        .unwrap()
        .into_iter()
        .filter(|slot| slot.is_available)
        .map(|slot| slot.id)
        .collect();

    let tasks: Vec<_> = ids
        .iter()
        .cloned()
        .map(|id| {
            let store = store.clone();
            tokio::spawn(async move {
                store
                    .update(&id, TimeSlotPatch::book(Booking::new("Student", "History")))
                    .await
            })
        })
        .collect();
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let slots = store.list().await.unwrap();
    assert!(ids.iter().all(|id| {
        slots
            .iter()
            .any(|slot| &slot.id == id && slot.state() == SlotState::Booked)
    }));
}

#[tokio::test]
async fn test_initialize_store_keeps_valid_data_unless_forced() {
    let (_dir, store) = temp_store();
    store.replace_all(&[TimeSlot::available("x", "Monday", "9:00 AM")]).await.unwrap();

    let kept = initialize_store(&store, false).await.unwrap();
    assert_eq!(kept.len(), 1);

    let reset = initialize_store(&store, true).await.unwrap();
    assert_eq!(reset.len(), 63);
    assert_eq!(read_file(store.path()), reset);
}

#[tokio::test]
async fn test_store_in_unwritable_location_reports_storage_error() {
    let dir = tempfile::tempdir().unwrap();
    let blocker: PathBuf = dir.path().join("blocker");
    std::fs::write(&blocker, "a file, not a directory").unwrap();
    let store = FileSlotStore::new(blocker.join("db.json"));

    let result = store.list().await;

    assert!(matches!(result, Err(SlotError::Storage(_))));
}
