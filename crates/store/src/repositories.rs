use async_trait::async_trait;
use tutorcal_core::{SlotResult, TimeSlot, TimeSlotPatch};

/// Durable collection of slot records.
///
/// Every mutation reads the full collection, changes it and writes it back.
/// Implementations do not validate field shapes, `(day, time)` uniqueness or
/// the consistency of `is_available` with `booking`.
#[async_trait]
pub trait SlotRepository: Send + Sync {
    /// All slots in insertion order. Missing or corrupt backing data is
    /// replaced by a freshly generated week instead of failing.
    async fn list(&self) -> SlotResult<Vec<TimeSlot>>;

    async fn get(&self, id: &str) -> SlotResult<TimeSlot>;

    /// Appends a slot built from `patch` under a new `slot-<token>` id.
    async fn create(&self, patch: TimeSlotPatch) -> SlotResult<TimeSlot>;

    /// Shallow-merges `patch` onto the slot and returns the merged record.
    async fn update(&self, id: &str, patch: TimeSlotPatch) -> SlotResult<TimeSlot>;

    async fn delete(&self, id: &str) -> SlotResult<()>;
}
