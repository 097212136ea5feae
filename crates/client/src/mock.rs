use async_trait::async_trait;
use mockall::mock;
use tutorcal_core::{SlotResult, TimeSlot, TimeSlotPatch};

use crate::api::SlotApi;

// Mock API for state machine tests
mock! {
    pub SlotClient {}

    #[async_trait]
    impl SlotApi for SlotClient {
        async fn list(&self) -> SlotResult<Vec<TimeSlot>>;
        async fn get(&self, id: &str) -> SlotResult<TimeSlot>;
        async fn create(&self, patch: TimeSlotPatch) -> SlotResult<TimeSlot>;
        async fn update(&self, id: &str, patch: TimeSlotPatch) -> SlotResult<TimeSlot>;
        async fn delete(&self, id: &str) -> SlotResult<()>;
    }
}
