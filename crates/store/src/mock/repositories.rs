use async_trait::async_trait;
use mockall::mock;
use tutorcal_core::{SlotResult, TimeSlot, TimeSlotPatch};

use crate::repositories::SlotRepository;

// Mock repository for handler tests
mock! {
    pub SlotRepo {}

    #[async_trait]
    impl SlotRepository for SlotRepo {
        async fn list(&self) -> SlotResult<Vec<TimeSlot>>;
        async fn get(&self, id: &str) -> SlotResult<TimeSlot>;
        async fn create(&self, patch: TimeSlotPatch) -> SlotResult<TimeSlot>;
        async fn update(&self, id: &str, patch: TimeSlotPatch) -> SlotResult<TimeSlot>;
        async fn delete(&self, id: &str) -> SlotResult<()>;
    }
}
