pub mod file;
pub mod repositories;
pub mod seed;

pub mod mock;

pub use file::FileSlotStore;
pub use repositories::SlotRepository;

use std::sync::Arc;

pub type SharedStore = Arc<dyn SlotRepository>;

/// Opens the JSON-backed store at `path`, ready to be shared across handlers.
pub fn create_store(path: impl Into<std::path::PathBuf>) -> Arc<FileSlotStore> {
    Arc::new(FileSlotStore::new(path))
}
