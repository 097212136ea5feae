use chrono::Local;
use tracing::info;
use tutorcal_core::{SlotResult, TimeSlot, generator::generate_week};

use crate::{FileSlotStore, SlotRepository};

/// Prepares the slot file before the server starts.
///
/// With `force` the file is overwritten by a freshly generated week. Otherwise
/// the ordinary self-healing read runs, which only regenerates a missing or
/// corrupt file and leaves valid data alone.
pub async fn initialize_store(store: &FileSlotStore, force: bool) -> SlotResult<Vec<TimeSlot>> {
    info!("Initializing slot store at {}", store.path().display());

    let slots = if force {
        let slots = generate_week(Local::now().date_naive());
        store.replace_all(&slots).await?;
        slots
    } else {
        store.list().await?
    };

    info!("Slot store ready with {} slots", slots.len());
    Ok(slots)
}
