use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::{Local, Utc};
use eyre::{Result, WrapErr};
use tokio::sync::Mutex;
use tracing::{debug, warn};
use tutorcal_core::{
    SlotError, SlotResult, TimeSlot, TimeSlotPatch, generator::generate_week,
};

use crate::repositories::SlotRepository;

/// Slot collection persisted as one pretty-printed JSON array.
///
/// Each operation holds `lock` for its whole read-modify-write cycle, so
/// concurrent requests served by one instance cannot drop each other's
/// writes. Separate processes sharing the file are still last-write-wins.
pub struct FileSlotStore {
    path: PathBuf,
    lock: Mutex<()>,
    last_token: AtomicI64,
}

impl FileSlotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
            last_token: AtomicI64::new(0),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrites the whole collection.
    pub async fn replace_all(&self, slots: &[TimeSlot]) -> SlotResult<()> {
        let _guard = self.lock.lock().await;
        self.write_slots(slots).await?;
        Ok(())
    }

    /// Reads the collection, regenerating it when the file is missing, unparsable or not an array.
    async fn load(&self) -> Result<Vec<TimeSlot>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return self.heal("is missing").await;
            }
            Err(err) => {
                return Err(err)
                    .wrap_err_with(|| format!("Failed to read {}", self.path.display()));
            }
        };

        match parse_slots(&bytes) {
            Ok(slots) => {
                debug!("Loaded {} slots from {}", slots.len(), self.path.display());
                Ok(slots)
            }
            Err(SlotError::Malformed(reason)) => self.heal(&reason).await,
            Err(err) => self.heal(&err.to_string()).await,
        }
    }

    async fn heal(&self, reason: &str) -> Result<Vec<TimeSlot>> {
        warn!(
            "Slot file {} {}; regenerating the current week",
            self.path.display(),
            reason
        );
        let slots = generate_week(Local::now().date_naive());
        self.write_slots(&slots).await?;
        Ok(slots)
    }

    async fn write_slots(&self, slots: &[TimeSlot]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .wrap_err_with(|| format!("Failed to create {}", parent.display()))?;
        }

        let json = serde_json::to_vec_pretty(slots).wrap_err("Failed to serialize slots")?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .wrap_err_with(|| format!("Failed to write {}", tmp.display()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .wrap_err_with(|| format!("Failed to replace {}", self.path.display()))?;

        debug!("Wrote {} slots to {}", slots.len(), self.path.display());
        Ok(())
    }

    /// `slot-<millis>`, strictly increasing per store instance.
    fn next_slot_id(&self) -> String {
        let now = Utc::now().timestamp_millis();
        let previous = self
            .last_token
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or(now);
        format!("slot-{}", now.max(previous + 1))
    }
}

/// Parses the file body, rejecting anything that is not a JSON array.
///
/// Array elements that do not decode as slots are skipped with a warning
/// rather than failing the whole read. They are dropped from the file on the
/// next write.
fn parse_slots(bytes: &[u8]) -> SlotResult<Vec<TimeSlot>> {
    let value: serde_json::Value = serde_json::from_slice(bytes)
        .map_err(|err| SlotError::Malformed(format!("is not valid JSON ({err})")))?;

    let serde_json::Value::Array(records) = value else {
        return Err(SlotError::Malformed("does not hold an array".to_string()));
    };

    Ok(records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value(record) {
            Ok(slot) => Some(slot),
            Err(err) => {
                warn!("Skipping invalid slot record at index {}: {}", index, err);
                None
            }
        })
        .collect())
}

fn not_found(id: &str) -> SlotError {
    SlotError::NotFound(format!("Slot with ID {} not found", id))
}

#[async_trait]
impl SlotRepository for FileSlotStore {
    async fn list(&self) -> SlotResult<Vec<TimeSlot>> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?)
    }

    async fn get(&self, id: &str) -> SlotResult<TimeSlot> {
        let _guard = self.lock.lock().await;
        self.load()
            .await?
            .into_iter()
            .find(|slot| slot.id == id)
            .ok_or_else(|| not_found(id))
    }

    async fn create(&self, patch: TimeSlotPatch) -> SlotResult<TimeSlot> {
        let _guard = self.lock.lock().await;
        let mut slots = self.load().await?;

        let mut id = self.next_slot_id();
        while slots.iter().any(|slot| slot.id == id) {
            id = self.next_slot_id();
        }

        let slot = patch.into_slot(id);
        slots.push(slot.clone());
        self.write_slots(&slots).await?;

        debug!("Created slot {}", slot.id);
        Ok(slot)
    }

    async fn update(&self, id: &str, patch: TimeSlotPatch) -> SlotResult<TimeSlot> {
        let _guard = self.lock.lock().await;
        let mut slots = self.load().await?;

        let slot = slots
            .iter_mut()
            .find(|slot| slot.id == id)
            .ok_or_else(|| not_found(id))?;
        patch.apply_to(slot);
        let updated = slot.clone();

        self.write_slots(&slots).await?;

        debug!("Updated slot {}", id);
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> SlotResult<()> {
        let _guard = self.lock.lock().await;
        let mut slots = self.load().await?;

        let initial_len = slots.len();
        slots.retain(|slot| slot.id != id);
        if slots.len() == initial_len {
            return Err(not_found(id));
        }

        self.write_slots(&slots).await?;

        debug!("Deleted slot {}", id);
        Ok(())
    }
}
