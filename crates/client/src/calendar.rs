//! # Booking Calendar
//!
//! Async driver around [`CalendarState`]. Loads weeks from a [`SlotApi`],
//! falls back to a locally generated week when the store is unreachable, and
//! persists confirmed bookings on a background task.

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use tutorcal_core::{BookingFormData, SlotResult, TimeSlot, ViewMode, generator::generate_week};

use crate::{
    api::SlotApi,
    notify::{Notification, Notifier},
    state::{CalendarState, SlotStats},
};

/// Where the currently displayed week came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Remote,
    /// Generated locally after the store failed. Never written back.
    Fallback,
}

/// Result of one background persistence attempt.
#[derive(Debug)]
pub struct PersistOutcome {
    pub slot_id: String,
    pub result: SlotResult<TimeSlot>,
}

impl PersistOutcome {
    pub fn is_persisted(&self) -> bool {
        self.result.is_ok()
    }
}

pub struct BookingCalendar<A: SlotApi + 'static> {
    api: Arc<A>,
    notifier: Arc<dyn Notifier>,
    state: CalendarState,
}

impl<A: SlotApi + 'static> BookingCalendar<A> {
    pub fn new(api: Arc<A>, notifier: Arc<dyn Notifier>, reference: NaiveDate) -> Self {
        Self {
            api,
            notifier,
            state: CalendarState::new(reference),
        }
    }

    pub fn state(&self) -> &CalendarState {
        &self.state
    }

    /// Fetches the slot collection and installs it.
    ///
    /// Any failure installs `generate_week(reference)` instead and raises an
    /// error notification; the caller always ends up with a displayable week.
    pub async fn load_week(&mut self) -> LoadSource {
        match self.api.list().await {
            Ok(slots) => {
                debug!("Loaded {} slots", slots.len());
                self.state.replace_slots(slots);
                LoadSource::Remote
            }
            Err(err) => {
                warn!("Error fetching slots: {}", err);
                self.state
                    .replace_slots(generate_week(self.state.reference()));
                self.notifier
                    .notify(Notification::error("Could not fetch slots. Using default data."));
                LoadSource::Fallback
            }
        }
    }

    pub fn select_slot(&mut self, day: &str, time: &str) -> bool {
        self.state.select_slot(day, time)
    }

    pub fn close_dialog(&mut self) {
        self.state.close_dialog();
    }

    pub fn switch_view_mode(&mut self, mode: ViewMode) {
        self.state.switch_view_mode(mode);
    }

    pub fn stats(&self) -> SlotStats {
        self.state.stats()
    }

    /// Books the selected slot locally, then persists it in the background.
    ///
    /// The returned handle resolves once the single persistence attempt
    /// finishes. Awaiting it is optional; pass the outcome to [`Self::settle`]
    /// to update the slot's phase.
    ///
    /// # Errors
    ///
    /// Returns the validation error from [`CalendarState::confirm_booking`];
    /// nothing is sent in that case.
    pub fn confirm_booking(
        &mut self,
        form: &BookingFormData,
    ) -> SlotResult<JoinHandle<PersistOutcome>> {
        let pending = self.state.confirm_booking(form)?;
        info!(
            "Booking {} for {} ({})",
            pending.slot_id, form.student_name, form.subject
        );

        let api = Arc::clone(&self.api);
        let notifier = Arc::clone(&self.notifier);

        Ok(tokio::spawn(async move {
            let result = api.update(&pending.slot_id, pending.patch).await;
            match &result {
                Ok(_) => notifier.notify(Notification::success("Booking successful!")),
                Err(err) => {
                    warn!("Error saving booking for {}: {}", pending.slot_id, err);
                    notifier.notify(Notification::error(
                        "Failed to save booking. Please try again.",
                    ));
                }
            }

            PersistOutcome {
                slot_id: pending.slot_id,
                result,
            }
        }))
    }

    /// Feeds a finished persistence back into the state.
    pub fn settle(&mut self, outcome: &PersistOutcome) -> bool {
        self.state
            .record_persistence(&outcome.slot_id, outcome.is_persisted())
    }

    pub async fn next_week(&mut self) -> LoadSource {
        self.state.next_week();
        self.load_week().await
    }

    pub async fn previous_week(&mut self) -> LoadSource {
        self.state.previous_week();
        self.load_week().await
    }

    pub async fn this_week(&mut self, today: NaiveDate) -> LoadSource {
        self.state.this_week(today);
        self.load_week().await
    }
}
