//! # Calendar State
//!
//! The owned view model behind the booking UI. Every user action maps to one
//! synchronous method, so no two transitions can interleave. Network I/O
//! lives in [`crate::calendar`]; this module never talks to the store.
//!
//! Booking is optimistic: [`CalendarState::confirm_booking`] mutates the local
//! slot immediately and hands back the patch to persist. A later
//! [`CalendarState::record_persistence`] only updates the slot's phase and
//! never reverts the booking, so a failed save leaves the local view and the
//! store diverged until the next load.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use tutorcal_core::{
    Booking, BookingFormData, CalendarDay, SlotError, SlotResult, SlotState, TimeSlot,
    TimeSlotPatch, ViewMode,
    generator::week_days,
};

/// Where a slot stands from the student's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotPhase {
    /// Open and clickable in student mode.
    Available,
    /// Booking dialog open; nothing mutated yet.
    Selected,
    /// Booked locally, persistence in flight.
    Booked,
    /// Booked locally and confirmed by the store.
    Persisted,
    /// Booked locally but the store rejected or never received it.
    PersistFailed,
    /// Already booked when the week was loaded.
    Reserved,
    /// Administratively blocked.
    Unallotted,
}

/// Counts derived from the current slot collection.
///
/// `booked` is everything that is not available, unallotted slots included,
/// so `available + booked == total` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlotStats {
    pub total: usize,
    pub available: usize,
    pub booked: usize,
}

/// A locally applied booking waiting to be written to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingBooking {
    pub slot_id: String,
    pub patch: TimeSlotPatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Persistence {
    InFlight,
    Persisted,
    Failed,
}

#[derive(Debug, Clone)]
pub struct CalendarState {
    reference: NaiveDate,
    slots: Vec<TimeSlot>,
    view_mode: ViewMode,
    selected: Option<String>,
    persistence: HashMap<String, Persistence>,
    last_booking: Option<String>,
}

impl CalendarState {
    /// Empty student-mode state for the week containing `reference`.
    pub fn new(reference: NaiveDate) -> Self {
        Self {
            reference,
            slots: Vec::new(),
            view_mode: ViewMode::default(),
            selected: None,
            persistence: HashMap::new(),
            last_booking: None,
        }
    }

    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    pub fn slot(&self, id: &str) -> Option<&TimeSlot> {
        self.slots.iter().find(|slot| slot.id == id)
    }

    pub fn slot_at(&self, day: &str, time: &str) -> Option<&TimeSlot> {
        self.slots.iter().find(|slot| slot.is_at(day, time))
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn reference(&self) -> NaiveDate {
        self.reference
    }

    /// The slot whose booking dialog is open, if any.
    pub fn selected(&self) -> Option<&TimeSlot> {
        self.selected.as_deref().and_then(|id| self.slot(id))
    }

    /// `"<student> - <day> at <time>"` for the most recent confirmed booking.
    pub fn last_booking(&self) -> Option<&str> {
        self.last_booking.as_deref()
    }

    pub fn week_days(&self) -> Vec<CalendarDay> {
        week_days(self.reference)
    }

    /// Installs a freshly loaded week, dropping any selection and phase tracking.
    pub fn replace_slots(&mut self, slots: Vec<TimeSlot>) {
        self.slots = slots;
        self.selected = None;
        self.persistence.clear();
    }

    /// Opens the booking dialog for `(day, time)`.
    ///
    /// Only an existing, available slot in student mode can be selected.
    /// Anything else is ignored and returns `false`.
    pub fn select_slot(&mut self, day: &str, time: &str) -> bool {
        if self.view_mode != ViewMode::Student {
            return false;
        }

        match self.slot_at(day, time) {
            Some(slot) if slot.state() == SlotState::Available => {
                self.selected = Some(slot.id.clone());
                true
            }
            _ => false,
        }
    }

    pub fn close_dialog(&mut self) {
        self.selected = None;
    }

    /// Books the selected slot locally and returns the patch to persist.
    ///
    /// # Errors
    ///
    /// * `SlotError::Validation` - blank name or subject, or no slot selected
    /// * `SlotError::NotFound` - the selected slot vanished from the collection
    ///
    /// On error nothing changes and the dialog stays open.
    pub fn confirm_booking(&mut self, form: &BookingFormData) -> SlotResult<PendingBooking> {
        form.validate()?;

        let slot_id = self
            .selected
            .clone()
            .ok_or_else(|| SlotError::Validation("No slot selected".to_string()))?;
        let slot = self
            .slots
            .iter_mut()
            .find(|slot| slot.id == slot_id)
            .ok_or_else(|| SlotError::NotFound(format!("Slot with ID {} not found", slot_id)))?;

        let patch = TimeSlotPatch::book(Booking::new(&form.student_name, &form.subject));
        patch.apply_to(slot);

        self.last_booking = Some(format!(
            "{} - {} at {}",
            form.student_name, slot.day, slot.time
        ));
        self.selected = None;
        self.persistence.insert(slot_id.clone(), Persistence::InFlight);

        Ok(PendingBooking { slot_id, patch })
    }

    /// Records how persistence of an in-flight booking ended.
    ///
    /// Returns `false` when `slot_id` had no booking in flight, e.g. because
    /// a reload happened meanwhile.
    pub fn record_persistence(&mut self, slot_id: &str, persisted: bool) -> bool {
        match self.persistence.get_mut(slot_id) {
            Some(phase @ Persistence::InFlight) => {
                *phase = if persisted {
                    Persistence::Persisted
                } else {
                    Persistence::Failed
                };
                true
            }
            _ => false,
        }
    }

    pub fn switch_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    pub fn phase(&self, slot_id: &str) -> Option<SlotPhase> {
        let slot = self.slot(slot_id)?;

        if self.selected.as_deref() == Some(slot_id) {
            return Some(SlotPhase::Selected);
        }
        if let Some(persistence) = self.persistence.get(slot_id) {
            return Some(match persistence {
                Persistence::InFlight => SlotPhase::Booked,
                Persistence::Persisted => SlotPhase::Persisted,
                Persistence::Failed => SlotPhase::PersistFailed,
            });
        }

        Some(match slot.state() {
            SlotState::Available => SlotPhase::Available,
            SlotState::Booked => SlotPhase::Reserved,
            SlotState::Unallotted => SlotPhase::Unallotted,
        })
    }

    pub fn stats(&self) -> SlotStats {
        let total = self.slots.len();
        let available = self.slots.iter().filter(|slot| slot.is_available).count();

        SlotStats {
            total,
            available,
            booked: total - available,
        }
    }

    pub fn next_week(&mut self) {
        self.reference += Duration::weeks(1);
    }

    pub fn previous_week(&mut self) {
        self.reference -= Duration::weeks(1);
    }

    pub fn this_week(&mut self, today: NaiveDate) {
        self.reference = today;
    }
}
