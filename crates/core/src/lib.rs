//! # Tutorcal Core
//!
//! Shared domain types for the tutor booking calendar: the slot model and its
//! typed patch, the booking form, the error taxonomy, and the generator that
//! produces a week of slots with the fixed pre-bookings and unallotted blocks.

pub mod errors;
pub mod generator;
pub mod logging;
pub mod models;

pub use errors::{SlotError, SlotResult};
pub use logging::parse_log_level;
pub use models::booking::{BookingFormData, CalendarDay, SUBJECTS, ViewMode};
pub use models::time_slot::{Booking, DeleteSlotResponse, SlotState, TimeSlot, TimeSlotPatch};
