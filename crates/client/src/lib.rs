//! # Tutorcal Client
//!
//! Client side of the booking calendar. [`CalendarState`] is the owned view
//! model with one synchronous transition per user action.
//! [`BookingCalendar`] drives it against a [`SlotApi`], applying bookings
//! optimistically and persisting them in the background without rollback.

pub mod api;
pub mod calendar;
pub mod config;
pub mod mock;
pub mod notify;
pub mod render;
pub mod state;

pub use api::{HttpSlotApi, SlotApi};
pub use calendar::{BookingCalendar, LoadSource, PersistOutcome};
pub use notify::{Notification, NotificationLevel, Notifier, TracingNotifier};
pub use state::{CalendarState, PendingBooking, SlotPhase, SlotStats};
