use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// A student's reservation of a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub student_name: String,
    pub subject: String,
    pub booking_id: String,
}

impl Booking {
    /// Creates a booking with a freshly minted `booking-<millis>-<uuid>` id.
    pub fn new(student_name: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            student_name: student_name.into(),
            subject: subject.into(),
            booking_id: format!(
                "booking-{}-{}",
                Utc::now().timestamp_millis(),
                Uuid::new_v4().simple()
            ),
        }
    }
}

/// One bookable hour on one weekday.
///
/// `is_available == true` means nobody holds the slot. An unavailable slot is
/// either booked (`booking` present) or unallotted (`booking` absent).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub id: String,
    pub day: String,
    pub time: String,
    pub is_available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking: Option<Booking>,
}

/// Classification of a slot for display and selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Available,
    Booked,
    Unallotted,
}

impl TimeSlot {
    pub fn available(id: impl Into<String>, day: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            day: day.into(),
            time: time.into(),
            is_available: true,
            booking: None,
        }
    }

    pub fn state(&self) -> SlotState {
        match (self.is_available, &self.booking) {
            (true, _) => SlotState::Available,
            (false, Some(_)) => SlotState::Booked,
            (false, None) => SlotState::Unallotted,
        }
    }

    pub fn is_at(&self, day: &str, time: &str) -> bool {
        self.day == day && self.time == time
    }
}

/// Partial slot fields for create and update requests.
///
/// Every field is optional. For `booking`, an absent key leaves the booking
/// untouched while an explicit `null` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlotPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub booking: Option<Option<Booking>>,
}

impl TimeSlotPatch {
    /// Patch that books a slot for the given booking.
    pub fn book(booking: Booking) -> Self {
        Self {
            is_available: Some(false),
            booking: Some(Some(booking)),
            ..Default::default()
        }
    }

    /// Shallow merge: every field present in the patch overwrites the slot's.
    ///
    /// No consistency repair happens here; a patch may leave an available slot
    /// carrying a stale booking.
    pub fn apply_to(&self, slot: &mut TimeSlot) {
        if let Some(day) = &self.day {
            slot.day = day.clone();
        }
        if let Some(time) = &self.time {
            slot.time = time.clone();
        }
        if let Some(is_available) = self.is_available {
            slot.is_available = is_available;
        }
        if let Some(booking) = &self.booking {
            slot.booking = booking.clone();
        }
    }

    /// Builds a new slot under `id` from whatever fields the patch carries.
    pub fn into_slot(self, id: impl Into<String>) -> TimeSlot {
        TimeSlot {
            id: id.into(),
            day: self.day.unwrap_or_default(),
            time: self.time.unwrap_or_default(),
            is_available: self.is_available.unwrap_or(true),
            booking: self.booking.flatten(),
        }
    }
}

// Distinguishes `"booking": null` (Some(None)) from a missing key (None).
fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Body returned by a successful delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteSlotResponse {
    pub message: String,
}
