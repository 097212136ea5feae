use serde::{Deserialize, Serialize};

use crate::errors::{SlotError, SlotResult};

/// Subjects offered by the booking form.
pub const SUBJECTS: [&str; 8] = [
    "Mathematics",
    "Physics",
    "Chemistry",
    "Biology",
    "English",
    "History",
    "Computer Science",
    "Economics",
];

/// Whose perspective the calendar is rendered from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Can select available slots; sees booked slots only as "Booked".
    #[default]
    Student,
    /// Read-only; sees who booked each slot and for what subject.
    Tutor,
}

/// Fields a student submits to book a slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingFormData {
    pub student_name: String,
    pub subject: String,
}

impl BookingFormData {
    pub fn new(student_name: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            student_name: student_name.into(),
            subject: subject.into(),
        }
    }

    /// Both fields must be non-blank before a booking can be confirmed.
    pub fn validate(&self) -> SlotResult<()> {
        if self.student_name.trim().is_empty() {
            return Err(SlotError::Validation("Student name is required".to_string()));
        }
        if self.subject.trim().is_empty() {
            return Err(SlotError::Validation("Subject is required".to_string()));
        }
        Ok(())
    }
}

/// A grid column header: short name, full name and "MMM d" date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub name: String,
    pub full_name: String,
    pub date: String,
}
