//! # Slot Generator
//!
//! Produces one full week of slots: every weekday crossed with every hourly
//! label, all available, then overlaid with two fixed tables. [`PRE_BOOKINGS`]
//! flips its entries to booked and [`UNALLOTTED`] flips its entries to
//! unavailable without a booking.
//!
//! The output depends only on those tables. The sole non-deterministic part is
//! the opaque booking id minted for each pre-booking.

use chrono::{Datelike, Duration, NaiveDate};

use crate::models::booking::CalendarDay;
use crate::models::time_slot::{Booking, TimeSlot};

/// Hourly slot labels of one business day, in display order.
pub const TIME_SLOTS: [&str; 9] = [
    "9:00 AM", "10:00 AM", "11:00 AM", "12:00 PM", "1:00 PM", "2:00 PM", "3:00 PM", "4:00 PM",
    "5:00 PM",
];

/// A slot that is generated already booked.
#[derive(Debug, Clone, Copy)]
pub struct PreBooking {
    pub day: &'static str,
    pub time: &'static str,
    pub student_name: &'static str,
    pub subject: &'static str,
}

pub const PRE_BOOKINGS: [PreBooking; 5] = [
    PreBooking {
        day: "Monday",
        time: "10:00 AM",
        student_name: "Alice Johnson",
        subject: "Mathematics",
    },
    PreBooking {
        day: "Tuesday",
        time: "2:00 PM",
        student_name: "Bob Smith",
        subject: "Physics",
    },
    PreBooking {
        day: "Wednesday",
        time: "11:00 AM",
        student_name: "Carol Davis",
        subject: "Chemistry",
    },
    PreBooking {
        day: "Thursday",
        time: "3:00 PM",
        student_name: "David Wilson",
        subject: "Biology",
    },
    PreBooking {
        day: "Friday",
        time: "10:00 AM",
        student_name: "Emma Brown",
        subject: "English",
    },
];

/// Administratively blocked `(day, time)` pairs. Must not overlap [`PRE_BOOKINGS`].
pub const UNALLOTTED: [(&str, &str); 5] = [
    ("Monday", "9:00 AM"),
    ("Wednesday", "1:00 PM"),
    ("Friday", "4:00 PM"),
    ("Saturday", "10:00 AM"),
    ("Sunday", "12:00 PM"),
];

/// Monday of the week containing `reference`.
pub fn week_start(reference: NaiveDate) -> NaiveDate {
    reference - Duration::days(i64::from(reference.weekday().num_days_from_monday()))
}

/// The seven days of the week containing `reference`, Monday first.
pub fn week_days(reference: NaiveDate) -> Vec<CalendarDay> {
    let monday = week_start(reference);
    (0..7)
        .map(|offset| {
            let date = monday + Duration::days(offset);
            CalendarDay {
                name: date.format("%a").to_string(),
                full_name: date.format("%A").to_string(),
                date: date.format("%b %-d").to_string(),
            }
        })
        .collect()
}

/// Stable slot id: lowercase day, a dash, then the time label stripped of
/// colons and whitespace (`"Monday"`, `"9:00 AM"` becomes `monday-900am`).
pub fn slot_id(day: &str, time: &str) -> String {
    let time: String = time
        .chars()
        .filter(|c| *c != ':' && !c.is_whitespace())
        .collect();
    format!("{}-{}", day.to_lowercase(), time.to_lowercase())
}

/// Generates the week containing `reference`, ordered day-major then time-minor.
pub fn generate_week(reference: NaiveDate) -> Vec<TimeSlot> {
    let mut slots: Vec<TimeSlot> = week_days(reference)
        .into_iter()
        .flat_map(|day| {
            TIME_SLOTS.iter().map(move |time| {
                TimeSlot::available(slot_id(&day.full_name, time), day.full_name.clone(), *time)
            })
        })
        .collect();

    for entry in &PRE_BOOKINGS {
        let id = slot_id(entry.day, entry.time);
        if let Some(slot) = slots.iter_mut().find(|slot| slot.id == id) {
            slot.is_available = false;
            slot.booking = Some(Booking::new(entry.student_name, entry.subject));
        }
    }

    for (day, time) in UNALLOTTED {
        let id = slot_id(day, time);
        if let Some(slot) = slots.iter_mut().find(|slot| slot.id == id) {
            slot.is_available = false;
            slot.booking = None;
        }
    }

    slots
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_id_strips_colon_and_space() {
        assert_eq!(slot_id("Monday", "9:00 AM"), "monday-900am");
        assert_eq!(slot_id("Sunday", "12:00 PM"), "sunday-1200pm");
    }

    #[test]
    fn week_start_on_sunday_goes_back_six_days() {
        let sunday = NaiveDate::from_ymd_opt(2026, 10, 25).unwrap();
        assert_eq!(week_start(sunday), NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
    }

    #[test]
    fn tables_do_not_overlap() {
        for entry in &PRE_BOOKINGS {
            assert!(!UNALLOTTED.contains(&(entry.day, entry.time)));
        }
    }
}
