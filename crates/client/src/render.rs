//! Plain-text rendering of the weekly grid.

use std::fmt::Write;

use tutorcal_core::{SlotState, TimeSlot, ViewMode, generator::TIME_SLOTS};

use crate::state::CalendarState;

/// Renders the week as a days-by-hours table followed by the stats line.
///
/// Cell text depends on the view mode: students see `Booked`, tutors see
/// who booked the slot and for what. Unallotted slots read `Unavailable`.
pub fn render_week(state: &CalendarState) -> String {
    let days = state.week_days();
    let mode = state.view_mode();

    let rows: Vec<Vec<String>> = TIME_SLOTS
        .iter()
        .map(|time| {
            days.iter()
                .map(|day| match state.slot_at(&day.full_name, time) {
                    Some(slot) => cell(slot, mode),
                    None => "-".to_string(),
                })
                .collect()
        })
        .collect();

    let headers: Vec<String> = days
        .iter()
        .map(|day| format!("{} {}", day.name, day.date))
        .collect();
    let width = rows
        .iter()
        .flatten()
        .chain(headers.iter())
        .map(|text| text.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    let title = match mode {
        ViewMode::Student => "Student view",
        ViewMode::Tutor => "Tutor view",
    };
    if let Some(monday) = days.first() {
        let _ = writeln!(out, "{} - week of {} {}", title, monday.full_name, monday.date);
    }

    let _ = write!(out, "{:<8}", "");
    for header in &headers {
        let _ = write!(out, " | {:<width$}", header);
    }
    out.push('\n');

    for (time, row) in TIME_SLOTS.iter().zip(&rows) {
        let _ = write!(out, "{:<8}", time);
        for text in row {
            let _ = write!(out, " | {:<width$}", text);
        }
        out.push('\n');
    }

    let stats = state.stats();
    match mode {
        ViewMode::Student => {
            let _ = writeln!(
                out,
                "Total: {} | Available: {} | Booked: {}",
                stats.total, stats.available, stats.booked
            );
        }
        ViewMode::Tutor => {
            let _ = writeln!(out, "Total: {} | Available: {}", stats.total, stats.available);
        }
    }

    if let Some(last) = state.last_booking() {
        let _ = writeln!(out, "Last booking: {}", last);
    }

    out
}

fn cell(slot: &TimeSlot, mode: ViewMode) -> String {
    match (slot.state(), &slot.booking, mode) {
        (SlotState::Available, _, _) => "Available".to_string(),
        (SlotState::Booked, Some(booking), ViewMode::Tutor) => {
            format!("{} ({})", booking.student_name, booking.subject)
        }
        (SlotState::Booked, _, _) => "Booked".to_string(),
        (SlotState::Unallotted, _, _) => "Unavailable".to_string(),
    }
}
