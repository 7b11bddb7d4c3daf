//! Slot generation from a doctor's weekly availability.
//!
//! A doctor publishes recurring windows ("Monday 9:00 AM - 5:00 PM"). For a
//! chosen date, the windows for that weekday are walked hour by hour and
//! turned into slot labels like `"9:00 AM - 10:00 AM"`.

use crate::hours::{format_hour, parse_hour};
use crate::models::{AvailabilityWindow, Doctor};
use chrono::NaiveDate;
use tracing::{debug, warn};

/// Full English weekday name for `date`, e.g. "Monday".
pub fn weekday_name(date: NaiveDate) -> String {
    date.format("%A").to_string()
}

/// Select the windows that apply to `date`, preserving input order.
///
/// Day names are compared case-insensitively. Abbreviated or misspelled
/// days never match.
pub fn match_windows(windows: &[AvailabilityWindow], date: NaiveDate) -> Vec<&AvailabilityWindow> {
    let day = weekday_name(date).to_lowercase();
    windows
        .iter()
        .filter(|w| w.day.to_lowercase() == day)
        .collect()
}

/// Walk one window in one-hour steps and emit its slot labels.
///
/// An inverted or zero-length window yields nothing. So does a window with
/// an unparseable start or end time. The walk never leaves the 0..24 day.
pub fn window_slots(window: &AvailabilityWindow) -> Vec<String> {
    let (start, end) = match (parse_hour(&window.start_time), parse_hour(&window.end_time)) {
        (Some(start), Some(end)) => (start, end),
        _ => {
            warn!(
                "Skipping {} window with unreadable times: '{}' - '{}'",
                window.day, window.start_time, window.end_time
            );
            return Vec::new();
        }
    };

    let end = end.min(24);
    let mut slots = Vec::new();
    let mut current = start.max(0);
    while current < end {
        let slot_end = (current + 1).min(24);
        slots.push(format!("{} - {}", format_hour(current), format_hour(slot_end)));
        current += 1;
    }

    slots
}

/// Generate every slot label for `date`.
///
/// Slots from each matching window are concatenated in window order.
/// Overlapping windows produce duplicate labels.
pub fn slots_for_date(windows: &[AvailabilityWindow], date: NaiveDate) -> Vec<String> {
    let slots: Vec<String> = match_windows(windows, date)
        .into_iter()
        .flat_map(window_slots)
        .collect();

    debug!("Generated {} slots for {}", slots.len(), date);
    slots
}

/// Parse the profile editor's availability text.
///
/// One window per line in the form `"<Day> <start>-<end>"`. Blank lines and
/// lines that do not fit the form are dropped.
pub fn parse_availability(input: &str) -> Vec<AvailabilityWindow> {
    input
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() < 2 {
                return None;
            }

            let times: Vec<&str> = parts[1].split('-').collect();
            if times.len() != 2 {
                return None;
            }

            Some(AvailabilityWindow::new(parts[0], times[0], times[1]))
        })
        .collect()
}

/// Render windows back into the profile editor's text form.
pub fn format_availability(windows: &[AvailabilityWindow]) -> String {
    windows
        .iter()
        .map(|w| format!("{} {}-{}", w.day, w.start_time, w.end_time))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A doctor's bookable calendar, derived from their published availability.
#[derive(Debug, Clone)]
pub struct DoctorCalendar {
    pub doctor_name: String,
    pub doctor_id: String,
    windows: Vec<AvailabilityWindow>,
}

impl DoctorCalendar {
    pub fn new(doctor: &Doctor) -> Self {
        DoctorCalendar {
            doctor_name: doctor.name.clone(),
            doctor_id: doctor.id.clone(),
            windows: doctor.availability.clone(),
        }
    }

    /// Replace the published availability.
    pub fn set_windows(&mut self, windows: Vec<AvailabilityWindow>) {
        self.windows = windows;
    }

    /// Get all slot labels offered on `date`.
    pub fn slots_on(&self, date: NaiveDate) -> Vec<String> {
        slots_for_date(&self.windows, date)
    }

    /// Check if `slot` is offered on `date`.
    pub fn offers(&self, date: NaiveDate, slot: &str) -> bool {
        self.slots_on(date).iter().any(|s| s == slot)
    }
}

impl std::fmt::Display for DoctorCalendar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "DoctorCalendar({}, windows={})",
            self.doctor_name,
            self.windows.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2024-06-03 is a Monday.
    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    #[test]
    fn weekday_names() {
        assert_eq!(weekday_name(date(3)), "Monday");
        assert_eq!(weekday_name(date(9)), "Sunday");
    }

    #[test]
    fn match_is_case_insensitive_and_ordered() {
        let windows = vec![
            AvailabilityWindow::new("monday", "9 AM", "10 AM"),
            AvailabilityWindow::new("Tuesday", "9 AM", "10 AM"),
            AvailabilityWindow::new("MONDAY", "2 PM", "3 PM"),
            AvailabilityWindow::new("Mon", "9 AM", "10 AM"),
        ];

        let matched = match_windows(&windows, date(3));
        assert_eq!(matched, vec![&windows[0], &windows[2]]);
    }

    #[test]
    fn unlisted_weekday_matches_nothing() {
        let windows = vec![AvailabilityWindow::new("Monday", "9 AM", "5 PM")];
        for day in 4..=9 {
            assert!(match_windows(&windows, date(day)).is_empty());
        }
    }

    #[test]
    fn morning_window_slots() {
        let window = AvailabilityWindow::new("Monday", "9:00 AM", "12:00 PM");
        assert_eq!(
            window_slots(&window),
            vec!["9:00 AM - 10:00 AM", "10:00 AM - 11:00 AM", "11:00 AM - 12:00 PM"]
        );
    }

    #[test]
    fn zero_length_and_inverted_windows_are_empty() {
        let zero = AvailabilityWindow::new("Monday", "5:00 PM", "5:00 PM");
        let inverted = AvailabilityWindow::new("Monday", "5:00 PM", "9:00 AM");
        assert!(window_slots(&zero).is_empty());
        assert!(window_slots(&inverted).is_empty());
    }

    #[test]
    fn unreadable_times_are_empty() {
        let window = AvailabilityWindow::new("Monday", "morning", "5:00 PM");
        assert!(window_slots(&window).is_empty());
        let window = AvailabilityWindow::new("Monday", "9:00 AM", "late");
        assert!(window_slots(&window).is_empty());
    }

    #[test]
    fn late_window_ends_at_midnight() {
        let window = AvailabilityWindow::new("Friday", "10:00 PM", "24");
        assert_eq!(
            window_slots(&window),
            vec!["10:00 PM - 11:00 PM", "11:00 PM - 12:00 AM"]
        );
    }

    #[test]
    fn walk_stays_within_the_day() {
        let past_midnight = AvailabilityWindow::new("Friday", "24", "26");
        assert!(window_slots(&past_midnight).is_empty());

        let huge_end = AvailabilityWindow::new("Monday", "9:00 AM", "99999999999");
        let slots = window_slots(&huge_end);
        assert_eq!(slots.len(), 15);
        assert_eq!(slots.last().map(String::as_str), Some("11:00 PM - 12:00 AM"));

        let negative_start = AvailabilityWindow::new("Monday", "-99999999999", "2 AM");
        assert_eq!(
            window_slots(&negative_start),
            vec!["12:00 AM - 1:00 AM", "1:00 AM - 2:00 AM"]
        );
    }

    #[test]
    fn overlapping_windows_are_concatenated() {
        let windows = vec![
            AvailabilityWindow::new("Monday", "9:00 AM", "11:00 AM"),
            AvailabilityWindow::new("Monday", "10:00 AM", "12:00 PM"),
        ];
        assert_eq!(
            slots_for_date(&windows, date(3)),
            vec![
                "9:00 AM - 10:00 AM",
                "10:00 AM - 11:00 AM",
                "10:00 AM - 11:00 AM",
                "11:00 AM - 12:00 PM",
            ]
        );
    }

    #[test]
    fn parses_profile_text() {
        let text = "Monday 9:00AM-5:00PM\n\n  Wednesday 10AM-1PM  \nFriday\nSaturday 9AM-1PM-3PM";
        let windows = parse_availability(text);
        assert_eq!(
            windows,
            vec![
                AvailabilityWindow::new("Monday", "9:00AM", "5:00PM"),
                AvailabilityWindow::new("Wednesday", "10AM", "1PM"),
            ]
        );
        assert_eq!(
            format_availability(&windows),
            "Monday 9:00AM-5:00PM\nWednesday 10AM-1PM"
        );
    }

    #[test]
    fn calendar_offers_generated_slots() {
        let doctor = Doctor {
            id: "d-9".to_string(),
            name: "Dr. Iyer".to_string(),
            specialization: Vec::new(),
            experience: None,
            fee: None,
            department: None,
            availability: vec![AvailabilityWindow::new("Monday", "9:00AM", "5:00PM")],
        };
        let mut calendar = DoctorCalendar::new(&doctor);
        assert_eq!(calendar.slots_on(date(3)).len(), 8);
        assert!(calendar.offers(date(3), "4:00 PM - 5:00 PM"));
        assert!(!calendar.offers(date(4), "4:00 PM - 5:00 PM"));

        calendar.set_windows(Vec::new());
        assert!(calendar.slots_on(date(3)).is_empty());
    }
}
