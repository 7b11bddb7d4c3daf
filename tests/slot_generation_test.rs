// Slot generation through the public API, using the weekly schedules
// doctors actually publish.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use medibook::{
    format_hour, match_windows, parse_hour, slots_for_date, AvailabilityWindow, DoctorCalendar,
};

fn next(weekday: Weekday) -> NaiveDate {
    let mut date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    while date.weekday() != weekday {
        date = date + Duration::days(1);
    }
    date
}

#[test]
fn monday_morning_window() {
    let windows = vec![AvailabilityWindow::new("Monday", "9:00 AM", "12:00 PM")];
    assert_eq!(
        slots_for_date(&windows, next(Weekday::Mon)),
        vec!["9:00 AM - 10:00 AM", "10:00 AM - 11:00 AM", "11:00 AM - 12:00 PM"]
    );
}

#[test]
fn zero_length_window_yields_nothing() {
    let windows = vec![AvailabilityWindow::new("Monday", "5:00 PM", "5:00 PM")];
    assert!(slots_for_date(&windows, next(Weekday::Mon)).is_empty());
}

#[test]
fn unmarked_times_are_twenty_four_hour() {
    let windows = vec![AvailabilityWindow::new("Tuesday", "09:00", "17:00")];
    let slots = slots_for_date(&windows, next(Weekday::Tue));

    assert_eq!(slots.len(), 8);
    assert_eq!(slots.first().map(String::as_str), Some("9:00 AM - 10:00 AM"));
    assert_eq!(slots.last().map(String::as_str), Some("4:00 PM - 5:00 PM"));
    assert!(slots.contains(&"12:00 PM - 1:00 PM".to_string()));
}

#[test]
fn overlapping_windows_keep_duplicates_in_input_order() {
    let windows = vec![
        AvailabilityWindow::new("Wednesday", "2:00 PM", "4:00 PM"),
        AvailabilityWindow::new("Thursday", "9:00 AM", "10:00 AM"),
        AvailabilityWindow::new("wednesday", "1:00 PM", "3:00 PM"),
    ];
    assert_eq!(
        slots_for_date(&windows, next(Weekday::Wed)),
        vec![
            "2:00 PM - 3:00 PM",
            "3:00 PM - 4:00 PM",
            "1:00 PM - 2:00 PM",
            "2:00 PM - 3:00 PM",
        ]
    );
}

#[test]
fn days_without_windows_have_no_slots() {
    let windows = vec![
        AvailabilityWindow::new("Monday", "9:00 AM", "5:00 PM"),
        AvailabilityWindow::new("Friday", "9:00 AM", "5:00 PM"),
        AvailabilityWindow::new("Thurs", "9:00 AM", "5:00 PM"),
    ];
    for weekday in [Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Sat, Weekday::Sun] {
        let date = next(weekday);
        assert!(match_windows(&windows, date).is_empty(), "{}", weekday);
        assert!(slots_for_date(&windows, date).is_empty(), "{}", weekday);
    }
}

#[test]
fn only_the_weekday_of_the_date_matters() {
    let windows = vec![AvailabilityWindow::new("Saturday", "10 AM", "12 PM")];
    let first = next(Weekday::Sat);
    let later = first + Duration::weeks(30);
    assert_eq!(slots_for_date(&windows, first), slots_for_date(&windows, later));
    assert_eq!(slots_for_date(&windows, first).len(), 2);
}

#[test]
fn hour_conversions() {
    assert_eq!(parse_hour("9:00 AM"), Some(9));
    assert_eq!(parse_hour("12:00 AM"), Some(0));
    assert_eq!(parse_hour("12:00 PM"), Some(12));
    assert_eq!(parse_hour("11:00 PM"), Some(23));

    assert_eq!(format_hour(0), "12:00 AM");
    assert_eq!(format_hour(13), "1:00 PM");
    assert_eq!(format_hour(24), "12:00 AM");
}

#[test]
fn slot_start_labels_parse_back_to_their_hour() {
    for hour in (1..=23).filter(|h| *h != 12) {
        let windows = vec![AvailabilityWindow::new("Sunday", hour.to_string(), (hour + 1).to_string())];
        let slots = slots_for_date(&windows, next(Weekday::Sun));
        let start = slots[0].split(" - ").next().unwrap();
        assert_eq!(parse_hour(start), Some(hour), "slot {}", slots[0]);
    }
}

#[test]
fn malformed_times_degrade_to_no_slots() {
    let windows = vec![
        AvailabilityWindow::new("Monday", "after lunch", "5:00 PM"),
        AvailabilityWindow::new("Monday", "4:00 PM", "5:00 PM"),
    ];
    assert_eq!(
        slots_for_date(&windows, next(Weekday::Mon)),
        vec!["4:00 PM - 5:00 PM"]
    );
}

#[test]
fn calendar_wraps_doctor_availability() {
    let doctor: medibook::Doctor = serde_json::from_value(serde_json::json!({
        "_id": "abc",
        "name": "Dr. Kapoor",
        "availability": [
            { "day": "Friday", "startTime": "3 PM", "endTime": "6 PM" }
        ]
    }))
    .unwrap();

    let calendar = DoctorCalendar::new(&doctor);
    assert_eq!(calendar.to_string(), "DoctorCalendar(Dr. Kapoor, windows=1)");
    assert_eq!(
        calendar.slots_on(next(Weekday::Fri)),
        vec!["3:00 PM - 4:00 PM", "4:00 PM - 5:00 PM", "5:00 PM - 6:00 PM"]
    );
}
