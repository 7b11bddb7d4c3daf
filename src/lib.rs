//! Appointment slot generation for a hospital booking portal.
//!
//! Doctors publish weekly availability windows; patients pick a date and
//! choose from the one-hour slots generated for that weekday.

pub mod api;
pub mod calendar;
pub mod config;
pub mod error;
pub mod hours;
pub mod models;
pub mod scheduler;
pub mod session;
pub mod telemetry;

pub use calendar::{match_windows, slots_for_date, window_slots, DoctorCalendar};
pub use error::{BookingError, Result};
pub use hours::{format_hour, parse_hour};
pub use models::{AvailabilityWindow, BookingRequest, Department, Doctor};
pub use scheduler::AppointmentScheduler;
pub use session::{Role, Session};
