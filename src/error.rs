use thiserror::Error;

/// Errors raised at the edges of the booking flow.
///
/// Slot generation itself never fails; these cover decoding backend
/// payloads, validating booking requests, and session handling.
#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Slot '{slot}' is not offered on {date}")]
    SlotUnavailable { slot: String, date: String },

    #[error("Unrecognized response shape: {0}")]
    UnrecognizedResponse(String),

    #[error("Session expired")]
    SessionExpired,

    #[error("No active session")]
    NotLoggedIn,

    #[error("Doctor not found: {0}")]
    DoctorNotFound(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BookingError>;
