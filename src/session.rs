//! Login session passed explicitly to anything that talks to the backend.

use chrono::{DateTime, Duration, Utc};
use tracing::info;

use crate::error::{BookingError, Result};

/// Which portal a session belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Patient,
    Doctor,
}

impl Role {
    /// Convert a string to a Role enum value.
    pub fn from_string(value: &str) -> Result<Self> {
        match value.to_lowercase().trim() {
            "patient" => Ok(Role::Patient),
            "doctor" => Ok(Role::Doctor),
            _ => Err(BookingError::InvalidValue(format!(
                "Invalid role: '{}'. Must be one of: patient, doctor",
                value
            ))),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Role::Patient => "patient",
            Role::Doctor => "doctor",
        }
    }
}

/// An authenticated session.
///
/// Created at login, borrowed by every authenticated call, and consumed at
/// logout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
    role: Role,
    expiry: DateTime<Utc>,
}

impl Session {
    /// Start a session that lasts `lifetime` from `now`.
    pub fn new(token: String, role: Role, now: DateTime<Utc>, lifetime: Duration) -> Result<Self> {
        if token.trim().is_empty() {
            return Err(BookingError::MissingField("token"));
        }

        let expiry = now.checked_add_signed(lifetime).ok_or_else(|| {
            BookingError::InvalidValue(format!("Session lifetime {} is out of range", lifetime))
        })?;

        info!("Started {} session", role.name());
        Ok(Session {
            token,
            role,
            expiry,
        })
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expiry
    }

    /// Fail with `SessionExpired` once the session has lapsed.
    pub fn ensure_active(&self, now: DateTime<Utc>) -> Result<()> {
        if self.is_expired(now) {
            return Err(BookingError::SessionExpired);
        }
        Ok(())
    }

    /// Value for the `Authorization` header.
    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// End the session.
    pub fn end(self) {
        info!("Ended {} session", self.role.name());
    }
}
