//! Data models for the booking flow.
//!
//! This module defines the core data structures used throughout the system:
//! - Department: Hospital departments patients can book into
//! - AvailabilityWindow: A doctor's recurring weekly time range
//! - Doctor: A doctor profile as returned by the backend
//! - BookingRequest: A patient's request for a specific slot

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calendar::slots_for_date;
use crate::error::{BookingError, Result};

/// Departments offered by the booking form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Department {
    Cardiology,
    Dermatology,
    Neurology,
    Orthopedics,
    Pediatrics,
    Psychiatry,
    Oncology,
    GeneralMedicine,
}

impl Department {
    /// All departments in the order the booking form lists them.
    pub const ALL: [Department; 8] = [
        Department::Cardiology,
        Department::Dermatology,
        Department::Neurology,
        Department::Orthopedics,
        Department::Pediatrics,
        Department::Psychiatry,
        Department::Oncology,
        Department::GeneralMedicine,
    ];

    /// Convert a string to a Department enum value.
    pub fn from_string(value: &str) -> Result<Self> {
        let normalized = value.trim().to_lowercase();
        Department::ALL
            .into_iter()
            .find(|d| d.name().to_lowercase() == normalized)
            .ok_or_else(|| {
                BookingError::InvalidValue(format!(
                    "Invalid department: '{}'. Must be one of: {}",
                    value,
                    Department::ALL.map(|d| d.name()).join(", ")
                ))
            })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Department::Cardiology => "Cardiology",
            Department::Dermatology => "Dermatology",
            Department::Neurology => "Neurology",
            Department::Orthopedics => "Orthopedics",
            Department::Pediatrics => "Pediatrics",
            Department::Psychiatry => "Psychiatry",
            Department::Oncology => "Oncology",
            Department::GeneralMedicine => "General Medicine",
        }
    }
}

impl std::fmt::Display for Department {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A recurring weekly range during which a doctor takes appointments.
///
/// Times are kept as entered; they are only resolved to hours when slots
/// are generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityWindow {
    pub day: String,
    pub start_time: String,
    pub end_time: String,
}

impl AvailabilityWindow {
    pub fn new(
        day: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        AvailabilityWindow {
            day: day.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
        }
    }
}

/// A doctor profile as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub specialization: Vec<String>,
    #[serde(default)]
    pub experience: Option<u32>,
    #[serde(default)]
    pub fee: Option<f64>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub availability: Vec<AvailabilityWindow>,
}

impl Doctor {
    /// Check whether the doctor belongs to `department`.
    pub fn in_department(&self, department: Department) -> bool {
        self.department
            .as_deref()
            .and_then(|d| Department::from_string(d).ok())
            == Some(department)
    }
}

/// Filter a roster down to one department, keeping roster order.
pub fn doctors_in_department(doctors: &[Doctor], department: Department) -> Vec<&Doctor> {
    doctors.iter().filter(|d| d.in_department(department)).collect()
}

/// A patient's request for a specific appointment slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    #[serde(skip)]
    pub request_id: Uuid,
    pub doctor_id: String,
    pub appointment_date: NaiveDate,
    pub time_slot: String,
    pub problem: String,
}

impl BookingRequest {
    /// Create a new booking request with validation.
    pub fn new(
        doctor_id: String,
        appointment_date: NaiveDate,
        time_slot: String,
        problem: String,
    ) -> Result<Self> {
        if doctor_id.trim().is_empty() {
            return Err(BookingError::MissingField("doctor"));
        }
        if time_slot.trim().is_empty() {
            return Err(BookingError::MissingField("time slot"));
        }
        if problem.trim().is_empty() {
            return Err(BookingError::MissingField("problem"));
        }

        Ok(BookingRequest {
            request_id: Uuid::new_v4(),
            doctor_id,
            appointment_date,
            time_slot,
            problem,
        })
    }

    /// Create a request, additionally checking that `time_slot` is one of
    /// the slots the doctor offers on `appointment_date`.
    pub fn for_doctor(
        doctor: &Doctor,
        appointment_date: NaiveDate,
        time_slot: String,
        problem: String,
    ) -> Result<Self> {
        let request = BookingRequest::new(doctor.id.clone(), appointment_date, time_slot, problem)?;

        let offered = slots_for_date(&doctor.availability, appointment_date);
        if !offered.contains(&request.time_slot) {
            return Err(BookingError::SlotUnavailable {
                slot: request.time_slot,
                date: appointment_date.format("%Y-%m-%d").to_string(),
            });
        }

        Ok(request)
    }
}
