//! Booking front desk over a roster of doctors.
//!
//! This module provides the AppointmentScheduler struct which looks up
//! doctors, generates their slots for a date, and turns a patient's choice
//! into a validated booking request ready to send to the backend.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::info;

use crate::calendar::{format_availability, parse_availability, DoctorCalendar};
use crate::error::{BookingError, Result};
use crate::models::{doctors_in_department, BookingRequest, Department, Doctor};
use crate::session::Session;

pub struct AppointmentScheduler {
    doctors: Vec<Doctor>,
    outbox: Vec<BookingRequest>,
}

impl AppointmentScheduler {
    /// Initialize the scheduler with a roster.
    pub fn new(doctors: Vec<Doctor>) -> Self {
        AppointmentScheduler {
            doctors,
            outbox: Vec::new(),
        }
    }

    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    /// Replace the roster, keeping any queued requests.
    pub fn set_doctors(&mut self, doctors: Vec<Doctor>) {
        self.doctors = doctors;
    }

    pub fn doctors_in(&self, department: Department) -> Vec<&Doctor> {
        doctors_in_department(&self.doctors, department)
    }

    pub fn find_doctor(&self, doctor_id: &str) -> Result<&Doctor> {
        self.doctors
            .iter()
            .find(|d| d.id == doctor_id)
            .ok_or_else(|| BookingError::DoctorNotFound(doctor_id.to_string()))
    }

    pub fn calendar_for(&self, doctor_id: &str) -> Result<DoctorCalendar> {
        self.find_doctor(doctor_id).map(DoctorCalendar::new)
    }

    /// Get the slot labels a doctor offers on `date`.
    pub fn available_slots(&self, doctor_id: &str, date: NaiveDate) -> Result<Vec<String>> {
        Ok(self.calendar_for(doctor_id)?.slots_on(date))
    }

    /// Validate a patient's choice and queue it for submission.
    pub fn book(
        &mut self,
        session: &Session,
        now: DateTime<Utc>,
        doctor_id: &str,
        date: NaiveDate,
        time_slot: String,
        problem: String,
    ) -> Result<BookingRequest> {
        session.ensure_active(now)?;

        let doctor = self.find_doctor(doctor_id)?;
        let request = BookingRequest::for_doctor(doctor, date, time_slot, problem)?;

        info!(
            "Queued booking {} with {} on {} at {}",
            request.request_id, doctor.name, date, request.time_slot
        );
        self.outbox.push(request.clone());
        Ok(request)
    }

    /// Replace a doctor's availability from the profile editor's text form.
    ///
    /// Returns the number of windows kept after parsing.
    pub fn update_availability(
        &mut self,
        session: &Session,
        now: DateTime<Utc>,
        doctor_id: &str,
        text: &str,
    ) -> Result<usize> {
        session.ensure_active(now)?;

        let windows = parse_availability(text);
        let doctor = self
            .doctors
            .iter_mut()
            .find(|d| d.id == doctor_id)
            .ok_or_else(|| BookingError::DoctorNotFound(doctor_id.to_string()))?;

        doctor.availability = windows;
        info!(
            "Updated availability for {}:\n{}",
            doctor.name,
            format_availability(&doctor.availability)
        );
        Ok(doctor.availability.len())
    }

    /// Get the number of requests waiting to be sent.
    pub fn pending_count(&self) -> usize {
        self.outbox.len()
    }

    /// Take every queued request, leaving the outbox empty.
    pub fn drain_outbox(&mut self) -> Vec<BookingRequest> {
        std::mem::take(&mut self.outbox)
    }
}
