//! Decoding of backend payloads into internal shapes.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{BookingError, Result};
use crate::models::Doctor;

/// The shapes the backend has been seen to return for a doctor list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum DoctorListResponse {
    Bare(Vec<Doctor>),
    Data { data: Vec<Doctor> },
    Doctors { doctors: Vec<Doctor> },
}

impl DoctorListResponse {
    pub fn into_doctors(self) -> Vec<Doctor> {
        match self {
            DoctorListResponse::Bare(doctors)
            | DoctorListResponse::Data { data: doctors }
            | DoctorListResponse::Doctors { doctors } => doctors,
        }
    }
}

/// Decode a doctor list from any of the known response shapes.
pub fn decode_doctor_list(value: Value) -> Result<Vec<Doctor>> {
    let shape = describe(&value);
    match serde_json::from_value::<DoctorListResponse>(value) {
        Ok(response) => {
            let doctors = response.into_doctors();
            debug!("Decoded {} doctors from {} response", doctors.len(), shape);
            Ok(doctors)
        }
        Err(e) => {
            warn!("Rejected doctor list response ({}): {}", shape, e);
            Err(BookingError::UnrecognizedResponse(shape))
        }
    }
}

/// Decode a doctor list from raw JSON text.
pub fn decode_doctor_list_str(body: &str) -> Result<Vec<Doctor>> {
    let value: Value = serde_json::from_str(body)?;
    decode_doctor_list(value)
}

fn describe(value: &Value) -> String {
    match value {
        Value::Array(items) => format!("array of {}", items.len()),
        Value::Object(map) => {
            let keys: Vec<&str> = map.keys().map(String::as_str).collect();
            format!("object with keys [{}]", keys.join(", "))
        }
        Value::Null => "null".to_string(),
        Value::Bool(_) => "boolean".to_string(),
        Value::Number(_) => "number".to_string(),
        Value::String(_) => "string".to_string(),
    }
}
