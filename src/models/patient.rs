use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: Uuid,
    pub name: String,
    pub gender: String,
    pub birth_date: Option<NaiveDate>,
    pub home_address: Option<String>,
}

/// Intake form for a new patient.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewPatient {
    pub name: String,
    pub gender: String,
    pub birth_date: Option<NaiveDate>,
    pub home_address: Option<String>,
}
