use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One clinical encounter between a doctor and a patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visit {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub visit_date: NaiveDate,
    pub location: String,
    pub symptoms: String,
    pub diagnosis_id: Option<Uuid>,
    pub prescription_text: Option<String>,
}

/// "This medicine was given at this visit."
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prescription {
    pub id: Uuid,
    pub visit_id: Uuid,
    pub medicine_id: Uuid,
}
