use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Patient;

/// A patient with their visits, most recent first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientTimeline {
    pub patient: Patient,
    pub visits: Vec<VisitSummary>,
}

/// One visit denormalized with its diagnosis and prescribed medicines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitSummary {
    pub visit_id: Uuid,
    pub visit_date: NaiveDate,
    pub location: String,
    pub symptoms: String,
    /// Empty when the visit has no diagnosis.
    pub diagnosis_name: String,
    pub prescription_text: String,
    /// Distinct medicine names, alphabetical.
    pub medicine_names: Vec<String>,
    /// `medicine_names` joined for display; empty when nothing was prescribed.
    pub medicines: String,
}

/// One row of the visit ⟕ diagnosis ⟕ prescription ⟕ medicine join.
#[derive(Debug, Clone)]
pub(super) struct VisitJoinRow {
    pub visit_id: String,
    pub visit_date: String,
    pub location: String,
    pub symptoms: String,
    pub diagnosis_name: Option<String>,
    pub prescription_text: Option<String>,
    pub medicine_name: Option<String>,
}
