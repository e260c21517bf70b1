use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::Medicine;

/// Operational statistics for one calendar day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyReport {
    pub date: NaiveDate,
    /// Empty when no visits fall on `date`; otherwise exactly one entry.
    pub visits_by_date: Vec<VisitsByDate>,
    pub by_diagnosis: Vec<DiagnosisPatientCount>,
    /// The full catalog, independent of `date`.
    pub medicines: Vec<Medicine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitsByDate {
    pub date: NaiveDate,
    pub count: u32,
    /// Distinct display names of doctors with a visit that day, alphabetical.
    pub doctors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosisPatientCount {
    pub diagnosis: String,
    pub patients_count: u32,
}
