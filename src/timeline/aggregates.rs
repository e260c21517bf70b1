use std::collections::{BTreeSet, HashMap};

use rusqlite::Connection;
use uuid::Uuid;

use crate::db::repository::{parse_date, parse_uuid};
use crate::db::{self, DatabaseError};
use crate::error::ClinicError;
use super::fetch::fetch_visit_rows;
use super::types::*;

/// Separator used when joining medicine names for display.
pub const MEDICINE_SEPARATOR: &str = ", ";

/// Assemble a patient's timeline: every visit once, newest first, with
/// diagnosis and deduplicated medicine names.
pub fn get_patient_timeline(
    conn: &Connection,
    patient_id: &Uuid,
) -> Result<PatientTimeline, ClinicError> {
    let patient = db::get_patient(conn, patient_id)?
        .ok_or_else(|| ClinicError::not_found("patient", patient_id))?;

    let rows = fetch_visit_rows(conn, patient_id)?;
    let visits = collapse_visit_rows(rows)?;

    Ok(PatientTimeline { patient, visits })
}

/// Collapse the join fan-out to one summary per visit, keeping the order
/// in which visits first appear.
pub(super) fn collapse_visit_rows(
    rows: Vec<VisitJoinRow>,
) -> Result<Vec<VisitSummary>, DatabaseError> {
    let mut order: Vec<(VisitSummary, BTreeSet<String>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for row in rows {
        let slot = match index.get(&row.visit_id) {
            Some(&i) => i,
            None => {
                let summary = VisitSummary {
                    visit_id: parse_uuid(&row.visit_id)?,
                    visit_date: parse_date(&row.visit_date)?,
                    location: row.location,
                    symptoms: row.symptoms,
                    diagnosis_name: row.diagnosis_name.unwrap_or_default(),
                    prescription_text: row.prescription_text.unwrap_or_default(),
                    medicine_names: Vec::new(),
                    medicines: String::new(),
                };
                order.push((summary, BTreeSet::new()));
                index.insert(row.visit_id, order.len() - 1);
                order.len() - 1
            }
        };

        if let Some(name) = row.medicine_name {
            order[slot].1.insert(name);
        }
    }

    Ok(order
        .into_iter()
        .map(|(mut summary, names)| {
            summary.medicine_names = names.into_iter().collect();
            summary.medicines = summary.medicine_names.join(MEDICINE_SEPARATOR);
            summary
        })
        .collect())
}
