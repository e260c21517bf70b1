use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::DatabaseError;
use super::types::VisitJoinRow;

/// Plain multi-row join: one row per (visit, prescription), or a single
/// row with NULL medicine for visits without prescriptions.
pub(super) fn fetch_visit_rows(
    conn: &Connection,
    patient_id: &Uuid,
) -> Result<Vec<VisitJoinRow>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT v.id AS visit_id, v.visit_date, v.location, v.symptoms,
                d.name AS diagnosis_name, v.prescription_text,
                m.name AS medicine_name
         FROM visits v
         LEFT JOIN diagnoses d ON v.diagnosis_id = d.id
         LEFT JOIN prescriptions pr ON pr.visit_id = v.id
         LEFT JOIN medicines m ON pr.medicine_id = m.id
         WHERE v.patient_id = ?1
         ORDER BY v.visit_date DESC, v.rowid DESC, pr.rowid",
    )?;

    let rows = stmt.query_map(params![patient_id.to_string()], |row| {
        Ok(VisitJoinRow {
            visit_id: row.get("visit_id")?,
            visit_date: row.get("visit_date")?,
            location: row.get("location")?,
            symptoms: row.get("symptoms")?,
            diagnosis_name: row.get("diagnosis_name")?,
            prescription_text: row.get("prescription_text")?,
            medicine_name: row.get("medicine_name")?,
        })
    })?;

    rows.collect::<Result<Vec<_>, _>>().map_err(DatabaseError::from)
}
