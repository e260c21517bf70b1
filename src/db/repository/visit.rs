use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use super::{parse_date, parse_uuid};
use crate::db::DatabaseError;
use crate::models::*;

pub fn insert_visit(conn: &Connection, visit: &Visit) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO visits (id, patient_id, doctor_id, visit_date, location, symptoms,
         diagnosis_id, prescription_text)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            visit.id.to_string(),
            visit.patient_id.to_string(),
            visit.doctor_id.to_string(),
            visit.visit_date.to_string(),
            visit.location,
            visit.symptoms,
            visit.diagnosis_id.map(|id| id.to_string()),
            visit.prescription_text,
        ],
    )?;
    Ok(())
}

pub fn get_visit(conn: &Connection, id: &Uuid) -> Result<Option<Visit>, DatabaseError> {
    let row = conn
        .query_row(
            "SELECT id, patient_id, doctor_id, visit_date, location, symptoms,
                    diagnosis_id, prescription_text
             FROM visits WHERE id = ?1",
            params![id.to_string()],
            |row| {
                Ok(VisitRow {
                    id: row.get(0)?,
                    patient_id: row.get(1)?,
                    doctor_id: row.get(2)?,
                    visit_date: row.get(3)?,
                    location: row.get(4)?,
                    symptoms: row.get(5)?,
                    diagnosis_id: row.get(6)?,
                    prescription_text: row.get(7)?,
                })
            },
        )
        .optional()?;
    row.map(VisitRow::into_visit).transpose()
}

struct VisitRow {
    id: String,
    patient_id: String,
    doctor_id: String,
    visit_date: String,
    location: String,
    symptoms: String,
    diagnosis_id: Option<String>,
    prescription_text: Option<String>,
}

impl VisitRow {
    fn into_visit(self) -> Result<Visit, DatabaseError> {
        Ok(Visit {
            id: parse_uuid(&self.id)?,
            patient_id: parse_uuid(&self.patient_id)?,
            doctor_id: parse_uuid(&self.doctor_id)?,
            visit_date: parse_date(&self.visit_date)?,
            location: self.location,
            symptoms: self.symptoms,
            diagnosis_id: self.diagnosis_id.as_deref().map(parse_uuid).transpose()?,
            prescription_text: self.prescription_text,
        })
    }
}
