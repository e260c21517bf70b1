use rusqlite::{params, Connection};
use uuid::Uuid;

use super::parse_uuid;
use crate::db::DatabaseError;
use crate::models::*;

pub fn insert_prescription(conn: &Connection, rx: &Prescription) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO prescriptions (id, visit_id, medicine_id) VALUES (?1, ?2, ?3)",
        params![
            rx.id.to_string(),
            rx.visit_id.to_string(),
            rx.medicine_id.to_string(),
        ],
    )?;
    Ok(())
}

/// Prescriptions for one visit in the order they were written.
pub fn get_prescriptions_for_visit(
    conn: &Connection,
    visit_id: &Uuid,
) -> Result<Vec<Prescription>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, visit_id, medicine_id FROM prescriptions WHERE visit_id = ?1 ORDER BY rowid",
    )?;
    let rows = stmt.query_map(params![visit_id.to_string()], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
        ))
    })?;

    let mut prescriptions = Vec::new();
    for row in rows {
        let (id, visit_id, medicine_id) = row?;
        prescriptions.push(Prescription {
            id: parse_uuid(&id)?,
            visit_id: parse_uuid(&visit_id)?,
            medicine_id: parse_uuid(&medicine_id)?,
        });
    }
    Ok(prescriptions)
}
