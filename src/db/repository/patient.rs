use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use super::{parse_optional_date, parse_uuid};
use crate::db::DatabaseError;
use crate::models::*;

pub fn insert_patient(conn: &Connection, patient: &Patient) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO patients (id, name, gender, birth_date, home_address)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            patient.id.to_string(),
            patient.name,
            patient.gender,
            patient.birth_date.map(|d| d.to_string()),
            patient.home_address,
        ],
    )?;
    Ok(())
}

pub fn get_patient(conn: &Connection, id: &Uuid) -> Result<Option<Patient>, DatabaseError> {
    let row = conn
        .query_row(
            "SELECT id, name, gender, birth_date, home_address FROM patients WHERE id = ?1",
            params![id.to_string()],
            patient_row,
        )
        .optional()?;
    row.map(patient_from_row).transpose()
}

pub fn get_all_patients(conn: &Connection) -> Result<Vec<Patient>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, gender, birth_date, home_address FROM patients ORDER BY name, rowid",
    )?;
    let rows = stmt.query_map([], patient_row)?;

    let mut patients = Vec::new();
    for row in rows {
        patients.push(patient_from_row(row?)?);
    }
    Ok(patients)
}

type PatientRow = (String, String, String, Option<String>, Option<String>);

fn patient_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<PatientRow> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
}

fn patient_from_row(
    (id, name, gender, birth_date, home_address): PatientRow,
) -> Result<Patient, DatabaseError> {
    Ok(Patient {
        id: parse_uuid(&id)?,
        name,
        gender,
        birth_date: parse_optional_date(birth_date)?,
        home_address,
    })
}
