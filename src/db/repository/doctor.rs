use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use super::{insert_if_absent, parse_uuid, CatalogInsert};
use crate::db::DatabaseError;
use crate::models::*;

/// Insert a doctor unless the login is already taken.
pub fn insert_doctor(conn: &Connection, doctor: &Doctor) -> Result<CatalogInsert, DatabaseError> {
    insert_if_absent(
        conn,
        "SELECT EXISTS(SELECT 1 FROM doctors WHERE login = ?1)",
        &doctor.login,
        doctor.id,
        |conn| {
            conn.execute(
                "INSERT INTO doctors (id, login, password, name) VALUES (?1, ?2, ?3, ?4)",
                params![doctor.id.to_string(), doctor.login, doctor.password, doctor.name],
            )?;
            Ok(())
        },
    )
}

pub fn get_doctor(conn: &Connection, id: &Uuid) -> Result<Option<Doctor>, DatabaseError> {
    let row = conn
        .query_row(
            "SELECT id, login, password, name FROM doctors WHERE id = ?1",
            params![id.to_string()],
            doctor_row,
        )
        .optional()?;
    row.map(doctor_from_row).transpose()
}

pub fn get_doctor_by_login(conn: &Connection, login: &str) -> Result<Option<Doctor>, DatabaseError> {
    let row = conn
        .query_row(
            "SELECT id, login, password, name FROM doctors WHERE login = ?1",
            params![login],
            doctor_row,
        )
        .optional()?;
    row.map(doctor_from_row).transpose()
}

type DoctorRow = (String, String, String, String);

fn doctor_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<DoctorRow> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
}

fn doctor_from_row((id, login, password, name): DoctorRow) -> Result<Doctor, DatabaseError> {
    Ok(Doctor {
        id: parse_uuid(&id)?,
        login,
        password,
        name,
    })
}
