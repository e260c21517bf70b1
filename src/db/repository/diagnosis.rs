use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use super::{insert_if_absent, parse_uuid, CatalogInsert};
use crate::db::DatabaseError;
use crate::models::*;

/// Add a diagnosis to the catalog, or report that the name is taken.
pub fn insert_diagnosis(conn: &Connection, diag: &Diagnosis) -> Result<CatalogInsert, DatabaseError> {
    insert_if_absent(
        conn,
        "SELECT EXISTS(SELECT 1 FROM diagnoses WHERE name = ?1)",
        &diag.name,
        diag.id,
        |conn| {
            conn.execute(
                "INSERT INTO diagnoses (id, name, description) VALUES (?1, ?2, ?3)",
                params![diag.id.to_string(), diag.name, diag.description],
            )?;
            Ok(())
        },
    )
}

pub fn get_diagnosis(conn: &Connection, id: &Uuid) -> Result<Option<Diagnosis>, DatabaseError> {
    let row = conn
        .query_row(
            "SELECT id, name, description FROM diagnoses WHERE id = ?1",
            params![id.to_string()],
            diagnosis_row,
        )
        .optional()?;
    row.map(diagnosis_from_row).transpose()
}

pub fn get_all_diagnoses(conn: &Connection) -> Result<Vec<Diagnosis>, DatabaseError> {
    let mut stmt = conn.prepare("SELECT id, name, description FROM diagnoses ORDER BY name")?;
    let rows = stmt.query_map([], diagnosis_row)?;

    let mut diagnoses = Vec::new();
    for row in rows {
        diagnoses.push(diagnosis_from_row(row?)?);
    }
    Ok(diagnoses)
}

type DiagnosisRow = (String, String, Option<String>);

fn diagnosis_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<DiagnosisRow> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?))
}

fn diagnosis_from_row(
    (id, name, description): DiagnosisRow,
) -> Result<Diagnosis, DatabaseError> {
    Ok(Diagnosis {
        id: parse_uuid(&id)?,
        name,
        description,
    })
}
