use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use super::{insert_if_absent, parse_uuid, CatalogInsert};
use crate::db::DatabaseError;
use crate::models::*;

/// Add a medicine to the catalog, or report that the name is taken.
pub fn insert_medicine(conn: &Connection, med: &Medicine) -> Result<CatalogInsert, DatabaseError> {
    insert_if_absent(
        conn,
        "SELECT EXISTS(SELECT 1 FROM medicines WHERE name = ?1)",
        &med.name,
        med.id,
        |conn| {
            conn.execute(
                "INSERT INTO medicines (id, name, intake_method, action_description, side_effects)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    med.id.to_string(),
                    med.name,
                    med.intake_method,
                    med.action_description,
                    med.side_effects,
                ],
            )?;
            Ok(())
        },
    )
}

pub fn get_medicine(conn: &Connection, id: &Uuid) -> Result<Option<Medicine>, DatabaseError> {
    let row = conn
        .query_row(
            "SELECT id, name, intake_method, action_description, side_effects
             FROM medicines WHERE id = ?1",
            params![id.to_string()],
            medicine_row,
        )
        .optional()?;
    row.map(medicine_from_row).transpose()
}

/// The whole catalog, alphabetical.
pub fn get_all_medicines(conn: &Connection) -> Result<Vec<Medicine>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, intake_method, action_description, side_effects
         FROM medicines ORDER BY name",
    )?;
    let rows = stmt.query_map([], medicine_row)?;

    let mut meds = Vec::new();
    for row in rows {
        meds.push(medicine_from_row(row?)?);
    }
    Ok(meds)
}

type MedicineRow = (String, String, String, String, String);

fn medicine_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<MedicineRow> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
}

fn medicine_from_row(
    (id, name, intake_method, action_description, side_effects): MedicineRow,
) -> Result<Medicine, DatabaseError> {
    Ok(Medicine {
        id: parse_uuid(&id)?,
        name,
        intake_method,
        action_description,
        side_effects,
    })
}
