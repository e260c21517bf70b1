//! Repository layer — entity-scoped database operations.
//!
//! One sub-module per table. All public functions are re-exported here.

mod diagnosis;
mod doctor;
mod medicine;
mod patient;
mod prescription;
mod visit;

use chrono::NaiveDate;
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::DatabaseError;

pub use diagnosis::*;
pub use doctor::*;
pub use medicine::*;
pub use patient::*;
pub use prescription::*;
pub use visit::*;

/// Outcome of an insert into a table with a unique name/login column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "id", rename_all = "snake_case")]
pub enum CatalogInsert {
    Created(Uuid),
    AlreadyExists,
}

impl CatalogInsert {
    pub fn created_id(self) -> Option<Uuid> {
        match self {
            CatalogInsert::Created(id) => Some(id),
            CatalogInsert::AlreadyExists => None,
        }
    }
}

/// Explicit uniqueness check followed by the insert. A UNIQUE violation
/// raised by the insert itself maps to the same `AlreadyExists` outcome.
fn insert_if_absent(
    conn: &Connection,
    exists_sql: &str,
    key: &str,
    id: Uuid,
    insert: impl FnOnce(&Connection) -> Result<(), DatabaseError>,
) -> Result<CatalogInsert, DatabaseError> {
    let exists: bool = conn.query_row(exists_sql, params![key], |row| row.get(0))?;
    if exists {
        return Ok(CatalogInsert::AlreadyExists);
    }

    match insert(conn) {
        Ok(()) => Ok(CatalogInsert::Created(id)),
        Err(e) if e.is_unique_violation() => Ok(CatalogInsert::AlreadyExists),
        Err(e) => Err(e),
    }
}

pub(crate) fn parse_uuid(value: &str) -> Result<Uuid, DatabaseError> {
    Uuid::parse_str(value).map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))
}

/// Day-granularity parse; anything after `YYYY-MM-DD` is ignored.
pub(crate) fn parse_date(value: &str) -> Result<NaiveDate, DatabaseError> {
    value
        .get(..10)
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        .ok_or_else(|| DatabaseError::ConstraintViolation(format!("invalid date: {value}")))
}

/// NULL stays `None`; a malformed stored value is an error, as with `parse_date`.
pub(crate) fn parse_optional_date(value: Option<String>) -> Result<Option<NaiveDate>, DatabaseError> {
    value.as_deref().map(parse_date).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;
    use crate::models::*;

    fn test_db() -> Connection {
        open_memory_database().unwrap()
    }

    fn make_doctor(conn: &Connection, login: &str) -> Uuid {
        let id = Uuid::new_v4();
        let outcome = insert_doctor(conn, &Doctor {
            id,
            login: login.into(),
            password: "opaque".into(),
            name: format!("Dr. {login}"),
        })
        .unwrap();
        assert_eq!(outcome, CatalogInsert::Created(id));
        id
    }

    fn make_patient(conn: &Connection, name: &str) -> Uuid {
        let id = Uuid::new_v4();
        insert_patient(conn, &Patient {
            id,
            name: name.into(),
            gender: "M".into(),
            birth_date: NaiveDate::from_ymd_opt(1980, 3, 14),
            home_address: None,
        })
        .unwrap();
        id
    }

    fn make_visit(conn: &Connection, patient_id: Uuid, doctor_id: Uuid) -> Uuid {
        let id = Uuid::new_v4();
        insert_visit(conn, &Visit {
            id,
            patient_id,
            doctor_id,
            visit_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            location: "Room 4".into(),
            symptoms: "fever".into(),
            diagnosis_id: None,
            prescription_text: Some("rest".into()),
        })
        .unwrap();
        id
    }

    fn make_medicine(conn: &Connection, name: &str) -> Uuid {
        let id = Uuid::new_v4();
        insert_medicine(conn, &Medicine {
            id,
            name: name.into(),
            intake_method: "oral".into(),
            action_description: "analgesic".into(),
            side_effects: "none".into(),
        })
        .unwrap();
        id
    }

    #[test]
    fn doctor_insert_and_lookup_by_login() {
        let conn = test_db();
        let id = make_doctor(&conn, "doctor1");

        let found = get_doctor_by_login(&conn, "doctor1").unwrap().unwrap();
        assert_eq!(found.id, id);
        assert_eq!(found.name, "Dr. doctor1");
        assert_eq!(get_doctor(&conn, &id).unwrap().unwrap().login, "doctor1");
        assert!(get_doctor_by_login(&conn, "nobody").unwrap().is_none());
    }

    #[test]
    fn duplicate_login_reports_already_exists() {
        let conn = test_db();
        make_doctor(&conn, "doctor1");

        let outcome = insert_doctor(&conn, &Doctor {
            id: Uuid::new_v4(),
            login: "doctor1".into(),
            password: "other".into(),
            name: "Impostor".into(),
        })
        .unwrap();

        assert_eq!(outcome, CatalogInsert::AlreadyExists);
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM doctors", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn patient_insert_and_retrieve() {
        let conn = test_db();
        let id = make_patient(&conn, "Ivanov");

        let patient = get_patient(&conn, &id).unwrap().unwrap();
        assert_eq!(patient.name, "Ivanov");
        assert_eq!(patient.birth_date, NaiveDate::from_ymd_opt(1980, 3, 14));
        assert!(patient.home_address.is_none());
        assert!(get_patient(&conn, &Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn patients_listed_by_name() {
        let conn = test_db();
        make_patient(&conn, "Sidorov");
        make_patient(&conn, "Ivanov");

        let names: Vec<_> = get_all_patients(&conn)
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Ivanov", "Sidorov"]);
    }

    #[test]
    fn duplicate_diagnosis_leaves_catalog_unchanged() {
        let conn = test_db();
        let first = insert_diagnosis(&conn, &Diagnosis {
            id: Uuid::new_v4(),
            name: "Flu".into(),
            description: Some("Influenza".into()),
        })
        .unwrap();
        assert!(first.created_id().is_some());

        let second = insert_diagnosis(&conn, &Diagnosis {
            id: Uuid::new_v4(),
            name: "Flu".into(),
            description: None,
        })
        .unwrap();

        assert_eq!(second, CatalogInsert::AlreadyExists);
        let all = get_all_diagnoses(&conn).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].description.as_deref(), Some("Influenza"));
    }

    #[test]
    fn medicine_catalog_alphabetical() {
        let conn = test_db();
        make_medicine(&conn, "VitC");
        let para = make_medicine(&conn, "Paracetamol");

        let names: Vec<_> = get_all_medicines(&conn)
            .unwrap()
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, vec!["Paracetamol", "VitC"]);
        assert_eq!(get_medicine(&conn, &para).unwrap().unwrap().intake_method, "oral");
    }

    #[test]
    fn duplicate_medicine_name_reports_already_exists() {
        let conn = test_db();
        make_medicine(&conn, "Paracetamol");
        let outcome = insert_medicine(&conn, &Medicine {
            id: Uuid::new_v4(),
            name: "Paracetamol".into(),
            intake_method: String::new(),
            action_description: String::new(),
            side_effects: String::new(),
        })
        .unwrap();
        assert_eq!(outcome, CatalogInsert::AlreadyExists);
    }

    #[test]
    fn visit_insert_and_retrieve() {
        let conn = test_db();
        let doctor = make_doctor(&conn, "doctor1");
        let patient = make_patient(&conn, "Ivanov");
        let visit_id = make_visit(&conn, patient, doctor);

        let visit = get_visit(&conn, &visit_id).unwrap().unwrap();
        assert_eq!(visit.patient_id, patient);
        assert_eq!(visit.doctor_id, doctor);
        assert_eq!(visit.visit_date, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert!(visit.diagnosis_id.is_none());
        assert_eq!(visit.prescription_text.as_deref(), Some("rest"));
    }

    #[test]
    fn visit_requires_existing_patient() {
        let conn = test_db();
        let doctor = make_doctor(&conn, "doctor1");

        let err = insert_visit(&conn, &Visit {
            id: Uuid::new_v4(),
            patient_id: Uuid::new_v4(),
            doctor_id: doctor,
            visit_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            location: "Room 4".into(),
            symptoms: String::new(),
            diagnosis_id: None,
            prescription_text: None,
        })
        .unwrap_err();

        assert!(err.is_foreign_key_violation(), "unexpected error: {err}");
    }

    #[test]
    fn prescription_requires_existing_visit() {
        let conn = test_db();
        let med = make_medicine(&conn, "Paracetamol");

        let err = insert_prescription(&conn, &Prescription {
            id: Uuid::new_v4(),
            visit_id: Uuid::new_v4(),
            medicine_id: med,
        })
        .unwrap_err();

        assert!(err.is_foreign_key_violation());
    }

    #[test]
    fn prescriptions_listed_in_write_order() {
        let conn = test_db();
        let doctor = make_doctor(&conn, "doctor1");
        let patient = make_patient(&conn, "Ivanov");
        let visit = make_visit(&conn, patient, doctor);
        let para = make_medicine(&conn, "Paracetamol");
        let vitc = make_medicine(&conn, "VitC");

        for medicine_id in [vitc, para] {
            insert_prescription(&conn, &Prescription {
                id: Uuid::new_v4(),
                visit_id: visit,
                medicine_id,
            })
            .unwrap();
        }

        let rx = get_prescriptions_for_visit(&conn, &visit).unwrap();
        let meds: Vec<_> = rx.iter().map(|p| p.medicine_id).collect();
        assert_eq!(meds, vec![vitc, para]);
    }

    #[test]
    fn parse_date_ignores_time_component() {
        assert_eq!(
            parse_date("2024-05-01 13:45:00").unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
        );
        assert!(parse_date("05/01/2024").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn optional_date_null_is_none_but_garbage_is_an_error() {
        assert_eq!(parse_optional_date(None).unwrap(), None);
        assert_eq!(
            parse_optional_date(Some("1980-03-14".into())).unwrap(),
            NaiveDate::from_ymd_opt(1980, 3, 14)
        );
        assert!(parse_optional_date(Some("14.03.1980".into())).is_err());
    }

    #[test]
    fn malformed_stored_birth_date_fails_the_read() {
        let conn = test_db();
        let id = Uuid::new_v4();
        conn.execute(
            "INSERT INTO patients (id, name, gender, birth_date) VALUES (?1, 'Ivanov', 'M', 'yesterday')",
            params![id.to_string()],
        )
        .unwrap();

        assert!(get_patient(&conn, &id).is_err());
        assert!(get_all_patients(&conn).is_err());
    }
}
