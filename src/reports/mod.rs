//! Daily report — per-day visit counts with the doctors involved,
//! per-diagnosis distinct-patient counts, and the medicine catalog.
//!
//! Nothing is cached; every call re-reads the append-only tables.

mod aggregates;
mod types;

pub use aggregates::*;
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;
    use crate::models::*;
    use crate::recording::{self, ExaminationForm, VisitRequest};
    use crate::timeline;
    use chrono::NaiveDate;
    use rusqlite::{params, Connection};
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn doctor(conn: &Connection, login: &str, name: &str) -> DoctorContext {
        let doctor_id = recording::register_doctor(conn, login, "secret", name).unwrap();
        DoctorContext {
            doctor_id,
            login: login.into(),
            name: name.into(),
        }
    }

    fn patient(conn: &Connection, name: &str) -> Uuid {
        recording::admit_patient(conn, NewPatient {
            name: name.into(),
            gender: "F".into(),
            ..Default::default()
        })
        .unwrap()
    }

    fn visit(
        conn: &Connection,
        by: &DoctorContext,
        patient_id: Uuid,
        on: NaiveDate,
        diagnosis_id: Option<Uuid>,
    ) -> Uuid {
        recording::record_visit(conn, by, &VisitRequest {
            patient_id,
            visit_date: Some(on),
            symptoms: "cough".into(),
            diagnosis_id,
            ..Default::default()
        })
        .unwrap()
    }

    // ── Date resolution ────────────────────────────────────────────────

    #[test]
    fn test_report_date_parsed() {
        assert_eq!(resolve_report_date(Some("2024-05-01")), date(2024, 5, 1));
        assert_eq!(resolve_report_date(Some(" 2024-05-01 ")), date(2024, 5, 1));
    }

    #[test]
    fn test_report_date_falls_back_to_today() {
        let today = date(2026, 1, 15);
        assert_eq!(resolve_report_date_or(None, today), today);
        assert_eq!(resolve_report_date_or(Some(""), today), today);
        assert_eq!(resolve_report_date_or(Some("yesterday"), today), today);
        assert_eq!(resolve_report_date_or(Some("2024-13-40"), today), today);
        assert_eq!(
            resolve_report_date(Some("garbage")),
            chrono::Local::now().date_naive()
        );
    }

    // ── Visits by date ─────────────────────────────────────────────────

    #[test]
    fn test_no_visits_means_no_row() {
        let conn = open_memory_database().unwrap();
        let d = doctor(&conn, "doctor1", "doctor1");
        let p = patient(&conn, "Ivanov");
        visit(&conn, &d, p, date(2024, 5, 2), None);

        let report = build_daily_report(&conn, date(2024, 5, 1)).unwrap();
        assert!(report.visits_by_date.is_empty());
    }

    #[test]
    fn test_count_and_distinct_doctors() {
        let conn = open_memory_database().unwrap();
        let house = doctor(&conn, "house", "Dr. House");
        let wilson = doctor(&conn, "wilson", "Dr. Wilson");
        let p1 = patient(&conn, "Ivanov");
        let p2 = patient(&conn, "Petrova");

        visit(&conn, &wilson, p1, date(2024, 5, 1), None);
        visit(&conn, &house, p1, date(2024, 5, 1), None);
        visit(&conn, &house, p2, date(2024, 5, 1), None);
        visit(&conn, &house, p2, date(2024, 5, 3), None);

        let rows = fetch_visits_by_date(&conn, date(2024, 5, 1)).unwrap();
        assert_eq!(
            rows,
            vec![VisitsByDate {
                date: date(2024, 5, 1),
                count: 3,
                doctors: vec!["Dr. House".into(), "Dr. Wilson".into()],
            }]
        );
    }

    #[test]
    fn test_time_component_ignored() {
        let conn = open_memory_database().unwrap();
        let d = doctor(&conn, "doctor1", "doctor1");
        let p = patient(&conn, "Ivanov");
        conn.execute(
            "INSERT INTO visits (id, patient_id, doctor_id, visit_date, location)
             VALUES (?1, ?2, ?3, '2024-05-01 16:45:00', 'Room 4')",
            params![Uuid::new_v4().to_string(), p.to_string(), d.doctor_id.to_string()],
        )
        .unwrap();

        let rows = fetch_visits_by_date(&conn, date(2024, 5, 1)).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].count, 1);
    }

    // ── By diagnosis ───────────────────────────────────────────────────

    #[test]
    fn test_by_diagnosis_counts_distinct_patients() {
        let conn = open_memory_database().unwrap();
        let d = doctor(&conn, "doctor1", "doctor1");
        let p1 = patient(&conn, "Ivanov");
        let p2 = patient(&conn, "Petrova");
        let flu = recording::add_diagnosis(&conn, "Flu", None).unwrap();
        let angina = recording::add_diagnosis(&conn, "Angina", None).unwrap();

        visit(&conn, &d, p1, date(2024, 5, 1), Some(flu));
        visit(&conn, &d, p1, date(2024, 5, 9), Some(flu));
        visit(&conn, &d, p2, date(2024, 5, 9), Some(flu));
        visit(&conn, &d, p2, date(2024, 5, 9), Some(angina));

        let rows = fetch_patients_by_diagnosis(&conn).unwrap();
        assert_eq!(
            rows,
            vec![
                DiagnosisPatientCount { diagnosis: "Angina".into(), patients_count: 1 },
                DiagnosisPatientCount { diagnosis: "Flu".into(), patients_count: 2 },
            ]
        );
    }

    #[test]
    fn test_unused_diagnosis_absent() {
        let conn = open_memory_database().unwrap();
        let d = doctor(&conn, "doctor1", "doctor1");
        let p = patient(&conn, "Ivanov");
        recording::add_diagnosis(&conn, "Measles", None).unwrap();
        visit(&conn, &d, p, date(2024, 5, 1), None);

        let rows = fetch_patients_by_diagnosis(&conn).unwrap();
        assert!(rows.is_empty());
        assert!(rows.iter().all(|r| r.patients_count > 0));
    }

    #[test]
    fn test_by_diagnosis_and_catalog_independent_of_date() {
        let conn = open_memory_database().unwrap();
        let d = doctor(&conn, "doctor1", "doctor1");
        let p = patient(&conn, "Ivanov");
        let flu = recording::add_diagnosis(&conn, "Flu", None).unwrap();
        visit(&conn, &d, p, date(2020, 1, 1), Some(flu));
        recording::add_medicine(&conn, NewMedicine {
            name: "Paracetamol".into(),
            ..Default::default()
        })
        .unwrap();

        let report = build_daily_report(&conn, date(2024, 5, 1)).unwrap();
        assert!(report.visits_by_date.is_empty());
        assert_eq!(report.by_diagnosis.len(), 1);
        assert_eq!(report.medicines.len(), 1);
    }

    // ── End to end ─────────────────────────────────────────────────────

    #[test]
    fn test_flu_visit_scenario() {
        let conn = open_memory_database().unwrap();
        let d = doctor(&conn, "doctor1", "doctor1");
        let ivanov = patient(&conn, "Ivanov");
        let flu = recording::add_diagnosis(&conn, "Flu", None).unwrap();
        let paracetamol = recording::add_medicine(&conn, NewMedicine {
            name: "Paracetamol".into(),
            intake_method: "oral".into(),
            action_description: "reduces fever".into(),
            side_effects: "rare".into(),
        })
        .unwrap();

        recording::record_examination(&conn, &d, ExaminationForm {
            visit: VisitRequest {
                patient_id: ivanov,
                visit_date: Some(date(2024, 5, 1)),
                symptoms: "fever".into(),
                diagnosis_id: Some(flu),
                ..Default::default()
            },
            existing_medicine_id: Some(paracetamol),
            new_medicine: Some(NewMedicine {
                name: "VitC".into(),
                intake_method: "oral".into(),
                action_description: "boosts immunity".into(),
                side_effects: "none".into(),
            }),
        })
        .unwrap();

        let tl = timeline::get_patient_timeline(&conn, &ivanov).unwrap();
        assert_eq!(tl.visits.len(), 1);
        assert_eq!(tl.visits[0].visit_date, date(2024, 5, 1));
        assert_eq!(tl.visits[0].diagnosis_name, "Flu");
        assert_eq!(tl.visits[0].medicine_names, vec!["Paracetamol", "VitC"]);

        let report = get_daily_report(&conn, Some("2024-05-01")).unwrap();
        assert_eq!(
            report.visits_by_date,
            vec![VisitsByDate {
                date: date(2024, 5, 1),
                count: 1,
                doctors: vec!["doctor1".into()],
            }]
        );
        assert!(report
            .by_diagnosis
            .contains(&DiagnosisPatientCount { diagnosis: "Flu".into(), patients_count: 1 }));
        let catalog: Vec<_> = report.medicines.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(catalog, vec!["Paracetamol", "VitC"]);
    }
}
