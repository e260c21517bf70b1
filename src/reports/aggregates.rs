use std::collections::BTreeSet;

use chrono::NaiveDate;
use rusqlite::{params, Connection};

use crate::db::{self, DatabaseError};
use crate::error::ClinicError;
use super::types::*;

/// Parse an ISO `YYYY-MM-DD` report date; absent or malformed input means today.
pub fn resolve_report_date(raw: Option<&str>) -> NaiveDate {
    resolve_report_date_or(raw, chrono::Local::now().date_naive())
}

pub fn resolve_report_date_or(raw: Option<&str>, today: NaiveDate) -> NaiveDate {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return today;
    };
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => date,
        Err(e) => {
            tracing::warn!(raw, error = %e, "Malformed report date, using today");
            today
        }
    }
}

/// Visit count and distinct doctor names for one day. No visits, no row.
pub fn fetch_visits_by_date(
    conn: &Connection,
    date: NaiveDate,
) -> Result<Vec<VisitsByDate>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT v.id, d.name AS doctor_name
         FROM visits v
         JOIN doctors d ON v.doctor_id = d.id
         WHERE DATE(v.visit_date) = ?1",
    )?;

    let rows = stmt.query_map(params![date.to_string()], |row| {
        row.get::<_, String>("doctor_name")
    })?;

    let mut count = 0u32;
    let mut doctors = BTreeSet::new();
    for name in rows {
        count += 1;
        doctors.insert(name?);
    }

    if count == 0 {
        return Ok(Vec::new());
    }
    Ok(vec![VisitsByDate {
        date,
        count,
        doctors: doctors.into_iter().collect(),
    }])
}

/// Distinct-patient counts per diagnosis, from `v_patients_by_diagnosis`.
/// Diagnoses nobody was seen for are absent.
pub fn fetch_patients_by_diagnosis(
    conn: &Connection,
) -> Result<Vec<DiagnosisPatientCount>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT diagnosis_name, patients_count
         FROM v_patients_by_diagnosis
         WHERE patients_count > 0
         ORDER BY diagnosis_name",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(DiagnosisPatientCount {
            diagnosis: row.get("diagnosis_name")?,
            patients_count: row.get("patients_count")?,
        })
    })?;

    rows.collect::<Result<Vec<_>, _>>().map_err(DatabaseError::from)
}

/// Top-level assembly: recomputed from current state on every call.
pub fn get_daily_report(conn: &Connection, date: Option<&str>) -> Result<DailyReport, ClinicError> {
    let date = resolve_report_date(date);
    build_daily_report(conn, date)
}

pub fn build_daily_report(conn: &Connection, date: NaiveDate) -> Result<DailyReport, ClinicError> {
    Ok(DailyReport {
        date,
        visits_by_date: fetch_visits_by_date(conn, date)?,
        by_diagnosis: fetch_patients_by_diagnosis(conn)?,
        medicines: db::get_all_medicines(conn)?,
    })
}
