//! Visit recording — the only writer in the system.
//!
//! Records visits, prescribes medicines (existing or newly cataloged),
//! and inserts catalog/intake rows. Statements run independently: a
//! multi-step write that fails halfway keeps whatever already committed
//! and logs the failed step instead of rolling back.

use chrono::NaiveDate;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth;
use crate::config::DEFAULT_VISIT_LOCATION;
use crate::db::{self, CatalogInsert};
use crate::error::ClinicError;
use crate::models::*;

/// Input for a single visit row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VisitRequest {
    pub patient_id: Uuid,
    pub visit_date: Option<NaiveDate>,
    pub location: Option<String>,
    #[serde(default)]
    pub symptoms: String,
    pub diagnosis_id: Option<Uuid>,
    pub prescription_text: Option<String>,
}

/// Result of registering a medicine and linking it to a visit.
/// `prescription_id` is `None` when the medicine was cataloged but the link failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicineRegistration {
    pub medicine_id: Uuid,
    pub prescription_id: Option<Uuid>,
}

/// A full examination submission: one visit plus optional prescribing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExaminationForm {
    #[serde(flatten)]
    pub visit: VisitRequest,
    pub existing_medicine_id: Option<Uuid>,
    pub new_medicine: Option<NewMedicine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PrescribeStep {
    Attached { medicine_id: Uuid },
    RegisteredNotAttached { medicine_id: Uuid },
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExaminationOutcome {
    pub visit_id: Uuid,
    pub existing_medicine: Option<PrescribeStep>,
    pub new_medicine: Option<PrescribeStep>,
}

// ── Visits and prescriptions ───────────────────────────────────────────────

/// Persist one visit for `doctor`. Missing date means today; missing or
/// blank location means [`DEFAULT_VISIT_LOCATION`].
pub fn record_visit(
    conn: &Connection,
    doctor: &DoctorContext,
    req: &VisitRequest,
) -> Result<Uuid, ClinicError> {
    if db::get_patient(conn, &req.patient_id)?.is_none() {
        return Err(ClinicError::not_found("patient", req.patient_id));
    }
    if let Some(diagnosis_id) = req.diagnosis_id {
        if db::get_diagnosis(conn, &diagnosis_id)?.is_none() {
            return Err(ClinicError::not_found("diagnosis", diagnosis_id));
        }
    }

    let visit = Visit {
        id: Uuid::new_v4(),
        patient_id: req.patient_id,
        doctor_id: doctor.doctor_id,
        visit_date: req
            .visit_date
            .unwrap_or_else(|| chrono::Local::now().date_naive()),
        location: non_blank(req.location.as_deref())
            .unwrap_or(DEFAULT_VISIT_LOCATION)
            .to_string(),
        symptoms: req.symptoms.trim().to_string(),
        diagnosis_id: req.diagnosis_id,
        prescription_text: non_blank(req.prescription_text.as_deref()).map(str::to_string),
    };

    db::insert_visit(conn, &visit).map_err(|e| {
        if e.is_foreign_key_violation() {
            ClinicError::not_found("doctor", doctor.doctor_id)
        } else {
            ClinicError::from(e)
        }
    })?;

    tracing::info!(
        visit_id = %visit.id,
        patient_id = %visit.patient_id,
        doctor = %doctor.login,
        date = %visit.visit_date,
        "Visit recorded"
    );
    Ok(visit.id)
}

/// Link an already-cataloged medicine to a visit.
pub fn attach_existing_medicine(
    conn: &Connection,
    visit_id: &Uuid,
    medicine_id: &Uuid,
) -> Result<(), ClinicError> {
    if db::get_visit(conn, visit_id)?.is_none() {
        return Err(ClinicError::not_found("visit", visit_id));
    }
    if db::get_medicine(conn, medicine_id)?.is_none() {
        return Err(ClinicError::not_found("medicine", medicine_id));
    }

    db::insert_prescription(conn, &Prescription {
        id: Uuid::new_v4(),
        visit_id: *visit_id,
        medicine_id: *medicine_id,
    })?;
    tracing::debug!(%visit_id, %medicine_id, "Medicine attached to visit");
    Ok(())
}

/// Catalog a new medicine, then link it to the visit.
///
/// A failed catalog insert (including a taken name) is returned and the
/// link is not attempted. A failed link after a successful catalog insert
/// is logged and reported through `prescription_id: None`; the medicine
/// row stays.
pub fn register_and_attach_medicine(
    conn: &Connection,
    visit_id: &Uuid,
    new_medicine: NewMedicine,
) -> Result<MedicineRegistration, ClinicError> {
    let medicine_id = add_medicine(conn, new_medicine)?;

    let prescription = Prescription {
        id: Uuid::new_v4(),
        visit_id: *visit_id,
        medicine_id,
    };
    match db::insert_prescription(conn, &prescription) {
        Ok(()) => Ok(MedicineRegistration {
            medicine_id,
            prescription_id: Some(prescription.id),
        }),
        Err(e) => {
            tracing::error!(
                %visit_id,
                %medicine_id,
                error = %e,
                "Prescribing newly registered medicine failed; medicine kept in catalog"
            );
            Ok(MedicineRegistration {
                medicine_id,
                prescription_id: None,
            })
        }
    }
}

/// Record a visit and run the optional prescribing steps independently.
/// Only the visit insert can fail the whole call.
pub fn record_examination(
    conn: &Connection,
    doctor: &DoctorContext,
    form: ExaminationForm,
) -> Result<ExaminationOutcome, ClinicError> {
    let visit_id = record_visit(conn, doctor, &form.visit)?;

    let existing_medicine = form.existing_medicine_id.map(|medicine_id| {
        match attach_existing_medicine(conn, &visit_id, &medicine_id) {
            Ok(()) => PrescribeStep::Attached { medicine_id },
            Err(e) => {
                tracing::error!(%visit_id, %medicine_id, error = %e, "Prescribing existing medicine failed");
                PrescribeStep::Failed { reason: e.to_string() }
            }
        }
    });

    let new_medicine = form
        .new_medicine
        .filter(|m| !m.name.trim().is_empty())
        .map(|medicine| match register_and_attach_medicine(conn, &visit_id, medicine) {
            Ok(MedicineRegistration { medicine_id, prescription_id: Some(_) }) => {
                PrescribeStep::Attached { medicine_id }
            }
            Ok(MedicineRegistration { medicine_id, prescription_id: None }) => {
                PrescribeStep::RegisteredNotAttached { medicine_id }
            }
            Err(e) => {
                tracing::error!(%visit_id, error = %e, "Registering new medicine failed");
                PrescribeStep::Failed { reason: e.to_string() }
            }
        });

    Ok(ExaminationOutcome {
        visit_id,
        existing_medicine,
        new_medicine,
    })
}

// ── Catalogs and intake ────────────────────────────────────────────────────

pub fn add_diagnosis(
    conn: &Connection,
    name: &str,
    description: Option<&str>,
) -> Result<Uuid, ClinicError> {
    let name = required(name, "diagnosis name")?;
    let diagnosis = Diagnosis {
        id: Uuid::new_v4(),
        name: name.to_string(),
        description: non_blank(description).map(str::to_string),
    };

    match db::insert_diagnosis(conn, &diagnosis)? {
        CatalogInsert::Created(id) => {
            tracing::info!(diagnosis_id = %id, name, "Diagnosis cataloged");
            Ok(id)
        }
        CatalogInsert::AlreadyExists => Err(ClinicError::already_exists("diagnosis", name)),
    }
}

pub fn add_medicine(conn: &Connection, new_medicine: NewMedicine) -> Result<Uuid, ClinicError> {
    let name = required(&new_medicine.name, "medicine name")?.to_string();
    let medicine = NewMedicine { name, ..new_medicine }.into_medicine(Uuid::new_v4());

    match db::insert_medicine(conn, &medicine)? {
        CatalogInsert::Created(id) => {
            tracing::info!(medicine_id = %id, name = %medicine.name, "Medicine cataloged");
            Ok(id)
        }
        CatalogInsert::AlreadyExists => Err(ClinicError::already_exists("medicine", medicine.name)),
    }
}

pub fn admit_patient(conn: &Connection, new_patient: NewPatient) -> Result<Uuid, ClinicError> {
    let patient = Patient {
        id: Uuid::new_v4(),
        name: required(&new_patient.name, "patient name")?.to_string(),
        gender: required(&new_patient.gender, "patient gender")?.to_string(),
        birth_date: new_patient.birth_date,
        home_address: non_blank(new_patient.home_address.as_deref()).map(str::to_string),
    };
    db::insert_patient(conn, &patient)?;
    tracing::info!(patient_id = %patient.id, "Patient admitted");
    Ok(patient.id)
}

pub fn register_doctor(
    conn: &Connection,
    login: &str,
    password: &str,
    name: &str,
) -> Result<Uuid, ClinicError> {
    let login = required(login, "login")?;
    if password.is_empty() {
        return Err(ClinicError::InvalidInput("password is required".into()));
    }
    let doctor = Doctor {
        id: Uuid::new_v4(),
        login: login.to_string(),
        password: auth::hash_credential(password),
        name: required(name, "doctor name")?.to_string(),
    };

    match db::insert_doctor(conn, &doctor)? {
        CatalogInsert::Created(id) => {
            tracing::info!(doctor_id = %id, login, "Doctor registered");
            Ok(id)
        }
        CatalogInsert::AlreadyExists => Err(ClinicError::already_exists("doctor", login)),
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn required<'a>(value: &'a str, field: &str) -> Result<&'a str, ClinicError> {
    non_blank(Some(value)).ok_or_else(|| ClinicError::InvalidInput(format!("{field} is required")))
}
