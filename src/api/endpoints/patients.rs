//! Patient endpoints.
//!
//! - `GET /api/patients` — all patients
//! - `POST /api/patients` — intake
//! - `GET /api/patients/:id` — patient card: timeline + diagnosis catalog
//! - `POST /api/patients/:id/visits` — record a visit for this patient

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, Created};
use crate::db;
use crate::models::{Diagnosis, DoctorContext, NewPatient, Patient};
use crate::recording::{self, VisitRequest};
use crate::timeline::{self, VisitSummary};

#[derive(Serialize)]
pub struct PatientCard {
    pub patient: Patient,
    pub visits: Vec<VisitSummary>,
    /// Catalog offered when assigning a diagnosis to a new visit.
    pub diagnoses: Vec<Diagnosis>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PatientVisitForm {
    pub visit_date: Option<NaiveDate>,
    pub location: Option<String>,
    #[serde(default)]
    pub symptoms: String,
    pub diagnosis_id: Option<Uuid>,
    pub prescription_text: Option<String>,
}

/// `GET /api/patients`
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<Vec<Patient>>, ApiError> {
    let patients = ctx
        .state
        .with_conn(|conn| db::get_all_patients(conn).map_err(Into::into))?;
    Ok(Json(patients))
}

/// `POST /api/patients`
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(form): Json<NewPatient>,
) -> Result<(StatusCode, Json<Created>), ApiError> {
    let id = ctx
        .state
        .with_conn(|conn| recording::admit_patient(conn, form.clone()))
        .map_err(|e| ApiError::from(e).with_form(&form))?;
    Ok((StatusCode::CREATED, Json(Created { id })))
}

/// `GET /api/patients/:id`
pub async fn card(
    State(ctx): State<ApiContext>,
    Path(patient_id): Path<Uuid>,
) -> Result<Json<PatientCard>, ApiError> {
    let card = ctx.state.with_conn(|conn| {
        let tl = timeline::get_patient_timeline(conn, &patient_id)?;
        Ok(PatientCard {
            patient: tl.patient,
            visits: tl.visits,
            diagnoses: db::get_all_diagnoses(conn)?,
        })
    })?;
    Ok(Json(card))
}

/// `POST /api/patients/:id/visits`
pub async fn add_visit(
    State(ctx): State<ApiContext>,
    Extension(doctor): Extension<DoctorContext>,
    Path(patient_id): Path<Uuid>,
    Json(form): Json<PatientVisitForm>,
) -> Result<(StatusCode, Json<Created>), ApiError> {
    let req = VisitRequest {
        patient_id,
        visit_date: form.visit_date,
        location: form.location.clone(),
        symptoms: form.symptoms.clone(),
        diagnosis_id: form.diagnosis_id,
        prescription_text: form.prescription_text.clone(),
    };
    let id = ctx
        .state
        .with_conn(|conn| recording::record_visit(conn, &doctor, &req))
        .map_err(|e| ApiError::from(e).with_form(&form))?;
    Ok((StatusCode::CREATED, Json(Created { id })))
}
