//! Examination endpoints.
//!
//! - `GET /api/exam` — everything the examination form offers
//! - `POST /api/exam` — record a visit with optional prescribing

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db;
use crate::models::{Diagnosis, DoctorContext, Medicine, Patient};
use crate::recording::{self, ExaminationForm, ExaminationOutcome};

#[derive(Serialize)]
pub struct ExamFormData {
    pub doctor: DoctorContext,
    pub patients: Vec<Patient>,
    pub diagnoses: Vec<Diagnosis>,
    pub medicines: Vec<Medicine>,
}

/// `GET /api/exam`
pub async fn form_data(
    State(ctx): State<ApiContext>,
    Extension(doctor): Extension<DoctorContext>,
) -> Result<Json<ExamFormData>, ApiError> {
    let data = ctx.state.with_conn(|conn| {
        Ok(ExamFormData {
            doctor,
            patients: db::get_all_patients(conn)?,
            diagnoses: db::get_all_diagnoses(conn)?,
            medicines: db::get_all_medicines(conn)?,
        })
    })?;
    Ok(Json(data))
}

/// `POST /api/exam` — per-step prescribing results are in the body; only
/// a failed visit insert fails the request.
pub async fn submit(
    State(ctx): State<ApiContext>,
    Extension(doctor): Extension<DoctorContext>,
    Json(form): Json<ExaminationForm>,
) -> Result<(StatusCode, Json<ExaminationOutcome>), ApiError> {
    let outcome = ctx
        .state
        .with_conn(|conn| recording::record_examination(conn, &doctor, form.clone()))
        .map_err(|e| ApiError::from(e).with_form(&form))?;
    Ok((StatusCode::CREATED, Json(outcome)))
}
