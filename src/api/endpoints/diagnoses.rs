//! Diagnosis catalog endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, Created};
use crate::db;
use crate::models::Diagnosis;
use crate::recording;

#[derive(Debug, Serialize, Deserialize)]
pub struct DiagnosisForm {
    pub name: String,
    pub description: Option<String>,
}

/// `GET /api/diagnoses`
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<Vec<Diagnosis>>, ApiError> {
    let diagnoses = ctx
        .state
        .with_conn(|conn| db::get_all_diagnoses(conn).map_err(Into::into))?;
    Ok(Json(diagnoses))
}

/// `POST /api/diagnoses` — 409 with the form echoed when the name is taken.
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(form): Json<DiagnosisForm>,
) -> Result<(StatusCode, Json<Created>), ApiError> {
    let id = ctx
        .state
        .with_conn(|conn| recording::add_diagnosis(conn, &form.name, form.description.as_deref()))
        .map_err(|e| ApiError::from(e).with_form(&form))?;
    Ok((StatusCode::CREATED, Json(Created { id })))
}
