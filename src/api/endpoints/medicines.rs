//! Medicine catalog endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, Created};
use crate::db;
use crate::models::{Medicine, NewMedicine};
use crate::recording;

/// `GET /api/medicines`
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<Vec<Medicine>>, ApiError> {
    let medicines = ctx
        .state
        .with_conn(|conn| db::get_all_medicines(conn).map_err(Into::into))?;
    Ok(Json(medicines))
}

/// `POST /api/medicines`
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(form): Json<NewMedicine>,
) -> Result<(StatusCode, Json<Created>), ApiError> {
    let id = ctx
        .state
        .with_conn(|conn| recording::add_medicine(conn, form.clone()))
        .map_err(|e| ApiError::from(e).with_form(&form))?;
    Ok((StatusCode::CREATED, Json(Created { id })))
}
