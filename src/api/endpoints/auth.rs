//! Doctor registration, login and logout.
//!
//! - `POST /api/auth/register` — create a doctor account
//! - `POST /api/auth/login` — open a session, returns a bearer token
//! - `POST /api/auth/logout` — close the current session

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, Created, SessionToken};
use crate::models::DoctorContext;
use crate::recording;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub login: String,
    pub password: String,
    pub name: String,
}

/// What gets echoed back on a failed registration (never the password).
#[derive(Serialize)]
struct RegisterFormEcho<'a> {
    login: &'a str,
    name: &'a str,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub login: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub doctor: DoctorContext,
}

/// `POST /api/auth/register`
pub async fn register(
    State(ctx): State<ApiContext>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<Created>), ApiError> {
    let id = ctx
        .state
        .with_conn(|conn| recording::register_doctor(conn, &body.login, &body.password, &body.name))
        .map_err(|e| {
            ApiError::from(e).with_form(&RegisterFormEcho {
                login: &body.login,
                name: &body.name,
            })
        })?;
    Ok((StatusCode::CREATED, Json(Created { id })))
}

/// `POST /api/auth/login`
pub async fn login(
    State(ctx): State<ApiContext>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let (token, doctor) = ctx
        .state
        .login(&body.login, &body.password)?
        .ok_or(ApiError::Unauthorized)?;
    Ok(Json(LoginResponse { token, doctor }))
}

/// `POST /api/auth/logout`
pub async fn logout(
    State(ctx): State<ApiContext>,
    Extension(token): Extension<SessionToken>,
) -> Result<StatusCode, ApiError> {
    ctx.state.logout(&token.0)?;
    Ok(StatusCode::NO_CONTENT)
}
