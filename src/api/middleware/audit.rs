//! Access logging middleware.
//!
//! Logs every authenticated request with the acting doctor, method, path,
//! and response status. Runs innermost (after auth has injected the
//! `DoctorContext`).

use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::models::DoctorContext;

pub async fn log_access(req: Request<axum::body::Body>, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let doctor = req
        .extensions()
        .get::<DoctorContext>()
        .map(|d| d.login.clone())
        .unwrap_or_else(|| "anonymous".to_string());

    let response = next.run(req).await;

    tracing::info!(
        %method,
        path = %path,
        doctor = %doctor,
        status = response.status().as_u16(),
        "API access"
    );
    response
}
