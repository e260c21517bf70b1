//! `GET /api/reports?date=YYYY-MM-DD` — daily report. A missing or
//! malformed date means today; it never produces a 400.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::reports::{self, DailyReport};

#[derive(Deserialize)]
pub struct ReportQuery {
    pub date: Option<String>,
}

pub async fn daily(
    State(ctx): State<ApiContext>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<DailyReport>, ApiError> {
    let report = ctx
        .state
        .with_conn(|conn| reports::get_daily_report(conn, query.date.as_deref()))?;
    Ok(Json(report))
}
