use axum::{
    extract::{Query, State},
    response::{IntoResponse, Json, Redirect, Response},
};
use serde::Deserialize;

use crate::app_state::AppState;
use crate::dashboard::{today_utc, Dashboard, DateRange};
use crate::error::{AppError, AppResult};
use crate::session::ClinicAccess;

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

/// Without both bounds the page is reloaded with the default month
pub async fn get_dashboard(
    ClinicAccess(context): ClinicAccess,
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> AppResult<Response> {
    let today = today_utc();

    let range = DateRange::from_query(query.from.as_deref(), query.to.as_deref())
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    let Some(range) = range else {
        let target = format!("/dashboard?{}", DateRange::starting(today).query_string());
        return Ok(Redirect::to(&target).into_response());
    };

    let dashboard = Dashboard::load(&state.db, context.clinic.id, range, today).await?;
    Ok(Json(dashboard).into_response())
}
