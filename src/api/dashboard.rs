use axum::{Json, extract::State};
use chrono::{Days, Local};
use std::sync::Arc;

use super::{ApiError, ApiResponse, CaseDto, DashboardDto};
use crate::db::CaseStatus;
use crate::state::SharedState;

const UPCOMING_WINDOW_DAYS: u64 = 7;

/// GET /dashboard
/// Hearings in the next seven days plus active/closed totals. Pure read.
pub async fn get_dashboard(
    State(state): State<Arc<SharedState>>,
) -> Result<Json<ApiResponse<DashboardDto>>, ApiError> {
    let today = Local::now().date_naive();
    let tomorrow = today
        .checked_add_days(Days::new(1))
        .ok_or_else(|| ApiError::internal("Date overflow"))?;
    let next_week = today
        .checked_add_days(Days::new(UPCOMING_WINDOW_DAYS))
        .ok_or_else(|| ApiError::internal("Date overflow"))?;

    let upcoming = state.store.upcoming_cases(today, next_week).await?;
    let active_count = state.store.count_cases_by_status(CaseStatus::Active).await?;
    let closed_count = state.store.count_cases_by_status(CaseStatus::Closed).await?;

    Ok(Json(ApiResponse::success(DashboardDto {
        today,
        tomorrow,
        upcoming_hearings: upcoming.into_iter().map(CaseDto::from).collect(),
        active_count,
        closed_count,
    })))
}
