use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, ApiResponse, CaseDto};
use crate::api::validation::{validate_case_number, validate_status};
use crate::db::{CaseInput, CaseStatus, CaseUpdate, CaseWithClient};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateCaseRequest {
    pub case_number: String,
    pub court_name: Option<String>,
    pub case_title: Option<String>,
    pub case_type: Option<String>,
    pub client_id: i32,
    pub opponent_name: Option<String>,
    pub opponent_advocate: Option<String>,
    pub filing_date: Option<NaiveDate>,
    pub current_stage: Option<String>,
    pub next_hearing_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct UpdateCaseRequest {
    pub case_number: Option<String>,
    pub court_name: Option<String>,
    pub case_title: Option<String>,
    pub case_type: Option<String>,
    pub client_id: Option<i32>,
    pub opponent_name: Option<String>,
    pub opponent_advocate: Option<String>,
    pub filing_date: Option<NaiveDate>,
    pub current_stage: Option<String>,
    pub next_hearing_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

/// GET /cases?search=
/// The search term matches case number, court name, status and client name
/// as substrings, OR'd together.
pub async fn list_cases(
    State(state): State<Arc<SharedState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<Vec<CaseDto>>>, ApiError> {
    let search = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let cases = state.store.list_cases(search).await?;

    Ok(Json(ApiResponse::success(
        cases.into_iter().map(CaseDto::from).collect(),
    )))
}

/// GET /cases/{id}
pub async fn get_case(
    State(state): State<Arc<SharedState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<CaseDto>>, ApiError> {
    let case = state
        .store
        .get_case(id)
        .await?
        .ok_or_else(|| ApiError::case_not_found(id))?;

    Ok(Json(ApiResponse::success(CaseDto::from(case))))
}

/// POST /cases
pub async fn create_case(
    State(state): State<Arc<SharedState>>,
    Json(payload): Json<CreateCaseRequest>,
) -> Result<Json<ApiResponse<CaseDto>>, ApiError> {
    let case_number = validate_case_number(&payload.case_number)?.to_string();

    let status = match payload.status.as_deref() {
        Some(s) => validate_status(s)?,
        None => CaseStatus::DEFAULT,
    };

    // The client reference must resolve before anything is persisted.
    let client = state
        .store
        .get_client(payload.client_id)
        .await?
        .ok_or_else(|| {
            ApiError::validation(format!(
                "Client {} does not exist",
                payload.client_id
            ))
        })?;

    let case = state
        .store
        .create_case(CaseInput {
            case_number,
            court_name: payload.court_name,
            case_title: payload.case_title,
            case_type: payload.case_type,
            client_id: client.id,
            opponent_name: payload.opponent_name,
            opponent_advocate: payload.opponent_advocate,
            filing_date: payload.filing_date,
            current_stage: payload.current_stage,
            next_hearing_date: payload.next_hearing_date,
            status,
            notes: payload.notes,
        })
        .await?;

    Ok(Json(ApiResponse::success(CaseDto::from(CaseWithClient {
        case,
        client: Some(client),
    }))))
}

/// PUT /cases/{id} — overwrites only the provided fields, status included.
pub async fn update_case(
    State(state): State<Arc<SharedState>>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateCaseRequest>,
) -> Result<Json<ApiResponse<CaseDto>>, ApiError> {
    let case_number = match payload.case_number.as_deref() {
        Some(n) => Some(validate_case_number(n)?.to_string()),
        None => None,
    };
    let status = match payload.status.as_deref() {
        Some(s) => Some(validate_status(s)?),
        None => None,
    };

    if let Some(client_id) = payload.client_id
        && state.store.get_client(client_id).await?.is_none()
    {
        return Err(ApiError::validation(format!(
            "Client {client_id} does not exist"
        )));
    }

    let update = CaseUpdate {
        case_number,
        court_name: payload.court_name,
        case_title: payload.case_title,
        case_type: payload.case_type,
        client_id: payload.client_id,
        opponent_name: payload.opponent_name,
        opponent_advocate: payload.opponent_advocate,
        filing_date: payload.filing_date,
        current_stage: payload.current_stage,
        next_hearing_date: payload.next_hearing_date,
        status,
        notes: payload.notes,
    };

    let case = state
        .store
        .update_case(id, update)
        .await?
        .ok_or_else(|| ApiError::case_not_found(id))?;

    let client = state.store.get_client(case.client_id).await?;

    Ok(Json(ApiResponse::success(CaseDto::from(CaseWithClient {
        case,
        client,
    }))))
}
