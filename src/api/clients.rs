use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, ApiResponse, ClientDto};
use crate::api::validation::{validate_name, validate_phone};
use crate::db::{ClientInput, ClientUpdate};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateClientRequest {
    pub name: String,
    pub phone_number: Option<String>,
    pub contact_details: Option<String>,
    pub notes: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct UpdateClientRequest {
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub contact_details: Option<String>,
    pub notes: Option<String>,
}

/// GET /clients?search=
pub async fn list_clients(
    State(state): State<Arc<SharedState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<Vec<ClientDto>>>, ApiError> {
    let search = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let clients = state.store.list_clients(search).await?;

    Ok(Json(ApiResponse::success(
        clients.into_iter().map(ClientDto::from).collect(),
    )))
}

/// GET /clients/{id}
pub async fn get_client(
    State(state): State<Arc<SharedState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<ClientDto>>, ApiError> {
    let client = state
        .store
        .get_client(id)
        .await?
        .ok_or_else(|| ApiError::client_not_found(id))?;

    Ok(Json(ApiResponse::success(ClientDto::from(client))))
}

/// POST /clients
pub async fn create_client(
    State(state): State<Arc<SharedState>>,
    Json(payload): Json<CreateClientRequest>,
) -> Result<Json<ApiResponse<ClientDto>>, ApiError> {
    let name = validate_name(&payload.name)?.to_string();
    let phone_number = match payload.phone_number.as_deref() {
        Some(phone) if !phone.trim().is_empty() => Some(validate_phone(phone)?.to_string()),
        _ => None,
    };

    let client = state
        .store
        .create_client(ClientInput {
            name,
            phone_number,
            contact_details: payload.contact_details,
            notes: payload.notes,
        })
        .await?;

    Ok(Json(ApiResponse::success(ClientDto::from(client))))
}

/// PUT /clients/{id} — overwrites only the provided fields.
pub async fn update_client(
    State(state): State<Arc<SharedState>>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateClientRequest>,
) -> Result<Json<ApiResponse<ClientDto>>, ApiError> {
    let name = match payload.name.as_deref() {
        Some(name) => Some(validate_name(name)?.to_string()),
        None => None,
    };
    let phone_number = match payload.phone_number.as_deref() {
        Some(phone) => Some(validate_phone(phone)?.to_string()),
        None => None,
    };

    let update = ClientUpdate {
        name,
        phone_number,
        contact_details: payload.contact_details,
        notes: payload.notes,
    };

    let client = state
        .store
        .update_client(id, update)
        .await?
        .ok_or_else(|| ApiError::client_not_found(id))?;

    Ok(Json(ApiResponse::success(ClientDto::from(client))))
}
