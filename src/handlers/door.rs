// src/handlers/door.rs

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::door::{AccessDecision, AccessLog, DeviceAccessPayload, DoorStatus, LogsQuery},
};

#[utoipa::path(
    get,
    path = "/api/door/{device_id}/status",
    tag = "Door",
    params(("device_id" = Uuid, Path, description = "ID do dispositivo")),
    responses(
        (status = 200, description = "Estado atual da porta", body = DoorStatus),
        (status = 404, description = "Dispositivo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_door_status(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(device_id): Path<Uuid>,
) -> Result<Json<DoorStatus>, ApiError> {
    let status = app_state
        .door_service
        .get_status(user.id, device_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(status))
}

#[utoipa::path(
    post,
    path = "/api/door/{device_id}/toggle",
    tag = "Door",
    params(("device_id" = Uuid, Path, description = "ID do dispositivo")),
    responses(
        (status = 200, description = "Porta alternada (aberta <-> fechada)", body = DoorStatus)
    ),
    security(("api_jwt" = []))
)]
pub async fn toggle_door(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(device_id): Path<Uuid>,
) -> Result<Json<DoorStatus>, ApiError> {
    let status = app_state
        .door_service
        .toggle(user.id, device_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(status))
}

#[utoipa::path(
    get,
    path = "/api/door/{device_id}/logs",
    tag = "Door",
    params(
        ("device_id" = Uuid, Path, description = "ID do dispositivo"),
        LogsQuery
    ),
    responses(
        (status = 200, description = "Tentativas de acesso mais recentes", body = Vec<AccessLog>)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_access_logs(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(device_id): Path<Uuid>,
    Query(query): Query<LogsQuery>,
) -> Result<Json<Vec<AccessLog>>, ApiError> {
    query
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let logs = app_state
        .door_service
        .access_logs(user.id, device_id, query.limit)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(logs))
}

// Chamado pela fechadura, sem JWT: o dispositivo se identifica pelo MAC
#[utoipa::path(
    post,
    path = "/api/door/access",
    tag = "Door",
    request_body = DeviceAccessPayload,
    responses(
        (status = 200, description = "Decisão de acesso", body = AccessDecision),
        (status = 404, description = "MAC não registrado"),
        (status = 429, description = "Fechadura bloqueada por tentativas negadas")
    )
)]
pub async fn device_access(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<DeviceAccessPayload>,
) -> Result<Json<AccessDecision>, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let decision = app_state
        .door_service
        .device_access(&payload.mac_address, payload.access_method, &payload.access_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(decision))
}
