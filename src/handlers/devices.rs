// src/handlers/devices.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::device::{
        Device, DeviceStatusPayload, HasDeviceResponse, RegisterDevicePayload, UpdateDevicePayload,
    },
};

#[utoipa::path(
    post,
    path = "/api/devices/register",
    tag = "Devices",
    request_body = RegisterDevicePayload,
    responses(
        (status = 201, description = "Fechadura vinculada", body = Device),
        (status = 409, description = "MAC já registrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn register_device(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<RegisterDevicePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let device = app_state
        .device_service
        .register_device(user.id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(device)))
}

#[utoipa::path(
    get,
    path = "/api/devices",
    tag = "Devices",
    responses(
        (status = 200, description = "Dispositivos do usuário", body = Vec<Device>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_devices(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<Vec<Device>>, ApiError> {
    let devices = app_state
        .device_service
        .list_devices(user.id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(devices))
}

#[utoipa::path(
    get,
    path = "/api/devices/has-device",
    tag = "Devices",
    responses(
        (status = 200, description = "Se o usuário já vinculou alguma fechadura", body = HasDeviceResponse)
    ),
    security(("api_jwt" = []))
)]
pub async fn has_device(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<HasDeviceResponse>, ApiError> {
    let has_device = app_state
        .device_service
        .has_device(user.id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(HasDeviceResponse { has_device }))
}

#[utoipa::path(
    get,
    path = "/api/devices/{id}",
    tag = "Devices",
    params(("id" = Uuid, Path, description = "ID do dispositivo")),
    responses(
        (status = 200, description = "Dispositivo", body = Device),
        (status = 404, description = "Dispositivo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_device(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Device>, ApiError> {
    let device = app_state
        .device_service
        .get_device(user.id, id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(device))
}

#[utoipa::path(
    put,
    path = "/api/devices/{id}",
    tag = "Devices",
    request_body = UpdateDevicePayload,
    params(("id" = Uuid, Path, description = "ID do dispositivo")),
    responses(
        (status = 200, description = "Dispositivo atualizado", body = Device)
    ),
    security(("api_jwt" = []))
)]
pub async fn update_device(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateDevicePayload>,
) -> Result<Json<Device>, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let device = app_state
        .device_service
        .update_device(user.id, id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(device))
}

#[utoipa::path(
    put,
    path = "/api/devices/{id}/status",
    tag = "Devices",
    request_body = DeviceStatusPayload,
    params(("id" = Uuid, Path, description = "ID do dispositivo")),
    responses(
        (status = 200, description = "Status de conexão atualizado", body = Device)
    ),
    security(("api_jwt" = []))
)]
pub async fn update_device_status(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<DeviceStatusPayload>,
) -> Result<Json<Device>, ApiError> {
    let device = app_state
        .device_service
        .update_status(user.id, id, payload.is_online)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(device))
}
