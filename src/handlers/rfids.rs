// src/handlers/rfids.rs
//
// Visão só-RFID sobre os subusuários (tela de cartões do app).

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
    models::{
        auth::MessageResponse,
        subuser::{CreateRfidPayload, CreateSubUserPayload, SubUser, SubUserAccessMethod},
    },
};

#[utoipa::path(
    get,
    path = "/api/rfids",
    tag = "RFID",
    responses(
        (status = 200, description = "Cartões cadastrados", body = Vec<SubUser>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_rfids(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<Vec<SubUser>>, ApiError> {
    let cards = app_state
        .subuser_service
        .list_subusers(user.id, Some(SubUserAccessMethod::Rfid))
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(cards))
}

#[utoipa::path(
    post,
    path = "/api/rfids",
    tag = "RFID",
    request_body = CreateRfidPayload,
    responses(
        (status = 201, description = "Cartão cadastrado", body = SubUser),
        (status = 409, description = "Cartão já cadastrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_rfid(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateRfidPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let subuser_payload = CreateSubUserPayload {
        name: payload.name,
        access_method: SubUserAccessMethod::Rfid,
        access_id: payload.rfid_code,
    };

    let card = app_state
        .subuser_service
        .create_subuser(user.id, &subuser_payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(card)))
}

#[utoipa::path(
    delete,
    path = "/api/rfids/{id}",
    tag = "RFID",
    params(("id" = Uuid, Path, description = "ID do subusuário RFID")),
    responses(
        (status = 200, description = "Cartão removido", body = MessageResponse),
        (status = 404, description = "Cartão não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_rfid(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    // Um subusuário de digital com esse id responde 404 aqui
    app_state
        .subuser_service
        .delete_subuser(user.id, id, Some(SubUserAccessMethod::Rfid))
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(MessageResponse {
        message: app_state.i18n_store.translate(&locale.0, "rfid.deleted"),
    }))
}
