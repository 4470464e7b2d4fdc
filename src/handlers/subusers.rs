// src/handlers/subusers.rs

use axum::{
    extract::{Path, Query, State},
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
        subuser::{CreateSubUserPayload, SubUser, SubUserQuery, UpdateSubUserPayload},
    },
};

#[utoipa::path(
    post,
    path = "/api/subusers",
    tag = "SubUsers",
    request_body = CreateSubUserPayload,
    responses(
        (status = 201, description = "Subusuário criado", body = SubUser),
        (status = 409, description = "Credencial já cadastrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_subuser(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateSubUserPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let subuser = app_state
        .subuser_service
        .create_subuser(user.id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(subuser)))
}

#[utoipa::path(
    get,
    path = "/api/subusers",
    tag = "SubUsers",
    params(SubUserQuery),
    responses(
        (status = 200, description = "Subusuários do administrador", body = Vec<SubUser>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_subusers(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(query): Query<SubUserQuery>,
) -> Result<Json<Vec<SubUser>>, ApiError> {
    let subusers = app_state
        .subuser_service
        .list_subusers(user.id, query.access_method)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(subusers))
}

#[utoipa::path(
    get,
    path = "/api/subusers/{id}",
    tag = "SubUsers",
    params(("id" = Uuid, Path, description = "ID do subusuário")),
    responses(
        (status = 200, description = "Subusuário", body = SubUser),
        (status = 404, description = "Subusuário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_subuser(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<SubUser>, ApiError> {
    let subuser = app_state
        .subuser_service
        .get_subuser(user.id, id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(subuser))
}

#[utoipa::path(
    put,
    path = "/api/subusers/{id}",
    tag = "SubUsers",
    request_body = UpdateSubUserPayload,
    params(("id" = Uuid, Path, description = "ID do subusuário")),
    responses(
        (status = 200, description = "Subusuário atualizado", body = SubUser)
    ),
    security(("api_jwt" = []))
)]
pub async fn update_subuser(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSubUserPayload>,
) -> Result<Json<SubUser>, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let subuser = app_state
        .subuser_service
        .update_subuser(user.id, id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(subuser))
}

#[utoipa::path(
    delete,
    path = "/api/subusers/{id}",
    tag = "SubUsers",
    params(("id" = Uuid, Path, description = "ID do subusuário")),
    responses(
        (status = 200, description = "Subusuário removido", body = MessageResponse),
        (status = 404, description = "Subusuário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_subuser(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    app_state
        .subuser_service
        .delete_subuser(user.id, id, None)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(MessageResponse {
        message: app_state.i18n_store.translate(&locale.0, "subuser.deleted"),
    }))
}
