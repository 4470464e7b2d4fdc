// src/handlers/content.rs
//
// Conteúdo institucional: leitura pública, escrita só autenticada.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::content::{
        CreateEntryPayload, CreatePreguntaPayload, Empresa, Politica, Pregunta, Statement,
        StatementKind, UpdateStatementPayload, Valor,
    },
};

#[utoipa::path(
    get,
    path = "/api/empresa",
    tag = "Empresa",
    responses(
        (status = 200, description = "Dados da empresa", body = Empresa),
        (status = 404, description = "Conteúdo não cadastrado")
    )
)]
pub async fn get_empresa(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<Json<Empresa>, ApiError> {
    let empresa = app_state
        .content_repo
        .get_empresa()
        .await
        .and_then(|found| found.ok_or(AppError::ContentNotFound("empresa")))
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(empresa))
}

#[utoipa::path(
    get,
    path = "/api/empresa/preguntas",
    tag = "Empresa",
    responses((status = 200, description = "Perguntas frequentes", body = Vec<Pregunta>))
)]
pub async fn list_preguntas(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<Json<Vec<Pregunta>>, ApiError> {
    let preguntas = app_state
        .content_repo
        .list_preguntas()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(preguntas))
}

#[utoipa::path(
    post,
    path = "/api/empresa/preguntas",
    tag = "Empresa",
    request_body = CreatePreguntaPayload,
    responses((status = 201, description = "Pergunta criada", body = Pregunta)),
    security(("api_jwt" = []))
)]
pub async fn create_pregunta(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
    Json(payload): Json<CreatePreguntaPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let pregunta = app_state
        .content_repo
        .create_pregunta(payload.question.trim(), payload.answer.trim())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(pregunta)))
}

async fn read_statement(
    app_state: &AppState,
    locale: &Locale,
    kind: StatementKind,
) -> Result<Json<Statement>, ApiError> {
    let label = match kind {
        StatementKind::Mision => "mision",
        StatementKind::Vision => "vision",
    };

    let statement = app_state
        .content_repo
        .get_statement(kind)
        .await
        .and_then(|found| found.ok_or(AppError::ContentNotFound(label)))
        .map_err(|e| e.to_api_error(locale, &app_state.i18n_store))?;

    Ok(Json(statement))
}

async fn replace_statement(
    app_state: &AppState,
    locale: &Locale,
    kind: StatementKind,
    payload: UpdateStatementPayload,
) -> Result<Json<Statement>, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(locale, &app_state.i18n_store))?;

    let statement = app_state
        .content_repo
        .upsert_statement(kind, payload.text.trim())
        .await
        .map_err(|e| e.to_api_error(locale, &app_state.i18n_store))?;

    tracing::info!(kind = ?kind, "Texto institucional atualizado");
    Ok(Json(statement))
}

#[utoipa::path(
    get,
    path = "/api/empresa/mision",
    tag = "Empresa",
    responses((status = 200, description = "Missão", body = Statement))
)]
pub async fn get_mision(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<Json<Statement>, ApiError> {
    read_statement(&app_state, &locale, StatementKind::Mision).await
}

#[utoipa::path(
    put,
    path = "/api/empresa/mision",
    tag = "Empresa",
    request_body = UpdateStatementPayload,
    responses((status = 200, description = "Missão substituída", body = Statement)),
    security(("api_jwt" = []))
)]
pub async fn update_mision(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
    Json(payload): Json<UpdateStatementPayload>,
) -> Result<Json<Statement>, ApiError> {
    replace_statement(&app_state, &locale, StatementKind::Mision, payload).await
}

#[utoipa::path(
    get,
    path = "/api/empresa/vision",
    tag = "Empresa",
    responses((status = 200, description = "Visão", body = Statement))
)]
pub async fn get_vision(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<Json<Statement>, ApiError> {
    read_statement(&app_state, &locale, StatementKind::Vision).await
}

#[utoipa::path(
    put,
    path = "/api/empresa/vision",
    tag = "Empresa",
    request_body = UpdateStatementPayload,
    responses((status = 200, description = "Visão substituída", body = Statement)),
    security(("api_jwt" = []))
)]
pub async fn update_vision(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
    Json(payload): Json<UpdateStatementPayload>,
) -> Result<Json<Statement>, ApiError> {
    replace_statement(&app_state, &locale, StatementKind::Vision, payload).await
}

#[utoipa::path(
    get,
    path = "/api/empresa/valores",
    tag = "Empresa",
    responses((status = 200, description = "Valores", body = Vec<Valor>))
)]
pub async fn list_valores(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<Json<Vec<Valor>>, ApiError> {
    let valores = app_state
        .content_repo
        .list_valores()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(valores))
}

#[utoipa::path(
    post,
    path = "/api/empresa/valores",
    tag = "Empresa",
    request_body = CreateEntryPayload,
    responses((status = 201, description = "Valor criado", body = Valor)),
    security(("api_jwt" = []))
)]
pub async fn create_valor(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
    Json(payload): Json<CreateEntryPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let valor = app_state
        .content_repo
        .create_valor(payload.title.trim(), payload.description.trim())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(valor)))
}

#[utoipa::path(
    get,
    path = "/api/empresa/politicas",
    tag = "Empresa",
    responses((status = 200, description = "Políticas", body = Vec<Politica>))
)]
pub async fn list_politicas(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<Json<Vec<Politica>>, ApiError> {
    let politicas = app_state
        .content_repo
        .list_politicas()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(politicas))
}

#[utoipa::path(
    post,
    path = "/api/empresa/politicas",
    tag = "Empresa",
    request_body = CreateEntryPayload,
    responses((status = 201, description = "Política criada", body = Politica)),
    security(("api_jwt" = []))
)]
pub async fn create_politica(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
    Json(payload): Json<CreateEntryPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let politica = app_state
        .content_repo
        .create_politica(payload.title.trim(), payload.description.trim())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(politica)))
}
