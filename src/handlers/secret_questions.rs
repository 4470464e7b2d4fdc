// src/handlers/secret_questions.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::secret_question::{CreateSecretQuestionPayload, SecretQuestion},
};

#[utoipa::path(
    get,
    path = "/api/secretQuestions",
    tag = "Auth",
    responses(
        (status = 200, description = "Perguntas disponíveis para o cadastro", body = Vec<SecretQuestion>)
    )
)]
pub async fn list_secret_questions(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<Json<Vec<SecretQuestion>>, ApiError> {
    let questions = app_state
        .secret_question_repo
        .list()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(questions))
}

#[utoipa::path(
    post,
    path = "/api/secretQuestions",
    tag = "Auth",
    request_body = CreateSecretQuestionPayload,
    responses(
        (status = 201, description = "Pergunta criada", body = SecretQuestion),
        (status = 409, description = "Já existe uma pergunta com esse id")
    )
)]
pub async fn create_secret_question(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<CreateSecretQuestionPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let question = app_state
        .secret_question_repo
        .create(payload.id, payload.pregunta.trim())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(question)))
}
