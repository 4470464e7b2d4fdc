// src/handlers/auth.rs

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
    middleware::{
        auth::{AuthenticatedUser, BearerToken},
        i18n::Locale,
    },
    models::auth::{
        AuthResponse, DevicePinPayload, LoginUserPayload, MessageResponse, PinCheckResponse,
        RecoverQuestionPayload, RecoverQuestionResponse, RegisterResponse, RegisterUserPayload,
        ResetPasswordPayload, UpdateUserPayload, UserProfile,
    },
};

// Handler de registro
#[utoipa::path(
    post,
    path = "/api/users/register",
    tag = "Auth",
    request_body = RegisterUserPayload,
    responses(
        (status = 201, description = "Usuário criado", body = RegisterResponse),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "E-mail já cadastrado")
    )
)]
pub async fn register(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<RegisterUserPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let user = app_state
        .auth_service
        .register_user(&payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let response = RegisterResponse {
        message: app_state.i18n_store.translate(&locale.0, "user.registered"),
        user: UserProfile::from(&user),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

// Handler de login
#[utoipa::path(
    post,
    path = "/api/users/login",
    tag = "Auth",
    request_body = LoginUserPayload,
    responses(
        (status = 200, description = "Login bem-sucedido", body = AuthResponse),
        (status = 401, description = "Credenciais inválidas")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<LoginUserPayload>,
) -> Result<Json<AuthResponse>, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let response = app_state
        .auth_service
        .login_user(&payload.email, &payload.password)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/users/logout",
    tag = "Auth",
    responses(
        (status = 200, description = "Sessão encerrada", body = MessageResponse)
    ),
    security(("api_jwt" = []))
)]
pub async fn logout(
    State(app_state): State<AppState>,
    locale: Locale,
    BearerToken(token): BearerToken,
) -> Result<Json<MessageResponse>, ApiError> {
    app_state
        .auth_service
        .logout(&token)
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(MessageResponse {
        message: app_state.i18n_store.translate(&locale.0, "auth.logged_out"),
    }))
}

// Handler da rota protegida /me
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "Users",
    responses(
        (status = 200, description = "Perfil do usuário logado", body = UserProfile)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_me(AuthenticatedUser(user): AuthenticatedUser) -> Json<UserProfile> {
    Json(UserProfile::from(&user))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = Uuid, Path, description = "ID do usuário")),
    responses(
        (status = 200, description = "Perfil", body = UserProfile),
        (status = 403, description = "Só é possível consultar o próprio perfil")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_user(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(acting): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<UserProfile>, ApiError> {
    let user = app_state
        .user_service
        .get_user(acting.id, id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(UserProfile::from(&user)))
}

#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "Users",
    request_body = UpdateUserPayload,
    params(("id" = Uuid, Path, description = "ID do usuário")),
    responses(
        (status = 200, description = "Perfil atualizado", body = UserProfile),
        (status = 409, description = "E-mail já cadastrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_user(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(acting): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserPayload>,
) -> Result<Json<UserProfile>, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let user = app_state
        .user_service
        .update_user(acting.id, id, payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(UserProfile::from(&user)))
}

#[utoipa::path(
    put,
    path = "/api/users/{id}/device-pin",
    tag = "Users",
    request_body = DevicePinPayload,
    params(("id" = Uuid, Path, description = "ID do usuário")),
    responses(
        (status = 200, description = "PIN gravado", body = MessageResponse)
    ),
    security(("api_jwt" = []))
)]
pub async fn set_device_pin(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(acting): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<DevicePinPayload>,
) -> Result<Json<MessageResponse>, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    app_state
        .user_service
        .set_device_pin(acting.id, id, &payload.device_pin)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(MessageResponse {
        message: app_state.i18n_store.translate(&locale.0, "user.device_pin_set"),
    }))
}

#[utoipa::path(
    post,
    path = "/api/users/{id}/verify-pin",
    tag = "Users",
    request_body = DevicePinPayload,
    params(("id" = Uuid, Path, description = "ID do usuário")),
    responses(
        (status = 200, description = "Resultado da conferência", body = PinCheckResponse),
        (status = 400, description = "Usuário ainda não tem PIN")
    ),
    security(("api_jwt" = []))
)]
pub async fn verify_device_pin(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(acting): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<DevicePinPayload>,
) -> Result<Json<PinCheckResponse>, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let valid = app_state
        .user_service
        .verify_device_pin(acting.id, id, &payload.device_pin)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(PinCheckResponse { valid }))
}

// --- Recuperação de senha (rotas públicas) ---

#[utoipa::path(
    post,
    path = "/api/users/recover/question",
    tag = "Auth",
    request_body = RecoverQuestionPayload,
    responses(
        (status = 200, description = "Pergunta secreta do usuário", body = RecoverQuestionResponse),
        (status = 404, description = "E-mail não cadastrado")
    )
)]
pub async fn recover_question(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<RecoverQuestionPayload>,
) -> Result<Json<RecoverQuestionResponse>, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let question = app_state
        .auth_service
        .secret_question_for(&payload.email)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(question))
}

#[utoipa::path(
    post,
    path = "/api/users/recover/reset",
    tag = "Auth",
    request_body = ResetPasswordPayload,
    responses(
        (status = 200, description = "Senha redefinida", body = MessageResponse),
        (status = 401, description = "Resposta secreta incorreta")
    )
)]
pub async fn reset_password(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<ResetPasswordPayload>,
) -> Result<Json<MessageResponse>, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    app_state
        .auth_service
        .reset_password(&payload.email, &payload.secret_answer, &payload.new_password)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(MessageResponse {
        message: app_state.i18n_store.translate(&locale.0, "user.password_reset"),
    }))
}
