// src/common/error.rs

use std::collections::HashMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::{common::i18n::I18nStore, middleware::i18n::Locale};

// Erro de domínio: usado pelos repositórios e serviços.
// A conversão para HTTP acontece em `to_api_error`, que já traduz a mensagem.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Token revogado (logout)")]
    TokenRevoked,

    #[error("Acesso negado ao recurso")]
    Forbidden,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Resposta secreta incorreta")]
    InvalidSecretAnswer,

    #[error("PIN do dispositivo não configurado")]
    DevicePinNotSet,

    #[error("Pergunta secreta {0} não encontrada")]
    SecretQuestionNotFound(i32),

    #[error("Pergunta secreta {0} já existe")]
    SecretQuestionAlreadyExists(i32),

    #[error("Dispositivo não encontrado")]
    DeviceNotFound,

    #[error("Endereço MAC já registrado: {0}")]
    MacAddressAlreadyRegistered(String),

    #[error("Fechadura bloqueada por excesso de tentativas negadas")]
    TooManyAccessAttempts,

    #[error("Subusuário não encontrado")]
    SubUserNotFound,

    #[error("Credencial de acesso já cadastrada")]
    AccessCredentialAlreadyExists,

    #[error("Produto não encontrado")]
    ProductNotFound,

    #[error("Compra não encontrada")]
    PurchaseNotFound,

    #[error("Total informado ({informed}) difere do calculado ({computed})")]
    PurchaseTotalMismatch {
        informed: rust_decimal::Decimal,
        computed: rust_decimal::Decimal,
    },

    #[error("Conteúdo não encontrado: {0}")]
    ContentNotFound(&'static str),

    #[error("Violação de unicidade: {0}")]
    UniqueConstraintViolation(String),

    #[error("Fonte não encontrada: {0}")]
    FontNotFound(String),

    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    /// Status HTTP e chave de tradução de cada variante.
    pub fn status_and_key(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::ValidationError(_) => (StatusCode::BAD_REQUEST, "validation.failed"),
            AppError::EmailAlreadyExists => (StatusCode::CONFLICT, "user.email_taken"),
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "auth.invalid_credentials"),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "auth.invalid_token"),
            AppError::TokenRevoked => (StatusCode::UNAUTHORIZED, "auth.token_revoked"),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "auth.forbidden"),
            AppError::UserNotFound => (StatusCode::NOT_FOUND, "user.not_found"),
            AppError::InvalidSecretAnswer => (StatusCode::UNAUTHORIZED, "user.invalid_secret_answer"),
            AppError::DevicePinNotSet => (StatusCode::BAD_REQUEST, "user.device_pin_not_set"),
            AppError::SecretQuestionNotFound(_) => (StatusCode::NOT_FOUND, "secret_question.not_found"),
            AppError::SecretQuestionAlreadyExists(_) => (StatusCode::CONFLICT, "secret_question.already_exists"),
            AppError::DeviceNotFound => (StatusCode::NOT_FOUND, "device.not_found"),
            AppError::MacAddressAlreadyRegistered(_) => (StatusCode::CONFLICT, "device.mac_taken"),
            AppError::TooManyAccessAttempts => (StatusCode::TOO_MANY_REQUESTS, "door.too_many_attempts"),
            AppError::SubUserNotFound => (StatusCode::NOT_FOUND, "subuser.not_found"),
            AppError::AccessCredentialAlreadyExists => (StatusCode::CONFLICT, "subuser.credential_taken"),
            AppError::ProductNotFound => (StatusCode::NOT_FOUND, "product.not_found"),
            AppError::PurchaseNotFound => (StatusCode::NOT_FOUND, "purchase.not_found"),
            AppError::PurchaseTotalMismatch { .. } => (StatusCode::BAD_REQUEST, "purchase.total_mismatch"),
            AppError::ContentNotFound(_) => (StatusCode::NOT_FOUND, "content.not_found"),
            AppError::UniqueConstraintViolation(_) => (StatusCode::CONFLICT, "database.unique_violation"),

            // Todo o resto vira 500 com mensagem genérica.
            AppError::FontNotFound(_)
            | AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
        }
    }

    /// Converte o erro de domínio no corpo HTTP, traduzido para o idioma do cliente.
    pub fn to_api_error(&self, locale: &Locale, store: &I18nStore) -> ApiError {
        let (status, key) = self.status_and_key();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Erro Interno do Servidor: {}", self);
        }

        let details = match self {
            AppError::ValidationError(errors) => {
                let mut details = HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| match &e.message {
                            Some(msg) => store.translate(&locale.0, msg),
                            None => store.translate(&locale.0, &format!("validation.{}", e.code)),
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                Some(json!(details))
            }
            _ => None,
        };

        ApiError {
            status,
            error: store.translate(&locale.0, key),
            details,
        }
    }
}

// Corpo de erro que efetivamente sai na resposta HTTP.
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status;
        (status, Json(self)).into_response()
    }
}

// Usado onde não há idioma disponível (middlewares): responde no idioma padrão.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_api_error(&Locale::default(), I18nStore::global())
            .into_response()
    }
}

// Converte violações de unicidade do Postgres nos erros de domínio certos.
pub fn map_unique_violation(e: sqlx::Error, on_unique: impl FnOnce(&str) -> AppError) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            let constraint = db_err.constraint().unwrap_or_default();
            return on_unique(constraint);
        }
    }
    e.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use validator::{ValidationError, ValidationErrors};

    #[rstest]
    #[case(AppError::EmailAlreadyExists, StatusCode::CONFLICT)]
    #[case(AppError::InvalidCredentials, StatusCode::UNAUTHORIZED)]
    #[case(AppError::TokenRevoked, StatusCode::UNAUTHORIZED)]
    #[case(AppError::Forbidden, StatusCode::FORBIDDEN)]
    #[case(AppError::DeviceNotFound, StatusCode::NOT_FOUND)]
    #[case(AppError::MacAddressAlreadyRegistered("AA:BB:CC:DD:EE:FF".into()), StatusCode::CONFLICT)]
    #[case(AppError::AccessCredentialAlreadyExists, StatusCode::CONFLICT)]
    #[case(AppError::TooManyAccessAttempts, StatusCode::TOO_MANY_REQUESTS)]
    #[case(AppError::InternalServerError(anyhow::anyhow!("boom")), StatusCode::INTERNAL_SERVER_ERROR)]
    fn maps_variants_to_status(#[case] err: AppError, #[case] expected: StatusCode) {
        assert_eq!(err.status_and_key().0, expected);
    }

    #[test]
    fn internal_errors_do_not_leak_details() {
        let err = AppError::InternalServerError(anyhow::anyhow!("senha do banco: 1234"));
        let api = err.to_api_error(&Locale("en".into()), I18nStore::global());
        assert!(!api.error.contains("1234"));
        assert!(api.details.is_none());
    }

    #[test]
    fn validation_errors_carry_translated_field_details() {
        let mut errors = ValidationErrors::new();
        let mut err = ValidationError::new("pin");
        err.message = Some("validation.pin".into());
        errors.add("devicePin", err);

        let api = AppError::ValidationError(errors).to_api_error(&Locale("en".into()), I18nStore::global());

        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        let details = api.details.expect("details");
        let messages = details["devicePin"].as_array().expect("array");
        assert_eq!(messages.len(), 1);
        assert_ne!(messages[0].as_str(), Some("validation.pin"));
    }
}
