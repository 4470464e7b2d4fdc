// src/models/secret_question.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::common::validation::validate_not_blank;

// Perguntas de recuperação de senha. O id é numérico e definido por quem cadastra.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct SecretQuestion {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "¿Cuál es el nombre de tu primera mascota?")]
    pub pregunta: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSecretQuestionPayload {
    #[validate(range(min = 1, message = "validation.required"))]
    pub id: i32,
    #[validate(
        custom(function = "validate_not_blank", message = "validation.question"),
        length(max = 255, message = "validation.length")
    )]
    pub pregunta: String,
}
