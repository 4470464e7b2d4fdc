// src/models/content.rs
//
// Conteúdo institucional ("Sobre nós") exibido no app.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::validation::validate_not_blank;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Empresa {
    pub id: Uuid,
    #[schema(example = "Portero Seguro S.A.")]
    pub name: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub logo: Option<String>,
}

// Pergunta frequente (FAQ)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Pregunta {
    pub id: Uuid,
    #[schema(example = "¿Cómo registro mi cerradura?")]
    pub question: String,
    pub answer: String,
}

// Missão e visão são textos únicos, guardados na mesma tabela
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "statement_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum StatementKind {
    Mision,
    Vision,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Statement {
    pub kind: StatementKind,
    pub text: String,
    pub updated_at: DateTime<Utc>,
}

// Valores e políticas compartilham o mesmo formato
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Valor {
    pub id: Uuid,
    #[schema(example = "Seguridad")]
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Politica {
    pub id: Uuid,
    #[schema(example = "Privacidad")]
    pub title: String,
    pub description: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePreguntaPayload {
    #[validate(custom(function = "validate_not_blank", message = "validation.question"))]
    pub question: String,
    #[validate(custom(function = "validate_not_blank", message = "validation.required"))]
    pub answer: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEntryPayload {
    #[validate(
        custom(function = "validate_not_blank", message = "validation.required"),
        length(max = 150, message = "validation.length")
    )]
    pub title: String,
    #[validate(custom(function = "validate_not_blank", message = "validation.required"))]
    pub description: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateStatementPayload {
    #[validate(custom(function = "validate_not_blank", message = "validation.required"))]
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("¿Hacen envíos?", "Sí", true)]
    #[case("   ", "Sí", false)]
    #[case("¿Hacen envíos?", "\n", false)]
    fn pregunta_needs_visible_text(#[case] question: &str, #[case] answer: &str, #[case] ok: bool) {
        let payload = CreatePreguntaPayload { question: question.into(), answer: answer.into() };
        assert_eq!(payload.validate().is_ok(), ok);
    }

    #[rstest]
    #[case("Respeto", "Tratamos a todos igual", true)]
    #[case("  ", "Tratamos a todos igual", false)]
    #[case(&"t".repeat(151), "Tratamos a todos igual", false)]
    #[case("Respeto", "   ", false)]
    fn entries_need_visible_text(#[case] title: &str, #[case] description: &str, #[case] ok: bool) {
        let payload = CreateEntryPayload { title: title.into(), description: description.into() };
        assert_eq!(payload.validate().is_ok(), ok);
    }

    #[test]
    fn blank_statement_is_rejected() {
        let payload = UpdateStatementPayload { text: " ".into() };
        assert!(payload.validate().is_err());
    }
}
