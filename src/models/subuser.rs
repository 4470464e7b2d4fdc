// src/models/subuser.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::common::validation::validate_not_blank;

// Mapeia o CREATE TYPE subuser_access_method do banco
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "subuser_access_method", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SubUserAccessMethod {
    Fingerprint,
    Rfid,
}

// Credencial secundária (digital ou cartão RFID) gerenciada pelo dono do dispositivo.
// (admin_id, access_method, access_id) é único.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubUser {
    pub id: Uuid,
    pub admin_id: Uuid,
    #[schema(example = "Juan")]
    pub name: String,
    pub access_method: SubUserAccessMethod,
    #[schema(example = "04A1B2C3")]
    pub access_id: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubUserPayload {
    #[validate(
        custom(function = "validate_not_blank", message = "validation.name_required"),
        length(max = 100, message = "validation.length")
    )]
    pub name: String,
    pub access_method: SubUserAccessMethod,
    #[validate(
        custom(function = "validate_not_blank", message = "validation.access_id"),
        length(max = 64, message = "validation.length")
    )]
    pub access_id: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubUserPayload {
    #[validate(
        custom(function = "validate_not_blank", message = "validation.name_required"),
        length(max = 100, message = "validation.length")
    )]
    pub name: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SubUserQuery {
    pub access_method: Option<SubUserAccessMethod>,
}

// Cadastro de cartão pela tela de RFID do app
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRfidPayload {
    #[validate(
        custom(function = "validate_not_blank", message = "validation.name_required"),
        length(max = 100, message = "validation.length")
    )]
    pub name: String,
    #[validate(
        custom(function = "validate_not_blank", message = "validation.access_id"),
        length(max = 64, message = "validation.length")
    )]
    #[schema(example = "04A1B2C3")]
    pub rfid_code: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Juan", "1", true)]
    #[case("   ", "1", false)]
    #[case("Juan", " \t ", false)]
    #[case("", "1", false)]
    fn blank_names_and_credentials_are_rejected(#[case] name: &str, #[case] access_id: &str, #[case] ok: bool) {
        let payload = CreateSubUserPayload {
            name: name.into(),
            access_method: SubUserAccessMethod::Fingerprint,
            access_id: access_id.into(),
        };
        assert_eq!(payload.validate().is_ok(), ok);
    }

    #[test]
    fn blank_rename_is_rejected() {
        let payload = UpdateSubUserPayload { name: Some("  ".into()), is_active: None };
        let errors = payload.validate().unwrap_err();
        let field_errors = errors.field_errors();
        let name_errors = field_errors["name"];
        assert_eq!(name_errors[0].message.as_deref(), Some("validation.name_required"));
    }
}
