// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::validation::{validate_not_blank, validate_phone, validate_pin};

// Representa um usuário vindo do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub last_name: String,
    pub surname: Option<String>,
    pub phone: String,
    pub email: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    pub password_hash: String,

    pub secret_question_id: i32,

    // A resposta secreta e o PIN também são guardados com bcrypt
    #[serde(skip_serializing)]
    pub secret_answer_hash: String,

    #[serde(skip_serializing)]
    pub device_pin_hash: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// O que o app recebe sobre um usuário. Nenhum hash sai daqui.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    #[schema(example = "María")]
    pub name: String,
    #[schema(example = "González")]
    pub last_name: String,
    #[schema(example = "Pérez")]
    pub surname: Option<String>,
    #[schema(example = "5512345678")]
    pub phone: String,
    #[schema(example = "maria@correo.com")]
    pub email: String,
    #[schema(example = 1)]
    pub secret_question: i32,
    pub has_device_pin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            last_name: user.last_name.clone(),
            surname: user.surname.clone(),
            phone: user.phone.clone(),
            email: user.email.clone(),
            secret_question: user.secret_question_id,
            has_device_pin: user.device_pin_hash.is_some(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

// Dados para registro de um novo usuário
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserPayload {
    #[validate(
        custom(function = "validate_not_blank", message = "validation.name_required"),
        length(max = 100, message = "validation.length")
    )]
    pub name: String,
    #[validate(custom(function = "validate_not_blank"), length(max = 100, message = "validation.length"))]
    pub last_name: String,
    #[validate(length(max = 100, message = "validation.length"))]
    pub surname: Option<String>,
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,
    #[validate(email(message = "validation.email"), length(max = 255, message = "validation.length"))]
    pub email: String,
    #[validate(length(min = 6, message = "validation.password_length"))]
    pub password: String,
    #[schema(example = 1)]
    pub secret_question: i32,
    #[validate(length(min = 1, message = "validation.secret_answer"))]
    pub secret_answer: String,
    #[validate(custom(function = "validate_pin"))]
    pub device_pin: Option<String>,
}

// Dados para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginUserPayload {
    #[validate(email(message = "validation.email"), length(max = 255, message = "validation.length"))]
    pub email: String,
    #[validate(length(min = 1, message = "validation.required"))]
    pub password: String,
}

// Resposta de login: o app guarda os três valores localmente
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub user_id: Uuid,
    pub has_device: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    pub message: String,
    pub user: UserProfile,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

// Atualização parcial do perfil. Senha presente => é re-hasheada.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserPayload {
    #[validate(
        custom(function = "validate_not_blank", message = "validation.name_required"),
        length(max = 100, message = "validation.length")
    )]
    pub name: Option<String>,
    #[validate(custom(function = "validate_not_blank"), length(max = 100, message = "validation.length"))]
    pub last_name: Option<String>,
    #[validate(length(max = 100, message = "validation.length"))]
    pub surname: Option<String>,
    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,
    #[validate(email(message = "validation.email"), length(max = 255, message = "validation.length"))]
    pub email: Option<String>,
    #[validate(length(min = 6, message = "validation.password_length"))]
    pub password: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DevicePinPayload {
    #[validate(custom(function = "validate_pin"))]
    #[schema(example = "1234")]
    pub device_pin: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PinCheckResponse {
    pub valid: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RecoverQuestionPayload {
    #[validate(email(message = "validation.email"), length(max = 255, message = "validation.length"))]
    pub email: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecoverQuestionResponse {
    pub secret_question: i32,
    pub pregunta: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordPayload {
    #[validate(email(message = "validation.email"), length(max = 255, message = "validation.length"))]
    pub email: String,
    #[validate(length(min = 1, message = "validation.secret_answer"))]
    pub secret_answer: String,
    #[validate(length(min = 6, message = "validation.password_length"))]
    pub new_password: String,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,  // Subject (ID do usuário)
    pub exp: usize, // Expiration time (quando o token expira)
    pub iat: usize, // Issued At (quando o token foi criado)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::{json, Value};

    fn sample_user() -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            name: "María".into(),
            last_name: "González".into(),
            surname: None,
            phone: "5512345678".into(),
            email: "maria@correo.com".into(),
            password_hash: "$2b$12$senha".into(),
            secret_question_id: 1,
            secret_answer_hash: "$2b$12$resposta".into(),
            device_pin_hash: Some("$2b$12$pin".into()),
            created_at: now,
            updated_at: now,
        }
    }

    fn assert_no_hashes(value: &Value) {
        let object = value.as_object().expect("objeto JSON");
        for key in ["passwordHash", "secretAnswerHash", "devicePinHash", "password_hash"] {
            assert!(!object.contains_key(key), "{key} não pode ser serializado");
        }
        let text = value.to_string();
        assert!(!text.contains("$2b$12$"), "nenhum hash pode aparecer: {text}");
    }

    #[test]
    fn user_never_serializes_hashes() {
        let value = serde_json::to_value(sample_user()).unwrap();
        assert_no_hashes(&value);
        assert_eq!(value["email"], "maria@correo.com");
    }

    #[test]
    fn profile_exposes_only_whether_a_pin_exists() {
        let user = sample_user();
        let value = serde_json::to_value(UserProfile::from(&user)).unwrap();
        assert_no_hashes(&value);
        assert_eq!(value["hasDevicePin"], true);
        assert_eq!(value["secretQuestion"], 1);
    }

    #[test]
    fn register_response_carries_no_hashes() {
        let response = RegisterResponse {
            message: "ok".into(),
            user: UserProfile::from(&sample_user()),
        };
        let value = serde_json::to_value(response).unwrap();
        assert_no_hashes(&value["user"]);
    }

    fn register_payload(overrides: Value) -> RegisterUserPayload {
        let mut body = json!({
            "name": "María",
            "lastName": "González",
            "phone": "5512345678",
            "email": "maria@correo.com",
            "password": "secreta",
            "secretQuestion": 1,
            "secretAnswer": "Firulais"
        });
        if let (Some(body), Some(overrides)) = (body.as_object_mut(), overrides.as_object()) {
            for (key, value) in overrides {
                body.insert(key.clone(), value.clone());
            }
        }
        serde_json::from_value(body).unwrap()
    }

    #[rstest]
    #[case(json!({}), None)]
    #[case(json!({ "name": "a".repeat(100) }), None)]
    #[case(json!({ "name": "a".repeat(101) }), Some("name"))]
    #[case(json!({ "name": "   " }), Some("name"))]
    #[case(json!({ "lastName": "b".repeat(101) }), Some("last_name"))]
    #[case(json!({ "lastName": "" }), Some("last_name"))]
    #[case(json!({ "surname": "c".repeat(101) }), Some("surname"))]
    #[case(json!({ "email": format!("{}@correo.com", "d".repeat(250)) }), Some("email"))]
    #[case(json!({ "phone": "5 5 1 2 3 4 5 6 7 8 9 0 1 2 3" }), Some("phone"))]
    fn register_payload_respects_column_sizes(#[case] overrides: Value, #[case] bad_field: Option<&str>) {
        let result = register_payload(overrides).validate();
        match bad_field {
            None => assert!(result.is_ok(), "{result:?}"),
            Some(field) => {
                let errors = result.unwrap_err();
                assert!(errors.field_errors().contains_key(field), "{errors:?}");
            }
        }
    }

    #[rstest]
    #[case(UpdateUserPayload { name: Some("  ".into()), ..Default::default() }, false)]
    #[case(UpdateUserPayload { surname: Some("x".repeat(101)), ..Default::default() }, false)]
    #[case(UpdateUserPayload { email: Some(format!("{}@correo.com", "y".repeat(250))), ..Default::default() }, false)]
    #[case(UpdateUserPayload { name: Some("Ana".into()), ..Default::default() }, true)]
    #[case(UpdateUserPayload::default(), true)]
    fn update_payload_limits(#[case] payload: UpdateUserPayload, #[case] ok: bool) {
        assert_eq!(payload.validate().is_ok(), ok);
    }
}
