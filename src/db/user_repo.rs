// src/db/user_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::{map_unique_violation, AppError},
    models::auth::User,
};

const USER_COLUMNS: &str = r#"
    id, name, last_name, surname, phone, email, password_hash,
    secret_question_id, secret_answer_hash, device_pin_hash,
    created_at, updated_at
"#;

/// Dados já validados e com hashes calculados, prontos para o INSERT.
#[derive(Debug)]
pub struct NewUser<'a> {
    pub name: &'a str,
    pub last_name: &'a str,
    pub surname: Option<&'a str>,
    pub phone: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub secret_question_id: i32,
    pub secret_answer_hash: &'a str,
    pub device_pin_hash: Option<&'a str>,
}

/// Campos opcionais de uma atualização de perfil (None = mantém o valor atual).
#[derive(Debug, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub last_name: Option<String>,
    pub surname: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
}

// O repositório de usuários, responsável por todas as interações com a tabela 'users'
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

fn user_unique_violation(constraint: &str) -> AppError {
    match constraint {
        "users_email_key" => AppError::EmailAlreadyExists,
        other => AppError::UniqueConstraintViolation(other.to_string()),
    }
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Busca um usuário pelo seu e-mail (sempre em minúsculas)
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    // Busca um usuário pelo seu ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    // Cria um novo usuário. E-mail duplicado vira EmailAlreadyExists.
    pub async fn create_user(&self, new_user: NewUser<'_>) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (
                name, last_name, surname, phone, email, password_hash,
                secret_question_id, secret_answer_hash, device_pin_hash
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(new_user.name)
        .bind(new_user.last_name)
        .bind(new_user.surname)
        .bind(new_user.phone)
        .bind(new_user.email)
        .bind(new_user.password_hash)
        .bind(new_user.secret_question_id)
        .bind(new_user.secret_answer_hash)
        .bind(new_user.device_pin_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, user_unique_violation))
    }

    // Atualização parcial: COALESCE mantém o valor atual quando o campo vem nulo
    pub async fn update_user(&self, id: Uuid, changes: UserChanges) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users SET
                name = COALESCE($2, name),
                last_name = COALESCE($3, last_name),
                surname = COALESCE($4, surname),
                phone = COALESCE($5, phone),
                email = COALESCE($6, email),
                password_hash = COALESCE($7, password_hash),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(changes.name)
        .bind(changes.last_name)
        .bind(changes.surname)
        .bind(changes.phone)
        .bind(changes.email)
        .bind(changes.password_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, user_unique_violation))?
        .ok_or(AppError::UserNotFound)
    }

    pub async fn set_device_pin(&self, id: Uuid, pin_hash: &str) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE users SET device_pin_hash = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(pin_hash)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::UserNotFound);
        }
        Ok(())
    }
}
