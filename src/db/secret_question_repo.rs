// src/db/secret_question_repo.rs

use sqlx::PgPool;

use crate::{
    common::error::{map_unique_violation, AppError},
    models::secret_question::SecretQuestion,
};

#[derive(Clone)]
pub struct SecretQuestionRepository {
    pool: PgPool,
}

impl SecretQuestionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<SecretQuestion>, AppError> {
        let questions = sqlx::query_as::<_, SecretQuestion>(
            "SELECT id, pregunta FROM secret_questions ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(questions)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<SecretQuestion>, AppError> {
        let question = sqlx::query_as::<_, SecretQuestion>(
            "SELECT id, pregunta FROM secret_questions WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(question)
    }

    pub async fn create(&self, id: i32, pregunta: &str) -> Result<SecretQuestion, AppError> {
        sqlx::query_as::<_, SecretQuestion>(
            "INSERT INTO secret_questions (id, pregunta) VALUES ($1, $2) RETURNING id, pregunta",
        )
        .bind(id)
        .bind(pregunta)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, |_| AppError::SecretQuestionAlreadyExists(id)))
    }
}
