// src/db/content_repo.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::content::{Empresa, Politica, Pregunta, Statement, StatementKind, Valor},
};

// Conteúdo "Sobre nós": empresa, FAQ, missão/visão, valores e políticas
#[derive(Clone)]
pub struct ContentRepository {
    pool: PgPool,
}

impl ContentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_empresa(&self) -> Result<Option<Empresa>, AppError> {
        let empresa = sqlx::query_as::<_, Empresa>(
            "SELECT id, name, description, address, phone, email, logo FROM empresa LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(empresa)
    }

    pub async fn list_preguntas(&self) -> Result<Vec<Pregunta>, AppError> {
        let preguntas = sqlx::query_as::<_, Pregunta>(
            "SELECT id, question, answer FROM preguntas ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(preguntas)
    }

    pub async fn create_pregunta(&self, question: &str, answer: &str) -> Result<Pregunta, AppError> {
        let pregunta = sqlx::query_as::<_, Pregunta>(
            "INSERT INTO preguntas (question, answer) VALUES ($1, $2) RETURNING id, question, answer",
        )
        .bind(question)
        .bind(answer)
        .fetch_one(&self.pool)
        .await?;
        Ok(pregunta)
    }

    pub async fn get_statement(&self, kind: StatementKind) -> Result<Option<Statement>, AppError> {
        let statement = sqlx::query_as::<_, Statement>(
            "SELECT kind, text, updated_at FROM statements WHERE kind = $1",
        )
        .bind(kind)
        .fetch_optional(&self.pool)
        .await?;
        Ok(statement)
    }

    pub async fn upsert_statement(&self, kind: StatementKind, text: &str) -> Result<Statement, AppError> {
        let statement = sqlx::query_as::<_, Statement>(
            r#"
            INSERT INTO statements (kind, text) VALUES ($1, $2)
            ON CONFLICT (kind)
            DO UPDATE SET text = EXCLUDED.text, updated_at = NOW()
            RETURNING kind, text, updated_at
            "#,
        )
        .bind(kind)
        .bind(text)
        .fetch_one(&self.pool)
        .await?;
        Ok(statement)
    }

    pub async fn list_valores(&self) -> Result<Vec<Valor>, AppError> {
        let valores = sqlx::query_as::<_, Valor>(
            "SELECT id, title, description FROM valores ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(valores)
    }

    pub async fn create_valor(&self, title: &str, description: &str) -> Result<Valor, AppError> {
        let valor = sqlx::query_as::<_, Valor>(
            "INSERT INTO valores (title, description) VALUES ($1, $2) RETURNING id, title, description",
        )
        .bind(title)
        .bind(description)
        .fetch_one(&self.pool)
        .await?;
        Ok(valor)
    }

    pub async fn list_politicas(&self) -> Result<Vec<Politica>, AppError> {
        let politicas = sqlx::query_as::<_, Politica>(
            "SELECT id, title, description FROM politicas ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(politicas)
    }

    pub async fn create_politica(&self, title: &str, description: &str) -> Result<Politica, AppError> {
        let politica = sqlx::query_as::<_, Politica>(
            "INSERT INTO politicas (title, description) VALUES ($1, $2) RETURNING id, title, description",
        )
        .bind(title)
        .bind(description)
        .fetch_one(&self.pool)
        .await?;
        Ok(politica)
    }
}
