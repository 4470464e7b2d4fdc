// src/db/subuser_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::{map_unique_violation, AppError},
    models::subuser::{SubUser, SubUserAccessMethod},
};

const SUBUSER_COLUMNS: &str = "id, admin_id, name, access_method, access_id, is_active, created_at";

#[derive(Clone)]
pub struct SubUserRepository {
    pool: PgPool,
}

impl SubUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        admin_id: Uuid,
        name: &str,
        access_method: SubUserAccessMethod,
        access_id: &str,
    ) -> Result<SubUser, AppError> {
        sqlx::query_as::<_, SubUser>(&format!(
            r#"
            INSERT INTO sub_users (admin_id, name, access_method, access_id)
            VALUES ($1, $2, $3, $4)
            RETURNING {SUBUSER_COLUMNS}
            "#
        ))
        .bind(admin_id)
        .bind(name)
        .bind(access_method)
        .bind(access_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, |constraint| match constraint {
                "sub_users_credential_key" => AppError::AccessCredentialAlreadyExists,
                other => AppError::UniqueConstraintViolation(other.to_string()),
            })
        })
    }

    // Lista os subusuários do admin; o filtro por método é opcional
    pub async fn list_by_admin(
        &self,
        admin_id: Uuid,
        access_method: Option<SubUserAccessMethod>,
    ) -> Result<Vec<SubUser>, AppError> {
        let subusers = sqlx::query_as::<_, SubUser>(&format!(
            r#"
            SELECT {SUBUSER_COLUMNS} FROM sub_users
            WHERE admin_id = $1 AND ($2::subuser_access_method IS NULL OR access_method = $2)
            ORDER BY created_at
            "#
        ))
        .bind(admin_id)
        .bind(access_method)
        .fetch_all(&self.pool)
        .await?;
        Ok(subusers)
    }

    pub async fn find_for_admin(&self, id: Uuid, admin_id: Uuid) -> Result<Option<SubUser>, AppError> {
        let subuser = sqlx::query_as::<_, SubUser>(&format!(
            "SELECT {SUBUSER_COLUMNS} FROM sub_users WHERE id = $1 AND admin_id = $2"
        ))
        .bind(id)
        .bind(admin_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(subuser)
    }

    // Busca a credencial ativa apresentada na fechadura
    pub async fn find_active_credential(
        &self,
        admin_id: Uuid,
        access_method: SubUserAccessMethod,
        access_id: &str,
    ) -> Result<Option<SubUser>, AppError> {
        let subuser = sqlx::query_as::<_, SubUser>(&format!(
            r#"
            SELECT {SUBUSER_COLUMNS} FROM sub_users
            WHERE admin_id = $1 AND access_method = $2 AND access_id = $3 AND is_active
            "#
        ))
        .bind(admin_id)
        .bind(access_method)
        .bind(access_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(subuser)
    }

    pub async fn update(
        &self,
        id: Uuid,
        admin_id: Uuid,
        name: Option<&str>,
        is_active: Option<bool>,
    ) -> Result<Option<SubUser>, AppError> {
        let subuser = sqlx::query_as::<_, SubUser>(&format!(
            r#"
            UPDATE sub_users SET
                name = COALESCE($3, name),
                is_active = COALESCE($4, is_active)
            WHERE id = $1 AND admin_id = $2
            RETURNING {SUBUSER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(admin_id)
        .bind(name)
        .bind(is_active)
        .fetch_optional(&self.pool)
        .await?;
        Ok(subuser)
    }

    /// Remove e devolve quantas linhas saíram. `only_method` restringe a um tipo
    /// de credencial (a tela de RFID não pode apagar digitais).
    pub async fn delete(
        &self,
        id: Uuid,
        admin_id: Uuid,
        only_method: Option<SubUserAccessMethod>,
    ) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            DELETE FROM sub_users
            WHERE id = $1 AND admin_id = $2
              AND ($3::subuser_access_method IS NULL OR access_method = $3)
            "#,
        )
        .bind(id)
        .bind(admin_id)
        .bind(only_method)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }
}
