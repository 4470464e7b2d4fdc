// src/db/purchase_repo.rs

use rust_decimal::Decimal;
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::purchase::{PaymentMethod, Purchase, PurchaseItem, PurchaseStatus},
};

const PURCHASE_COLUMNS: &str = "id, user_id, items, total, payment_method, date, status, email";

#[derive(Clone)]
pub struct PurchaseRepository {
    pool: PgPool,
}

impl PurchaseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        items: &[PurchaseItem],
        total: Decimal,
        payment_method: PaymentMethod,
        status: PurchaseStatus,
        email: &str,
    ) -> Result<Purchase, AppError> {
        let purchase = sqlx::query_as::<_, Purchase>(&format!(
            r#"
            INSERT INTO purchases (user_id, items, total, payment_method, status, email)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {PURCHASE_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(Json(items))
        .bind(total)
        .bind(payment_method)
        .bind(status)
        .bind(email)
        .fetch_one(&self.pool)
        .await?;
        Ok(purchase)
    }

    pub async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Purchase>, AppError> {
        let purchases = sqlx::query_as::<_, Purchase>(&format!(
            "SELECT {PURCHASE_COLUMNS} FROM purchases WHERE user_id = $1 ORDER BY date DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(purchases)
    }

    pub async fn find_for_user(&self, id: Uuid, user_id: Uuid) -> Result<Option<Purchase>, AppError> {
        let purchase = sqlx::query_as::<_, Purchase>(&format!(
            "SELECT {PURCHASE_COLUMNS} FROM purchases WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(purchase)
    }
}
