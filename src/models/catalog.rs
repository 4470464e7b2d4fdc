// src/models/catalog.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Produto do catálogo (somente leitura; carga inicial via migração)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    #[schema(example = "Cerradura inteligente X1")]
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = f64, example = 1499.90)]
    pub price: Decimal,
    pub image: Option<String>,
    pub stock: i32,
}
