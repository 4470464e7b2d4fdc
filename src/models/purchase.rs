// src/models/purchase.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::validation::validate_price;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "payment_method", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[serde(alias = "tarjeta")]
    Card,
    #[serde(alias = "efectivo")]
    Cash,
    #[serde(alias = "transferencia")]
    Transfer,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "purchase_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PurchaseStatus {
    Pending,
    Completed,
    Cancelled,
}

// Item do carrinho, guardado dentro da compra (coluna JSONB)
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct PurchaseItem {
    #[validate(length(min = 1, message = "validation.required"))]
    pub id: String,
    #[validate(length(min = 1, message = "validation.name_required"))]
    pub name: String,
    #[validate(custom(function = "validate_price"))]
    #[schema(value_type = f64, example = 1499.90)]
    pub price: Decimal,
    #[validate(range(min = 1, message = "validation.quantity"))]
    pub quantity: i32,
    pub image: Option<String>,
}

impl PurchaseItem {
    /// `None` se a multiplicação estourar o `Decimal`.
    pub fn subtotal(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.quantity))
    }
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    pub id: Uuid,
    pub user_id: Uuid,
    #[schema(value_type = Vec<PurchaseItem>)]
    pub items: Json<Vec<PurchaseItem>>,
    #[schema(value_type = f64)]
    pub total: Decimal,
    pub payment_method: PaymentMethod,
    pub date: DateTime<Utc>,
    pub status: PurchaseStatus,
    pub email: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePurchasePayload {
    #[validate(length(min = 1, message = "validation.items_empty"), nested)]
    pub items: Vec<PurchaseItem>,
    // Opcional: se vier, precisa bater com o total calculado no servidor
    #[schema(value_type = Option<f64>)]
    pub total: Option<Decimal>,
    pub payment_method: PaymentMethod,
    // E-mail do comprovante; sem ele usamos o e-mail da conta
    #[validate(email(message = "validation.email"), length(max = 255, message = "validation.length"))]
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn payload(items: serde_json::Value) -> CreatePurchasePayload {
        serde_json::from_value(serde_json::json!({
            "items": items,
            "paymentMethod": "tarjeta"
        }))
        .unwrap()
    }

    #[rstest]
    #[case(serde_json::json!(1499.90), true)]
    #[case(serde_json::json!(99999999.99), true)]
    #[case(serde_json::json!(100000000), false)]
    #[case(serde_json::json!(5e28), false)]
    #[case(serde_json::json!(-1), false)]
    fn item_price_is_bounded(#[case] price: serde_json::Value, #[case] ok: bool) {
        let payload = payload(serde_json::json!([
            { "id": "p1", "name": "Cerradura", "price": price, "quantity": 2 }
        ]));
        assert_eq!(payload.validate().is_ok(), ok);
    }

    #[test]
    fn subtotal_overflow_is_reported_instead_of_panicking() {
        let item = PurchaseItem {
            id: "p1".into(),
            name: "Cerradura".into(),
            price: Decimal::MAX,
            quantity: 2,
            image: None,
        };
        assert_eq!(item.subtotal(), None);
    }
}
