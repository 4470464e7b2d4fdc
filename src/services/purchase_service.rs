// src/services/purchase_service.rs

use rust_decimal::Decimal;
use uuid::Uuid;
use validator::{ValidationError, ValidationErrors};

use crate::{
    common::error::AppError,
    db::PurchaseRepository,
    models::{
        auth::User,
        purchase::{CreatePurchasePayload, Purchase, PurchaseItem, PurchaseStatus},
    },
    services::mailer::Mailer,
};

/// Tolerância entre o total enviado pelo app e o calculado aqui (arredondamento do cliente).
const TOTAL_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Maior total que cabe em `purchases.total` (NUMERIC(12, 2)).
fn max_total() -> Decimal {
    Decimal::new(999_999_999_999, 2)
}

fn total_out_of_range() -> AppError {
    let mut err = ValidationError::new("range");
    err.message = Some("validation.total_range".into());
    let mut errors = ValidationErrors::new();
    errors.add("items", err);
    AppError::ValidationError(errors)
}

/// Soma dos subtotais, arredondada para centavos.
/// Estouro ou total acima do que a coluna comporta viram erro de validação.
pub(crate) fn compute_total(items: &[PurchaseItem]) -> Result<Decimal, AppError> {
    let mut total = Decimal::ZERO;
    for item in items {
        total = item
            .subtotal()
            .and_then(|subtotal| total.checked_add(subtotal))
            .ok_or_else(total_out_of_range)?;
    }

    let total = total.round_dp(2);
    if total > max_total() {
        return Err(total_out_of_range());
    }
    Ok(total)
}

pub(crate) fn check_informed_total(informed: Option<Decimal>, computed: Decimal) -> Result<(), AppError> {
    match informed {
        Some(informed) if (informed - computed).abs() > TOTAL_TOLERANCE => {
            Err(AppError::PurchaseTotalMismatch { informed, computed })
        }
        _ => Ok(()),
    }
}

#[derive(Clone)]
pub struct PurchaseService {
    purchase_repo: PurchaseRepository,
    mailer: Mailer,
}

impl PurchaseService {
    pub fn new(purchase_repo: PurchaseRepository, mailer: Mailer) -> Self {
        Self { purchase_repo, mailer }
    }

    /// Registra a compra do carrinho. O total é sempre o calculado no servidor.
    pub async fn create_purchase(
        &self,
        user: &User,
        payload: &CreatePurchasePayload,
    ) -> Result<Purchase, AppError> {
        let total = compute_total(&payload.items)?;
        check_informed_total(payload.total, total)?;

        let email = payload
            .email
            .as_deref()
            .map(|e| e.trim().to_lowercase())
            .unwrap_or_else(|| user.email.clone());

        let purchase = self
            .purchase_repo
            .create(
                user.id,
                &payload.items,
                total,
                payload.payment_method,
                PurchaseStatus::Completed,
                &email,
            )
            .await?;

        tracing::info!(purchase_id = %purchase.id, total = %purchase.total, "🛒 Compra registrada");

        // O e-mail vai em segundo plano; a resposta não espera por ele
        self.mailer.spawn_purchase_confirmation(purchase.clone());

        Ok(purchase)
    }

    pub async fn list_purchases(&self, user_id: Uuid) -> Result<Vec<Purchase>, AppError> {
        self.purchase_repo.list_by_user(user_id).await
    }

    pub async fn get_purchase(&self, user_id: Uuid, id: Uuid) -> Result<Purchase, AppError> {
        self.purchase_repo
            .find_for_user(id, user_id)
            .await?
            .ok_or(AppError::PurchaseNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn item(price_cents: i64, quantity: i32) -> PurchaseItem {
        PurchaseItem {
            id: "x".into(),
            name: "Produto".into(),
            price: Decimal::new(price_cents, 2),
            quantity,
            image: None,
        }
    }

    #[test]
    fn total_is_sum_of_subtotals() {
        let items = vec![item(149990, 1), item(4900, 3)];
        assert_eq!(compute_total(&items).unwrap(), Decimal::new(164690, 2));
    }

    #[test]
    fn empty_cart_totals_zero() {
        assert_eq!(compute_total(&[]).unwrap(), Decimal::ZERO);
    }

    #[rstest]
    #[case(vec![item(9_999_999_999, 100), item(100, 1)])] // acima de NUMERIC(12, 2)
    #[case(vec![item(9_999_999_999, i32::MAX)])]
    #[case(vec![item(1, 1), PurchaseItem { price: Decimal::MAX, ..item(0, 2) }])] // estoura o Decimal
    fn oversized_totals_are_a_validation_error(#[case] items: Vec<PurchaseItem>) {
        let err = compute_total(&items).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
        assert_eq!(err.status_and_key().0, axum::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn largest_storable_total_is_accepted() {
        // 99 999 999.99 x 100 = 9 999 999 999.00
        let items = vec![item(9_999_999_999, 100)];
        assert_eq!(compute_total(&items).unwrap(), Decimal::new(999_999_999_900, 2));
    }

    #[rstest]
    #[case(None, true)]
    #[case(Some(Decimal::new(10000, 2)), true)]
    #[case(Some(Decimal::new(10001, 2)), true)]
    #[case(Some(Decimal::new(9999, 2)), true)]
    #[case(Some(Decimal::new(10002, 2)), false)]
    #[case(Some(Decimal::new(5000, 2)), false)]
    fn informed_total_must_match(#[case] informed: Option<Decimal>, #[case] ok: bool) {
        let computed = Decimal::new(10000, 2);
        assert_eq!(check_informed_total(informed, computed).is_ok(), ok);
    }
}
