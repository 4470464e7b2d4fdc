// src/handlers/catalog.rs

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::catalog::Product,
};

#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Products",
    responses(
        (status = 200, description = "Catálogo de produtos", body = Vec<Product>)
    )
)]
pub async fn list_products(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = app_state
        .catalog_repo
        .list_products()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(products))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = Uuid, Path, description = "ID do produto")),
    responses(
        (status = 200, description = "Produto", body = Product),
        (status = 404, description = "Produto não encontrado")
    )
)]
pub async fn get_product(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<Json<Product>, ApiError> {
    let product = app_state
        .catalog_repo
        .find_product(id)
        .await
        .and_then(|found| found.ok_or(AppError::ProductNotFound))
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(product))
}
