// src/handlers/documents.rs

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
};

#[utoipa::path(
    get,
    path = "/api/purchase/{id}/receipt",
    tag = "Purchases",
    params(("id" = Uuid, Path, description = "ID da compra")),
    responses(
        (status = 200, description = "Comprovante em PDF", content_type = "application/pdf", body = Vec<u8>),
        (status = 404, description = "Compra não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn purchase_receipt_pdf(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(purchase_id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let pdf_bytes = app_state
        .document_service
        .generate_receipt_pdf(user.id, purchase_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    // Configura os Headers para o navegador baixar ou mostrar o PDF
    let disposition = format!("attachment; filename=\"compra_{purchase_id}.pdf\"");
    let headers = [
        (header::CONTENT_TYPE, "application/pdf"),
        (header::CONTENT_DISPOSITION, disposition.as_str()),
    ];

    Ok((headers, pdf_bytes).into_response())
}
