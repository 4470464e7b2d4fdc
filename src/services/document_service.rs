// src/services/document_service.rs

use genpdf::{elements, style, Element};
use image::Luma;
use qrcode::QrCode;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ContentRepository, PurchaseRepository},
    models::purchase::{PaymentMethod, PurchaseStatus},
};

fn pdf_error(e: impl std::fmt::Display) -> AppError {
    AppError::InternalServerError(anyhow::Error::msg(e.to_string()))
}

fn payment_label(method: PaymentMethod) -> &'static str {
    match method {
        PaymentMethod::Card => "Tarjeta",
        PaymentMethod::Cash => "Efectivo",
        PaymentMethod::Transfer => "Transferencia",
    }
}

fn status_label(status: PurchaseStatus) -> &'static str {
    match status {
        PurchaseStatus::Pending => "Pendiente",
        PurchaseStatus::Completed => "Completada",
        PurchaseStatus::Cancelled => "Cancelada",
    }
}

// Comprovante de compra em PDF
#[derive(Clone)]
pub struct DocumentService {
    purchase_repo: PurchaseRepository,
    content_repo: ContentRepository,
    fonts_dir: String,
}

impl DocumentService {
    pub fn new(purchase_repo: PurchaseRepository, content_repo: ContentRepository, fonts_dir: String) -> Self {
        Self { purchase_repo, content_repo, fonts_dir }
    }

    pub async fn generate_receipt_pdf(&self, user_id: Uuid, purchase_id: Uuid) -> Result<Vec<u8>, AppError> {
        // 1. Busca os Dados
        let purchase = self
            .purchase_repo
            .find_for_user(purchase_id, user_id)
            .await?
            .ok_or(AppError::PurchaseNotFound)?;
        let empresa = self.content_repo.get_empresa().await?;

        // 2. Configura o PDF
        // Carrega a fonte da pasta configurada em RECEIPT_FONTS_DIR
        let font_family = genpdf::fonts::from_files(&self.fonts_dir, "Roboto", None)
            .map_err(|_| AppError::FontNotFound(format!("Roboto em {}", self.fonts_dir)))?;

        let short_id = purchase.id.to_string()[..8].to_uppercase();

        let mut doc = genpdf::Document::new(font_family);
        doc.set_title(format!("Compra #{short_id}"));
        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(10);
        doc.set_page_decorator(decorator);

        // --- CABEÇALHO ---
        let title_text = empresa
            .as_ref()
            .map(|e| e.name.clone())
            .unwrap_or_else(|| "PORTERO".to_string());
        doc.push(elements::Paragraph::new(title_text).styled(style::Style::new().bold().with_font_size(18)));

        if let Some(email) = empresa.as_ref().and_then(|e| e.email.clone()) {
            doc.push(elements::Paragraph::new(email).styled(style::Style::new().with_font_size(10)));
        }

        doc.push(elements::Break::new(1.5));
        doc.push(
            elements::Paragraph::new(format!("COMPROBANTE DE COMPRA #{short_id}"))
                .styled(style::Style::new().bold().with_font_size(14)),
        );
        doc.push(elements::Paragraph::new(format!("Fecha: {}", purchase.date.format("%d/%m/%Y %H:%M"))));
        doc.push(elements::Paragraph::new(format!("Cliente: {}", purchase.email)));
        doc.push(elements::Paragraph::new(format!(
            "Pago: {} ({})",
            payment_label(purchase.payment_method),
            status_label(purchase.status)
        )));
        doc.push(elements::Break::new(2));

        // --- TABELA DE ITENS ---
        // Pesos das colunas: Nome (4), Qtd (1), Preço (2), Total (2)
        let mut table = elements::TableLayout::new(vec![4, 1, 2, 2]);
        table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

        let style_bold = style::Style::new().bold();
        table
            .row()
            .element(elements::Paragraph::new("Producto").styled(style_bold))
            .element(elements::Paragraph::new("Cant.").styled(style_bold))
            .element(elements::Paragraph::new("Unitario").styled(style_bold))
            .element(elements::Paragraph::new("Subtotal").styled(style_bold))
            .push()
            .map_err(pdf_error)?;

        for item in purchase.items.iter() {
            table
                .row()
                .element(elements::Paragraph::new(item.name.clone()))
                .element(elements::Paragraph::new(item.quantity.to_string()))
                .element(elements::Paragraph::new(format!("$ {:.2}", item.price)))
                .element(elements::Paragraph::new(format!("$ {:.2}", item.subtotal().unwrap_or_default())))
                .push()
                .map_err(pdf_error)?;
        }

        doc.push(table);
        doc.push(elements::Break::new(2));

        // --- TOTAIS ---
        let mut total_paragraph = elements::Paragraph::new(format!("TOTAL: $ {:.2}", purchase.total));
        total_paragraph.set_alignment(genpdf::Alignment::Right);
        doc.push(total_paragraph.styled(style::Style::new().bold().with_font_size(12)));
        doc.push(elements::Break::new(2));

        // --- QR CODE (identificador da compra, para conferência) ---
        let code = QrCode::new(purchase.id.to_string().as_bytes()).map_err(pdf_error)?;
        let image_buffer = code.render::<Luma<u8>>().build();
        let dynamic_image = image::DynamicImage::ImageLuma8(image_buffer);
        let pdf_image = elements::Image::from_dynamic_image(dynamic_image)
            .map_err(pdf_error)?
            .with_scale(genpdf::Scale::new(0.5, 0.5));
        doc.push(pdf_image);

        // --- RODAPÉ ---
        if let Some(addr) = empresa.and_then(|e| e.address) {
            doc.push(elements::Break::new(2));
            doc.push(elements::Paragraph::new(addr).styled(style::Style::new().italic().with_font_size(8)));
        }

        // 3. Renderiza para Buffer (Memória)
        let mut buffer = Vec::new();
        doc.render(&mut buffer).map_err(pdf_error)?;

        tracing::debug!(purchase_id = %purchase.id, bytes = buffer.len(), "Comprovante gerado");
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_spanish() {
        assert_eq!(payment_label(PaymentMethod::Cash), "Efectivo");
        assert_eq!(status_label(PurchaseStatus::Completed), "Completada");
    }
}
