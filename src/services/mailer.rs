// src/services/mailer.rs

use std::sync::Arc;

use anyhow::Context;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::{config::EmailConfig, models::purchase::Purchase};

const SENDER_NAME: &str = "Portero Seguro";

/// Envio de e-mails transacionais por SMTP.
/// Sem EMAIL_USER/EMAIL_PASSWORD o mailer fica desligado e só loga.
#[derive(Clone)]
pub struct Mailer {
    transport: Option<Arc<AsyncSmtpTransport<Tokio1Executor>>>,
    from: Option<Mailbox>,
}

impl Mailer {
    pub fn disabled() -> Self {
        Self { transport: None, from: None }
    }

    pub fn from_config(config: Option<&EmailConfig>) -> anyhow::Result<Self> {
        let Some(config) = config else {
            tracing::warn!("📭 EMAIL_USER/EMAIL_PASSWORD ausentes: envio de e-mails desativado");
            return Ok(Self::disabled());
        };

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
            .with_context(|| format!("servidor SMTP inválido: {}", config.smtp_host))?
            .credentials(Credentials::new(config.user.clone(), config.password.clone()))
            .build();

        let from = Mailbox::new(
            Some(SENDER_NAME.to_string()),
            config.user.parse().context("EMAIL_USER não é um endereço válido")?,
        );

        Ok(Self {
            transport: Some(Arc::new(transport)),
            from: Some(from),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.transport.is_some()
    }

    pub async fn send_html(&self, to: &str, subject: &str, html: String) -> anyhow::Result<()> {
        let (Some(transport), Some(from)) = (&self.transport, &self.from) else {
            tracing::debug!(to, subject, "Mailer desativado; e-mail não enviado");
            return Ok(());
        };

        let message = Message::builder()
            .from(from.clone())
            .to(to.parse::<Mailbox>().with_context(|| format!("destinatário inválido: {to}"))?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html)?;

        transport.send(message).await?;
        Ok(())
    }

    /// Dispara a confirmação de compra em segundo plano.
    /// Falha no envio não pode afetar a compra: só registramos o erro.
    pub fn spawn_purchase_confirmation(&self, purchase: Purchase) {
        let mailer = self.clone();
        tokio::spawn(async move {
            let (subject, html) = render_purchase_email(&purchase);
            match mailer.send_html(&purchase.email, &subject, html).await {
                Ok(()) if mailer.is_configured() => {
                    tracing::info!(purchase_id = %purchase.id, "📧 Confirmação de compra enviada")
                }
                Ok(()) => {}
                Err(e) => tracing::warn!(
                    purchase_id = %purchase.id,
                    "Falha ao enviar e-mail de confirmação: {:#}", e
                ),
            }
        });
    }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Assunto e corpo HTML do e-mail de confirmação.
pub fn render_purchase_email(purchase: &Purchase) -> (String, String) {
    let short_id = &purchase.id.to_string()[..8];
    let subject = format!("Confirmación de compra #{short_id}");

    let rows: String = purchase
        .items
        .iter()
        .map(|item| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>${:.2}</td><td>${:.2}</td></tr>",
                escape_html(&item.name),
                item.quantity,
                item.price,
                item.subtotal().unwrap_or_default()
            )
        })
        .collect();

    let html = format!(
        r#"<h2>¡Gracias por tu compra!</h2>
<p>Pedido <strong>#{short_id}</strong> del {date}.</p>
<table border="1" cellpadding="4" cellspacing="0">
<tr><th>Producto</th><th>Cantidad</th><th>Precio</th><th>Subtotal</th></tr>
{rows}
</table>
<p><strong>Total: ${total:.2}</strong></p>
<p>Método de pago: {method:?}</p>"#,
        date = purchase.date.format("%d/%m/%Y %H:%M"),
        total = purchase.total,
        method = purchase.payment_method,
    );

    (subject, html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::purchase::{PaymentMethod, PurchaseItem, PurchaseStatus};
    use chrono::Utc;
    use rust_decimal::Decimal;
    use sqlx::types::Json;
    use uuid::Uuid;

    fn purchase_with(name: &str) -> Purchase {
        Purchase {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            items: Json(vec![PurchaseItem {
                id: "p1".into(),
                name: name.into(),
                price: Decimal::new(4900, 2),
                quantity: 2,
                image: None,
            }]),
            total: Decimal::new(9800, 2),
            payment_method: PaymentMethod::Card,
            date: Utc::now(),
            status: PurchaseStatus::Completed,
            email: "cliente@correo.com".into(),
        }
    }

    #[test]
    fn email_lists_items_and_total() {
        let purchase = purchase_with("Tarjeta RFID");
        let (subject, html) = render_purchase_email(&purchase);

        assert!(subject.contains(&purchase.id.to_string()[..8]));
        assert!(html.contains("Tarjeta RFID"));
        assert!(html.contains("$49.00"));
        assert!(html.contains("Total: $98.00"));
    }

    #[test]
    fn item_names_are_escaped() {
        let (_, html) = render_purchase_email(&purchase_with("<script>x</script>"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[tokio::test]
    async fn disabled_mailer_is_a_no_op() {
        let mailer = Mailer::disabled();
        assert!(!mailer.is_configured());
        assert!(mailer.send_html("a@b.com", "x", "<p>x</p>".into()).await.is_ok());
    }
}
