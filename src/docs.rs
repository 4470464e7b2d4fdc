// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::logout,
        handlers::auth::recover_question,
        handlers::auth::reset_password,
        handlers::secret_questions::list_secret_questions,
        handlers::secret_questions::create_secret_question,

        // --- Users ---
        handlers::auth::get_me,
        handlers::auth::get_user,
        handlers::auth::update_user,
        handlers::auth::set_device_pin,
        handlers::auth::verify_device_pin,

        // --- Devices ---
        handlers::devices::register_device,
        handlers::devices::list_devices,
        handlers::devices::has_device,
        handlers::devices::get_device,
        handlers::devices::update_device,
        handlers::devices::update_device_status,

        // --- Door ---
        handlers::door::get_door_status,
        handlers::door::toggle_door,
        handlers::door::get_access_logs,
        handlers::door::device_access,

        // --- SubUsers / RFID ---
        handlers::subusers::create_subuser,
        handlers::subusers::list_subusers,
        handlers::subusers::get_subuser,
        handlers::subusers::update_subuser,
        handlers::subusers::delete_subuser,
        handlers::rfids::list_rfids,
        handlers::rfids::create_rfid,
        handlers::rfids::delete_rfid,

        // --- Loja ---
        handlers::catalog::list_products,
        handlers::catalog::get_product,
        handlers::purchase::create_purchase,
        handlers::purchase::list_purchases,
        handlers::purchase::get_purchase,
        handlers::documents::purchase_receipt_pdf,

        // --- Empresa ---
        handlers::content::get_empresa,
        handlers::content::list_preguntas,
        handlers::content::create_pregunta,
        handlers::content::get_mision,
        handlers::content::update_mision,
        handlers::content::get_vision,
        handlers::content::update_vision,
        handlers::content::list_valores,
        handlers::content::create_valor,
        handlers::content::list_politicas,
        handlers::content::create_politica,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::UserProfile,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,
            models::auth::RegisterResponse,
            models::auth::MessageResponse,
            models::auth::UpdateUserPayload,
            models::auth::DevicePinPayload,
            models::auth::PinCheckResponse,
            models::auth::RecoverQuestionPayload,
            models::auth::RecoverQuestionResponse,
            models::auth::ResetPasswordPayload,
            models::secret_question::SecretQuestion,
            models::secret_question::CreateSecretQuestionPayload,

            // --- Devices / Door ---
            models::device::DoorState,
            models::device::Device,
            models::device::RegisterDevicePayload,
            models::device::UpdateDevicePayload,
            models::device::DeviceStatusPayload,
            models::device::HasDeviceResponse,
            models::door::AccessChannel,
            models::door::AccessLog,
            models::door::DoorStatus,
            models::door::DeviceAccessPayload,
            models::door::AccessDecision,

            // --- SubUsers ---
            models::subuser::SubUserAccessMethod,
            models::subuser::SubUser,
            models::subuser::CreateSubUserPayload,
            models::subuser::UpdateSubUserPayload,
            models::subuser::CreateRfidPayload,

            // --- Loja ---
            models::catalog::Product,
            models::purchase::PaymentMethod,
            models::purchase::PurchaseStatus,
            models::purchase::PurchaseItem,
            models::purchase::Purchase,
            models::purchase::CreatePurchasePayload,

            // --- Empresa ---
            models::content::Empresa,
            models::content::Pregunta,
            models::content::StatementKind,
            models::content::Statement,
            models::content::Valor,
            models::content::Politica,
            models::content::CreatePreguntaPayload,
            models::content::CreateEntryPayload,
            models::content::UpdateStatementPayload,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação, Registro e Recuperação de Senha"),
        (name = "Users", description = "Dados do Usuário, Perfil e PIN"),
        (name = "Devices", description = "Fechaduras vinculadas ao usuário"),
        (name = "Door", description = "Estado da porta e histórico de acessos"),
        (name = "SubUsers", description = "Credenciais secundárias (digital e RFID)"),
        (name = "RFID", description = "Cartões RFID"),
        (name = "Products", description = "Catálogo"),
        (name = "Purchases", description = "Compras e Comprovantes"),
        (name = "Empresa", description = "Conteúdo institucional")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_protected_and_public_routes() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        assert!(paths.contains_key("/api/users/login"));
        assert!(paths.contains_key("/api/door/access"));
        assert!(paths.contains_key("/api/purchase/{id}/receipt"));

        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("api_jwt"));
    }
}
