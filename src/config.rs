// src/config.rs

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    common::i18n::I18nStore,
    db::{
        CatalogRepository, ContentRepository, DeviceRepository, PurchaseRepository,
        SecretQuestionRepository, SubUserRepository, UserRepository,
    },
    services::{
        access_throttle::{self, AccessThrottle},
        auth::AuthService, device_service::DeviceService, document_service::DocumentService,
        door_service::DoorService, jwt::JwtManager, mailer::Mailer,
        purchase_service::PurchaseService, subuser_service::SubUserService,
        token_blacklist::TokenBlacklist, user_service::UserService,
    },
};

/// Credenciais SMTP. Só existe quando EMAIL_USER e EMAIL_PASSWORD estão definidos.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub user: String,
    pub password: String,
    pub smtp_host: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub port: u16,
    pub email: Option<EmailConfig>,
    pub receipt_fonts_dir: String,
    // Bloqueio da fechadura depois de tentativas negadas seguidas
    pub door_max_failed_attempts: u32,
    pub door_lockout_secs: u64,
}

fn non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> anyhow::Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match non_empty(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} tem um valor inválido: {raw}")),
        None => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let email = match (non_empty("EMAIL_USER"), non_empty("EMAIL_PASSWORD")) {
            (Some(user), Some(password)) => Some(EmailConfig {
                user,
                password,
                smtp_host: non_empty("EMAIL_SMTP_HOST").unwrap_or_else(|| "smtp.gmail.com".to_string()),
            }),
            _ => None,
        };

        Ok(Self {
            database_url: non_empty("DATABASE_URL").context("DATABASE_URL deve ser definida")?,
            database_max_connections: parse_or("DATABASE_MAX_CONNECTIONS", 5)?,
            jwt_secret: non_empty("JWT_SECRET").context("JWT_SECRET deve ser definido")?,
            jwt_expiration_hours: parse_or("JWT_EXPIRATION_HOURS", 24)?,
            port: parse_or("PORT", 3000)?,
            email,
            receipt_fonts_dir: non_empty("RECEIPT_FONTS_DIR").unwrap_or_else(|| "./fonts".to_string()),
            door_max_failed_attempts: parse_or(
                "DOOR_MAX_FAILED_ATTEMPTS",
                access_throttle::MAX_FAILED_ATTEMPTS,
            )?,
            door_lockout_secs: parse_or("DOOR_LOCKOUT_SECS", access_throttle::LOCKOUT.as_secs())?,
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub i18n_store: I18nStore,

    // Serviços (regras de negócio)
    pub auth_service: AuthService,
    pub user_service: UserService,
    pub device_service: DeviceService,
    pub door_service: DoorService,
    pub subuser_service: SubUserService,
    pub purchase_service: PurchaseService,
    pub document_service: DocumentService,

    // Repositórios usados direto pelos handlers (só leitura/CRUD simples)
    pub secret_question_repo: SecretQuestionRepository,
    pub catalog_repo: CatalogRepository,
    pub content_repo: ContentRepository,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        let mailer = Mailer::from_config(config.email.as_ref())?;
        Ok(Self::build(db_pool, config, mailer))
    }

    /// Monta o gráfico de dependências sobre uma pool já criada.
    pub fn build(db_pool: PgPool, config: &Config, mailer: Mailer) -> Self {
        let user_repo = UserRepository::new(db_pool.clone());
        let secret_question_repo = SecretQuestionRepository::new(db_pool.clone());
        let device_repo = DeviceRepository::new(db_pool.clone());
        let subuser_repo = SubUserRepository::new(db_pool.clone());
        let purchase_repo = PurchaseRepository::new(db_pool.clone());
        let catalog_repo = CatalogRepository::new(db_pool.clone());
        let content_repo = ContentRepository::new(db_pool.clone());

        let jwt = JwtManager::new(config.jwt_secret.clone(), config.jwt_expiration_hours);

        let auth_service = AuthService::new(
            user_repo.clone(),
            secret_question_repo.clone(),
            device_repo.clone(),
            jwt,
            TokenBlacklist::new(),
        );
        let user_service = UserService::new(user_repo.clone());
        let device_service = DeviceService::new(device_repo.clone());
        let door_service = DoorService::new(
            device_repo,
            subuser_repo.clone(),
            user_repo,
            AccessThrottle::new(
                config.door_max_failed_attempts,
                Duration::from_secs(config.door_lockout_secs),
            ),
            db_pool.clone(),
        );
        let subuser_service = SubUserService::new(subuser_repo);
        let purchase_service = PurchaseService::new(purchase_repo.clone(), mailer);
        let document_service = DocumentService::new(
            purchase_repo,
            content_repo.clone(),
            config.receipt_fonts_dir.clone(),
        );

        Self {
            db_pool,
            i18n_store: I18nStore::load(),
            auth_service,
            user_service,
            device_service,
            door_service,
            subuser_service,
            purchase_service,
            document_service,
            secret_question_repo,
            catalog_repo,
            content_repo,
        }
    }
}
