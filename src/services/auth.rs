// src/services/auth.rs

use bcrypt::{hash, verify};

use crate::{
    common::error::AppError,
    db::{
        user_repo::{NewUser, UserChanges},
        DeviceRepository, SecretQuestionRepository, UserRepository,
    },
    models::auth::{AuthResponse, RecoverQuestionResponse, RegisterUserPayload, User},
    services::{jwt::JwtManager, token_blacklist::TokenBlacklist},
};

/// Hash bcrypt válido (custo 12) que não corresponde a nenhuma senha cadastrada.
/// Login com e-mail desconhecido verifica contra ele para gastar o mesmo tempo.
const DUMMY_PASSWORD_HASH: &str = "$2y$12$L6Bc/AlTQHyd9liGgGEZyOFLPHNgyxeEPfgYfBCVxJ7JIlwxyVU3u";

/// Gera o hash bcrypt fora do runtime assíncrono.
pub(crate) async fn hash_secret(secret: &str) -> Result<String, AppError> {
    let secret = secret.to_owned();
    let hashed = tokio::task::spawn_blocking(move || hash(&secret, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;
    Ok(hashed)
}

/// Compara um segredo com o hash bcrypt, também numa thread separada.
pub(crate) async fn verify_secret(secret: &str, hashed: &str) -> Result<bool, AppError> {
    let secret = secret.to_owned();
    let hashed = hashed.to_owned();
    let is_valid = tokio::task::spawn_blocking(move || verify(&secret, &hashed))
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;
    Ok(is_valid)
}

// A resposta secreta é comparada sem diferenciar maiúsculas nem espaços nas pontas
pub(crate) fn normalize_answer(answer: &str) -> String {
    answer.trim().to_lowercase()
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    question_repo: SecretQuestionRepository,
    device_repo: DeviceRepository,
    jwt: JwtManager,
    blacklist: TokenBlacklist,
}

impl AuthService {
    pub fn new(
        user_repo: UserRepository,
        question_repo: SecretQuestionRepository,
        device_repo: DeviceRepository,
        jwt: JwtManager,
        blacklist: TokenBlacklist,
    ) -> Self {
        Self { user_repo, question_repo, device_repo, jwt, blacklist }
    }

    pub async fn register_user(&self, payload: &RegisterUserPayload) -> Result<User, AppError> {
        // A pergunta precisa existir antes de gastarmos tempo com bcrypt
        self.question_repo
            .find_by_id(payload.secret_question)
            .await?
            .ok_or(AppError::SecretQuestionNotFound(payload.secret_question))?;

        let email = normalize_email(&payload.email);
        let password_hash = hash_secret(&payload.password).await?;
        let answer_hash = hash_secret(&normalize_answer(&payload.secret_answer)).await?;
        let pin_hash = match &payload.device_pin {
            Some(pin) => Some(hash_secret(pin).await?),
            None => None,
        };

        let user = self
            .user_repo
            .create_user(NewUser {
                name: payload.name.trim(),
                last_name: payload.last_name.trim(),
                surname: payload.surname.as_deref().map(str::trim),
                phone: payload.phone.trim(),
                email: &email,
                password_hash: &password_hash,
                secret_question_id: payload.secret_question,
                secret_answer_hash: &answer_hash,
                device_pin_hash: pin_hash.as_deref(),
            })
            .await?;

        tracing::info!(user_id = %user.id, "👤 Novo usuário registrado");
        Ok(user)
    }

    pub async fn login_user(&self, email: &str, password: &str) -> Result<AuthResponse, AppError> {
        let user = self.user_repo.find_by_email(&normalize_email(email)).await?;

        // Com ou sem usuário, sempre roda um bcrypt completo
        let hash = user
            .as_ref()
            .map_or(DUMMY_PASSWORD_HASH, |u| u.password_hash.as_str());
        let password_ok = verify_secret(password, hash).await?;

        let user = match user {
            Some(user) if password_ok => user,
            _ => return Err(AppError::InvalidCredentials),
        };

        let token = self.jwt.issue(user.id)?;
        let has_device = self.device_repo.user_has_device(user.id).await?;

        Ok(AuthResponse { token, user_id: user.id, has_device })
    }

    /// Invalida o token apresentado. Vale até o processo reiniciar.
    pub fn logout(&self, token: &str) -> Result<(), AppError> {
        let claims = self.jwt.decode(token)?;
        self.blacklist.add(token, claims.exp as i64);
        tracing::info!(user_id = %claims.sub, "🔒 Sessão encerrada");
        Ok(())
    }

    pub async fn validate_token(&self, token: &str) -> Result<User, AppError> {
        if self.blacklist.contains(token) {
            return Err(AppError::TokenRevoked);
        }

        let claims = self.jwt.decode(token)?;

        self.user_repo
            .find_by_id(claims.sub)
            .await?
            .ok_or(AppError::UserNotFound)
    }

    pub async fn secret_question_for(&self, email: &str) -> Result<RecoverQuestionResponse, AppError> {
        let user = self
            .user_repo
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or(AppError::UserNotFound)?;

        let question = self
            .question_repo
            .find_by_id(user.secret_question_id)
            .await?
            .ok_or(AppError::SecretQuestionNotFound(user.secret_question_id))?;

        Ok(RecoverQuestionResponse {
            secret_question: question.id,
            pregunta: question.pregunta,
        })
    }

    pub async fn reset_password(
        &self,
        email: &str,
        secret_answer: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let user = self
            .user_repo
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or(AppError::UserNotFound)?;

        if !verify_secret(&normalize_answer(secret_answer), &user.secret_answer_hash).await? {
            tracing::warn!(user_id = %user.id, "Resposta secreta incorreta na recuperação de senha");
            return Err(AppError::InvalidSecretAnswer);
        }

        let password_hash = hash_secret(new_password).await?;
        self.user_repo
            .update_user(
                user.id,
                UserChanges {
                    password_hash: Some(password_hash),
                    ..Default::default()
                },
            )
            .await?;

        tracing::info!(user_id = %user.id, "🔑 Senha redefinida via pergunta secreta");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("  Firulais ", "firulais")]
    #[case("FIRULAIS", "firulais")]
    #[case("Ciudad de México", "ciudad de méxico")]
    fn answers_are_normalized(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_answer(raw), expected);
    }

    #[test]
    fn emails_are_lowercased() {
        assert_eq!(normalize_email(" Maria@Correo.COM "), "maria@correo.com");
    }

    #[tokio::test]
    async fn hash_and_verify_roundtrip() {
        let hashed = hash_secret("1234").await.unwrap();
        assert_ne!(hashed, "1234");
        assert!(verify_secret("1234", &hashed).await.unwrap());
        assert!(!verify_secret("4321", &hashed).await.unwrap());
    }

    #[tokio::test]
    async fn dummy_hash_is_a_full_cost_bcrypt_hash() {
        let parts: bcrypt::HashParts = DUMMY_PASSWORD_HASH.parse().unwrap();
        assert_eq!(parts.get_cost(), bcrypt::DEFAULT_COST);

        // Verificar contra ele precisa funcionar (e falhar) como com um hash real
        assert!(!verify_secret("secreta", DUMMY_PASSWORD_HASH).await.unwrap());
        assert!(!verify_secret("", DUMMY_PASSWORD_HASH).await.unwrap());
    }
}
