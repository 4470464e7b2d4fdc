// src/services/jwt.rs

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::{common::error::AppError, models::auth::Claims};

/// Emissão e verificação dos JWT (HS256) da sessão.
#[derive(Clone)]
pub struct JwtManager {
    secret: String,
    ttl: Duration,
}

impl JwtManager {
    pub fn new(secret: String, ttl_hours: i64) -> Self {
        Self {
            secret,
            ttl: Duration::hours(ttl_hours),
        }
    }

    pub fn issue(&self, user_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + self.ttl;

        let claims = Claims {
            sub: user_id,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_ref()),
        )?)
    }

    // Assinatura inválida, token malformado ou expirado: tudo vira InvalidToken
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_ref()),
            &Validation::default(),
        )
        .map_err(|_| AppError::InvalidToken)?;
        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_decodes_to_same_subject() {
        let jwt = JwtManager::new("segredo-de-teste".into(), 24);
        let user_id = Uuid::new_v4();

        let token = jwt.issue(user_id).unwrap();
        let claims = jwt.decode(&token).unwrap();

        assert_eq!(claims.sub, user_id);
        assert!(claims.exp > claims.iat);
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let issuer = JwtManager::new("um".into(), 1);
        let verifier = JwtManager::new("outro".into(), 1);

        let token = issuer.issue(Uuid::new_v4()).unwrap();

        assert!(matches!(verifier.decode(&token), Err(AppError::InvalidToken)));
    }

    #[test]
    fn expired_token_is_rejected() {
        // TTL negativo gera um token já vencido (além da margem de 60s do Validation)
        let jwt = JwtManager::new("segredo".into(), -2);
        let token = jwt.issue(Uuid::new_v4()).unwrap();

        assert!(matches!(jwt.decode(&token), Err(AppError::InvalidToken)));
    }

    #[test]
    fn garbage_is_rejected() {
        let jwt = JwtManager::new("segredo".into(), 1);
        assert!(matches!(jwt.decode("isto.nao.e-um-jwt"), Err(AppError::InvalidToken)));
    }
}
