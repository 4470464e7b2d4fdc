// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};

use crate::{common::error::AppError, config::AppState, models::auth::User};

/// Extrai o token de `Authorization: Bearer <jwt>`. Cabeçalho ausente ou malformado => None.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .typed_get::<Authorization<Bearer>>()
        .map(|auth| auth.token().to_string())
        .filter(|token| !token.is_empty())
}

// O middleware em si: valida o JWT (e a blacklist) e injeta o usuário na requisição
pub async fn auth_guard(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers()).ok_or(AppError::InvalidToken)?;

    let user = app_state.auth_service.validate_token(&token).await.map_err(|e| match e {
        // Token válido de usuário apagado também é "token inválido" para o cliente
        AppError::UserNotFound => AppError::InvalidToken,
        other => other,
    })?;

    request.extensions_mut().insert(AuthenticatedUser(user));
    request.extensions_mut().insert(BearerToken(token));
    Ok(next.run(request).await)
}

// Extrator para obter o usuário autenticado diretamente nos handlers
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AppError::InvalidToken)
    }
}

// O token cru da requisição; o logout precisa dele para a blacklist
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<BearerToken>()
            .cloned()
            .ok_or(AppError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header::AUTHORIZATION, HeaderValue};
    use rstest::rstest;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn reads_bearer_token() {
        assert_eq!(bearer_token(&headers_with("Bearer abc.def.ghi")).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn missing_header_yields_none() {
        assert!(bearer_token(&HeaderMap::new()).is_none());
    }

    #[rstest]
    #[case("Basic dXNlcjpwYXNz")]
    #[case("abc.def.ghi")]
    #[case("Token abc")]
    fn other_schemes_are_rejected(#[case] value: &str) {
        assert!(bearer_token(&headers_with(value)).is_none());
    }
}
