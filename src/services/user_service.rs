// src/services/user_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{user_repo::UserChanges, UserRepository},
    models::auth::{UpdateUserPayload, User},
    services::auth::{hash_secret, normalize_email, verify_secret},
};

/// Um usuário só pode ler e alterar o próprio cadastro.
pub(crate) fn ensure_self(acting_user: Uuid, target: Uuid) -> Result<(), AppError> {
    if acting_user == target {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
}

impl UserService {
    pub fn new(user_repo: UserRepository) -> Self {
        Self { user_repo }
    }

    pub async fn get_user(&self, acting_user: Uuid, id: Uuid) -> Result<User, AppError> {
        ensure_self(acting_user, id)?;
        self.user_repo.find_by_id(id).await?.ok_or(AppError::UserNotFound)
    }

    // Atualização parcial; se vier senha, ela é re-hasheada antes de gravar
    pub async fn update_user(
        &self,
        acting_user: Uuid,
        id: Uuid,
        payload: UpdateUserPayload,
    ) -> Result<User, AppError> {
        ensure_self(acting_user, id)?;

        let password_hash = match payload.password.as_deref() {
            Some(password) => Some(hash_secret(password).await?),
            None => None,
        };

        let changes = UserChanges {
            name: payload.name.map(|v| v.trim().to_string()),
            last_name: payload.last_name.map(|v| v.trim().to_string()),
            surname: payload.surname.map(|v| v.trim().to_string()),
            phone: payload.phone.map(|v| v.trim().to_string()),
            email: payload.email.as_deref().map(normalize_email),
            password_hash,
        };

        let user = self.user_repo.update_user(id, changes).await?;
        tracing::info!(user_id = %id, "Perfil atualizado");
        Ok(user)
    }

    pub async fn set_device_pin(&self, acting_user: Uuid, id: Uuid, pin: &str) -> Result<(), AppError> {
        ensure_self(acting_user, id)?;
        let pin_hash = hash_secret(pin).await?;
        self.user_repo.set_device_pin(id, &pin_hash).await
    }

    pub async fn verify_device_pin(&self, acting_user: Uuid, id: Uuid, pin: &str) -> Result<bool, AppError> {
        ensure_self(acting_user, id)?;
        let user = self.user_repo.find_by_id(id).await?.ok_or(AppError::UserNotFound)?;
        let pin_hash = user.device_pin_hash.ok_or(AppError::DevicePinNotSet)?;
        verify_secret(pin, &pin_hash).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_owner_passes() {
        let me = Uuid::new_v4();
        assert!(ensure_self(me, me).is_ok());
        assert!(matches!(ensure_self(me, Uuid::new_v4()), Err(AppError::Forbidden)));
    }
}
