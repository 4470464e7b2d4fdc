// src/services/device_service.rs

use uuid::Uuid;

use crate::{
    common::{error::AppError, validation::normalize_mac},
    db::DeviceRepository,
    models::device::{Device, RegisterDevicePayload, UpdateDevicePayload},
};

#[derive(Clone)]
pub struct DeviceService {
    device_repo: DeviceRepository,
}

impl DeviceService {
    pub fn new(device_repo: DeviceRepository) -> Self {
        Self { device_repo }
    }

    /// Vincula a fechadura ao usuário. O MAC é gravado na forma canônica,
    /// então `aa-bb-..` e `AA:BB:..` contam como o mesmo dispositivo.
    pub async fn register_device(
        &self,
        user_id: Uuid,
        payload: &RegisterDevicePayload,
    ) -> Result<Device, AppError> {
        let mac = normalize_mac(&payload.mac_address).ok_or_else(|| {
            let mut errors = validator::ValidationErrors::new();
            let mut err = validator::ValidationError::new("mac_address");
            err.message = Some("validation.mac_address".into());
            errors.add("macAddress", err);
            AppError::ValidationError(errors)
        })?;

        let device = self
            .device_repo
            .create(user_id, &mac, payload.name.trim(), payload.location.as_deref())
            .await?;

        tracing::info!(device_id = %device.id, mac = %device.mac_address, "🔐 Dispositivo registrado");
        Ok(device)
    }

    pub async fn list_devices(&self, user_id: Uuid) -> Result<Vec<Device>, AppError> {
        self.device_repo.list_by_user(user_id).await
    }

    pub async fn has_device(&self, user_id: Uuid) -> Result<bool, AppError> {
        self.device_repo.user_has_device(user_id).await
    }

    // Dispositivo de outro usuário responde 404, não 403: não revelamos que existe
    pub async fn get_device(&self, user_id: Uuid, id: Uuid) -> Result<Device, AppError> {
        self.device_repo
            .find_for_user(id, user_id)
            .await?
            .ok_or(AppError::DeviceNotFound)
    }

    pub async fn update_device(
        &self,
        user_id: Uuid,
        id: Uuid,
        payload: &UpdateDevicePayload,
    ) -> Result<Device, AppError> {
        self.device_repo
            .update_details(
                id,
                user_id,
                payload.name.as_deref().map(str::trim),
                payload.location.as_deref(),
            )
            .await?
            .ok_or(AppError::DeviceNotFound)
    }

    pub async fn update_status(&self, user_id: Uuid, id: Uuid, is_online: bool) -> Result<Device, AppError> {
        let device = self
            .device_repo
            .update_connection(id, user_id, is_online)
            .await?
            .ok_or(AppError::DeviceNotFound)?;

        tracing::debug!(device_id = %id, is_online, "Status de conexão atualizado");
        Ok(device)
    }
}
