// src/db/device_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::{map_unique_violation, AppError},
    models::{
        device::{Device, DoorState},
        door::{AccessChannel, AccessLog},
    },
};

const DEVICE_COLUMNS: &str =
    "id, user_id, mac_address, name, location, is_online, last_connection, door_state, created_at";

#[derive(Clone)]
pub struct DeviceRepository {
    pool: PgPool,
}

impl DeviceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        mac_address: &str,
        name: &str,
        location: Option<&str>,
    ) -> Result<Device, AppError> {
        sqlx::query_as::<_, Device>(&format!(
            r#"
            INSERT INTO devices (user_id, mac_address, name, location)
            VALUES ($1, $2, $3, $4)
            RETURNING {DEVICE_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(mac_address)
        .bind(name)
        .bind(location)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, |constraint| match constraint {
                "devices_mac_address_key" => AppError::MacAddressAlreadyRegistered(mac_address.to_string()),
                other => AppError::UniqueConstraintViolation(other.to_string()),
            })
        })
    }

    pub async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Device>, AppError> {
        let devices = sqlx::query_as::<_, Device>(&format!(
            "SELECT {DEVICE_COLUMNS} FROM devices WHERE user_id = $1 ORDER BY created_at"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(devices)
    }

    pub async fn user_has_device(&self, user_id: Uuid) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM devices WHERE user_id = $1)",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    // O filtro por user_id garante que ninguém enxerga dispositivo alheio
    pub async fn find_for_user(&self, id: Uuid, user_id: Uuid) -> Result<Option<Device>, AppError> {
        let device = sqlx::query_as::<_, Device>(&format!(
            "SELECT {DEVICE_COLUMNS} FROM devices WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(device)
    }

    pub async fn find_by_mac(&self, mac_address: &str) -> Result<Option<Device>, AppError> {
        let device = sqlx::query_as::<_, Device>(&format!(
            "SELECT {DEVICE_COLUMNS} FROM devices WHERE mac_address = $1"
        ))
        .bind(mac_address)
        .fetch_optional(&self.pool)
        .await?;
        Ok(device)
    }

    pub async fn update_details(
        &self,
        id: Uuid,
        user_id: Uuid,
        name: Option<&str>,
        location: Option<&str>,
    ) -> Result<Option<Device>, AppError> {
        let device = sqlx::query_as::<_, Device>(&format!(
            r#"
            UPDATE devices SET
                name = COALESCE($3, name),
                location = COALESCE($4, location)
            WHERE id = $1 AND user_id = $2
            RETURNING {DEVICE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(user_id)
        .bind(name)
        .bind(location)
        .fetch_optional(&self.pool)
        .await?;
        Ok(device)
    }

    // Heartbeat do dispositivo: marca online/offline e carimba a última conexão
    pub async fn update_connection(
        &self,
        id: Uuid,
        user_id: Uuid,
        is_online: bool,
    ) -> Result<Option<Device>, AppError> {
        let device = sqlx::query_as::<_, Device>(&format!(
            r#"
            UPDATE devices SET is_online = $3, last_connection = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING {DEVICE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(user_id)
        .bind(is_online)
        .fetch_optional(&self.pool)
        .await?;
        Ok(device)
    }

    pub async fn set_door_state<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        state: DoorState,
    ) -> Result<Device, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Device>(&format!(
            "UPDATE devices SET door_state = $2 WHERE id = $1 RETURNING {DEVICE_COLUMNS}"
        ))
        .bind(id)
        .bind(state)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::DeviceNotFound)
    }

    // Lê o estado com lock de linha, para o toggle não perder atualizações concorrentes
    pub async fn lock_for_user<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Device>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let device = sqlx::query_as::<_, Device>(&format!(
            "SELECT {DEVICE_COLUMNS} FROM devices WHERE id = $1 AND user_id = $2 FOR UPDATE"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(executor)
        .await?;
        Ok(device)
    }

    pub async fn record_access<'e, E>(
        &self,
        executor: E,
        device_id: Uuid,
        sub_user_id: Option<Uuid>,
        method: AccessChannel,
        granted: bool,
        detail: Option<&str>,
    ) -> Result<AccessLog, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let log = sqlx::query_as::<_, AccessLog>(
            r#"
            INSERT INTO access_logs (device_id, sub_user_id, method, granted, detail)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, device_id, sub_user_id, method, granted, detail, created_at
            "#,
        )
        .bind(device_id)
        .bind(sub_user_id)
        .bind(method)
        .bind(granted)
        .bind(detail)
        .fetch_one(executor)
        .await?;
        Ok(log)
    }

    pub async fn recent_access_logs(&self, device_id: Uuid, limit: i64) -> Result<Vec<AccessLog>, AppError> {
        let logs = sqlx::query_as::<_, AccessLog>(
            r#"
            SELECT id, device_id, sub_user_id, method, granted, detail, created_at
            FROM access_logs
            WHERE device_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(device_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(logs)
    }
}
