// src/models/door.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{common::validation::validate_mac_address, models::device::DoorState};

// Por onde veio o pedido de abertura. Mapeia o CREATE TYPE access_channel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "access_channel", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AccessChannel {
    App,
    Fingerprint,
    Rfid,
    Pin,
}

// --- HISTÓRICO DE ACESSOS ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccessLog {
    pub id: Uuid,
    pub device_id: Uuid,
    pub sub_user_id: Option<Uuid>,
    pub method: AccessChannel,
    pub granted: bool,
    #[schema(example = "Puerta abierta desde la app")]
    pub detail: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DoorStatus {
    pub device_id: Uuid,
    pub door_state: DoorState,
    pub is_online: bool,
    pub last_connection: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LogsQuery {
    #[validate(range(min = 1, max = 100, message = "validation.limit"))]
    pub limit: Option<i64>,
}

// O que a fechadura envia quando alguém tenta entrar
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeviceAccessPayload {
    #[validate(custom(function = "validate_mac_address"))]
    pub mac_address: String,
    pub access_method: AccessChannel,
    #[validate(length(min = 1, max = 64, message = "validation.access_id"))]
    pub access_id: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccessDecision {
    pub granted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_user_name: Option<String>,
}
