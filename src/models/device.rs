// src/models/device.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::validation::{validate_mac_address, validate_not_blank};

// Mapeia o CREATE TYPE door_state do banco
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "door_state", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DoorState {
    Open,
    Closed,
}

impl DoorState {
    pub fn toggled(self) -> Self {
        match self {
            DoorState::Open => DoorState::Closed,
            DoorState::Closed => DoorState::Open,
        }
    }
}

// A fechadura IoT vinculada a um usuário pelo endereço MAC
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: Uuid,
    pub user_id: Uuid,
    #[schema(example = "24:6F:28:AA:10:0C")]
    pub mac_address: String,
    #[schema(example = "Puerta principal")]
    pub name: String,
    #[schema(example = "Entrada")]
    pub location: Option<String>,
    pub is_online: bool,
    pub last_connection: Option<DateTime<Utc>>,
    pub door_state: DoorState,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterDevicePayload {
    #[validate(custom(function = "validate_mac_address"))]
    #[schema(example = "24:6f:28:aa:10:0c")]
    pub mac_address: String,
    #[validate(
        custom(function = "validate_not_blank", message = "validation.name_required"),
        length(max = 100, message = "validation.length")
    )]
    pub name: String,
    #[validate(length(max = 100, message = "validation.length"))]
    pub location: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateDevicePayload {
    #[validate(
        custom(function = "validate_not_blank", message = "validation.name_required"),
        length(max = 100, message = "validation.length")
    )]
    pub name: Option<String>,
    #[validate(length(max = 100, message = "validation.length"))]
    pub location: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeviceStatusPayload {
    pub is_online: bool,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HasDeviceResponse {
    pub has_device: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Puerta principal", true)]
    #[case("   ", false)]
    #[case("", false)]
    fn device_name_needs_visible_text(#[case] name: &str, #[case] ok: bool) {
        let payload = RegisterDevicePayload {
            mac_address: "24:6f:28:aa:10:0c".into(),
            name: name.into(),
            location: None,
        };
        assert_eq!(payload.validate().is_ok(), ok);
    }
}
