use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::{deserialize_some, item::ItemStatus, normalize_text, patch_text};
use crate::types::NetworkDeviceId;
use crate::validation::rules::{
    validate_ip_address, validate_mac_address, validate_not_blank, validate_serial_number,
};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct NetworkDevice {
    pub id: NetworkDeviceId,
    pub name: String,
    /// Free text such as `router`, `switch` or `access_point`.
    pub device_type: String,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub ip_address: Option<String>,
    pub mac_address: Option<String>,
    pub firmware_version: Option<String>,
    pub status: ItemStatus,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateNetworkDevice {
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub name: String,
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub device_type: String,
    #[validate(length(max = 255))]
    pub manufacturer: Option<String>,
    #[validate(length(max = 255))]
    pub model: Option<String>,
    #[validate(custom(function = "validate_serial_number"))]
    pub serial_number: Option<String>,
    #[validate(custom(function = "validate_ip_address"))]
    pub ip_address: Option<String>,
    #[validate(custom(function = "validate_mac_address"))]
    pub mac_address: Option<String>,
    #[validate(length(max = 100))]
    pub firmware_version: Option<String>,
    #[serde(default)]
    pub status: Option<ItemStatus>,
    #[validate(length(max = 255))]
    pub location: Option<String>,
    pub notes: Option<String>,
}

impl CreateNetworkDevice {
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            device_type: self.device_type.trim().to_string(),
            manufacturer: normalize_text(self.manufacturer),
            model: normalize_text(self.model),
            serial_number: normalize_text(self.serial_number),
            ip_address: normalize_text(self.ip_address),
            mac_address: normalize_text(self.mac_address).map(|mac| mac.to_ascii_lowercase()),
            firmware_version: normalize_text(self.firmware_version),
            location: normalize_text(self.location),
            notes: normalize_text(self.notes),
            ..self
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateNetworkDevice {
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub device_type: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    #[validate(length(max = 255))]
    pub manufacturer: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    #[validate(length(max = 255))]
    pub model: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    #[validate(custom(function = "validate_serial_number"))]
    pub serial_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    #[validate(custom(function = "validate_ip_address"))]
    pub ip_address: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    #[validate(custom(function = "validate_mac_address"))]
    pub mac_address: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    #[validate(length(max = 100))]
    pub firmware_version: Option<Option<String>>,
    pub status: Option<ItemStatus>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    #[validate(length(max = 255))]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    pub notes: Option<Option<String>>,
}

impl NetworkDevice {
    /// Applies every field of the patch except `status`.
    pub fn apply(&mut self, patch: UpdateNetworkDevice) {
        if let Some(name) = patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(device_type) = patch.device_type {
            self.device_type = device_type.trim().to_string();
        }
        patch_text(&mut self.manufacturer, patch.manufacturer);
        patch_text(&mut self.model, patch.model);
        patch_text(&mut self.serial_number, patch.serial_number);
        patch_text(&mut self.ip_address, patch.ip_address);
        patch_text(&mut self.mac_address, patch.mac_address);
        if let Some(mac) = self.mac_address.as_mut() {
            mac.make_ascii_lowercase();
        }
        patch_text(&mut self.firmware_version, patch.firmware_version);
        patch_text(&mut self.location, patch.location);
        patch_text(&mut self.notes, patch.notes);
    }
}

inventory_item!(
    NetworkDevice,
    CreateNetworkDevice,
    UpdateNetworkDevice,
    NetworkDevice
);
