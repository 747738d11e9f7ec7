use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::{deserialize_some, normalize_text, patch_text};
use crate::types::VlanId;
use crate::validation::rules::{validate_cidr, validate_ip_address, validate_not_blank};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Vlan {
    pub id: VlanId,
    pub vlan_number: i32,
    pub name: String,
    pub description: Option<String>,
    pub subnet: Option<String>,
    pub gateway: Option<String>,
    /// Descriptive only; not a relationship to the device registry.
    pub assigned_devices: Option<String>,
    pub notes: Option<String>,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateVlan {
    #[validate(range(min = 1, max = 4094))]
    pub vlan_number: i32,
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub name: String,
    pub description: Option<String>,
    #[validate(custom(function = "validate_cidr"))]
    pub subnet: Option<String>,
    #[validate(custom(function = "validate_ip_address"))]
    pub gateway: Option<String>,
    pub assigned_devices: Option<String>,
    pub notes: Option<String>,
}

impl CreateVlan {
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            description: normalize_text(self.description),
            subnet: normalize_text(self.subnet),
            gateway: normalize_text(self.gateway),
            assigned_devices: normalize_text(self.assigned_devices),
            notes: normalize_text(self.notes),
            ..self
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateVlan {
    #[validate(range(min = 1, max = 4094))]
    pub vlan_number: Option<i32>,
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    #[validate(custom(function = "validate_cidr"))]
    pub subnet: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    #[validate(custom(function = "validate_ip_address"))]
    pub gateway: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    pub assigned_devices: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    pub notes: Option<Option<String>>,
}

impl Vlan {
    pub fn apply(&mut self, patch: UpdateVlan) {
        if let Some(vlan_number) = patch.vlan_number {
            self.vlan_number = vlan_number;
        }
        if let Some(name) = patch.name {
            self.name = name.trim().to_string();
        }
        patch_text(&mut self.description, patch.description);
        patch_text(&mut self.subnet, patch.subnet);
        patch_text(&mut self.gateway, patch.gateway);
        patch_text(&mut self.assigned_devices, patch.assigned_devices);
        patch_text(&mut self.notes, patch.notes);
    }
}
