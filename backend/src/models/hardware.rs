use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::{deserialize_some, item::ItemStatus, normalize_text, patch_text, patch_value};
use crate::types::HardwareId;
use crate::validation::rules::{validate_not_blank, validate_serial_number};

text_enum! {
    /// Hardware categories accepted by the `hardware.hardware_type` check constraint.
    pub enum HardwareType {
        Laptop => "laptop",
        Desktop => "desktop",
        Server => "server",
        Monitor => "monitor",
        Printer => "printer",
        Phone => "phone",
        Tablet => "tablet",
        Peripheral => "peripheral",
        Other => "other",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Hardware {
    pub id: HardwareId,
    pub name: String,
    pub hardware_type: HardwareType,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub warranty_expiry: Option<NaiveDate>,
    pub status: ItemStatus,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateHardware {
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub name: String,
    pub hardware_type: HardwareType,
    #[validate(length(max = 255))]
    pub manufacturer: Option<String>,
    #[validate(length(max = 255))]
    pub model: Option<String>,
    #[validate(custom(function = "validate_serial_number"))]
    pub serial_number: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub warranty_expiry: Option<NaiveDate>,
    #[serde(default)]
    pub status: Option<ItemStatus>,
    #[validate(length(max = 255))]
    pub location: Option<String>,
    pub notes: Option<String>,
}

impl CreateHardware {
    /// Trims free text so blank strings are stored as `NULL`.
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            manufacturer: normalize_text(self.manufacturer),
            model: normalize_text(self.model),
            serial_number: normalize_text(self.serial_number),
            location: normalize_text(self.location),
            notes: normalize_text(self.notes),
            ..self
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateHardware {
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub name: Option<String>,
    pub hardware_type: Option<HardwareType>,
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
    #[schema(value_type = Option<NaiveDate>)]
    pub purchase_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<NaiveDate>)]
    pub warranty_expiry: Option<Option<NaiveDate>>,
    pub status: Option<ItemStatus>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    #[validate(length(max = 255))]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    pub notes: Option<Option<String>>,
}

impl Hardware {
    /// Applies every field of the patch except `status`, which goes through
    /// the registry's status rules.
    pub fn apply(&mut self, patch: UpdateHardware) {
        if let Some(name) = patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(hardware_type) = patch.hardware_type {
            self.hardware_type = hardware_type;
        }
        patch_text(&mut self.manufacturer, patch.manufacturer);
        patch_text(&mut self.model, patch.model);
        patch_text(&mut self.serial_number, patch.serial_number);
        patch_value(&mut self.purchase_date, patch.purchase_date);
        patch_value(&mut self.warranty_expiry, patch.warranty_expiry);
        patch_text(&mut self.location, patch.location);
        patch_text(&mut self.notes, patch.notes);
    }
}

inventory_item!(Hardware, CreateHardware, UpdateHardware, Hardware);
