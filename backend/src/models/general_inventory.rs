use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::{deserialize_some, item::ItemStatus, normalize_text, patch_text};
use crate::types::GeneralInventoryId;
use crate::validation::rules::{validate_not_blank, validate_serial_number};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct GeneralInventoryItem {
    pub id: GeneralInventoryId,
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    pub quantity: i32,
    pub serial_number: Option<String>,
    pub status: ItemStatus,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub last_updated: DateTime<Utc>,
}

fn default_quantity() -> i32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateGeneralInventoryItem {
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub name: String,
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub category: String,
    pub description: Option<String>,
    #[serde(default = "default_quantity")]
    #[validate(range(min = 0))]
    pub quantity: i32,
    #[validate(custom(function = "validate_serial_number"))]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub status: Option<ItemStatus>,
    #[validate(length(max = 255))]
    pub location: Option<String>,
    pub notes: Option<String>,
}

impl CreateGeneralInventoryItem {
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            category: self.category.trim().to_string(),
            description: normalize_text(self.description),
            serial_number: normalize_text(self.serial_number),
            location: normalize_text(self.location),
            notes: normalize_text(self.notes),
            ..self
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateGeneralInventoryItem {
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[validate(range(min = 0))]
    pub quantity: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    #[validate(custom(function = "validate_serial_number"))]
    pub serial_number: Option<Option<String>>,
    pub status: Option<ItemStatus>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    #[validate(length(max = 255))]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    pub notes: Option<Option<String>>,
}

impl GeneralInventoryItem {
    /// Applies every field of the patch except `status`.
    pub fn apply(&mut self, patch: UpdateGeneralInventoryItem) {
        if let Some(name) = patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(category) = patch.category {
            self.category = category.trim().to_string();
        }
        patch_text(&mut self.description, patch.description);
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        patch_text(&mut self.serial_number, patch.serial_number);
        patch_text(&mut self.location, patch.location);
        patch_text(&mut self.notes, patch.notes);
    }
}

inventory_item!(
    GeneralInventoryItem,
    CreateGeneralInventoryItem,
    UpdateGeneralInventoryItem,
    GeneralInventory
);
