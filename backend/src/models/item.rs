//! Status and identity shared by the three assignable item registries.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use validator::Validate;

use crate::types::{GeneralInventoryId, HardwareId, NetworkDeviceId};

text_enum! {
    /// Lifecycle status shared by hardware, network devices and general inventory.
    pub enum ItemStatus {
        InStock => "in_stock",
        Assigned => "assigned",
        Maintenance => "maintenance",
        Retired => "retired",
    }
}

text_enum! {
    /// The registries whose rows can be referenced by an assignment.
    pub enum ItemKind {
        Hardware => "hardware",
        NetworkDevice => "network_device",
        GeneralInventory => "general_inventory",
    }
}

impl ItemKind {
    /// Backing table of the registry.
    pub fn table(&self) -> &'static str {
        match self {
            ItemKind::Hardware => "hardware",
            ItemKind::NetworkDevice => "network_devices",
            ItemKind::GeneralInventory => "general_inventory_items",
        }
    }

    /// Nullable foreign-key column on `assignments` pointing at this registry.
    pub fn assignment_column(&self) -> &'static str {
        match self {
            ItemKind::Hardware => "hardware_id",
            ItemKind::NetworkDevice => "network_device_id",
            ItemKind::GeneralInventory => "general_inventory_id",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ItemKind::Hardware => "Hardware",
            ItemKind::NetworkDevice => "Network device",
            ItemKind::GeneralInventory => "Inventory item",
        }
    }
}

/// Reference from an assignment to exactly one item.
///
/// Storage keeps three nullable columns; this type is the only place that
/// decides which of them is populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemRef {
    Hardware(HardwareId),
    NetworkDevice(NetworkDeviceId),
    GeneralInventory(GeneralInventoryId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ItemRefError {
    #[error("exactly one of hardware_id, network_device_id, general_inventory_id is required")]
    Missing,
    #[error("only one of hardware_id, network_device_id, general_inventory_id may be set")]
    Ambiguous,
}

impl ItemRef {
    pub fn from_columns(
        hardware_id: Option<HardwareId>,
        network_device_id: Option<NetworkDeviceId>,
        general_inventory_id: Option<GeneralInventoryId>,
    ) -> Result<Self, ItemRefError> {
        match (hardware_id, network_device_id, general_inventory_id) {
            (Some(id), None, None) => Ok(ItemRef::Hardware(id)),
            (None, Some(id), None) => Ok(ItemRef::NetworkDevice(id)),
            (None, None, Some(id)) => Ok(ItemRef::GeneralInventory(id)),
            (None, None, None) => Err(ItemRefError::Missing),
            _ => Err(ItemRefError::Ambiguous),
        }
    }

    pub fn from_parts(kind: ItemKind, raw_id: i64) -> Self {
        match kind {
            ItemKind::Hardware => ItemRef::Hardware(HardwareId::new(raw_id)),
            ItemKind::NetworkDevice => ItemRef::NetworkDevice(NetworkDeviceId::new(raw_id)),
            ItemKind::GeneralInventory => {
                ItemRef::GeneralInventory(GeneralInventoryId::new(raw_id))
            }
        }
    }

    pub fn kind(&self) -> ItemKind {
        match self {
            ItemRef::Hardware(_) => ItemKind::Hardware,
            ItemRef::NetworkDevice(_) => ItemKind::NetworkDevice,
            ItemRef::GeneralInventory(_) => ItemKind::GeneralInventory,
        }
    }

    pub fn raw_id(&self) -> i64 {
        match self {
            ItemRef::Hardware(id) => id.get(),
            ItemRef::NetworkDevice(id) => id.get(),
            ItemRef::GeneralInventory(id) => id.get(),
        }
    }

    pub fn hardware_id(&self) -> Option<HardwareId> {
        match self {
            ItemRef::Hardware(id) => Some(*id),
            _ => None,
        }
    }

    pub fn network_device_id(&self) -> Option<NetworkDeviceId> {
        match self {
            ItemRef::NetworkDevice(id) => Some(*id),
            _ => None,
        }
    }

    pub fn general_inventory_id(&self) -> Option<GeneralInventoryId> {
        match self {
            ItemRef::GeneralInventory(id) => Some(*id),
            _ => None,
        }
    }
}

impl fmt::Display for ItemRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} #{}", self.kind().label(), self.raw_id())
    }
}

/// Status and display name of an item, read while holding its row lock.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LockedItem {
    pub name: String,
    pub status: ItemStatus,
}

/// A row of one of the assignable registries.
///
/// Lets the registry service apply the shared status rules without knowing
/// which table it is working on.
pub trait InventoryItem: Serialize + Send + Sync + Unpin + 'static {
    type Create: DeserializeOwned + Validate + Send + Sync;
    type Update: DeserializeOwned + Validate + Send;

    fn item_ref(&self) -> ItemRef;
    fn name(&self) -> &str;
    fn status(&self) -> ItemStatus;
    fn set_status(&mut self, status: ItemStatus);
    /// Applies every patched field except `status`.
    fn apply_patch(&mut self, patch: Self::Update);
    /// Trims free text before the payload is stored.
    fn normalize(payload: Self::Create) -> Self::Create;
    fn create_status(payload: &Self::Create) -> Option<ItemStatus>;
    fn patch_status(patch: &Self::Update) -> Option<ItemStatus>;
}

/// An item whose recorded status disagrees with the assignment ledger.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct StatusDrift {
    pub item_type: ItemKind,
    pub item_id: i64,
    pub name: String,
    pub recorded_status: ItemStatus,
    pub has_active_assignment: bool,
}

impl StatusDrift {
    pub fn item(&self) -> ItemRef {
        ItemRef::from_parts(self.item_type, self.item_id)
    }

    /// Status the item should carry given the ledger.
    pub fn expected_status(&self) -> ItemStatus {
        if self.has_active_assignment {
            ItemStatus::Assigned
        } else {
            ItemStatus::InStock
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_ref_requires_exactly_one_column() {
        assert_eq!(
            ItemRef::from_columns(Some(HardwareId::new(1)), None, None),
            Ok(ItemRef::Hardware(HardwareId::new(1)))
        );
        assert_eq!(
            ItemRef::from_columns(None, None, Some(GeneralInventoryId::new(3))),
            Ok(ItemRef::GeneralInventory(GeneralInventoryId::new(3)))
        );
        assert_eq!(
            ItemRef::from_columns(None, None, None),
            Err(ItemRefError::Missing)
        );
        assert_eq!(
            ItemRef::from_columns(
                Some(HardwareId::new(1)),
                Some(NetworkDeviceId::new(2)),
                None
            ),
            Err(ItemRefError::Ambiguous)
        );
    }

    #[test]
    fn item_ref_round_trips_through_parts() {
        let item = ItemRef::NetworkDevice(NetworkDeviceId::new(9));
        assert_eq!(ItemRef::from_parts(item.kind(), item.raw_id()), item);
        assert_eq!(item.network_device_id(), Some(NetworkDeviceId::new(9)));
        assert_eq!(item.hardware_id(), None);
        assert_eq!(item.to_string(), "Network device #9");
    }

    #[test]
    fn item_status_parses_case_insensitively() {
        assert_eq!("IN_STOCK".parse::<ItemStatus>(), Ok(ItemStatus::InStock));
        assert!("lost".parse::<ItemStatus>().is_err());
        assert_eq!(
            serde_json::to_value(ItemStatus::Maintenance).expect("serialize"),
            serde_json::json!("maintenance")
        );
    }

    #[test]
    fn drift_expected_status_follows_ledger() {
        let drift = StatusDrift {
            item_type: ItemKind::Hardware,
            item_id: 1,
            name: "Laptop".into(),
            recorded_status: ItemStatus::Assigned,
            has_active_assignment: false,
        };
        assert_eq!(drift.expected_status(), ItemStatus::InStock);
        assert_eq!(drift.item(), ItemRef::Hardware(HardwareId::new(1)));
    }
}
