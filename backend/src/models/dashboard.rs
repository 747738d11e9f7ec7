use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::{
    activity_log::ActivityLog,
    item::{ItemKind, ItemStatus},
};

/// One `(kind, status, count)` group from the registries.
#[derive(Debug, Clone, FromRow)]
pub struct StatusCountRow {
    pub item_type: ItemKind,
    pub status: ItemStatus,
    pub total: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatusBreakdown {
    pub in_stock: i64,
    pub assigned: i64,
    pub maintenance: i64,
    pub retired: i64,
    pub total: i64,
}

impl StatusBreakdown {
    pub fn add(&mut self, status: ItemStatus, count: i64) {
        match status {
            ItemStatus::InStock => self.in_stock += count,
            ItemStatus::Assigned => self.assigned += count,
            ItemStatus::Maintenance => self.maintenance += count,
            ItemStatus::Retired => self.retired += count,
        }
        self.total += count;
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct InventoryCounts {
    pub hardware: StatusBreakdown,
    pub network_devices: StatusBreakdown,
    pub general_inventory: StatusBreakdown,
}

impl InventoryCounts {
    pub fn from_rows(rows: impl IntoIterator<Item = StatusCountRow>) -> Self {
        let mut counts = Self::default();
        for row in rows {
            let bucket = match row.item_type {
                ItemKind::Hardware => &mut counts.hardware,
                ItemKind::NetworkDevice => &mut counts.network_devices,
                ItemKind::GeneralInventory => &mut counts.general_inventory,
            };
            bucket.add(row.status, row.total);
        }
        counts
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardStats {
    pub items: InventoryCounts,
    pub vlans: i64,
    pub credentials: i64,
    pub open_assignments: i64,
    pub recent_activity: Vec<ActivityLog>,
}
