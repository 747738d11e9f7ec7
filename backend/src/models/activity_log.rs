use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use super::{
    actor::Actor,
    item::{ItemRef, ItemStatus},
};
use crate::types::ActivityLogId;

text_enum! {
    pub enum ActivityAction {
        Add => "add",
        Update => "update",
        Delete => "delete",
        Assign => "assign",
        Login => "login",
    }
}

/// Entity labels used in `activity_logs.item_type`.
pub mod entity {
    pub const HARDWARE: &str = "hardware";
    pub const NETWORK_DEVICE: &str = "network_device";
    pub const GENERAL_INVENTORY: &str = "general_inventory";
    pub const VLAN: &str = "vlan";
    pub const CREDENTIAL: &str = "credential";
    pub const ASSIGNMENT: &str = "assignment";
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ActivityLog {
    pub id: ActivityLogId,
    pub user_id: String,
    pub action: ActivityAction,
    pub item_type: String,
    pub item_id: Option<i64>,
    pub details: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// An entry waiting to be appended.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityLogEntry {
    pub user_id: String,
    pub action: ActivityAction,
    pub item_type: String,
    pub item_id: Option<i64>,
    pub details: Option<String>,
}

impl ActivityLogEntry {
    pub fn new(
        actor: &Actor,
        action: ActivityAction,
        item_type: &str,
        item_id: Option<i64>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            user_id: actor.id.clone(),
            action,
            item_type: item_type.to_string(),
            item_id,
            details: Some(details.into()),
        }
    }

    /// `update` entry describing an item status change made by the ledger
    /// or the reconciliation job.
    pub fn item_status(
        actor: &Actor,
        item: ItemRef,
        from: ItemStatus,
        to: ItemStatus,
        reason: &str,
    ) -> Self {
        Self::new(
            actor,
            ActivityAction::Update,
            item.kind().as_str(),
            Some(item.raw_id()),
            format!("{} status changed from {} to {} ({})", item, from, to, reason),
        )
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, IntoParams, ToSchema)]
pub struct ActivityLogQuery {
    pub limit: Option<i64>,
    pub item_type: Option<String>,
    pub item_id: Option<i64>,
}
