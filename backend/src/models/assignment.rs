//! Assignment ledger rows and the lifecycle rules that keep item status in sync.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::{
    deserialize_some,
    item::{ItemKind, ItemRef, ItemRefError, ItemStatus},
    normalize_text, patch_text,
};
use crate::types::{AssignmentId, GeneralInventoryId, HardwareId, NetworkDeviceId};
use crate::validation::rules::validate_not_blank;

text_enum! {
    pub enum AssignmentStatus {
        /// The item is out with the assignee.
        Active => "active",
        /// Reserved for the assignee; the item stays in stock.
        Pending => "pending",
        /// Closed. Terminal.
        Returned => "returned",
    }
}

/// Rejected lifecycle move, reported to callers as a conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("Assignment has already been returned")]
    AlreadyReturned,
    #[error("Assignment cannot move from {from} to {to}")]
    NotAllowed {
        from: AssignmentStatus,
        to: AssignmentStatus,
    },
}

impl AssignmentStatus {
    /// Active and pending assignments both occupy the item's single open slot.
    pub fn is_open(&self) -> bool {
        !matches!(self, AssignmentStatus::Returned)
    }

    /// Whether an assignment in this status keeps its item `assigned`.
    pub fn holds_item(&self) -> bool {
        matches!(self, AssignmentStatus::Active)
    }

    /// Validates `self -> next`. Staying in an open status is allowed and
    /// changes nothing.
    pub fn check_transition(self, next: AssignmentStatus) -> Result<(), TransitionError> {
        use AssignmentStatus::*;
        match (self, next) {
            (Returned, _) => Err(TransitionError::AlreadyReturned),
            (Active, Active) | (Pending, Pending) => Ok(()),
            (Active, Returned) | (Active, Pending) | (Pending, Active) => Ok(()),
            (from, to) => Err(TransitionError::NotAllowed { from, to }),
        }
    }

    /// Item status the move `self -> next` writes, if any.
    pub fn item_status_after(self, next: AssignmentStatus) -> Option<ItemStatus> {
        match (self.holds_item(), next.holds_item()) {
            (true, false) => Some(ItemStatus::InStock),
            (false, true) => Some(ItemStatus::Assigned),
            _ => None,
        }
    }
}

/// Raw `assignments` row with the three nullable item columns.
#[derive(Debug, Clone, FromRow)]
pub struct AssignmentRow {
    pub id: AssignmentId,
    pub hardware_id: Option<HardwareId>,
    pub network_device_id: Option<NetworkDeviceId>,
    pub general_inventory_id: Option<GeneralInventoryId>,
    pub assigned_to: String,
    pub department: Option<String>,
    pub assignment_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
    pub status: AssignmentStatus,
    pub notes: Option<String>,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub id: AssignmentId,
    pub item: ItemRef,
    pub assigned_to: String,
    pub department: Option<String>,
    pub assignment_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
    pub status: AssignmentStatus,
    pub notes: Option<String>,
    pub last_updated: DateTime<Utc>,
}

impl TryFrom<AssignmentRow> for Assignment {
    type Error = ItemRefError;

    fn try_from(row: AssignmentRow) -> Result<Self, Self::Error> {
        let item = ItemRef::from_columns(
            row.hardware_id,
            row.network_device_id,
            row.general_inventory_id,
        )?;
        Ok(Self {
            id: row.id,
            item,
            assigned_to: row.assigned_to,
            department: row.department,
            assignment_date: row.assignment_date,
            return_date: row.return_date,
            status: row.status,
            notes: row.notes,
            last_updated: row.last_updated,
        })
    }
}

impl Assignment {
    /// Applies the descriptive fields of a patch. Status and item reference
    /// are handled by the ledger.
    pub fn apply(&mut self, patch: &UpdateAssignment) {
        if let Some(assigned_to) = patch.assigned_to.as_deref() {
            self.assigned_to = assigned_to.trim().to_string();
        }
        patch_text(&mut self.department, patch.department.clone());
        if let Some(assignment_date) = patch.assignment_date {
            self.assignment_date = assignment_date;
        }
        if let Some(return_date) = patch.return_date {
            self.return_date = return_date;
        }
        patch_text(&mut self.notes, patch.notes.clone());
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AssignmentResponse {
    pub id: AssignmentId,
    pub item_type: ItemKind,
    pub item_id: i64,
    pub hardware_id: Option<HardwareId>,
    pub network_device_id: Option<NetworkDeviceId>,
    pub general_inventory_id: Option<GeneralInventoryId>,
    pub assigned_to: String,
    pub department: Option<String>,
    pub assignment_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
    pub status: AssignmentStatus,
    pub notes: Option<String>,
    pub last_updated: DateTime<Utc>,
}

impl From<Assignment> for AssignmentResponse {
    fn from(value: Assignment) -> Self {
        Self {
            id: value.id,
            item_type: value.item.kind(),
            item_id: value.item.raw_id(),
            hardware_id: value.item.hardware_id(),
            network_device_id: value.item.network_device_id(),
            general_inventory_id: value.item.general_inventory_id(),
            assigned_to: value.assigned_to,
            department: value.department,
            assignment_date: value.assignment_date,
            return_date: value.return_date,
            status: value.status,
            notes: value.notes,
            last_updated: value.last_updated,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateAssignment {
    pub hardware_id: Option<HardwareId>,
    pub network_device_id: Option<NetworkDeviceId>,
    pub general_inventory_id: Option<GeneralInventoryId>,
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub assigned_to: String,
    #[validate(length(max = 255))]
    pub department: Option<String>,
    pub assignment_date: Option<DateTime<Utc>>,
    pub status: Option<AssignmentStatus>,
    pub notes: Option<String>,
}

impl CreateAssignment {
    pub fn item(&self) -> Result<ItemRef, ItemRefError> {
        ItemRef::from_columns(
            self.hardware_id,
            self.network_device_id,
            self.general_inventory_id,
        )
    }

    pub fn normalized(self) -> Self {
        Self {
            assigned_to: self.assigned_to.trim().to_string(),
            department: normalize_text(self.department),
            notes: normalize_text(self.notes),
            ..self
        }
    }
}

/// Values written by the ledger when inserting a new assignment.
#[derive(Debug, Clone)]
pub struct NewAssignment {
    pub item: ItemRef,
    pub assigned_to: String,
    pub department: Option<String>,
    pub assignment_date: DateTime<Utc>,
    pub status: AssignmentStatus,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateAssignment {
    /// Accepted only when it names the item the assignment already references.
    pub hardware_id: Option<HardwareId>,
    pub network_device_id: Option<NetworkDeviceId>,
    pub general_inventory_id: Option<GeneralInventoryId>,
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub assigned_to: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    #[validate(length(max = 255))]
    pub department: Option<Option<String>>,
    pub assignment_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<DateTime<Utc>>)]
    pub return_date: Option<Option<DateTime<Utc>>>,
    pub status: Option<AssignmentStatus>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    pub notes: Option<Option<String>>,
}

impl UpdateAssignment {
    /// The item reference named by the patch, if it names one at all.
    pub fn item(&self) -> Option<Result<ItemRef, ItemRefError>> {
        if self.hardware_id.is_none()
            && self.network_device_id.is_none()
            && self.general_inventory_id.is_none()
        {
            return None;
        }
        Some(ItemRef::from_columns(
            self.hardware_id,
            self.network_device_id,
            self.general_inventory_id,
        ))
    }

    /// Whether the patch sends an explicit `null` for the return date.
    pub fn clears_return_date(&self) -> bool {
        matches!(self.return_date, Some(None))
    }

    /// Patch applied when an item is handed back.
    pub fn returned_at(at: DateTime<Utc>) -> Self {
        Self {
            status: Some(AssignmentStatus::Returned),
            return_date: Some(Some(at)),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, IntoParams, ToSchema)]
pub struct AssignmentFilter {
    pub status: Option<AssignmentStatus>,
    pub item_type: Option<ItemKind>,
    pub item_id: Option<i64>,
    pub assigned_to: Option<String>,
}
