//! Repository trait and common functionality
//!
//! Reads go through a pool; writes and row locks take a connection so the
//! caller can keep them inside one transaction.

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::item::{InventoryItem, ItemRef, ItemStatus};
use sqlx::{PgConnection, PgPool};
use std::str::FromStr;

/// Standard repository trait for database operations
#[async_trait]
pub trait Repository<T>: Send + Sync {
    /// Target table name.
    const TABLE: &'static str;
    /// Primary key type for the record.
    type Id: Copy + Send + Sync + FromStr;
    /// Payload accepted by [`Repository::create`].
    type New: Send + Sync;

    /// Find all records of type T
    async fn find_all(&self, db: &PgPool) -> Result<Vec<T>, AppError>;

    /// Find a single record by ID
    async fn find_by_id(&self, db: &PgPool, id: Self::Id) -> Result<T, AppError>;

    /// Read a record and hold its row lock until the transaction ends.
    async fn lock_by_id(&self, conn: &mut PgConnection, id: Self::Id) -> Result<T, AppError>;

    /// Create a new record
    async fn create(&self, conn: &mut PgConnection, item: &Self::New) -> Result<T, AppError>;

    /// Update an existing record
    async fn update(&self, conn: &mut PgConnection, item: &T) -> Result<T, AppError>;

    /// Delete a record by ID
    async fn delete(&self, conn: &mut PgConnection, id: Self::Id) -> Result<(), AppError>;
}

/// Registries whose rows carry a status and can be assigned.
#[async_trait]
pub trait ItemRepository<T: InventoryItem>: Repository<T, New = T::Create> {
    fn item_ref(id: Self::Id) -> ItemRef;

    async fn find_by_status(&self, db: &PgPool, status: ItemStatus) -> Result<Vec<T>, AppError>;
}

/// Maps a missing row to a `NotFound` naming the entity.
pub(crate) fn not_found(label: &str) -> AppError {
    AppError::NotFound(format!("{} not found", label))
}
