//! General inventory repository.

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::general_inventory::{CreateGeneralInventoryItem, GeneralInventoryItem};
use crate::models::item::{ItemRef, ItemStatus};
use crate::repositories::repository::{not_found, ItemRepository, Repository};
use crate::types::GeneralInventoryId;
use sqlx::{PgConnection, PgPool};

const TABLE_NAME: &str = "general_inventory_items";
const SELECT_COLUMNS: &str = "id, name, category, description, quantity, serial_number, \
     status, location, notes, last_updated";
const LABEL: &str = "Inventory item";

#[derive(Debug, Default, Clone, Copy)]
pub struct GeneralInventoryRepository;

impl GeneralInventoryRepository {
    pub fn new() -> Self {
        Self
    }

    fn base_select_query() -> String {
        format!("SELECT {} FROM {}", SELECT_COLUMNS, TABLE_NAME)
    }
}

#[async_trait]
impl Repository<GeneralInventoryItem> for GeneralInventoryRepository {
    const TABLE: &'static str = TABLE_NAME;
    type Id = GeneralInventoryId;
    type New = CreateGeneralInventoryItem;

    async fn find_all(&self, db: &PgPool) -> Result<Vec<GeneralInventoryItem>, AppError> {
        let query = format!(
            "{} ORDER BY last_updated DESC, id DESC",
            Self::base_select_query()
        );
        let rows = sqlx::query_as::<_, GeneralInventoryItem>(&query)
            .fetch_all(db)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(
        &self,
        db: &PgPool,
        id: GeneralInventoryId,
    ) -> Result<GeneralInventoryItem, AppError> {
        let query = format!("{} WHERE id = $1", Self::base_select_query());
        sqlx::query_as::<_, GeneralInventoryItem>(&query)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| not_found(LABEL))
    }

    async fn lock_by_id(
        &self,
        conn: &mut PgConnection,
        id: GeneralInventoryId,
    ) -> Result<GeneralInventoryItem, AppError> {
        let query = format!("{} WHERE id = $1 FOR UPDATE", Self::base_select_query());
        sqlx::query_as::<_, GeneralInventoryItem>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await?
            .ok_or_else(|| not_found(LABEL))
    }

    async fn create(
        &self,
        conn: &mut PgConnection,
        item: &CreateGeneralInventoryItem,
    ) -> Result<GeneralInventoryItem, AppError> {
        let query = format!(
            "INSERT INTO {} (name, category, description, quantity, serial_number, status, \
             location, notes, last_updated) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW()) \
             RETURNING {}",
            TABLE_NAME, SELECT_COLUMNS
        );
        let row = sqlx::query_as::<_, GeneralInventoryItem>(&query)
            .bind(&item.name)
            .bind(&item.category)
            .bind(&item.description)
            .bind(item.quantity)
            .bind(&item.serial_number)
            .bind(item.status.unwrap_or(ItemStatus::InStock))
            .bind(&item.location)
            .bind(&item.notes)
            .fetch_one(conn)
            .await?;
        Ok(row)
    }

    async fn update(
        &self,
        conn: &mut PgConnection,
        item: &GeneralInventoryItem,
    ) -> Result<GeneralInventoryItem, AppError> {
        let query = format!(
            "UPDATE {} SET name = $2, category = $3, description = $4, quantity = $5, \
             serial_number = $6, status = $7, location = $8, notes = $9, last_updated = NOW() \
             WHERE id = $1 RETURNING {}",
            TABLE_NAME, SELECT_COLUMNS
        );
        sqlx::query_as::<_, GeneralInventoryItem>(&query)
            .bind(item.id)
            .bind(&item.name)
            .bind(&item.category)
            .bind(&item.description)
            .bind(item.quantity)
            .bind(&item.serial_number)
            .bind(item.status)
            .bind(&item.location)
            .bind(&item.notes)
            .fetch_optional(conn)
            .await?
            .ok_or_else(|| not_found(LABEL))
    }

    async fn delete(
        &self,
        conn: &mut PgConnection,
        id: GeneralInventoryId,
    ) -> Result<(), AppError> {
        let query = format!("DELETE FROM {} WHERE id = $1", TABLE_NAME);
        let result = sqlx::query(&query).bind(id).execute(conn).await?;
        if result.rows_affected() == 0 {
            return Err(not_found(LABEL));
        }
        Ok(())
    }
}

#[async_trait]
impl ItemRepository<GeneralInventoryItem> for GeneralInventoryRepository {
    fn item_ref(id: GeneralInventoryId) -> ItemRef {
        ItemRef::GeneralInventory(id)
    }

    async fn find_by_status(
        &self,
        db: &PgPool,
        status: ItemStatus,
    ) -> Result<Vec<GeneralInventoryItem>, AppError> {
        let query = format!(
            "{} WHERE status = $1 ORDER BY last_updated DESC, id DESC",
            Self::base_select_query()
        );
        let rows = sqlx::query_as::<_, GeneralInventoryItem>(&query)
            .bind(status)
            .fetch_all(db)
            .await?;
        Ok(rows)
    }
}
