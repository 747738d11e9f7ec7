//! Hardware repository.

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::hardware::{CreateHardware, Hardware};
use crate::models::item::{ItemRef, ItemStatus};
use crate::repositories::repository::{not_found, ItemRepository, Repository};
use crate::types::HardwareId;
use sqlx::{PgConnection, PgPool};

const TABLE_NAME: &str = "hardware";
const SELECT_COLUMNS: &str = "id, name, hardware_type, manufacturer, model, serial_number, \
     purchase_date, warranty_expiry, status, location, notes, last_updated";

#[derive(Debug, Default, Clone, Copy)]
pub struct HardwareRepository;

impl HardwareRepository {
    pub fn new() -> Self {
        Self
    }

    fn base_select_query() -> String {
        format!("SELECT {} FROM {}", SELECT_COLUMNS, TABLE_NAME)
    }
}

#[async_trait]
impl Repository<Hardware> for HardwareRepository {
    const TABLE: &'static str = TABLE_NAME;
    type Id = HardwareId;
    type New = CreateHardware;

    async fn find_all(&self, db: &PgPool) -> Result<Vec<Hardware>, AppError> {
        let query = format!(
            "{} ORDER BY last_updated DESC, id DESC",
            Self::base_select_query()
        );
        let rows = sqlx::query_as::<_, Hardware>(&query).fetch_all(db).await?;
        Ok(rows)
    }

    async fn find_by_id(&self, db: &PgPool, id: HardwareId) -> Result<Hardware, AppError> {
        let query = format!("{} WHERE id = $1", Self::base_select_query());
        sqlx::query_as::<_, Hardware>(&query)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| not_found("Hardware"))
    }

    async fn lock_by_id(
        &self,
        conn: &mut PgConnection,
        id: HardwareId,
    ) -> Result<Hardware, AppError> {
        let query = format!("{} WHERE id = $1 FOR UPDATE", Self::base_select_query());
        sqlx::query_as::<_, Hardware>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await?
            .ok_or_else(|| not_found("Hardware"))
    }

    async fn create(
        &self,
        conn: &mut PgConnection,
        item: &CreateHardware,
    ) -> Result<Hardware, AppError> {
        let query = format!(
            "INSERT INTO {} (name, hardware_type, manufacturer, model, serial_number, \
             purchase_date, warranty_expiry, status, location, notes, last_updated) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, NOW()) \
             RETURNING {}",
            TABLE_NAME, SELECT_COLUMNS
        );
        let row = sqlx::query_as::<_, Hardware>(&query)
            .bind(&item.name)
            .bind(item.hardware_type)
            .bind(&item.manufacturer)
            .bind(&item.model)
            .bind(&item.serial_number)
            .bind(item.purchase_date)
            .bind(item.warranty_expiry)
            .bind(item.status.unwrap_or(ItemStatus::InStock))
            .bind(&item.location)
            .bind(&item.notes)
            .fetch_one(conn)
            .await?;
        Ok(row)
    }

    async fn update(&self, conn: &mut PgConnection, item: &Hardware) -> Result<Hardware, AppError> {
        let query = format!(
            "UPDATE {} SET name = $2, hardware_type = $3, manufacturer = $4, model = $5, \
             serial_number = $6, purchase_date = $7, warranty_expiry = $8, status = $9, \
             location = $10, notes = $11, last_updated = NOW() \
             WHERE id = $1 RETURNING {}",
            TABLE_NAME, SELECT_COLUMNS
        );
        sqlx::query_as::<_, Hardware>(&query)
            .bind(item.id)
            .bind(&item.name)
            .bind(item.hardware_type)
            .bind(&item.manufacturer)
            .bind(&item.model)
            .bind(&item.serial_number)
            .bind(item.purchase_date)
            .bind(item.warranty_expiry)
            .bind(item.status)
            .bind(&item.location)
            .bind(&item.notes)
            .fetch_optional(conn)
            .await?
            .ok_or_else(|| not_found("Hardware"))
    }

    async fn delete(&self, conn: &mut PgConnection, id: HardwareId) -> Result<(), AppError> {
        let query = format!("DELETE FROM {} WHERE id = $1", TABLE_NAME);
        let result = sqlx::query(&query).bind(id).execute(conn).await?;
        if result.rows_affected() == 0 {
            return Err(not_found("Hardware"));
        }
        Ok(())
    }
}

#[async_trait]
impl ItemRepository<Hardware> for HardwareRepository {
    fn item_ref(id: HardwareId) -> ItemRef {
        ItemRef::Hardware(id)
    }

    async fn find_by_status(
        &self,
        db: &PgPool,
        status: ItemStatus,
    ) -> Result<Vec<Hardware>, AppError> {
        let query = format!(
            "{} WHERE status = $1 ORDER BY last_updated DESC, id DESC",
            Self::base_select_query()
        );
        let rows = sqlx::query_as::<_, Hardware>(&query)
            .bind(status)
            .fetch_all(db)
            .await?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hardware_select_columns_include_lifecycle_fields() {
        assert!(SELECT_COLUMNS.contains("status"));
        assert!(SELECT_COLUMNS.contains("serial_number"));
        assert!(SELECT_COLUMNS.contains("last_updated"));
    }
}
