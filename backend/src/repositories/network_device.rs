//! Network device repository.

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::item::{ItemRef, ItemStatus};
use crate::models::network_device::{CreateNetworkDevice, NetworkDevice};
use crate::repositories::repository::{not_found, ItemRepository, Repository};
use crate::types::NetworkDeviceId;
use sqlx::{PgConnection, PgPool};

const TABLE_NAME: &str = "network_devices";
const SELECT_COLUMNS: &str = "id, name, device_type, manufacturer, model, serial_number, \
     ip_address, mac_address, firmware_version, status, location, notes, last_updated";
const LABEL: &str = "Network device";

#[derive(Debug, Default, Clone, Copy)]
pub struct NetworkDeviceRepository;

impl NetworkDeviceRepository {
    pub fn new() -> Self {
        Self
    }

    fn base_select_query() -> String {
        format!("SELECT {} FROM {}", SELECT_COLUMNS, TABLE_NAME)
    }
}

#[async_trait]
impl Repository<NetworkDevice> for NetworkDeviceRepository {
    const TABLE: &'static str = TABLE_NAME;
    type Id = NetworkDeviceId;
    type New = CreateNetworkDevice;

    async fn find_all(&self, db: &PgPool) -> Result<Vec<NetworkDevice>, AppError> {
        let query = format!(
            "{} ORDER BY last_updated DESC, id DESC",
            Self::base_select_query()
        );
        let rows = sqlx::query_as::<_, NetworkDevice>(&query)
            .fetch_all(db)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(
        &self,
        db: &PgPool,
        id: NetworkDeviceId,
    ) -> Result<NetworkDevice, AppError> {
        let query = format!("{} WHERE id = $1", Self::base_select_query());
        sqlx::query_as::<_, NetworkDevice>(&query)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| not_found(LABEL))
    }

    async fn lock_by_id(
        &self,
        conn: &mut PgConnection,
        id: NetworkDeviceId,
    ) -> Result<NetworkDevice, AppError> {
        let query = format!("{} WHERE id = $1 FOR UPDATE", Self::base_select_query());
        sqlx::query_as::<_, NetworkDevice>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await?
            .ok_or_else(|| not_found(LABEL))
    }

    async fn create(
        &self,
        conn: &mut PgConnection,
        item: &CreateNetworkDevice,
    ) -> Result<NetworkDevice, AppError> {
        let query = format!(
            "INSERT INTO {} (name, device_type, manufacturer, model, serial_number, \
             ip_address, mac_address, firmware_version, status, location, notes, last_updated) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, NOW()) \
             RETURNING {}",
            TABLE_NAME, SELECT_COLUMNS
        );
        let row = sqlx::query_as::<_, NetworkDevice>(&query)
            .bind(&item.name)
            .bind(&item.device_type)
            .bind(&item.manufacturer)
            .bind(&item.model)
            .bind(&item.serial_number)
            .bind(&item.ip_address)
            .bind(&item.mac_address)
            .bind(&item.firmware_version)
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
        item: &NetworkDevice,
    ) -> Result<NetworkDevice, AppError> {
        let query = format!(
            "UPDATE {} SET name = $2, device_type = $3, manufacturer = $4, model = $5, \
             serial_number = $6, ip_address = $7, mac_address = $8, firmware_version = $9, \
             status = $10, location = $11, notes = $12, last_updated = NOW() \
             WHERE id = $1 RETURNING {}",
            TABLE_NAME, SELECT_COLUMNS
        );
        sqlx::query_as::<_, NetworkDevice>(&query)
            .bind(item.id)
            .bind(&item.name)
            .bind(&item.device_type)
            .bind(&item.manufacturer)
            .bind(&item.model)
            .bind(&item.serial_number)
            .bind(&item.ip_address)
            .bind(&item.mac_address)
            .bind(&item.firmware_version)
            .bind(item.status)
            .bind(&item.location)
            .bind(&item.notes)
            .fetch_optional(conn)
            .await?
            .ok_or_else(|| not_found(LABEL))
    }

    async fn delete(&self, conn: &mut PgConnection, id: NetworkDeviceId) -> Result<(), AppError> {
        let query = format!("DELETE FROM {} WHERE id = $1", TABLE_NAME);
        let result = sqlx::query(&query).bind(id).execute(conn).await?;
        if result.rows_affected() == 0 {
            return Err(not_found(LABEL));
        }
        Ok(())
    }
}

#[async_trait]
impl ItemRepository<NetworkDevice> for NetworkDeviceRepository {
    fn item_ref(id: NetworkDeviceId) -> ItemRef {
        ItemRef::NetworkDevice(id)
    }

    async fn find_by_status(
        &self,
        db: &PgPool,
        status: ItemStatus,
    ) -> Result<Vec<NetworkDevice>, AppError> {
        let query = format!(
            "{} WHERE status = $1 ORDER BY last_updated DESC, id DESC",
            Self::base_select_query()
        );
        let rows = sqlx::query_as::<_, NetworkDevice>(&query)
            .bind(status)
            .fetch_all(db)
            .await?;
        Ok(rows)
    }
}
