//! VLAN repository.

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::vlan::{CreateVlan, Vlan};
use crate::repositories::repository::{not_found, Repository};
use crate::types::VlanId;
use sqlx::{PgConnection, PgPool};

const TABLE_NAME: &str = "vlans";
const SELECT_COLUMNS: &str =
    "id, vlan_number, name, description, subnet, gateway, assigned_devices, notes, last_updated";

#[derive(Debug, Default, Clone, Copy)]
pub struct VlanRepository;

impl VlanRepository {
    pub fn new() -> Self {
        Self
    }

    fn base_select_query() -> String {
        format!("SELECT {} FROM {}", SELECT_COLUMNS, TABLE_NAME)
    }
}

#[async_trait]
impl Repository<Vlan> for VlanRepository {
    const TABLE: &'static str = TABLE_NAME;
    type Id = VlanId;
    type New = CreateVlan;

    async fn find_all(&self, db: &PgPool) -> Result<Vec<Vlan>, AppError> {
        let query = format!("{} ORDER BY vlan_number ASC", Self::base_select_query());
        let rows = sqlx::query_as::<_, Vlan>(&query).fetch_all(db).await?;
        Ok(rows)
    }

    async fn find_by_id(&self, db: &PgPool, id: VlanId) -> Result<Vlan, AppError> {
        let query = format!("{} WHERE id = $1", Self::base_select_query());
        sqlx::query_as::<_, Vlan>(&query)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| not_found("VLAN"))
    }

    async fn lock_by_id(&self, conn: &mut PgConnection, id: VlanId) -> Result<Vlan, AppError> {
        let query = format!("{} WHERE id = $1 FOR UPDATE", Self::base_select_query());
        sqlx::query_as::<_, Vlan>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await?
            .ok_or_else(|| not_found("VLAN"))
    }

    async fn create(&self, conn: &mut PgConnection, item: &CreateVlan) -> Result<Vlan, AppError> {
        let query = format!(
            "INSERT INTO {} (vlan_number, name, description, subnet, gateway, assigned_devices, \
             notes, last_updated) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, NOW()) \
             RETURNING {}",
            TABLE_NAME, SELECT_COLUMNS
        );
        let row = sqlx::query_as::<_, Vlan>(&query)
            .bind(item.vlan_number)
            .bind(&item.name)
            .bind(&item.description)
            .bind(&item.subnet)
            .bind(&item.gateway)
            .bind(&item.assigned_devices)
            .bind(&item.notes)
            .fetch_one(conn)
            .await?;
        Ok(row)
    }

    async fn update(&self, conn: &mut PgConnection, item: &Vlan) -> Result<Vlan, AppError> {
        let query = format!(
            "UPDATE {} SET vlan_number = $2, name = $3, description = $4, subnet = $5, \
             gateway = $6, assigned_devices = $7, notes = $8, last_updated = NOW() \
             WHERE id = $1 RETURNING {}",
            TABLE_NAME, SELECT_COLUMNS
        );
        sqlx::query_as::<_, Vlan>(&query)
            .bind(item.id)
            .bind(item.vlan_number)
            .bind(&item.name)
            .bind(&item.description)
            .bind(&item.subnet)
            .bind(&item.gateway)
            .bind(&item.assigned_devices)
            .bind(&item.notes)
            .fetch_optional(conn)
            .await?
            .ok_or_else(|| not_found("VLAN"))
    }

    async fn delete(&self, conn: &mut PgConnection, id: VlanId) -> Result<(), AppError> {
        let query = format!("DELETE FROM {} WHERE id = $1", TABLE_NAME);
        let result = sqlx::query(&query).bind(id).execute(conn).await?;
        if result.rows_affected() == 0 {
            return Err(not_found("VLAN"));
        }
        Ok(())
    }
}
