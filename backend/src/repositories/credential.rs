//! Credential repository.

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::credential::{CreateCredential, Credential};
use crate::repositories::repository::{not_found, Repository};
use crate::types::CredentialId;
use sqlx::{PgConnection, PgPool};

const TABLE_NAME: &str = "credentials";
const SELECT_COLUMNS: &str =
    "id, name, credential_type, username, password, url, notes, last_updated";

#[derive(Debug, Default, Clone, Copy)]
pub struct CredentialRepository;

impl CredentialRepository {
    pub fn new() -> Self {
        Self
    }

    fn base_select_query() -> String {
        format!("SELECT {} FROM {}", SELECT_COLUMNS, TABLE_NAME)
    }
}

#[async_trait]
impl Repository<Credential> for CredentialRepository {
    const TABLE: &'static str = TABLE_NAME;
    type Id = CredentialId;
    type New = CreateCredential;

    async fn find_all(&self, db: &PgPool) -> Result<Vec<Credential>, AppError> {
        let query = format!("{} ORDER BY name ASC, id ASC", Self::base_select_query());
        let rows = sqlx::query_as::<_, Credential>(&query).fetch_all(db).await?;
        Ok(rows)
    }

    async fn find_by_id(&self, db: &PgPool, id: CredentialId) -> Result<Credential, AppError> {
        let query = format!("{} WHERE id = $1", Self::base_select_query());
        sqlx::query_as::<_, Credential>(&query)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| not_found("Credential"))
    }

    async fn lock_by_id(
        &self,
        conn: &mut PgConnection,
        id: CredentialId,
    ) -> Result<Credential, AppError> {
        let query = format!("{} WHERE id = $1 FOR UPDATE", Self::base_select_query());
        sqlx::query_as::<_, Credential>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await?
            .ok_or_else(|| not_found("Credential"))
    }

    async fn create(
        &self,
        conn: &mut PgConnection,
        item: &CreateCredential,
    ) -> Result<Credential, AppError> {
        let query = format!(
            "INSERT INTO {} (name, credential_type, username, password, url, notes, last_updated) \
             VALUES ($1, $2, $3, $4, $5, $6, NOW()) \
             RETURNING {}",
            TABLE_NAME, SELECT_COLUMNS
        );
        let row = sqlx::query_as::<_, Credential>(&query)
            .bind(&item.name)
            .bind(item.credential_type)
            .bind(&item.username)
            .bind(&item.password)
            .bind(&item.url)
            .bind(&item.notes)
            .fetch_one(conn)
            .await?;
        Ok(row)
    }

    async fn update(
        &self,
        conn: &mut PgConnection,
        item: &Credential,
    ) -> Result<Credential, AppError> {
        let query = format!(
            "UPDATE {} SET name = $2, credential_type = $3, username = $4, password = $5, \
             url = $6, notes = $7, last_updated = NOW() \
             WHERE id = $1 RETURNING {}",
            TABLE_NAME, SELECT_COLUMNS
        );
        sqlx::query_as::<_, Credential>(&query)
            .bind(item.id)
            .bind(&item.name)
            .bind(item.credential_type)
            .bind(&item.username)
            .bind(&item.password)
            .bind(&item.url)
            .bind(&item.notes)
            .fetch_optional(conn)
            .await?
            .ok_or_else(|| not_found("Credential"))
    }

    async fn delete(&self, conn: &mut PgConnection, id: CredentialId) -> Result<(), AppError> {
        let query = format!("DELETE FROM {} WHERE id = $1", TABLE_NAME);
        let result = sqlx::query(&query).bind(id).execute(conn).await?;
        if result.rows_affected() == 0 {
            return Err(not_found("Credential"));
        }
        Ok(())
    }
}
