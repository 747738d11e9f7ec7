//! Registries without lifecycle coupling: VLANs and credentials.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use sqlx::PgPool;
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        activity_log::{entity, ActivityAction, ActivityLogEntry},
        actor::Actor,
        credential::{CreateCredential, Credential, UpdateCredential},
        vlan::{CreateVlan, UpdateVlan, Vlan},
    },
    repositories::{begin_transaction, commit_transaction, Repository},
    services::activity_log::ActivityLogServiceTrait,
    state::AppState,
};

/// A standalone record that is logged under its own entity label.
pub trait StandaloneRecord: Serialize + Send + Sync + Unpin + 'static {
    const ENTITY: &'static str;
    type Create: DeserializeOwned + Validate + Send + Sync;
    type Update: DeserializeOwned + Validate + Send;

    fn normalize(payload: Self::Create) -> Self::Create;
    fn raw_id(&self) -> i64;
    fn describe(&self) -> String;
    fn apply_patch(&mut self, patch: Self::Update);
}

impl StandaloneRecord for Vlan {
    const ENTITY: &'static str = entity::VLAN;
    type Create = CreateVlan;
    type Update = UpdateVlan;

    fn normalize(payload: CreateVlan) -> CreateVlan {
        payload.normalized()
    }

    fn raw_id(&self) -> i64 {
        self.id.get()
    }

    fn describe(&self) -> String {
        format!("VLAN {} '{}'", self.vlan_number, self.name)
    }

    fn apply_patch(&mut self, patch: UpdateVlan) {
        self.apply(patch);
    }
}

impl StandaloneRecord for Credential {
    const ENTITY: &'static str = entity::CREDENTIAL;
    type Create = CreateCredential;
    type Update = UpdateCredential;

    fn normalize(payload: CreateCredential) -> CreateCredential {
        payload.normalized()
    }

    fn raw_id(&self) -> i64 {
        self.id.get()
    }

    // never includes the secret
    fn describe(&self) -> String {
        format!("credential '{}' ({})", self.name, self.credential_type)
    }

    fn apply_patch(&mut self, patch: UpdateCredential) {
        self.apply(patch);
    }
}

pub struct RecordService<T, R> {
    repo: R,
    write_pool: PgPool,
    read_pool: PgPool,
    activity_log: Arc<dyn ActivityLogServiceTrait>,
    _record: PhantomData<fn() -> T>,
}

impl<T, R> RecordService<T, R>
where
    T: StandaloneRecord,
    R: Repository<T, New = T::Create>,
{
    pub fn new(state: &AppState, repo: R) -> Self {
        Self {
            repo,
            write_pool: state.write_pool.clone(),
            read_pool: state.read_pool().clone(),
            activity_log: state.activity_log.clone(),
            _record: PhantomData,
        }
    }

    pub async fn list(&self) -> Result<Vec<T>, AppError> {
        self.repo.find_all(&self.read_pool).await
    }

    pub async fn get(&self, id: R::Id) -> Result<T, AppError> {
        self.repo.find_by_id(&self.read_pool, id).await
    }

    pub async fn create(&self, actor: &Actor, payload: T::Create) -> Result<T, AppError> {
        let mut tx = begin_transaction(&self.write_pool).await?;
        let created = self.repo.create(&mut tx, &payload).await?;
        commit_transaction(tx).await?;

        self.log(actor, ActivityAction::Add, &created, "Created").await;
        Ok(created)
    }

    pub async fn update(&self, actor: &Actor, id: R::Id, patch: T::Update) -> Result<T, AppError> {
        let mut tx = begin_transaction(&self.write_pool).await?;
        let mut current = self.repo.lock_by_id(&mut tx, id).await?;
        current.apply_patch(patch);
        let updated = self.repo.update(&mut tx, &current).await?;
        commit_transaction(tx).await?;

        self.log(actor, ActivityAction::Update, &updated, "Updated")
            .await;
        Ok(updated)
    }

    pub async fn delete(&self, actor: &Actor, id: R::Id) -> Result<(), AppError> {
        let mut tx = begin_transaction(&self.write_pool).await?;
        let current = self.repo.lock_by_id(&mut tx, id).await?;
        self.repo.delete(&mut tx, id).await?;
        commit_transaction(tx).await?;

        self.log(actor, ActivityAction::Delete, &current, "Deleted")
            .await;
        Ok(())
    }

    async fn log(&self, actor: &Actor, action: ActivityAction, record: &T, verb: &str) {
        self.activity_log
            .record(vec![ActivityLogEntry::new(
                actor,
                action,
                T::ENTITY,
                Some(record.raw_id()),
                format!("{} {}", verb, record.describe()),
            )])
            .await;
    }
}
