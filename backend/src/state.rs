use crate::{
    config::Config,
    db::connection::DbPool,
    services::activity_log::{ActivityLogService, ActivityLogServiceTrait},
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub write_pool: DbPool,
    pub read_pool: Option<DbPool>,
    pub config: Config,
    pub activity_log: Arc<dyn ActivityLogServiceTrait>,
}

impl AppState {
    pub fn new(write_pool: DbPool, read_pool: Option<DbPool>, config: Config) -> Self {
        let activity_log: Arc<dyn ActivityLogServiceTrait> =
            Arc::new(ActivityLogService::new(write_pool.clone()));
        Self {
            write_pool,
            read_pool,
            config,
            activity_log,
        }
    }

    /// Swaps the activity recorder, used to observe or break logging in tests.
    pub fn with_activity_log(mut self, activity_log: Arc<dyn ActivityLogServiceTrait>) -> Self {
        self.activity_log = activity_log;
        self
    }

    /// Returns the read pool if configured, otherwise falls back to the write pool.
    /// Use this for SELECT queries that don't require read-after-write consistency.
    pub fn read_pool(&self) -> &DbPool {
        self.read_pool.as_ref().unwrap_or(&self.write_pool)
    }
}
