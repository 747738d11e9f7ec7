use sqlx::PgPool;

use crate::{
    models::activity_log::{ActivityLog, ActivityLogEntry},
    repositories::activity_log::{self, ActivityLogFilters},
};

/// Append-only activity trail.
///
/// Recording is best effort: the triggering operation has already committed
/// by the time an entry is written, so a failed write is only logged.
#[async_trait::async_trait]
pub trait ActivityLogServiceTrait: Send + Sync {
    async fn record_event(&self, entry: ActivityLogEntry) -> anyhow::Result<()>;

    async fn list(
        &self,
        filters: &ActivityLogFilters,
        limit: i64,
    ) -> anyhow::Result<Vec<ActivityLog>>;

    /// Records every entry, warning about and skipping the ones that fail.
    async fn record(&self, entries: Vec<ActivityLogEntry>) {
        for entry in entries {
            let action = entry.action;
            let item_type = entry.item_type.clone();
            let item_id = entry.item_id;
            if let Err(err) = self.record_event(entry).await {
                tracing::warn!(
                    error = ?err,
                    action = %action,
                    item_type = %item_type,
                    item_id = ?item_id,
                    "Failed to record activity log"
                );
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct ActivityLogService {
    pool: PgPool,
}

impl ActivityLogService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ActivityLogServiceTrait for ActivityLogService {
    async fn record_event(&self, entry: ActivityLogEntry) -> anyhow::Result<()> {
        activity_log::insert_activity_log(&self.pool, &entry).await?;
        Ok(())
    }

    async fn list(
        &self,
        filters: &ActivityLogFilters,
        limit: i64,
    ) -> anyhow::Result<Vec<ActivityLog>> {
        Ok(activity_log::list_activity_logs(&self.pool, filters, limit).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::activity_log::ActivityAction;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    };

    #[derive(Default)]
    struct Flaky {
        attempts: AtomicUsize,
        stored: Mutex<Vec<ActivityLogEntry>>,
    }

    #[async_trait::async_trait]
    impl ActivityLogServiceTrait for Flaky {
        async fn record_event(&self, entry: ActivityLogEntry) -> anyhow::Result<()> {
            if self.attempts.fetch_add(1, Ordering::SeqCst) == 0 {
                anyhow::bail!("database unavailable");
            }
            self.stored.lock().expect("lock").push(entry);
            Ok(())
        }

        async fn list(
            &self,
            _filters: &ActivityLogFilters,
            _limit: i64,
        ) -> anyhow::Result<Vec<ActivityLog>> {
            Ok(Vec::new())
        }
    }

    fn entry(action: ActivityAction) -> ActivityLogEntry {
        ActivityLogEntry {
            user_id: "u-1".into(),
            action,
            item_type: "assignment".into(),
            item_id: Some(1),
            details: None,
        }
    }

    #[tokio::test]
    async fn record_skips_failed_entries_and_keeps_going() {
        let flaky = Flaky::default();
        flaky
            .record(vec![entry(ActivityAction::Assign), entry(ActivityAction::Update)])
            .await;
        assert_eq!(flaky.attempts.load(Ordering::SeqCst), 2);
        let stored = flaky.stored.lock().expect("lock");
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].action, ActivityAction::Update);
    }
}
