use sqlx::PgPool;

use crate::{
    error::AppError,
    models::{
        credential::Credential,
        dashboard::{DashboardStats, InventoryCounts},
        vlan::Vlan,
    },
    repositories::{
        activity_log::ActivityLogFilters, item_status, AssignmentRepository,
        CredentialRepository, Repository, VlanRepository,
    },
    services::activity_log::ActivityLogServiceTrait,
};

const RECENT_ACTIVITY_LIMIT: i64 = 10;

pub async fn stats(
    pool: &PgPool,
    activity_log: &dyn ActivityLogServiceTrait,
) -> Result<DashboardStats, AppError> {
    let items = InventoryCounts::from_rows(item_status::status_counts(pool).await?);
    let vlans =
        item_status::count_rows(pool, <VlanRepository as Repository<Vlan>>::TABLE).await?;
    let credentials = item_status::count_rows(
        pool,
        <CredentialRepository as Repository<Credential>>::TABLE,
    )
    .await?;
    let open_assignments = AssignmentRepository::new().count_open(pool).await?;
    let recent_activity = activity_log
        .list(&ActivityLogFilters::default(), RECENT_ACTIVITY_LIMIT)
        .await?;

    Ok(DashboardStats {
        items,
        vlans,
        credentials,
        open_assignments,
        recent_activity,
    })
}
