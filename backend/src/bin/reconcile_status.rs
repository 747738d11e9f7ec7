//! Reports items whose status disagrees with the assignment ledger and,
//! with `--apply`, rewrites them in one transaction.

use inventory_backend::{
    config::Config,
    db::connection::create_pool,
    models::actor::Actor,
    services::{activity_log::ActivityLogService, reconciliation},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy)]
struct ReconcileOptions {
    apply: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inventory_backend=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let options = parse_options(std::env::args().skip(1));
    let config = Config::load()?;
    let pool = create_pool(&config.database_url, 2).await?;

    let report = if options.apply {
        let activity_log = ActivityLogService::new(pool.clone());
        reconciliation::repair(&pool, &activity_log, &Actor::system()).await
    } else {
        reconciliation::check(&pool).await
    }
    .map_err(|err| anyhow::anyhow!("reconciliation failed: {}", err))?;

    for drift in &report.drifted {
        println!(
            "{} '{}': recorded {}, expected {}",
            drift.item(),
            drift.name,
            drift.recorded_status,
            drift.expected_status()
        );
    }

    if options.apply {
        println!("repaired {} item(s)", report.drifted.len());
    } else {
        println!(
            "[dry-run] {} item(s) drifted; rerun with --apply to repair",
            report.drifted.len()
        );
    }

    Ok(())
}

fn parse_options<I>(args: I) -> ReconcileOptions
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let apply = args.into_iter().any(|arg| arg.as_ref() == "--apply");
    ReconcileOptions { apply }
}
