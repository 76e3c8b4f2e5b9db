mod browser;
mod config;
mod crawler;
mod db;
mod extract;
mod scheduler;

use tracing::{error, info};

use crate::config::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let settings = Settings::load()?;
    let schedule_at = settings.schedule_time()?;

    {
        let conn = db::connect(&settings.db_path)?;
        db::init_schema(&conn)?;
    }

    // Eager first cycle, then one per day at the configured time.
    run_cycle_logged(settings.clone()).await;

    let mut sched = scheduler::Scheduler::new().await?;
    let task_settings = settings.clone();
    let job_id = sched
        .register_daily(schedule_at, move || run_cycle_logged(task_settings.clone()))
        .await?;
    sched.start().await?;
    info!(%schedule_at, "scheduler armed");

    tokio::signal::ctrl_c().await?;
    info!("shutting down");
    sched.cancel(job_id).await?;
    sched.shutdown().await?;
    Ok(())
}

/// Run one cycle on the blocking pool. Failures are logged, never fatal
/// to the process; the next scheduled trigger still fires.
async fn run_cycle_logged(settings: Settings) {
    let result = tokio::task::spawn_blocking(move || crawler::run_cycle(&settings)).await;
    match result {
        Ok(Ok(stats)) => info!(
            pages = stats.pages,
            candidates = stats.candidates,
            inserted = stats.inserted,
            total_stored = stats.total_stored,
            "cycle complete"
        ),
        Ok(Err(e)) => error!("crawl cycle failed: {e:#}"),
        Err(e) => error!("crawl task panicked: {e}"),
    }
}
