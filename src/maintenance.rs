// Background maintenance: prune readings past retention, then VACUUM on a
// configurable schedule (cron expression or fixed interval).

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::telemetry_repo::TelemetryRepo;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone)]
pub struct MaintenanceWorkerConfig {
    pub prune_interval_secs: u64,
    pub retention_days: u32,
    /// Optional cron expression for VACUUM (e.g. "0 0 3 * * *" = 03:00 daily). Uses local time.
    pub vacuum_schedule: Option<String>,
    /// Run VACUUM every N seconds when vacuum_schedule is not set.
    pub vacuum_interval_secs: u64,
}

/// Spawns the maintenance worker; it exits when `shutdown_rx` fires.
pub fn spawn(
    repo: Arc<TelemetryRepo>,
    config: MaintenanceWorkerConfig,
    shutdown_rx: tokio::sync::oneshot::Receiver<()>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        run(repo, config, shutdown_rx).await;
    })
}

#[instrument(skip(repo, shutdown_rx), fields(interval_secs = config.prune_interval_secs))]
async fn run(
    repo: Arc<TelemetryRepo>,
    config: MaintenanceWorkerConfig,
    mut shutdown_rx: tokio::sync::oneshot::Receiver<()>,
) {
    let mut prune_interval = tokio::time::interval(Duration::from_secs(config.prune_interval_secs));
    prune_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let (vacuum_tx, mut vacuum_rx) = tokio::sync::mpsc::channel::<()>(1);
    let scheduler = tokio::spawn(vacuum_scheduler(config.clone(), vacuum_tx));

    loop {
        tokio::select! {
            _ = prune_interval.tick() => {
                if let Err(e) = run_one_tick(&repo, &config).await {
                    warn!(error = %e, "prune tick failed");
                }
            }
            Some(()) = vacuum_rx.recv() => {
                if let Err(e) = repo.vacuum().await {
                    warn!(error = %e, "vacuum failed");
                } else {
                    info!("vacuum complete");
                }
            }
            _ = &mut shutdown_rx => {
                info!("maintenance worker shutting down");
                break;
            }
        }
    }
    scheduler.abort();
}

/// Delay until the next VACUUM: next cron fire time (local), else the fixed interval.
fn next_vacuum_delay(
    schedule: Option<&cron::Schedule>,
    interval: Duration,
    now: chrono::DateTime<chrono::Local>,
) -> Duration {
    match schedule.and_then(|s| s.after(&now).next()) {
        Some(next) => (next - now).to_std().unwrap_or(Duration::from_secs(1)),
        None => interval,
    }
}

async fn vacuum_scheduler(config: MaintenanceWorkerConfig, tx: tokio::sync::mpsc::Sender<()>) {
    // Validated at config load; a bad expression here only comes from hand-built configs.
    let schedule = match config.vacuum_schedule.as_deref().map(cron::Schedule::from_str) {
        Some(Ok(s)) => Some(s),
        Some(Err(e)) => {
            warn!(error = %e, "invalid vacuum_schedule; falling back to vacuum_interval_secs");
            None
        }
        None => None,
    };
    let interval = Duration::from_secs(config.vacuum_interval_secs);
    loop {
        let delay = next_vacuum_delay(schedule.as_ref(), interval, chrono::Local::now());
        tokio::time::sleep(delay).await;
        if tx.send(()).await.is_err() {
            break;
        }
    }
}

/// Deletes readings older than the retention window. Devices are kept.
pub async fn run_one_tick(
    repo: &TelemetryRepo,
    config: &MaintenanceWorkerConfig,
) -> anyhow::Result<u64> {
    let cutoff = chrono::Utc::now() - chrono::Duration::days(config.retention_days as i64);
    let pruned = repo.prune_readings_before(cutoff).await?;
    if pruned > 0 {
        info!(pruned_readings = pruned, "pruned readings past retention");
    }
    Ok(pruned)
}
