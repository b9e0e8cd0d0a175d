//! Background task that sweeps stale PENDING orders.
//!
//! PENDING orders never consume capacity, but their rows (and unpaid
//! payment records) would pile up forever without this sweep. Runs in a
//! tokio::spawn loop on a fixed interval, deleting PENDING orders older
//! than the configured TTL; the first tick fires immediately so a restart
//! cleans up right away.

use std::sync::Arc;

use chrono::{Duration as ChronoDuration, Utc};
use metrics::counter;
use tokio::time::Duration;
use tracing::{info, warn};

use crate::domain::RepositoryProvider;
use crate::shared::shutdown::ShutdownSignal;

/// Start the stale-order sweep background task.
pub fn start_cleanup_task(
    repos: Arc<dyn RepositoryProvider>,
    shutdown: ShutdownSignal,
    interval_secs: u64,
    pending_ttl_minutes: i64,
) {
    tokio::spawn(async move {
        info!(
            interval = interval_secs,
            ttl_minutes = pending_ttl_minutes,
            "Stale-order sweep started"
        );

        let mut interval = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if let Err(e) = sweep_once(&repos, pending_ttl_minutes).await {
                        warn!(error = %e, "Stale-order sweep error");
                    }
                }
                _ = shutdown.notified().wait() => {
                    info!("Stale-order sweep shutting down");
                    break;
                }
            }
        }

        info!("Stale-order sweep stopped");
    });
}

async fn sweep_once(
    repos: &Arc<dyn RepositoryProvider>,
    pending_ttl_minutes: i64,
) -> Result<(), Box<dyn std::error::Error>> {
    let cutoff = Utc::now() - ChronoDuration::minutes(pending_ttl_minutes);
    let removed = repos.orders().delete_pending_older_than(cutoff).await?;

    if removed.is_empty() {
        return Ok(());
    }

    counter!("stale_orders_swept_total").increment(removed.len() as u64);
    info!(
        count = removed.len(),
        order_nos = %removed.join(", "),
        "Swept abandoned PENDING orders"
    );

    Ok(())
}
