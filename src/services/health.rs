use std::time::{Duration, Instant};

use sea_orm::DatabaseConnection;
use tokio::sync::RwLock;

use crate::error::{AppError, Result};

#[derive(Debug, Clone, Copy)]
struct Verdict {
    healthy: bool,
    checked_at: Instant,
}

/// Tracks whether the database is reachable.
///
/// A healthy verdict is trusted for `recheck_after`; once it is older, or after
/// any failed probe, the next caller probes again. Nothing is permanent: a
/// failed probe degrades only the requests made before the next successful one.
pub struct HealthMonitor {
    db: DatabaseConnection,
    recheck_after: Duration,
    verdict: RwLock<Option<Verdict>>,
}

impl HealthMonitor {
    pub fn new(db: DatabaseConnection, recheck_after: Duration) -> Self {
        Self {
            db,
            recheck_after,
            verdict: RwLock::new(None),
        }
    }

    /// Last recorded verdict, without touching the database.
    pub async fn is_healthy(&self) -> bool {
        self.verdict.read().await.map(|v| v.healthy).unwrap_or(false)
    }

    /// Pings the database and records the outcome.
    pub async fn probe(&self) -> Result<()> {
        let outcome = self.db.ping().await;
        let healthy = outcome.is_ok();
        *self.verdict.write().await = Some(Verdict {
            healthy,
            checked_at: Instant::now(),
        });

        match outcome {
            Ok(()) => {
                tracing::debug!("Database probe succeeded");
                Ok(())
            }
            Err(e) => {
                tracing::error!("Database probe failed: {}", e);
                Err(AppError::Unavailable(e.to_string()))
            }
        }
    }

    /// Probes only when the cached verdict is missing, failed, or stale.
    pub async fn ensure_healthy(&self) -> Result<()> {
        let fresh = self
            .verdict
            .read()
            .await
            .is_some_and(|v| v.healthy && v.checked_at.elapsed() < self.recheck_after);
        if fresh {
            return Ok(());
        }
        self.probe().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::setup_test_db;

    #[tokio::test]
    async fn unprobed_monitor_reports_unhealthy() {
        let monitor = HealthMonitor::new(setup_test_db().await, Duration::from_secs(30));
        assert!(!monitor.is_healthy().await);
    }

    #[tokio::test]
    async fn successful_probe_is_cached() {
        let monitor = HealthMonitor::new(setup_test_db().await, Duration::from_secs(30));
        monitor.ensure_healthy().await.unwrap();
        assert!(monitor.is_healthy().await);
        monitor.ensure_healthy().await.unwrap();
    }

    #[tokio::test]
    async fn closed_connection_degrades_then_reports() {
        let db = setup_test_db().await;
        let monitor = HealthMonitor::new(db.clone(), Duration::from_secs(0));
        monitor.probe().await.unwrap();

        db.close().await.unwrap();
        assert!(monitor.ensure_healthy().await.is_err());
        assert!(!monitor.is_healthy().await);
    }
}
