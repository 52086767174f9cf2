use std::time::Duration;

use tokio::task::JoinHandle;

/// spawn_heartbeat
///
/// Starts the periodic tick the deployment expects from the scheduler. No job
/// logic is attached yet; the tick only emits a trace event so operators can
/// verify the schedule is alive. Actual periodic jobs register here when they
/// exist.
pub fn spawn_heartbeat(period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        // The first tick of a tokio interval fires immediately; skip it so the
        // log marks the end of the first full period.
        interval.tick().await;
        loop {
            interval.tick().await;
            tracing::debug!(period_secs = period.as_secs(), "scheduler heartbeat");
        }
    })
}
