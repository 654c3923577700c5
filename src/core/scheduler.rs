//! Cron-based scheduler for repeating runs

use async_trait::async_trait;
use cron::Schedule;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("scheduler disabled: interval_seconds is 0")]
    Disabled,

    #[error("unsupported interval {interval_seconds}s: must be below one day")]
    UnsupportedInterval { interval_seconds: u64 },

    #[error("invalid cron expression '{expr}': {reason}")]
    InvalidCron { expr: String, reason: String },
}

/// Work performed on every tick.
#[async_trait]
pub trait ScheduledJob: Send + Sync + 'static {
    async fn run_once(&self);
}

/// Longest interval a single cron step field can express.
pub const MAX_INTERVAL_SECONDS: u64 = 86_399;

/// Convert an interval to a cron expression (second minute hour day month weekday).
///
/// The interval is floored to whole hours or minutes above those units; see
/// [`is_exact_interval`].
pub fn interval_to_cron(interval_seconds: u64) -> String {
    if interval_seconds >= 3600 {
        format!("0 0 */{} * * *", interval_seconds / 3600)
    } else if interval_seconds >= 60 {
        format!("0 */{} * * * *", interval_seconds / 60)
    } else {
        format!("*/{} * * * * *", interval_seconds)
    }
}

/// True when [`interval_to_cron`] fires exactly every `interval_seconds`.
///
/// Cron steps restart at the top of their field, so the step must be a whole
/// number of units that divides the field range (60 seconds, 60 minutes, 24 hours).
pub fn is_exact_interval(interval_seconds: u64) -> bool {
    let (unit, range) = if interval_seconds >= 3600 {
        (3600, 24)
    } else if interval_seconds >= 60 {
        (60, 60)
    } else {
        (1, 60)
    };
    interval_seconds > 0 && interval_seconds % unit == 0 && range % (interval_seconds / unit) == 0
}

pub struct RunScheduler {
    schedule: Schedule,
    cron_expr: String,
    handle: Arc<RwLock<Option<tokio::task::JoinHandle<()>>>>,
}

impl RunScheduler {
    pub fn new(interval_seconds: u64) -> Result<Self, SchedulerError> {
        if interval_seconds == 0 {
            return Err(SchedulerError::Disabled);
        }

        if interval_seconds > MAX_INTERVAL_SECONDS {
            return Err(SchedulerError::UnsupportedInterval { interval_seconds });
        }

        let cron_expr = interval_to_cron(interval_seconds);
        if !is_exact_interval(interval_seconds) {
            warn!(
                interval = interval_seconds,
                cron = %cron_expr,
                "Interval does not map onto an even cron step; runs will not be exactly {}s apart",
                interval_seconds
            );
        }
        let schedule = Schedule::from_str(&cron_expr).map_err(|e| SchedulerError::InvalidCron {
            expr: cron_expr.clone(),
            reason: e.to_string(),
        })?;

        info!(
            interval = interval_seconds,
            cron = %cron_expr,
            "RunScheduler: created with interval {}s (cron: {})",
            interval_seconds,
            cron_expr
        );

        Ok(Self {
            schedule,
            cron_expr,
            handle: Arc::new(RwLock::new(None)),
        })
    }

    pub fn cron_expr(&self) -> &str {
        &self.cron_expr
    }

    /// Spawn the tick loop; `job` runs once per tick, never overlapping itself.
    pub async fn start(&self, job: Arc<dyn ScheduledJob>) {
        let schedule = self.schedule.clone();

        let handle = tokio::spawn(async move {
            info!("RunScheduler: started, waiting for cron schedule...");
            loop {
                let Some(next_tick) = schedule.upcoming(chrono::Utc).next() else {
                    tokio::time::sleep(tokio::time::Duration::from_secs(60)).await;
                    continue;
                };

                let now = chrono::Utc::now();
                if next_tick > now {
                    let duration = (next_tick - now).to_std().unwrap_or_default();
                    debug!(next_tick = %next_tick, "RunScheduler: sleeping until next tick");
                    tokio::time::sleep(duration).await;
                }

                info!("RunScheduler: cron tick, starting run");
                job.run_once().await;
            }
        });

        *self.handle.write().await = Some(handle);
    }

    pub async fn stop(&self) {
        if let Some(handle) = self.handle.write().await.take() {
            handle.abort();
            info!("RunScheduler: stopped");
        }
    }

    pub async fn is_running(&self) -> bool {
        self.handle.read().await.is_some()
    }
}
