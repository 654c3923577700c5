//! Alert delivery to the console and an optional notification channel

use crate::models::alert::AlertEvent;
use crate::services::notification::Notifier;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Always-available local output for alert messages.
pub trait LocalSink: Send + Sync {
    fn write_alert(&self, message: &str);
}

/// Writes alerts to stdout.
pub struct StdoutSink;

impl LocalSink for StdoutSink {
    fn write_alert(&self, message: &str) {
        println!("{}", message);
    }
}

/// What happened to a dispatched alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Written locally; no notification channel configured.
    LocalOnly,
    /// Written locally and delivered to the channel.
    Delivered,
    /// Written locally; the channel delivery failed.
    DeliveryFailed,
}

pub struct AlertDispatcher {
    local: Arc<dyn LocalSink>,
    notifier: Option<Arc<dyn Notifier>>,
}

impl AlertDispatcher {
    /// Dispatcher writing to stdout, with an optional notification channel.
    pub fn new(notifier: Option<Arc<dyn Notifier>>) -> Self {
        if notifier.is_none() {
            warn!("Notification credentials not set. Alerts will only be printed.");
        }
        Self {
            local: Arc::new(StdoutSink),
            notifier,
        }
    }

    pub fn with_local_sink(mut self, local: Arc<dyn LocalSink>) -> Self {
        self.local = local;
        self
    }

    pub fn has_notifier(&self) -> bool {
        self.notifier.is_some()
    }

    /// Write the alert locally, then make at most one delivery attempt.
    /// Delivery failures are logged and never propagate.
    pub async fn dispatch(&self, event: AlertEvent) -> DispatchOutcome {
        self.local.write_alert(&event.message);

        let Some(notifier) = &self.notifier else {
            return DispatchOutcome::LocalOnly;
        };

        match notifier.send(notifier.destination(), &event.message).await {
            Ok(()) => {
                debug!(
                    symbol = %event.ticker,
                    channel = notifier.name(),
                    "Alert delivered"
                );
                DispatchOutcome::Delivered
            }
            Err(e) => {
                error!(
                    symbol = %event.ticker,
                    channel = notifier.name(),
                    error = %e,
                    "Failed to deliver alert for {}",
                    event.ticker
                );
                DispatchOutcome::DeliveryFailed
            }
        }
    }
}
