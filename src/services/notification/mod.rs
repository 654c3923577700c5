//! Outbound notification channels.

pub mod telegram;

use async_trait::async_trait;
use thiserror::Error;

pub use telegram::{TelegramNotifier, DEFAULT_API_URL};

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("channel rejected message: {0}")]
    Rejected(String),
}

/// A channel that can deliver a text message to a destination.
#[async_trait]
pub trait Notifier: Send + Sync {
    fn name(&self) -> &str;

    /// Destination alerts are addressed to.
    fn destination(&self) -> &str;

    async fn send(&self, destination: &str, text: &str) -> Result<(), NotificationError>;
}
