//! External collaborators: market data and notification channels.

pub mod market_data;
pub mod notification;
pub mod yahoo;

pub use market_data::{DataError, MarketDataProvider, StaticMarketDataProvider};
pub use notification::{NotificationError, Notifier, TelegramNotifier};
pub use yahoo::YahooMarketDataProvider;
