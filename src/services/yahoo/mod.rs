pub mod provider;

pub use provider::{YahooMarketDataProvider, DEFAULT_BASE_URL, DEFAULT_COOKIE_URL};
