//! Runtime configuration for the market-data adapters.
//!
//! Values come from [`Default`] and can be overridden through environment
//! variables with [`YahooConfig::from_env`]:
//!
//! | Variable | Field |
//! |----------|-------|
//! | `TICKSTAT_YAHOO_BASE_URL` | `base_url` |
//! | `TICKSTAT_TIMEOUT_MS` | `timeout_ms` |
//! | `TICKSTAT_USER_AGENT` | `user_agent` |
//! | `TICKSTAT_ADJUSTED` | `adjusted` (`true`/`false`, default `true`) |

use std::env;

pub const DEFAULT_YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com";
pub const DEFAULT_USER_AGENT: &str = concat!("tickstat/", env!("CARGO_PKG_VERSION"));

/// Settings for [`crate::YahooAdapter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YahooConfig {
    pub base_url: String,
    pub timeout_ms: u64,
    pub user_agent: String,
    /// Read split/dividend adjusted closes instead of raw closes.
    pub adjusted: bool,
}

impl Default for YahooConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_YAHOO_BASE_URL),
            timeout_ms: 10_000,
            user_agent: String::from(DEFAULT_USER_AGENT),
            adjusted: true,
        }
    }
}

impl YahooConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            base_url: lookup("TICKSTAT_YAHOO_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_owned())
                .unwrap_or(defaults.base_url),
            timeout_ms: lookup("TICKSTAT_TIMEOUT_MS")
                .and_then(|raw| raw.trim().parse().ok())
                .unwrap_or(defaults.timeout_ms),
            user_agent: lookup("TICKSTAT_USER_AGENT").unwrap_or(defaults.user_agent),
            adjusted: lookup("TICKSTAT_ADJUSTED")
                .and_then(|raw| raw.trim().parse().ok())
                .unwrap_or(defaults.adjusted),
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}
