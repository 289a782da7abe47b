// Transport configuration for building the shared reqwest::Client.

use std::time::Duration;

/// Transport settings for the HTTP client.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, crate::Error> {
        Ok(reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent("padron/0.1.0")
            .build()?)
    }
}
