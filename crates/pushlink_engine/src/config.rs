//! Configuration for the sync engine.

use std::time::Duration;

/// Configuration for talking to the notification service.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Service URL every operation of an engine is sent to.
    pub url: String,
    /// Request timeout, applied by transports that support one.
    pub timeout: Duration,
    /// `User-Agent` header sent by transports that set one.
    pub user_agent: String,
}

impl ServiceConfig {
    /// Creates a new service configuration.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: Duration::from_secs(30),
            user_agent: format!("pushlink/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Sets the service URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::new("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_config_builder() {
        let config = ServiceConfig::new("https://push.example.com/device")
            .with_timeout(Duration::from_secs(5))
            .with_user_agent("test-agent");

        assert_eq!(config.url, "https://push.example.com/device");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "test-agent");
    }

    #[test]
    fn service_config_defaults() {
        let config = ServiceConfig::default();
        assert!(config.url.is_empty());
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("pushlink/"));
    }
}
