use crate::utils::BACKEND_URL;

#[derive(Debug, Clone)]
pub struct PortalConfig {
    pub backend_url_development: String,
    pub backend_url_production: String,
    pub environment: String,
    pub enable_logging: bool,
    pub network_timeout_seconds: u32,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            backend_url_development: BACKEND_URL.to_string(),
            backend_url_production: BACKEND_URL.to_string(),
            environment: "development".to_string(),
            enable_logging: true,
            network_timeout_seconds: 30,
        }
    }
}

impl PortalConfig {
    /// Load configuration from compile-time environment variables
    pub fn from_env() -> Self {
        Self {
            backend_url_development: option_env!("BACKEND_URL_DEVELOPMENT")
                .unwrap_or(BACKEND_URL).to_string(),
            backend_url_production: option_env!("BACKEND_URL_PRODUCTION")
                .unwrap_or(BACKEND_URL).to_string(),
            environment: option_env!("ENVIRONMENT")
                .unwrap_or("development").to_string(),
            enable_logging: option_env!("ENABLE_LOGGING")
                .unwrap_or("true").parse().unwrap_or(true),
            network_timeout_seconds: option_env!("NETWORK_TIMEOUT_SECONDS")
                .unwrap_or("30").parse().unwrap_or(30),
        }
    }

    /// Backend URL for the current environment
    pub fn backend_url(&self) -> &str {
        match self.environment.as_str() {
            "production" => &self.backend_url_production,
            _ => &self.backend_url_development,
        }
    }

    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }

    /// Per-request timeout in milliseconds; 0 disables the timeout.
    pub fn network_timeout_ms(&self) -> u32 {
        self.network_timeout_seconds.saturating_mul(1000)
    }
}

// Global static configuration
lazy_static::lazy_static! {
    pub static ref CONFIG: PortalConfig = PortalConfig::from_env();
}
