use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_base_url_development: String,
    pub api_base_url_production: String,
    pub environment: String,
    pub enable_logging: bool,
    pub session: SessionConfig,
    pub ui_config: UIConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url_development: "http://localhost:8080/api".to_string(),
            api_base_url_production: "https://e-ticket-server-afxw.onrender.com/api".to_string(),
            environment: "production".to_string(),
            enable_logging: true,
            session: SessionConfig::default(),
            ui_config: UIConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Delay between the "session expired" notice and the forced redirect
    pub expired_redirect_delay_ms: u32,
    pub login_path: String,
    /// localStorage key holding the persisted token
    pub storage_key: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            expired_redirect_delay_ms: 1000,
            login_path: "/login".to_string(),
            storage_key: "auth-storage".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UIConfig {
    pub notice_auto_close_ms: u32,
    pub tickets_page_size: u32,
}

impl Default for UIConfig {
    fn default() -> Self {
        Self {
            notice_auto_close_ms: 3000,
            tickets_page_size: 10,
        }
    }
}

impl AppConfig {
    /// Load configuration from compile-time environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_base_url_development: option_env!("API_BASE_URL_DEVELOPMENT")
                .map(str::to_string)
                .unwrap_or(defaults.api_base_url_development),
            api_base_url_production: option_env!("API_BASE_URL_PRODUCTION")
                .map(str::to_string)
                .unwrap_or(defaults.api_base_url_production),
            environment: option_env!("ENVIRONMENT")
                .map(str::to_string)
                .unwrap_or(defaults.environment),
            enable_logging: option_env!("ENABLE_LOGGING")
                .unwrap_or("true").parse().unwrap_or(true),
            session: SessionConfig {
                expired_redirect_delay_ms: option_env!("SESSION_EXPIRED_REDIRECT_MS")
                    .unwrap_or("1000").parse().unwrap_or(1000),
                login_path: option_env!("LOGIN_PATH")
                    .unwrap_or("/login").to_string(),
                storage_key: defaults.session.storage_key,
            },
            ui_config: UIConfig {
                notice_auto_close_ms: option_env!("NOTICE_AUTO_CLOSE_MS")
                    .unwrap_or("3000").parse().unwrap_or(3000),
                tickets_page_size: option_env!("TICKETS_PAGE_SIZE")
                    .unwrap_or("10").parse().unwrap_or(10),
            },
        }
    }

    /// API base URL for the current environment
    pub fn api_base_url(&self) -> &str {
        match self.environment.as_str() {
            "development" => &self.api_base_url_development,
            _ => &self.api_base_url_production,
        }
    }

    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }
}

// Global static configuration
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}
