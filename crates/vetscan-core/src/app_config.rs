use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Runtime settings for a vetscan process, read from `VETSCAN_*` env vars.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Search endpoint the composed query is appended to.
    pub search_base_url: String,
    /// Registrable domain of the directory platform; links into it are not
    /// treated as clinic websites.
    pub platform_domain: String,
    /// Branding text that disqualifies a name candidate.
    pub platform_brand: String,
    pub user_agent: String,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub headless: bool,
    pub chrome_executable: Option<PathBuf>,
    pub feed_timeout_secs: u64,
    pub settle_delay_ms: u64,
    pub scroll_settle_ms: u64,
    pub search_timeout_secs: u64,
}
