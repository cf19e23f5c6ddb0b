pub mod app_config;
pub mod clinic;
pub mod config;
pub mod search_session;

pub use app_config::{AppConfig, Environment};
pub use clinic::{ClinicRecord, Extracted, NOT_AVAILABLE};
pub use config::{load_app_config, load_app_config_from_env};
pub use search_session::SearchSession;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
