pub mod toml_config;

#[cfg(feature = "cli")]
use crate::domain::model::FormSettings;
#[cfg(feature = "cli")]
use crate::domain::ports::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "cli")]
use std::path::PathBuf;
#[cfg(feature = "cli")]
use std::time::Duration;

/// Service address baked in at build time (`EVENT_API_URL`).
pub const DEFAULT_BASE_URL: &str = match option_env!("EVENT_API_URL") {
    Some(url) => url,
    None => "http://localhost:8000",
};

pub const DEFAULT_HEALTH_TIMEOUT_SECS: u64 = 5;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "event-registration")]
#[command(about = "Terminal kiosk for event registration")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[arg(long, default_value_t = DEFAULT_HEALTH_TIMEOUT_SECS)]
    pub health_timeout_secs: u64,

    #[arg(long, help = "Timeout for every other request; transport default when unset")]
    pub request_timeout_secs: Option<u64>,

    #[arg(long, default_value = "3")]
    pub participants_max_len: usize,

    #[arg(long, help = "Read settings from a TOML file instead of these flags")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Write logs as JSON")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn health_timeout(&self) -> Duration {
        Duration::from_secs(self.health_timeout_secs)
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    fn form_settings(&self) -> FormSettings {
        FormSettings {
            participants_max_len: self.participants_max_len,
            ..FormSettings::default()
        }
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("base_url", &self.base_url)?;
        validation::validate_positive_number("health_timeout_secs", self.health_timeout_secs, 1)?;
        if let Some(timeout) = self.request_timeout_secs {
            validation::validate_positive_number("request_timeout_secs", timeout, 1)?;
        }
        validation::validate_range("participants_max_len", self.participants_max_len, 1, 6)?;
        Ok(())
    }
}
