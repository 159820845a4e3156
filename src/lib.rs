pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod ui;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::HttpRegistrationApi;
pub use config::toml_config::TomlConfig;
pub use crate::core::app::{AppEvent, RegistrationApp, Screen};
pub use ui::TerminalSession;
pub use utils::error::{RegistrationError, Result};
