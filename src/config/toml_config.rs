use crate::config::DEFAULT_HEALTH_TIMEOUT_SECS;
use crate::domain::model::FormSettings;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{RegistrationError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub api: ApiConfig,
    pub form: Option<FormConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub health_timeout_seconds: Option<u64>,
    pub request_timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    pub admin_token: Option<String>,
    pub participants_max_length: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(RegistrationError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| RegistrationError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${EVENT_API_URL})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| RegistrationError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn verbose_logging(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }

    pub fn json_logging(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn base_url(&self) -> &str {
        &self.api.base_url
    }

    fn health_timeout(&self) -> Duration {
        Duration::from_secs(
            self.api
                .health_timeout_seconds
                .unwrap_or(DEFAULT_HEALTH_TIMEOUT_SECS),
        )
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.api.request_timeout_seconds.map(Duration::from_secs)
    }

    fn form_settings(&self) -> FormSettings {
        let defaults = FormSettings::default();
        match &self.form {
            Some(form) => FormSettings {
                admin_token: form.admin_token.clone().unwrap_or(defaults.admin_token),
                participants_max_len: form
                    .participants_max_length
                    .unwrap_or(defaults.participants_max_len),
            },
            None => defaults,
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api.base_url", &self.api.base_url)?;

        if let Some(timeout) = self.api.health_timeout_seconds {
            validation::validate_positive_number("api.health_timeout_seconds", timeout, 1)?;
        }
        if let Some(timeout) = self.api.request_timeout_seconds {
            validation::validate_positive_number("api.request_timeout_seconds", timeout, 1)?;
        }

        if let Some(form) = &self.form {
            if let Some(token) = &form.admin_token {
                validation::validate_non_empty_string("form.admin_token", token)?;
            }
            if let Some(max) = form.participants_max_length {
                validation::validate_range("form.participants_max_length", max, 1, 6)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[api]
base_url = "http://172.16.18.28:8000"
health_timeout_seconds = 3
request_timeout_seconds = 15

[form]
admin_token = "staff"
participants_max_length = 2

[logging]
verbose = true
json = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.base_url(), "http://172.16.18.28:8000");
        assert_eq!(config.health_timeout(), Duration::from_secs(3));
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(15)));
        assert_eq!(config.form_settings().admin_token, "staff");
        assert_eq!(config.form_settings().participants_max_len, 2);
        assert!(config.verbose_logging());
        assert!(config.json_logging());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = TomlConfig::from_toml_str(
            r#"
[api]
base_url = "http://localhost:8000"
"#,
        )
        .unwrap();

        assert_eq!(config.health_timeout(), Duration::from_secs(5));
        assert_eq!(config.request_timeout(), None);
        assert_eq!(config.form_settings(), FormSettings::default());
        assert!(!config.json_logging());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TEST_EVENT_API_URL", "http://10.0.0.5:8000");

        let config = TomlConfig::from_toml_str(
            r#"
[api]
base_url = "${TEST_EVENT_API_URL}"
"#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "http://10.0.0.5:8000");

        std::env::remove_var("TEST_EVENT_API_URL");
    }

    #[test]
    fn test_config_validation() {
        let bad_url = TomlConfig::from_toml_str(
            r#"
[api]
base_url = "invalid-url"
"#,
        )
        .unwrap();
        assert!(bad_url.validate().is_err());

        let blank_token = TomlConfig::from_toml_str(
            r#"
[api]
base_url = "http://localhost:8000"

[form]
admin_token = "  "
"#,
        )
        .unwrap();
        assert!(blank_token.validate().is_err());
    }

    #[test]
    fn test_missing_api_section_is_rejected() {
        let err = TomlConfig::from_toml_str("[form]\nadmin_token = \"admin\"\n").unwrap_err();
        assert!(matches!(
            err,
            RegistrationError::ConfigValidationError { .. }
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[api]\nbase_url = \"https://events.example.com\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.base_url(), "https://events.example.com");
    }
}
