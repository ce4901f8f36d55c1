use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::errors::{AppError, AppResult};

/// Environment variable prefix, e.g. `STREAMVIBE__BACKEND__URL`
pub const ENV_PREFIX: &str = "STREAMVIBE";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub web: WebConfig,
    pub backend: BackendConfig,
    pub admin: AdminConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Supabase-style PostgREST + GoTrue endpoints
    Postgrest,
    /// Process-local tables, for demos and tests
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    pub kind: BackendKind,
    pub url: String,
    pub anon_key: String,
    pub request_timeout_secs: u64,
    pub seed_sample_data: bool,
    /// Admin account registered when running against the in-memory backend
    pub demo_admin_email: String,
    pub demo_admin_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    /// Surface a toast when sign-out is rejected instead of failing silently
    pub notify_on_logout_failure: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            web: WebConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            backend: BackendConfig {
                kind: BackendKind::Memory,
                url: "http://localhost:54321".to_string(),
                anon_key: String::new(),
                request_timeout_secs: 30,
                seed_sample_data: true,
                demo_admin_email: "admin@streamvibe.local".to_string(),
                demo_admin_password: "changeme".to_string(),
            },
            admin: AdminConfig {
                notify_on_logout_failure: false,
            },
        }
    }
}

impl BackendConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Config {
    /// Load configuration from defaults, then `config_file` (if present), then
    /// `STREAMVIBE__*` environment variables.
    pub fn load(config_file: &str) -> AppResult<Self> {
        let defaults = config::Config::try_from(&Self::default())
            .map_err(|e| AppError::configuration(e.to_string()))?;

        config::Config::builder()
            .add_source(defaults)
            .add_source(config::File::with_name(config_file).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .and_then(|settings| settings.try_deserialize())
            .map_err(|e| AppError::configuration(format!("{config_file}: {e}")))
    }

    /// Write the default configuration to `config_file` unless it already exists
    pub fn write_default_if_missing(config_file: &str) -> AppResult<bool> {
        if Path::new(config_file).exists() {
            return Ok(false);
        }
        let contents = toml::to_string_pretty(&Self::default())
            .map_err(|e| AppError::configuration(e.to_string()))?;
        std::fs::write(config_file, contents)
            .map_err(|e| AppError::configuration(format!("{config_file}: {e}")))?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config_path() -> std::path::PathBuf {
        std::env::temp_dir().join(format!("streamvibe-{}.toml", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let path = temp_config_path();
        let config = Config::load(path.to_str().unwrap()).unwrap();

        assert_eq!(config.web.port, 8080);
        assert_eq!(config.backend.kind, BackendKind::Memory);
        assert!(!config.admin.notify_on_logout_failure);
    }

    #[test]
    fn test_file_values_override_defaults() {
        let path = temp_config_path();
        std::fs::write(
            &path,
            r#"
[web]
host = "127.0.0.1"
port = 9090

[backend]
kind = "postgrest"
url = "https://project.supabase.co"
anon_key = "anon"
request_timeout_secs = 5
seed_sample_data = false
demo_admin_email = "ops@example.com"
demo_admin_password = "hunter2"

[admin]
notify_on_logout_failure = true
"#,
        )
        .unwrap();

        let config = Config::load(path.to_str().unwrap()).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.web.port, 9090);
        assert_eq!(config.backend.kind, BackendKind::Postgrest);
        assert_eq!(config.backend.request_timeout(), Duration::from_secs(5));
        assert!(config.admin.notify_on_logout_failure);
    }

    #[test]
    fn test_write_default_does_not_clobber_existing_file() {
        let path = temp_config_path();
        let path_str = path.to_str().unwrap();

        assert!(Config::write_default_if_missing(path_str).unwrap());
        assert!(!Config::write_default_if_missing(path_str).unwrap());

        let written = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert!(written.contains("[backend]"));
    }
}
