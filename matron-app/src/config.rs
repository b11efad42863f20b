use serde::{Deserialize, Serialize};
use std::time::Duration;

use matron_client::RestClient;

/// Application configuration loaded from a YAML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub polling: PollingSettings,
    pub list: ListSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// OpenMRS REST webservices base, e.g. `http://host/openmrs/ws/rest/v1`.
    pub rest_base_url: String,
    /// FHIR R4 base, e.g. `http://host/openmrs/ws/fhir2/R4`.
    pub fhir_base_url: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollingSettings {
    /// Queue board refresh interval.
    pub interval_ms: u64,
    /// Cap for the error backoff.
    pub max_backoff_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ListSettings {
    pub page_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub level: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            rest_base_url: "http://localhost/openmrs/ws/rest/v1".to_string(),
            fhir_base_url: "http://localhost/openmrs/ws/fhir2/R4".to_string(),
            username: None,
            password: None,
            timeout_secs: 30,
        }
    }
}

impl Default for PollingSettings {
    fn default() -> Self {
        Self {
            interval_ms: 3000,
            max_backoff_ms: 30_000,
        }
    }
}

impl Default for ListSettings {
    fn default() -> Self {
        Self { page_size: 10 }
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file.
    pub fn load_from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration with priority: env vars > config file > defaults.
    pub fn load(config_path: Option<&str>) -> Result<Self, Box<dyn std::error::Error>> {
        let mut config = if let Some(path) = config_path {
            Self::load_from_file(path)?
        } else {
            Self::default()
        };

        if let Ok(url) = std::env::var("MATRON_REST_URL") {
            config.server.rest_base_url = url;
        }

        if let Ok(url) = std::env::var("MATRON_FHIR_URL") {
            config.server.fhir_base_url = url;
        }

        if let Ok(username) = std::env::var("MATRON_USERNAME") {
            config.server.username = Some(username);
        }

        if let Ok(password) = std::env::var("MATRON_PASSWORD") {
            config.server.password = Some(password);
        }

        if let Ok(interval) = std::env::var("MATRON_POLL_INTERVAL_MS")
            && let Ok(ms) = interval.parse()
        {
            config.polling.interval_ms = ms;
        }

        Ok(config)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.polling.interval_ms)
    }

    pub fn max_backoff(&self) -> Duration {
        Duration::from_millis(self.polling.max_backoff_ms)
    }

    /// Build a REST client from these settings.
    pub fn client(&self) -> matron_client::Result<RestClient> {
        let client = RestClient::with_timeout(
            &self.server.rest_base_url,
            &self.server.fhir_base_url,
            Duration::from_secs(self.server.timeout_secs),
        )?;
        Ok(match (&self.server.username, &self.server.password) {
            (Some(user), Some(pass)) => client.with_basic_auth(user, pass),
            _ => client,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.polling.interval_ms, 3000);
        assert_eq!(config.list.page_size, 10);
        assert_eq!(config.log.level, "info");
        assert!(config.server.username.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matron.yaml");
        std::fs::write(
            &path,
            "server:\n  username: admin\n  password: secret\nlist:\n  page_size: 25\n",
        )
        .unwrap();

        let config = AppConfig::load_from_file(path.to_str().unwrap()).unwrap();
        assert_eq!(config.server.username.as_deref(), Some("admin"));
        assert_eq!(config.list.page_size, 25);
        // Unspecified sections keep their defaults.
        assert_eq!(config.polling.interval_ms, 3000);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let yaml = "server:\n  rest_base_url: http://emr.example/ws/rest/v1\npolling:\n  interval_ms: 5000\n";
        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.server.rest_base_url, "http://emr.example/ws/rest/v1");
        assert_eq!(config.polling.interval_ms, 5000);
        // Unspecified sections keep their defaults.
        assert_eq!(config.polling.max_backoff_ms, 30_000);
        assert_eq!(config.list.page_size, 10);
    }
}
