use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://sistema-financeiro-btjl.onrender.com/api";

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// 0 leaves the request timeout unset
    #[serde(default)]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct UiConfig {
    #[serde(default = "default_notice_ttl_ms")]
    pub notice_ttl_ms: u64,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_base_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_notice_ttl_ms() -> u64 {
    3000
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: 0,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            notice_ttl_ms: default_notice_ttl_ms(),
            log_level: default_log_level(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

impl UiConfig {
    pub fn notice_ttl(&self) -> Duration {
        Duration::from_millis(self.notice_ttl_ms)
    }
}

impl ClientConfig {
    /// Runs before the tracing subscriber exists, so problems go to stderr.
    pub fn load_or_default(path: &str) -> Self {
        if std::path::Path::new(path).exists() {
            match std::fs::read_to_string(path) {
                Ok(s) => match toml::from_str(&s) {
                    Ok(c) => c,
                    Err(e) => {
                        eprintln!("Error parsing config: {}. Using defaults.", e);
                        Self::default()
                    }
                },
                Err(e) => {
                    eprintln!("Error reading config: {}. Using defaults.", e);
                    Self::default()
                }
            }
        } else {
            eprintln!("Config file not found at '{}'. Creating default.", path);
            let config = Self::default();
            if let Ok(s) = config.to_toml() {
                if let Err(e) = std::fs::write(path, s) {
                    eprintln!("Could not write default config: {}", e);
                }
            }
            config
        }
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let cfg: ClientConfig = toml::from_str(
            r#"
            [api]
            base_url = "http://localhost:5000/api"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.api.base_url, "http://localhost:5000/api");
        assert_eq!(cfg.api.timeout(), None);
        assert_eq!(cfg.ui.notice_ttl_ms, 3000);
        assert_eq!(cfg.ui.log_level, "warn");
    }

    #[test]
    fn test_timeout_enabled() {
        let api = ApiConfig {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_secs: 15,
        };
        assert_eq!(api.timeout(), Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_round_trip_default() {
        let s = ClientConfig::default().to_toml().unwrap();
        let back: ClientConfig = toml::from_str(&s).unwrap();
        assert_eq!(back.api.base_url, DEFAULT_API_URL);
    }
}
