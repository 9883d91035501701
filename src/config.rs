use serde::Deserialize;
use tracing::warn;

const CONFIG_KEY: &str = "giftbook.config";

/// Runtime settings, overridable per browser through localStorage.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Prefix for every REST call, e.g. `/api` or `https://host/api`.
    pub api_base: String,
    pub page_size: u32,
    /// How many recent months the monthly statistics table asks for.
    pub monthly_window: u32,
    /// `EnvFilter` directive, e.g. `info` or `giftbook=debug`.
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: "/api".to_string(),
            page_size: 10,
            monthly_window: 12,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_json(raw: &str) -> Self {
        match serde_json::from_str::<AppConfig>(raw) {
            Ok(config) => config.sanitized(),
            Err(err) => {
                warn!(%err, "ignoring stored config");
                Self::default()
            }
        }
    }

    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.page_size == 0 {
            self.page_size = defaults.page_size;
        }
        if self.monthly_window == 0 {
            self.monthly_window = defaults.monthly_window;
        }
        while self.api_base.ends_with('/') {
            self.api_base.pop();
        }
        self
    }

    pub fn load() -> Self {
        if let Some(window) = web_sys::window() {
            if let Ok(Some(storage)) = window.local_storage() {
                if let Ok(Some(raw)) = storage.get_item(CONFIG_KEY) {
                    return Self::from_json(&raw);
                }
            }
        }
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_fields_take_defaults() {
        let config = AppConfig::from_json(r#"{"page_size": 25}"#);
        assert_eq!(
            config,
            AppConfig {
                page_size: 25,
                ..AppConfig::default()
            }
        );
    }

    #[test]
    fn invalid_json_falls_back() {
        assert_eq!(AppConfig::from_json("not json"), AppConfig::default());
    }

    #[test]
    fn zero_sizes_and_trailing_slashes_are_fixed() {
        let config = AppConfig::from_json(
            r#"{"api_base": "https://gifts.example/api//", "page_size": 0, "monthly_window": 0}"#,
        );
        assert_eq!(config.api_base, "https://gifts.example/api");
        assert_eq!(config.page_size, 10);
        assert_eq!(config.monthly_window, 12);
    }
}
