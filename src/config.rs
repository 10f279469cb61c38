/// User settings persisted in chrome.storage.local

use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

use crate::chrome;
use crate::error::SettingsError;

pub const SETTINGS_KEY: &str = "tab_pilot_settings";

pub const DEFAULT_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u32 = 15_000;
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u32 = 180;

const MIN_REQUEST_TIMEOUT_MS: u32 = 1_000;
const MAX_REQUEST_TIMEOUT_MS: u32 = 120_000;
const MAX_SEARCH_DEBOUNCE_MS: u32 = 2_000;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub api_key: Option<String>,
    pub endpoint: String,
    pub request_timeout_ms: u32,
    pub search_debounce_ms: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
        }
    }
}

impl Settings {
    /// Trim text fields and pull numbers back into their allowed ranges
    pub fn sanitized(self) -> Self {
        let api_key = self
            .api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        let endpoint = match self.endpoint.trim() {
            "" => DEFAULT_ENDPOINT.to_string(),
            endpoint => endpoint.to_string(),
        };

        Settings {
            api_key,
            endpoint,
            request_timeout_ms: self
                .request_timeout_ms
                .clamp(MIN_REQUEST_TIMEOUT_MS, MAX_REQUEST_TIMEOUT_MS),
            search_debounce_ms: self.search_debounce_ms.min(MAX_SEARCH_DEBOUNCE_MS),
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| !key.is_empty())
    }

    /// Build settings from the options form fields
    pub fn from_form(
        api_key: &str,
        endpoint: &str,
        request_timeout_ms: &str,
        search_debounce_ms: &str,
    ) -> Result<Settings, SettingsError> {
        let settings = Settings {
            api_key: Some(api_key.to_string()),
            endpoint: endpoint.to_string(),
            request_timeout_ms: parse_millis(request_timeout_ms, "Request timeout")?,
            search_debounce_ms: parse_millis(search_debounce_ms, "Search delay")?,
        };
        Ok(settings.sanitized())
    }

    /// Decode the JSON stored under [`SETTINGS_KEY`]; absent means defaults
    pub fn from_stored(value: serde_json::Value) -> Result<Settings, SettingsError> {
        if value.is_null() {
            return Ok(Settings::default());
        }

        serde_json::from_value::<Settings>(value)
            .map(Settings::sanitized)
            .map_err(|e| SettingsError::Decode(e.to_string()))
    }
}

fn parse_millis(text: &str, field: &'static str) -> Result<u32, SettingsError> {
    text.trim()
        .parse::<u32>()
        .map_err(|_| SettingsError::InvalidNumber { field })
}

pub async fn load_settings() -> Result<Settings, SettingsError> {
    let stored = chrome::get_storage(SETTINGS_KEY).await?;

    if stored.is_null() || stored.is_undefined() {
        return Ok(Settings::default());
    }

    let value: serde_json::Value = serde_wasm_bindgen::from_value(stored)
        .map_err(|e| SettingsError::Decode(format!("{:?}", e)))?;
    Settings::from_stored(value)
}

pub async fn save_settings(settings: &Settings) -> Result<(), SettingsError> {
    let value: JsValue = serde_wasm_bindgen::to_value(settings)
        .map_err(|e| SettingsError::Decode(format!("{:?}", e)))?;

    chrome::set_storage(SETTINGS_KEY, value).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();

        assert_eq!(settings.api_key, None);
        assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(settings.request_timeout_ms, 15_000);
        assert_eq!(settings.search_debounce_ms, 180);
        assert!(!settings.has_api_key());
    }

    #[test]
    fn test_from_stored_null_is_default() {
        assert_eq!(Settings::from_stored(serde_json::Value::Null), Ok(Settings::default()));
    }

    #[test]
    fn test_from_stored_partial_object() {
        let settings = Settings::from_stored(json!({ "apiKey": "  k-123  " })).unwrap();

        assert_eq!(settings.api_key.as_deref(), Some("k-123"));
        assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
        assert!(settings.has_api_key());
    }

    #[test]
    fn test_from_stored_rejects_wrong_types() {
        let result = Settings::from_stored(json!({ "requestTimeoutMs": "soon" }));
        assert!(matches!(result, Err(SettingsError::Decode(_))));
    }

    #[test]
    fn test_sanitized_clamps_ranges() {
        let settings = Settings {
            api_key: Some("   ".to_string()),
            endpoint: "  ".to_string(),
            request_timeout_ms: 10,
            search_debounce_ms: 60_000,
        }
        .sanitized();

        assert_eq!(settings.api_key, None);
        assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(settings.request_timeout_ms, 1_000);
        assert_eq!(settings.search_debounce_ms, 2_000);
    }

    #[test]
    fn test_from_form() {
        let settings =
            Settings::from_form(" key ", "https://example.com/v1:generate", "5000", " 250 ").unwrap();

        assert_eq!(
            settings,
            Settings {
                api_key: Some("key".to_string()),
                endpoint: "https://example.com/v1:generate".to_string(),
                request_timeout_ms: 5_000,
                search_debounce_ms: 250,
            }
        );
    }

    #[test]
    fn test_from_form_rejects_non_numbers() {
        assert_eq!(
            Settings::from_form("", "", "fast", "180"),
            Err(SettingsError::InvalidNumber { field: "Request timeout" })
        );
        assert_eq!(
            Settings::from_form("", "", "1000", "-5"),
            Err(SettingsError::InvalidNumber { field: "Search delay" })
        );
    }

    #[test]
    fn test_serialization_uses_camel_case() {
        let json = serde_json::to_value(Settings::default()).unwrap();

        assert_eq!(json["requestTimeoutMs"], json!(15_000));
        assert_eq!(json["searchDebounceMs"], json!(180));
        assert_eq!(json["apiKey"], serde_json::Value::Null);
    }
}
