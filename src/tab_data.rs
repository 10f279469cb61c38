/// Data structures for Tab Pilot
use serde::{Deserialize, Serialize};

pub type TabId = i32;
pub type WindowId = i32;

/// Snapshot of a browser tab as reported by `chrome.tabs`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TabInfo {
    pub id: TabId,
    #[serde(default)]
    pub window_id: WindowId,
    #[serde(default)]
    pub index: i32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub fav_icon_url: Option<String>,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub active: bool,
}

impl TabInfo {
    /// An unpinned, inactive tab with no favicon
    pub fn new(
        id: TabId,
        window_id: WindowId,
        url: impl Into<String>,
        title: impl Into<String>,
    ) -> TabInfo {
        TabInfo {
            id,
            window_id,
            index: 0,
            title: title.into(),
            url: url.into(),
            fav_icon_url: None,
            pinned: false,
            active: false,
        }
    }

    pub fn with_fav_icon(mut self, fav_icon_url: impl Into<String>) -> TabInfo {
        self.fav_icon_url = Some(fav_icon_url.into());
        self
    }

    pub fn pinned(mut self) -> TabInfo {
        self.pinned = true;
        self
    }
}

/// Properties passed to `chrome.tabs.update`
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq)]
pub struct TabUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pinned: Option<bool>,
}

impl TabUpdate {
    pub fn activate() -> Self {
        TabUpdate {
            active: Some(true),
            ..Default::default()
        }
    }

    pub fn pin(pinned: bool) -> Self {
        TabUpdate {
            pinned: Some(pinned),
            ..Default::default()
        }
    }
}

/// Filter passed to `chrome.tabs.query`
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TabQuery {
    pub current_window: bool,
}

impl TabQuery {
    pub fn current_window() -> Self {
        TabQuery {
            current_window: true,
        }
    }
}

/// One display row in the popup list
#[derive(Debug, Clone, PartialEq)]
pub struct TabRow {
    pub id: TabId,
    pub title: String,
    pub label: String,
    pub favicon: String,
    pub pinned: bool,
    pub active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_info_creation() {
        let tab = TabInfo::new(1, 4, "https://google.com", "Google");

        assert_eq!(tab.id, 1);
        assert_eq!(tab.window_id, 4);
        assert_eq!(tab.url, "https://google.com");
        assert_eq!(tab.title, "Google");
        assert!(!tab.pinned);
        assert!(tab.fav_icon_url.is_none());
    }

    #[test]
    fn test_tab_info_builders() {
        let tab = TabInfo::new(2, 4, "https://docs.rs", "Docs.rs")
            .with_fav_icon("https://docs.rs/favicon.ico")
            .pinned();

        assert!(tab.pinned);
        assert_eq!(tab.fav_icon_url.as_deref(), Some("https://docs.rs/favicon.ico"));
    }

    #[test]
    fn test_deserialize_browser_tab() {
        let json = r#"{
            "id": 42,
            "windowId": 7,
            "index": 3,
            "title": "Rust",
            "url": "https://www.rust-lang.org/",
            "favIconUrl": "https://www.rust-lang.org/favicon.ico",
            "pinned": true,
            "active": false,
            "audible": false,
            "discarded": false
        }"#;

        let tab: TabInfo = serde_json::from_str(json).unwrap();

        assert_eq!(tab.id, 42);
        assert_eq!(tab.window_id, 7);
        assert_eq!(tab.fav_icon_url.as_deref(), Some("https://www.rust-lang.org/favicon.ico"));
        assert!(tab.pinned);
    }

    #[test]
    fn test_deserialize_tab_without_optional_fields() {
        let tab: TabInfo = serde_json::from_str(r#"{"id": 5, "windowId": 1}"#).unwrap();

        assert_eq!(tab.title, "");
        assert_eq!(tab.url, "");
        assert!(tab.fav_icon_url.is_none());
    }

    #[test]
    fn test_tab_update_skips_unset_fields() {
        let json = serde_json::to_value(TabUpdate::pin(false)).unwrap();
        assert_eq!(json, serde_json::json!({ "pinned": false }));

        let json = serde_json::to_value(TabUpdate::activate()).unwrap();
        assert_eq!(json, serde_json::json!({ "active": true }));
    }

    #[test]
    fn test_tab_query_uses_browser_field_names() {
        let json = serde_json::to_value(TabQuery::current_window()).unwrap();
        assert_eq!(json, serde_json::json!({ "currentWindow": true }));
    }
}
