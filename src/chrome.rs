/// Bindings to the extension APIs (`chrome.tabs`, `chrome.windows`,
/// `chrome.runtime`, `chrome.storage.local`)

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::error::{SettingsError, TabError};
use crate::operations::TabSource;
use crate::tab_data::{TabId, TabInfo, TabQuery, TabUpdate, WindowId};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["chrome", "tabs"], js_name = query)]
    async fn tabs_query(query_info: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "tabs"], js_name = update)]
    async fn tabs_update(tab_id: i32, update_properties: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "tabs"], js_name = remove)]
    async fn tabs_remove(tab_ids: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "tabs"], js_name = get)]
    async fn tabs_get(tab_id: i32) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "windows"], js_name = update)]
    async fn windows_update(window_id: i32, update_info: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "runtime"], js_name = openOptionsPage)]
    async fn runtime_open_options_page() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "storage", "local"], js_name = get)]
    async fn storage_local_get(keys: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "storage", "local"], js_name = set)]
    async fn storage_local_set(items: JsValue) -> Result<JsValue, JsValue>;
}

#[derive(Serialize)]
struct WindowUpdate {
    focused: bool,
}

fn js_error(e: JsValue) -> String {
    e.as_string()
        .or_else(|| {
            js_sys::Reflect::get(&e, &JsValue::from_str("message"))
                .ok()
                .and_then(|message| message.as_string())
        })
        .unwrap_or_else(|| format!("{:?}", e))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, TabError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| TabError::Decode(format!("{:?}", e)))
}

/// Decode the array returned by `chrome.tabs.query`
pub fn decode_tabs(value: JsValue) -> Result<Vec<TabInfo>, TabError> {
    serde_wasm_bindgen::from_value(value).map_err(|e| TabError::Decode(format!("{:?}", e)))
}

pub fn decode_tab(value: JsValue) -> Result<TabInfo, TabError> {
    serde_wasm_bindgen::from_value(value).map_err(|e| TabError::Decode(format!("{:?}", e)))
}

/// Tab source backed by the live browser
#[derive(Debug, Clone, Copy, Default)]
pub struct ChromeTabs;

impl TabSource for ChromeTabs {
    async fn query_tabs(&self, query: TabQuery) -> Result<Vec<TabInfo>, TabError> {
        let tabs = tabs_query(to_js(&query)?)
            .await
            .map_err(|e| TabError::browser("tabs.query", js_error(e)))?;
        decode_tabs(tabs)
    }

    async fn update_tab(&self, id: TabId, update: TabUpdate) -> Result<TabInfo, TabError> {
        let tab = tabs_update(id, to_js(&update)?)
            .await
            .map_err(|e| TabError::browser("tabs.update", js_error(e)))?;

        // Resolves without a tab when the extension lacks the "tabs" permission
        if tab.is_undefined() || tab.is_null() {
            return Err(TabError::Missing(id));
        }
        decode_tab(tab)
    }

    async fn remove_tabs(&self, ids: &[TabId]) -> Result<(), TabError> {
        let ids = match ids {
            [id] => JsValue::from(*id),
            ids => to_js(&ids)?,
        };
        tabs_remove(ids)
            .await
            .map_err(|e| TabError::browser("tabs.remove", js_error(e)))?;
        Ok(())
    }

    async fn get_tab(&self, id: TabId) -> Result<TabInfo, TabError> {
        let tab = tabs_get(id)
            .await
            .map_err(|e| TabError::browser("tabs.get", js_error(e)))?;
        decode_tab(tab)
    }

    async fn focus_window(&self, window_id: WindowId) -> Result<(), TabError> {
        windows_update(window_id, to_js(&WindowUpdate { focused: true })?)
            .await
            .map_err(|e| TabError::browser("windows.update", js_error(e)))?;
        Ok(())
    }
}

/// Read one key from `chrome.storage.local`; `undefined` when absent
pub async fn get_storage(key: &str) -> Result<JsValue, SettingsError> {
    let items = storage_local_get(key)
        .await
        .map_err(|e| SettingsError::Storage(js_error(e)))?;

    js_sys::Reflect::get(&items, &JsValue::from_str(key))
        .map_err(|e| SettingsError::Storage(js_error(e)))
}

pub async fn set_storage(key: &str, value: JsValue) -> Result<(), SettingsError> {
    let items = js_sys::Object::new();
    js_sys::Reflect::set(&items, &JsValue::from_str(key), &value)
        .map_err(|e| SettingsError::Storage(js_error(e)))?;

    storage_local_set(items.into())
        .await
        .map_err(|e| SettingsError::Storage(js_error(e)))?;
    Ok(())
}

pub async fn open_options_page() {
    if let Err(e) = runtime_open_options_page().await {
        log::error!("Failed to open options page: {}", js_error(e));
    }
}

/// Dismiss the popup window
pub fn close_popup() {
    match web_sys::window() {
        Some(window) => {
            if let Err(e) = window.close() {
                log::error!("Failed to close popup: {}", js_error(e));
            }
        }
        None => log::warn!("No window to close"),
    }
}
