//! APIキーの保存（localStorage）

use gloo::storage::{LocalStorage, Storage};

const API_KEY_STORAGE_KEY: &str = "roofai.gemini_api_key";

pub fn load_api_key() -> Option<String> {
    LocalStorage::get::<String>(API_KEY_STORAGE_KEY)
        .ok()
        .filter(|key| !key.trim().is_empty())
}

pub fn save_api_key(api_key: &str) -> Result<(), String> {
    LocalStorage::set(API_KEY_STORAGE_KEY, api_key.trim()).map_err(|e| e.to_string())
}

pub fn clear_api_key() {
    LocalStorage::delete(API_KEY_STORAGE_KEY);
}
