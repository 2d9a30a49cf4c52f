use crate::error::{RoofAiError, Result};
use roof_ai_common::gemini::{DEFAULT_ANALYSIS_MODEL, DEFAULT_API_BASE_URL, DEFAULT_IMAGE_MODEL};
use roof_ai_common::Language;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// APIキーを探す環境変数（先勝ち）
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub api_base_url: String,
    pub analysis_model: String,
    pub image_model: String,
    pub timeout_seconds: u64,
    pub language: Language,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: DEFAULT_API_BASE_URL.into(),
            analysis_model: DEFAULT_ANALYSIS_MODEL.into(),
            image_model: DEFAULT_IMAGE_MODEL.into(),
            timeout_seconds: 120,
            language: Language::En,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| RoofAiError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("roof-ai").join("config.json"))
    }

    pub fn get_api_key(&self) -> Result<String> {
        // 環境変数を優先
        let from_env = API_KEY_ENV_VARS
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .find(|key| !key.trim().is_empty());

        from_env
            .or_else(|| self.api_key.clone().filter(|k| !k.trim().is_empty()))
            .ok_or(RoofAiError::MissingApiKey)
    }

    pub fn set_api_key(&mut self, key: String) -> Result<()> {
        self.api_key = Some(key);
        self.save()
    }

    /// 表示用にマスクしたAPIキー
    pub fn masked_api_key(&self) -> Option<String> {
        self.api_key.as_ref().map(|key| {
            let visible: String = key.chars().rev().take(4).collect::<Vec<_>>().into_iter().rev().collect();
            format!("****{}", visible)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.analysis_model, "gemini-2.5-flash");
        assert_eq!(config.image_model, "gemini-2.5-flash-image");
        assert_eq!(config.language, Language::En);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("roof-ai").join("config.json");

        let config = Config {
            api_key: Some("test-key".into()),
            language: Language::Es,
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.api_key.as_deref(), Some("test-key"));
        assert_eq!(loaded.language, Language::Es);
        assert_eq!(loaded.timeout_seconds, 120);
    }

    #[test]
    fn test_load_missing_file_uses_default() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("none.json")).unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"language": "es"}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.language, Language::Es);
        assert_eq!(config.image_model, DEFAULT_IMAGE_MODEL);
    }

    #[test]
    fn test_masked_api_key() {
        let config = Config {
            api_key: Some("AIzaSyABCDEF1234".into()),
            ..Config::default()
        };
        assert_eq!(config.masked_api_key().as_deref(), Some("****1234"));
    }
}
