//! 共通の型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - Language: 表示言語（英語・スペイン語）
//! - AnalysisResult: 住宅写真の解析結果
//! - ImagePayload: Base64画像とMIMEタイプの組
//! - UiError: 画面に表示するエラーバナーの種類

use serde::{Deserialize, Serialize};

/// 生成画像を書き出す時の固定ファイル名
pub const EXPORT_FILE_NAME: &str = "roofai-project-render.png";

/// 表示言語
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
        }
    }

    /// 音声合成に渡す言語タグ
    pub fn speech_tag(&self) -> &'static str {
        match self {
            Language::En => "en-US",
            Language::Es => "es-ES",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Language::En => Language::Es,
            Language::Es => Language::En,
        }
    }

    pub fn parse(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "en" | "en-us" | "english" => Some(Language::En),
            "es" | "es-es" | "es-mx" | "spanish" | "español" => Some(Language::Es),
            _ => None,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// AI解析結果
///
/// アップロード1回につき1つ生成され、再アップロードかリセットで丸ごと置き換わる。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// 建築様式（Colonial, Ranch など）
    pub style: String,

    /// 推奨屋根材（通常3件）
    #[serde(default)]
    pub recommendations: Vec<String>,

    /// 推奨理由
    #[serde(default)]
    pub reasoning: String,
}

/// Base64エンコード済み画像
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePayload {
    pub mime_type: String,
    /// Base64データ（Data URLのヘッダを含まない）
    pub data: String,
}

impl ImagePayload {
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// `data:<mime>;base64,<data>` 形式に変換
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

/// 画面に表示するエラーの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiError {
    Analysis,
    Generation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_default_is_english() {
        assert_eq!(Language::default(), Language::En);
    }

    #[test]
    fn test_language_toggle() {
        assert_eq!(Language::En.toggled(), Language::Es);
        assert_eq!(Language::Es.toggled(), Language::En);
    }

    #[test]
    fn test_language_speech_tag() {
        assert_eq!(Language::En.speech_tag(), "en-US");
        assert_eq!(Language::Es.speech_tag(), "es-ES");
    }

    #[test]
    fn test_language_parse() {
        assert_eq!(Language::parse("ES"), Some(Language::Es));
        assert_eq!(Language::parse(" en "), Some(Language::En));
        assert_eq!(Language::parse("fr"), None);
    }

    #[test]
    fn test_language_serde() {
        let json = serde_json::to_string(&Language::Es).expect("シリアライズ失敗");
        assert_eq!(json, "\"es\"");
        let lang: Language = serde_json::from_str("\"en\"").expect("デシリアライズ失敗");
        assert_eq!(lang, Language::En);
    }

    #[test]
    fn test_analysis_result_deserialize() {
        let json = r#"{
            "style": "Colonial",
            "recommendations": ["Tile", "Slate", "Shingle"],
            "reasoning": "Symmetrical facade"
        }"#;

        let result: AnalysisResult = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(result.style, "Colonial");
        assert_eq!(result.recommendations, vec!["Tile", "Slate", "Shingle"]);
        assert_eq!(result.reasoning, "Symmetrical facade");
    }

    #[test]
    fn test_analysis_result_requires_style() {
        let json = r#"{"recommendations": [], "reasoning": ""}"#;
        assert!(serde_json::from_str::<AnalysisResult>(json).is_err());
    }

    #[test]
    fn test_image_payload_data_url() {
        let payload = ImagePayload::new("image/png", "iVBORw0KGgo=");
        assert_eq!(payload.to_data_url(), "data:image/png;base64,iVBORw0KGgo=");
    }
}
