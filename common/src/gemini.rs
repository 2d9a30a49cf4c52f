//! Gemini API のリクエスト/レスポンス型（CLI/WASM共通）
//!
//! 通信処理は各プラットフォーム側（reqwest / fetch）に置き、
//! ここではJSONの形とレスポンスからの取り出しだけを扱う。

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::prompts::{build_analysis_prompt, build_insight_prompt, build_roof_edit_prompt};
use crate::types::{ImagePayload, Language};

pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_ANALYSIS_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";

/// generateContent エンドポイントURL（APIキーは含まない）
pub fn endpoint_url(base_url: &str, model: &str) -> String {
    format!("{}/models/{}:generateContent", base_url.trim_end_matches('/'), model)
}

/// Gemini APIリクエスト
#[derive(Debug, Serialize)]
pub struct GeminiRequest {
    pub contents: Vec<Content>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Default, Serialize)]
pub struct GenerationConfig {
    #[serde(rename = "responseMimeType", skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(rename = "responseSchema", skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
}

impl Part {
    pub fn image(image: &ImagePayload) -> Self {
        Part::InlineData {
            inline_data: InlineData {
                mime_type: image.mime_type.clone(),
                data: image.data.clone(),
            },
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Part::Text { text: text.into() }
    }
}

impl GeminiRequest {
    /// 画像1枚 + テキスト1つの単発リクエスト（画像を先に置く）
    fn image_with_prompt(image: &ImagePayload, prompt: String) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part::image(image), Part::text(prompt)],
            }],
            generation_config: None,
        }
    }
}

/// 解析レスポンスのJSONスキーマ
pub fn analysis_response_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "style": { "type": "STRING" },
            "recommendations": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            },
            "reasoning": { "type": "STRING" }
        },
        "required": ["style", "recommendations", "reasoning"]
    })
}

/// 建築様式解析リクエスト（JSONスキーマ指定付き）
pub fn analysis_request(image: &ImagePayload, language: Language) -> GeminiRequest {
    let mut request = GeminiRequest::image_with_prompt(image, build_analysis_prompt(language));
    request.generation_config = Some(GenerationConfig {
        response_mime_type: Some("application/json".to_string()),
        response_schema: Some(analysis_response_schema()),
    });
    request
}

/// 屋根材インサイトリクエスト（プレーンテキスト応答）
pub fn insight_request(
    image: &ImagePayload,
    style: &str,
    material_name: &str,
    language: Language,
) -> GeminiRequest {
    GeminiRequest::image_with_prompt(image, build_insight_prompt(style, material_name, language))
}

/// 屋根差し替え画像生成リクエスト
pub fn roof_edit_request(
    image: &ImagePayload,
    material_name: &str,
    color_name: &str,
    style: &str,
) -> GeminiRequest {
    GeminiRequest::image_with_prompt(image, build_roof_edit_prompt(material_name, color_name, style))
}

/// Gemini APIレスポンス
#[derive(Debug, Default, Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, rename = "inlineData", alias = "inline_data")]
    pub inline_data: Option<ResponseInlineData>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseInlineData {
    #[serde(rename = "mimeType", alias = "mime_type", default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub data: String,
}

impl GeminiResponse {
    fn first_parts(&self) -> &[ResponsePart] {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| c.parts.as_slice())
            .unwrap_or(&[])
    }

    /// 先頭候補のテキストパートを連結して返す（空ならNone）
    pub fn text(&self) -> Option<String> {
        let text: String = self
            .first_parts()
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();

        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// 先頭候補のパートから最初のインライン画像を探す
    pub fn first_inline_image(&self) -> Option<ImagePayload> {
        self.first_parts()
            .iter()
            .filter_map(|p| p.inline_data.as_ref())
            .find(|d| !d.data.is_empty())
            .map(|d| {
                ImagePayload::new(
                    d.mime_type.clone().unwrap_or_else(|| "image/png".to_string()),
                    d.data.clone(),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_image() -> ImagePayload {
        ImagePayload::new("image/jpeg", "/9j/4AAQSkZJRg==")
    }

    // =============================================
    // リクエスト シリアライズテスト
    // =============================================

    #[test]
    fn test_endpoint_url() {
        let url = endpoint_url("https://example.com/v1beta/", "gemini-2.5-flash");
        assert_eq!(url, "https://example.com/v1beta/models/gemini-2.5-flash:generateContent");
    }

    #[test]
    fn test_analysis_request_serialize() {
        let request = analysis_request(&sample_image(), Language::En);
        let value = serde_json::to_value(&request).expect("シリアライズ失敗");

        let parts = &value["contents"][0]["parts"];
        assert_eq!(parts[0]["inline_data"]["mime_type"], "image/jpeg");
        assert_eq!(parts[0]["inline_data"]["data"], "/9j/4AAQSkZJRg==");
        assert!(parts[1]["text"].as_str().unwrap().contains("architectural style"));

        let config = &value["generationConfig"];
        assert_eq!(config["responseMimeType"], "application/json");
        assert_eq!(config["responseSchema"]["type"], "OBJECT");
        assert_eq!(
            config["responseSchema"]["required"],
            json!(["style", "recommendations", "reasoning"])
        );
    }

    #[test]
    fn test_insight_request_has_no_generation_config() {
        let request = insight_request(&sample_image(), "Ranch", "Teja", Language::Es);
        let json = serde_json::to_string(&request).expect("シリアライズ失敗");
        assert!(!json.contains("generationConfig"));
        assert!(json.contains("Teja"));
    }

    #[test]
    fn test_roof_edit_request_prompt() {
        let request = roof_edit_request(&sample_image(), "Metal Roof", "Charcoal Black", "Colonial");
        let value = serde_json::to_value(&request).expect("シリアライズ失敗");
        let prompt = value["contents"][0]["parts"][1]["text"].as_str().unwrap();
        assert!(prompt.contains("Charcoal Black Metal Roof"));
        assert!(prompt.contains("Colonial house"));
    }

    #[test]
    fn test_part_text_serialize() {
        let json = serde_json::to_string(&Part::text("Hello")).expect("シリアライズ失敗");
        assert_eq!(json, r#"{"text":"Hello"}"#);
    }

    // =============================================
    // レスポンス デシリアライズテスト
    // =============================================

    #[test]
    fn test_response_text_concatenates_parts() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "parts": [{"text": "{\"style\": "}, {"text": "\"Ranch\"}"}]
                }
            }]
        }"#;

        let response: GeminiResponse = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(response.text().as_deref(), Some(r#"{"style": "Ranch"}"#));
    }

    #[test]
    fn test_response_text_empty() {
        let response: GeminiResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert!(response.text().is_none());

        let response: GeminiResponse = serde_json::from_str("{}").unwrap();
        assert!(response.text().is_none());

        let json = r#"{"candidates": [{"content": {"parts": [{"text": "  "}]}}]}"#;
        let response: GeminiResponse = serde_json::from_str(json).unwrap();
        assert!(response.text().is_none());
    }

    #[test]
    fn test_first_inline_image_skips_text_parts() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "parts": [
                        {"text": "Here is your new roof."},
                        {"inlineData": {"mimeType": "image/png", "data": "iVBORw0KGgo="}},
                        {"inlineData": {"mimeType": "image/png", "data": "c2Vjb25k"}}
                    ]
                }
            }]
        }"#;

        let response: GeminiResponse = serde_json::from_str(json).expect("デシリアライズ失敗");
        let image = response.first_inline_image().expect("画像がない");
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.data, "iVBORw0KGgo=");
    }

    #[test]
    fn test_first_inline_image_missing() {
        let json = r#"{"candidates": [{"content": {"parts": [{"text": "I cannot edit this image."}]}}]}"#;
        let response: GeminiResponse = serde_json::from_str(json).unwrap();
        assert!(response.first_inline_image().is_none());
    }

    #[test]
    fn test_first_inline_image_snake_case_and_default_mime() {
        let json = r#"{"candidates": [{"content": {"parts": [{"inline_data": {"data": "AAAA"}}]}}]}"#;
        let response: GeminiResponse = serde_json::from_str(json).unwrap();
        let image = response.first_inline_image().unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.data, "AAAA");
    }

    #[test]
    fn test_candidate_without_content() {
        let json = r#"{"candidates": [{"finishReason": "SAFETY"}]}"#;
        let response: GeminiResponse = serde_json::from_str(json).unwrap();
        assert!(response.text().is_none());
        assert!(response.first_inline_image().is_none());
    }
}
