//! Gemini API クライアント（reqwest）
//!
//! 共通の RoofAi トレイトを実装する。リトライ・キャッシュはしない。

use crate::config::Config;
use crate::error::{Result, RoofAiError};
use roof_ai_common::gateway::{analysis_from_response, generated_image_from_response, resolve_insight};
use roof_ai_common::gemini::{
    analysis_request, endpoint_url, insight_request, roof_edit_request, GeminiRequest, GeminiResponse,
};
use roof_ai_common::{AnalysisResult, Error as CommonError, ImagePayload, Language, RoofAi};
use std::time::Duration;
use tracing::{debug, warn};

/// エラーメッセージに含めるレスポンス本文の上限
const MAX_ERROR_BODY_LEN: usize = 300;

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    analysis_model: String,
    image_model: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.max(1)))
            .build()
            .map_err(|e| RoofAiError::ApiCall(e.without_url().to_string()))?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: config.api_base_url.clone(),
            analysis_model: config.analysis_model.clone(),
            image_model: config.image_model.clone(),
        })
    }

    /// 設定（と環境変数）からクライアントを作る
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.get_api_key()?;
        Self::new(api_key, config)
    }

    /// generateContent を1回呼ぶ
    pub async fn generate_content(&self, model: &str, request: &GeminiRequest) -> Result<GeminiResponse> {
        let url = endpoint_url(&self.base_url, model);
        debug!(model, "POST generateContent");

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(request)
            .send()
            .await
            .map_err(|e| RoofAiError::ApiCall(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body: String = body.chars().take(MAX_ERROR_BODY_LEN).collect();
            return Err(RoofAiError::ApiCall(format!("status {}: {}", status, body)));
        }

        let parsed = response
            .json::<GeminiResponse>()
            .await
            .map_err(|e| RoofAiError::ApiCall(format!("invalid response body: {}", e.without_url())))?;

        debug!(candidates = parsed.candidates.len(), "generateContent done");
        Ok(parsed)
    }
}

impl RoofAi for GeminiClient {
    async fn analyze_image(
        &self,
        image: &ImagePayload,
        language: Language,
    ) -> roof_ai_common::Result<AnalysisResult> {
        let request = analysis_request(image, language);
        let response = self
            .generate_content(&self.analysis_model, &request)
            .await
            .map_err(|e| CommonError::Analysis(e.to_string()))?;
        analysis_from_response(&response)
    }

    async fn get_material_insight(
        &self,
        image: &ImagePayload,
        style: &str,
        material_name: &str,
        language: Language,
    ) -> String {
        let request = insight_request(image, style, material_name, language);
        let outcome = self
            .generate_content(&self.analysis_model, &request)
            .await
            .map(|r| r.text());

        if let Err(e) = &outcome {
            warn!("insight request failed, using fallback text: {}", e);
        }
        resolve_insight(outcome, material_name, language)
    }

    async fn generate_roof_image(
        &self,
        image: &ImagePayload,
        material_name: &str,
        color_name: &str,
        style: &str,
    ) -> roof_ai_common::Result<ImagePayload> {
        let request = roof_edit_request(image, material_name, color_name, style);
        let response = self
            .generate_content(&self.image_model, &request)
            .await
            .map_err(|e| CommonError::Generation(e.to_string()))?;
        generated_image_from_response(&response)
    }
}
