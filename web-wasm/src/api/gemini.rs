//! Gemini API連携（ブラウザ fetch 版）
//!
//! リクエスト/レスポンスの形は roof_ai_common::gemini と共有し、
//! ここでは window.fetch による送受信だけを持つ。

use roof_ai_common::gateway::{
    analysis_from_response, generated_image_from_response, resolve_insight,
};
use roof_ai_common::gemini::{
    analysis_request, endpoint_url, insight_request, roof_edit_request, GeminiRequest,
    GeminiResponse, DEFAULT_ANALYSIS_MODEL, DEFAULT_API_BASE_URL, DEFAULT_IMAGE_MODEL,
};
use roof_ai_common::{AnalysisResult, Error, ImagePayload, Language, Result, RoofAi};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

/// ブラウザ用 Gemini クライアント
#[derive(Clone)]
pub struct GeminiWeb {
    api_key: String,
}

impl GeminiWeb {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    /// APIキーはURLエンコードして `?key=` で渡す
    fn request_url(&self, model: &str) -> String {
        let key = String::from(js_sys::encode_uri_component(self.api_key.trim()));
        format!("{}?key={}", endpoint_url(DEFAULT_API_BASE_URL, model), key)
    }

    /// generateContent 呼び出し（共通処理）
    async fn generate_content(
        &self,
        model: &str,
        request: &GeminiRequest,
    ) -> std::result::Result<GeminiResponse, String> {
        let body = serde_json::to_string(request).map_err(|e| e.to_string())?;

        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::Cors);
        opts.set_body(&JsValue::from_str(&body));

        let request =
            Request::new_with_str_and_init(&self.request_url(model), &opts).map_err(js_error)?;
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(js_error)?;

        let window = web_sys::window().ok_or("window is not available")?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(js_error)?;
        let resp: Response = resp_value.dyn_into().map_err(js_error)?;

        if !resp.ok() {
            return Err(format!("API error: {}", resp.status()));
        }

        let json = JsFuture::from(resp.json().map_err(js_error)?)
            .await
            .map_err(js_error)?;
        serde_wasm_bindgen::from_value(json).map_err(|e| e.to_string())
    }
}

fn js_error(value: JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{:?}", value))
}

impl RoofAi for GeminiWeb {
    async fn analyze_image(
        &self,
        image: &ImagePayload,
        language: Language,
    ) -> Result<AnalysisResult> {
        let request = analysis_request(image, language);
        let response = self
            .generate_content(DEFAULT_ANALYSIS_MODEL, &request)
            .await
            .map_err(Error::Analysis)?;
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
            .generate_content(DEFAULT_ANALYSIS_MODEL, &request)
            .await
            .map(|response| response.text());
        if let Err(e) = &outcome {
            leptos::logging::warn!("insight request failed: {}", e);
        }
        resolve_insight(outcome, material_name, language)
    }

    async fn generate_roof_image(
        &self,
        image: &ImagePayload,
        material_name: &str,
        color_name: &str,
        style: &str,
    ) -> Result<ImagePayload> {
        let request = roof_edit_request(image, material_name, color_name, style);
        let response = self
            .generate_content(DEFAULT_IMAGE_MODEL, &request)
            .await
            .map_err(Error::Generation)?;
        generated_image_from_response(&response)
    }
}
