//! AIゲートウェイの共通インターフェース
//!
//! ネイティブ（reqwest）とブラウザ（fetch）の両実装がこのトレイトを満たす。
//! どの操作もリトライせず、1回のリクエスト/レスポンスで完結する。

use std::future::Future;

use crate::error::{Error, Result};
use crate::gemini::GeminiResponse;
use crate::parser::parse_analysis_response;
use crate::prompts::{fallback_insight, FallbackReason};
use crate::types::{AnalysisResult, ImagePayload, Language};

pub trait RoofAi {
    /// 住宅写真の建築様式と推奨屋根材を取得する
    fn analyze_image(
        &self,
        image: &ImagePayload,
        language: Language,
    ) -> impl Future<Output = Result<AnalysisResult>>;

    /// 屋根材の機能的メリットの解説文を取得する（失敗時は定型文、エラーにしない）
    fn get_material_insight(
        &self,
        image: &ImagePayload,
        style: &str,
        material_name: &str,
        language: Language,
    ) -> impl Future<Output = String>;

    /// 屋根だけを差し替えた画像を生成する
    fn generate_roof_image(
        &self,
        image: &ImagePayload,
        material_name: &str,
        color_name: &str,
        style: &str,
    ) -> impl Future<Output = Result<ImagePayload>>;
}

/// 解析レスポンスを AnalysisResult に変換
pub fn analysis_from_response(response: &GeminiResponse) -> Result<AnalysisResult> {
    let text = response
        .text()
        .ok_or_else(|| Error::Analysis("No analysis received from AI.".into()))?;
    parse_analysis_response(&text)
}

/// インサイトの通信結果を読み上げ用テキストに確定させる
///
/// `Ok(None)` は空レスポンス、`Err` は通信失敗として別々の定型文にする。
pub fn resolve_insight<E>(
    outcome: std::result::Result<Option<String>, E>,
    material_name: &str,
    language: Language,
) -> String {
    match outcome {
        Ok(Some(text)) => text.trim().to_string(),
        Ok(None) => fallback_insight(material_name, language, FallbackReason::EmptyResponse),
        Err(_) => fallback_insight(material_name, language, FallbackReason::RequestFailed),
    }
}

/// 生成レスポンスから最初の画像を取り出す
pub fn generated_image_from_response(response: &GeminiResponse) -> Result<ImagePayload> {
    response
        .first_inline_image()
        .ok_or_else(|| Error::Generation("No image generated by the model.".into()))
}
