//! APIレスポンスパーサー
//!
//! 解析レスポンスのテキストからJSON部分を抽出し、AnalysisResult にする

use crate::error::{Error, Result};
use crate::types::AnalysisResult;

/// APIレスポンスからJSON部分を抽出
///
/// 抽出優先順位:
/// 1. ```json ... ``` ブロック
/// 2. 生の {...} オブジェクト
/// 3. エラー
///
/// # Examples
/// ```
/// use roof_ai_common::extract_json;
///
/// let response = "Result: {\"style\": \"Ranch\"}";
/// let json = extract_json(response).unwrap();
/// assert_eq!(json, "{\"style\": \"Ranch\"}");
/// ```
pub fn extract_json(response: &str) -> Result<&str> {
    // ```json ... ``` ブロックを探す
    if let Some(start_marker) = response.find("```json") {
        let start = start_marker + 7; // "```json" の長さ
        if let Some(end_offset) = response[start..].find("```") {
            let end = start + end_offset;
            return Ok(response[start..end].trim());
        }
    }

    // 生の {...} を探す
    if let Some(start) = response.find('{') {
        if let Some(end) = response.rfind('}') {
            if end >= start {
                return Ok(&response[start..=end]);
            }
        }
    }

    Err(Error::Parse("JSON object not found".into()))
}

/// 解析レスポンスをパース
///
/// テキストが空、JSONが見つからない、必須フィールドが欠けている場合は
/// いずれも `Error::Analysis` になる。
pub fn parse_analysis_response(response: &str) -> Result<AnalysisResult> {
    if response.trim().is_empty() {
        return Err(Error::Analysis("No analysis received from AI.".into()));
    }

    let json_str = extract_json(response).map_err(|e| Error::Analysis(e.to_string()))?;
    let result: AnalysisResult = serde_json::from_str(json_str.trim())
        .map_err(|e| Error::Analysis(format!("malformed analysis JSON: {}", e)))?;

    if result.style.trim().is_empty() {
        return Err(Error::Analysis("analysis is missing the architectural style".into()));
    }

    Ok(result)
}
