//! 画像ファイルの取り込み
//!
//! 拡張子から MIME タイプを決め、サイズ上限を確認してから Base64 化する。

use crate::error::{Result, RoofAiError};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{DynamicImage, ImageFormat};
use roof_ai_common::upload::validate_upload;
use roof_ai_common::ImagePayload;
use std::path::Path;
use tracing::debug;

/// 拡張子から MIME タイプを推定（画像でなければ None）
pub fn mime_type_for(path: &Path) -> Option<&'static str> {
    ImageFormat::from_path(path).ok().map(|f| f.to_mime_type())
}

/// 画像ファイルを読み込んで ImagePayload にする
pub fn load_image(path: &Path) -> Result<ImagePayload> {
    if !path.is_file() {
        return Err(RoofAiError::FileNotFound(path.display().to_string()));
    }

    let size = std::fs::metadata(path)?.len();
    let mime_type = mime_type_for(path).unwrap_or("application/octet-stream");
    validate_upload(mime_type, size).map_err(roof_ai_common::Error::from)?;

    let bytes = std::fs::read(path)?;
    debug!(path = %path.display(), mime_type, size, "image loaded");

    Ok(ImagePayload::new(mime_type, STANDARD.encode(bytes)))
}

/// Base64 を生バイトに戻す
pub fn decode_bytes(payload: &ImagePayload) -> Result<Vec<u8>> {
    STANDARD
        .decode(payload.data.as_bytes())
        .map_err(|e| RoofAiError::ImageLoad(format!("base64 decode failed: {}", e)))
}

/// ImagePayload を画像としてデコード
pub fn decode_image(payload: &ImagePayload) -> Result<DynamicImage> {
    let bytes = decode_bytes(payload)?;
    image::load_from_memory(&bytes).map_err(|e| RoofAiError::ImageLoad(e.to_string()))
}
