//! アップロード受付ルール
//!
//! - MIMEタイプが "image/" で始まること
//! - サイズが25MB以下であること（画面の表示と一致させる）
//! - Data URL ⇔ ImagePayload の変換

use crate::error::Error;
use crate::i18n::UiText;
use crate::types::ImagePayload;

/// アップロード上限（25MB）
pub const MAX_UPLOAD_BYTES: u64 = 25 * 1024 * 1024;

/// 受付拒否の理由
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadRejection {
    NotAnImage { mime_type: String },
    TooLarge { size: u64 },
}

impl UploadRejection {
    /// 利用者に出すアラート文
    pub fn message(&self, text: &UiText) -> &'static str {
        match self {
            UploadRejection::NotAnImage { .. } => text.invalid_file,
            UploadRejection::TooLarge { .. } => text.file_too_large,
        }
    }
}

impl std::fmt::Display for UploadRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadRejection::NotAnImage { mime_type } => {
                write!(f, "not an image file (type '{}')", mime_type)
            }
            UploadRejection::TooLarge { size } => {
                write!(f, "file is {} bytes, limit is {} bytes", size, MAX_UPLOAD_BYTES)
            }
        }
    }
}

impl From<UploadRejection> for Error {
    fn from(rejection: UploadRejection) -> Self {
        Error::Validation(rejection.to_string())
    }
}

pub fn is_image_mime(mime_type: &str) -> bool {
    mime_type.starts_with("image/")
}

/// ファイル選択時の検証（状態遷移の前に行う）
pub fn validate_upload(mime_type: &str, size: u64) -> Result<(), UploadRejection> {
    if !is_image_mime(mime_type) {
        return Err(UploadRejection::NotAnImage {
            mime_type: mime_type.to_string(),
        });
    }
    if size > MAX_UPLOAD_BYTES {
        return Err(UploadRejection::TooLarge { size });
    }
    Ok(())
}

/// Base64長から元のバイト数を求める（パディング考慮）
pub fn decoded_len(base64: &str) -> u64 {
    let len = base64.len() as u64;
    let padding = base64.bytes().rev().take_while(|&b| b == b'=').count() as u64;
    (len / 4 * 3).saturating_sub(padding.min(2))
}

/// ImagePayload 単体の検証（ワークフローに入る直前の最終チェック）
pub fn validate_payload(payload: &ImagePayload) -> Result<(), UploadRejection> {
    validate_upload(&payload.mime_type, decoded_len(&payload.data))
}

/// Data URLからBase64データ部分を抽出
///
/// # Arguments
/// * `data_url` - "data:image/jpeg;base64,/9j/4AAQ..." 形式のData URL
///
/// # Returns
/// Base64エンコードされたデータ部分、または抽出失敗時はNone
pub fn extract_base64_from_data_url(data_url: &str) -> Option<&str> {
    data_url.split(',').nth(1)
}

/// Data URLからMIMEタイプを抽出
///
/// # Returns
/// MIMEタイプ（例: "image/jpeg"）、抽出失敗時はNone
pub fn extract_mime_type_from_data_url(data_url: &str) -> Option<&str> {
    let header = data_url.strip_prefix("data:")?;
    let mime = header.split([';', ',']).next()?;
    if mime.is_empty() {
        None
    } else {
        Some(mime)
    }
}

/// FileReader の readAsDataURL 結果を ImagePayload にする
pub fn payload_from_data_url(data_url: &str) -> Option<ImagePayload> {
    let mime_type = extract_mime_type_from_data_url(data_url)?;
    let data = extract_base64_from_data_url(data_url)?;
    Some(ImagePayload::new(mime_type, data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::ui_text;
    use crate::types::Language;

    // =============================================
    // 検証テスト
    // =============================================

    #[test]
    fn test_validate_accepts_images() {
        assert!(validate_upload("image/jpeg", 1024).is_ok());
        assert!(validate_upload("image/png", MAX_UPLOAD_BYTES).is_ok());
        assert!(validate_upload("image/webp", 0).is_ok());
    }

    #[test]
    fn test_validate_rejects_non_images() {
        let err = validate_upload("application/pdf", 10).unwrap_err();
        assert_eq!(
            err,
            UploadRejection::NotAnImage { mime_type: "application/pdf".to_string() }
        );
        assert!(validate_upload("", 10).is_err());
        assert!(validate_upload("text/image", 10).is_err());
    }

    #[test]
    fn test_validate_rejects_oversize() {
        let err = validate_upload("image/jpeg", MAX_UPLOAD_BYTES + 1).unwrap_err();
        assert!(matches!(err, UploadRejection::TooLarge { .. }));
    }

    #[test]
    fn test_rejection_message_localized() {
        let err = UploadRejection::NotAnImage { mime_type: "text/plain".into() };
        assert_eq!(err.message(ui_text(Language::En)), "Please upload an image file");
        assert_eq!(err.message(ui_text(Language::Es)), "Por favor suba un archivo de imagen");
    }

    #[test]
    fn test_rejection_into_validation_error() {
        let err: Error = UploadRejection::TooLarge { size: 1 }.into();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_decoded_len() {
        assert_eq!(decoded_len("QUJD"), 3); // "ABC"
        assert_eq!(decoded_len("QUI="), 2); // "AB"
        assert_eq!(decoded_len("QQ=="), 1); // "A"
        assert_eq!(decoded_len(""), 0);
    }

    // =============================================
    // Data URL抽出テスト
    // =============================================

    #[test]
    fn test_extract_base64_from_data_url_jpeg() {
        let data_url = "data:image/jpeg;base64,/9j/4AAQSkZJRg==";
        assert_eq!(extract_base64_from_data_url(data_url), Some("/9j/4AAQSkZJRg=="));
    }

    #[test]
    fn test_extract_base64_from_data_url_invalid() {
        assert_eq!(extract_base64_from_data_url("not a data url"), None);
        assert_eq!(extract_base64_from_data_url(""), None);
    }

    #[test]
    fn test_extract_mime_type() {
        assert_eq!(extract_mime_type_from_data_url("data:image/png;base64,iVBO"), Some("image/png"));
        assert_eq!(extract_mime_type_from_data_url("data:image/webp;base64,UklGR"), Some("image/webp"));
        assert_eq!(extract_mime_type_from_data_url("invalid"), None);
        assert_eq!(extract_mime_type_from_data_url("data:;base64,AAAA"), None);
    }

    #[test]
    fn test_payload_from_data_url() {
        let payload = payload_from_data_url("data:image/jpeg;base64,/9j/4AAQ").unwrap();
        assert_eq!(payload.mime_type, "image/jpeg");
        assert_eq!(payload.data, "/9j/4AAQ");
        assert_eq!(payload.to_data_url(), "data:image/jpeg;base64,/9j/4AAQ");
    }
}
