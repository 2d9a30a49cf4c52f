//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use roof_ai_rust::error::RoofAiError;
use roof_ai_rust::intake;
use std::path::Path;
use tempfile::tempdir;

/// 存在しないファイルを読み込んだ場合
#[test]
fn test_load_nonexistent_image() {
    let result = intake::load_image(Path::new("/nonexistent/path/house.jpg"));
    assert!(matches!(result, Err(RoofAiError::FileNotFound(_))));
}

/// ディレクトリを指定した場合
#[test]
fn test_load_directory() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = intake::load_image(dir.path());
    assert!(matches!(result, Err(RoofAiError::FileNotFound(_))));
}

/// 画像以外のファイルは検証エラー
#[test]
fn test_load_pdf_rejected() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("plan.pdf");
    std::fs::write(&path, b"%PDF-1.4").unwrap();

    let err = intake::load_image(&path).unwrap_err();
    assert!(matches!(
        err,
        RoofAiError::Common(roof_ai_common::Error::Validation(_))
    ));
    assert!(err.to_string().contains("not an image"));
}

/// RoofAiErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        RoofAiError::Config("テスト設定エラー".to_string()),
        RoofAiError::FileNotFound("house.jpg".to_string()),
        RoofAiError::ImageLoad("壊れた画像".to_string()),
        RoofAiError::ApiCall("status 500".to_string()),
        RoofAiError::Prompt("中断".to_string()),
        RoofAiError::Export("書き込み不可".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "Error display should not be empty");
    }
}

/// APIキー未設定のメッセージに設定方法が含まれる
#[test]
fn test_missing_api_key_message() {
    let message = RoofAiError::MissingApiKey.to_string();
    assert!(message.contains("roof-ai config --set-api-key"));
    assert!(message.contains("GEMINI_API_KEY"));
}

/// 共通エラーはそのまま表示される
#[test]
fn test_common_error_is_transparent() {
    let err: RoofAiError = roof_ai_common::Error::UnknownOption("gold-roof".into()).into();
    assert_eq!(err.to_string(), "Unknown option: gold-roof");
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let err: RoofAiError = io.into();
    assert!(matches!(err, RoofAiError::Io(_)));
}
