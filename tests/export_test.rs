//! 書き出しの統合テスト
//!
//! 生成画像のPNG保存と実行レポート

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{ImageFormat, Rgb, RgbImage};
use roof_ai_common::{AnalysisResult, ImagePayload, Language, Workflow};
use roof_ai_rust::error::RoofAiError;
use roof_ai_rust::export::{save_render, RunReport, EXPORT_FILE_NAME, REPORT_FILE_NAME};
use std::io::Cursor;
use tempfile::tempdir;

fn encoded(format: ImageFormat, mime_type: &str) -> ImagePayload {
    let img = RgbImage::from_pixel(6, 4, Rgb([45, 45, 45]));
    let mut bytes = Cursor::new(Vec::new());
    img.write_to(&mut bytes, format).expect("encode failed");
    ImagePayload::new(mime_type, STANDARD.encode(bytes.into_inner()))
}

#[test]
fn test_save_render_png() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = save_render(&encoded(ImageFormat::Png, "image/png"), dir.path()).unwrap();

    assert_eq!(path.file_name().unwrap(), EXPORT_FILE_NAME);
    let saved = image::open(&path).unwrap();
    assert_eq!((saved.width(), saved.height()), (6, 4));
}

#[test]
fn test_save_render_converts_jpeg_to_png() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = save_render(&encoded(ImageFormat::Jpeg, "image/jpeg"), dir.path()).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Png);
}

#[test]
fn test_save_render_invalid_data() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = save_render(&ImagePayload::new("image/png", "bm90IGFuIGltYWdl"), dir.path());
    assert!(matches!(result, Err(RoofAiError::ImageLoad(_))));
    assert!(!dir.path().join(EXPORT_FILE_NAME).exists());
}

#[test]
fn test_run_report() {
    let dir = tempdir().expect("Failed to create temp dir");

    let mut workflow = Workflow::new(Language::Es);
    let request = workflow
        .select_image(ImagePayload::new("image/jpeg", "/9j/4AAQSkZJRg=="))
        .unwrap();
    workflow.finish_analysis(
        request.ticket,
        Ok(AnalysisResult {
            style: "Colonial".into(),
            recommendations: vec!["Tile".into(), "Slate".into(), "Shingle".into()],
            reasoning: "...".into(),
        }),
    );
    workflow.select_material("metal-roof").unwrap();
    workflow.select_color("charcoal").unwrap();

    let render = dir.path().join(EXPORT_FILE_NAME);
    let report = RunReport::from_workflow(&workflow, Some(&render));
    let path = report.save(dir.path()).unwrap();
    assert_eq!(path.file_name().unwrap(), REPORT_FILE_NAME);

    let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["language"], "es");
    assert_eq!(json["state"], "ready_to_edit");
    assert_eq!(json["style"], "Colonial");
    assert_eq!(json["material_name"], "Metal");
    assert_eq!(json["color_name"], "Negro Carbón");
    assert_eq!(json["color_hex"], "#2D2D2D");
    assert!(json["error"].is_null());
    assert!(json["created_at"].is_string());
}
