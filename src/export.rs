//! 生成画像と実行レポートの書き出し

use crate::error::{Result, RoofAiError};
use crate::intake::decode_image;
use chrono::{DateTime, Local};
use image::ImageFormat;
use roof_ai_common::{ImagePayload, Workflow};
use serde::Serialize;
use std::path::{Path, PathBuf};

pub use roof_ai_common::types::EXPORT_FILE_NAME;

pub const REPORT_FILE_NAME: &str = "roofai-report.json";

/// 生成画像を PNG として保存する（JPEG等で返っても PNG に変換）
pub fn save_render(image: &ImagePayload, output_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)?;
    let path = output_dir.join(EXPORT_FILE_NAME);

    let decoded = decode_image(image)?;
    decoded
        .save_with_format(&path, ImageFormat::Png)
        .map_err(|e| RoofAiError::Export(format!("{}: {}", path.display(), e)))?;
    Ok(path)
}

/// 実行レポート
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub created_at: DateTime<Local>,
    pub language: String,
    pub state: String,
    pub style: Option<String>,
    pub recommendations: Vec<String>,
    pub reasoning: Option<String>,
    pub material_id: String,
    pub material_name: String,
    pub color_id: String,
    pub color_name: String,
    pub color_hex: String,
    pub insight: Option<String>,
    pub error: Option<String>,
    pub render_path: Option<String>,
}

impl RunReport {
    pub fn from_workflow(workflow: &Workflow, render_path: Option<&Path>) -> Self {
        let language = workflow.language();
        let material = workflow.material();
        let color = workflow.color();
        let analysis = workflow.analysis();

        Self {
            created_at: Local::now(),
            language: language.code().to_string(),
            state: workflow.state().as_str().to_string(),
            style: analysis.map(|a| a.style.clone()),
            recommendations: analysis.map(|a| a.recommendations.clone()).unwrap_or_default(),
            reasoning: analysis.map(|a| a.reasoning.clone()),
            material_id: material.id.to_string(),
            material_name: material.display_name(language).to_string(),
            color_id: color.id.to_string(),
            color_name: color.display_name(language).to_string(),
            color_hex: color.hex.to_string(),
            insight: workflow.insight().map(|i| i.text.clone()),
            error: workflow.error_message().map(str::to_string),
            render_path: render_path.map(|p| p.display().to_string()),
        }
    }

    pub fn save(&self, output_dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(output_dir)?;
        let path = output_dir.join(REPORT_FILE_NAME);
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, json)?;
        Ok(path)
    }
}
