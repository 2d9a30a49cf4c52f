//! Roof AI Common Library
//!
//! CLIとWeb(WASM)で共有される型・状態機械・ユーティリティ

pub mod types;
pub mod error;
pub mod catalog;
pub mod i18n;
pub mod prompts;
pub mod parser;
pub mod gemini;
pub mod gateway;
pub mod upload;
pub mod workflow;
pub mod narration;
pub mod reveal;

pub use types::{AnalysisResult, ImagePayload, Language, UiError, EXPORT_FILE_NAME};
pub use error::{Error, Result};
pub use catalog::{ColorOption, RoofOption, ROOF_COLORS, ROOF_MATERIALS};
pub use i18n::{ui_text, UiText};
pub use parser::{extract_json, parse_analysis_response};
pub use gateway::RoofAi;
pub use upload::{validate_upload, UploadRejection, MAX_UPLOAD_BYTES};
pub use workflow::{
    AnalysisRequest, GenerationRequest, Insight, InsightRequest, Ticket, Workflow, WorkflowState,
};
pub use narration::{Narrator, SpeechEngine, SpeechEvent, Utterance, Voice};
pub use reveal::{RevealAnimation, RevealFrame, ViewMode, Viewport};
