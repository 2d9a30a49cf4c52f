//! ワークフロー状態機械
//!
//! 状態: Idle → Analyzing → ReadyToEdit → Generating → Complete
//!
//! - Idle → Analyzing: 画像アップロード
//! - Analyzing → ReadyToEdit: 解析の成功・失敗どちらでも（失敗時はエラー表示付き）
//! - ReadyToEdit/Complete → Generating: 生成要求
//! - Generating → Complete（成功）/ ReadyToEdit（失敗、エラー表示付き）
//! - 任意の状態 → Idle: リセット
//!
//! AI呼び出し自体は行わず、呼び出しに必要なリクエストを払い出し、
//! 結果をチケット照合のうえで取り込む。リセット後や後続リクエストに
//! 追い越された結果は捨てられる。

use crate::catalog::{self, ColorOption, RoofOption};
use crate::error::{Error, Result};
use crate::i18n::ui_text;
use crate::types::{AnalysisResult, ImagePayload, Language, UiError};
use crate::upload::validate_payload;

/// 解析失敗時に生成プロンプトへ渡す様式
pub const FALLBACK_STYLE: &str = "standard";

/// 素材選択からインサイト取得までの待ち時間（ミリ秒）
pub const INSIGHT_DEBOUNCE_MS: u64 = 500;

/// ワークフローの状態
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WorkflowState {
    #[default]
    Idle,
    Analyzing,
    ReadyToEdit,
    Generating,
    Complete,
}

impl WorkflowState {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowState::Idle => "idle",
            WorkflowState::Analyzing => "analyzing",
            WorkflowState::ReadyToEdit => "ready_to_edit",
            WorkflowState::Generating => "generating",
            WorkflowState::Complete => "complete",
        }
    }
}

/// リクエストの発行番号
///
/// `epoch` はアップロード/リセットごと、`seq` は同種リクエストごとに進む。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    epoch: u64,
    seq: u64,
}

#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub ticket: Ticket,
    pub image: ImagePayload,
    pub language: Language,
}

#[derive(Debug, Clone)]
pub struct InsightRequest {
    pub ticket: Ticket,
    pub image: ImagePayload,
    pub style: String,
    pub material_id: &'static str,
    /// 表示言語での素材名
    pub material_name: &'static str,
    pub language: Language,
}

#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub ticket: Ticket,
    pub image: ImagePayload,
    /// 英語の素材名（生成プロンプトは常に英語）
    pub material_name: &'static str,
    /// 英語の色名
    pub color_name: &'static str,
    pub style: String,
}

/// 読み上げ用インサイト
#[derive(Debug, Clone, PartialEq)]
pub struct Insight {
    pub text: String,
    pub material_id: &'static str,
    pub style: String,
    pub language: Language,
}

/// アプリケーション状態の唯一の保持者
#[derive(Debug, Clone)]
pub struct Workflow {
    state: WorkflowState,
    language: Language,
    material: &'static RoofOption,
    color: &'static ColorOption,
    image: Option<ImagePayload>,
    analysis: Option<AnalysisResult>,
    generated: Option<ImagePayload>,
    error: Option<UiError>,
    insight: Option<Insight>,
    epoch: u64,
    analysis_seq: u64,
    insight_seq: u64,
    generation_seq: u64,
    /// 生成成功回数（新しい生成画像ごとに進む。リビール開始の判定に使う）
    render_count: u64,
}

impl Default for Workflow {
    fn default() -> Self {
        Self::new(Language::default())
    }
}

impl Workflow {
    pub fn new(language: Language) -> Self {
        Self {
            state: WorkflowState::Idle,
            language,
            material: catalog::default_material(),
            color: catalog::default_color(),
            image: None,
            analysis: None,
            generated: None,
            error: None,
            insight: None,
            epoch: 0,
            analysis_seq: 0,
            insight_seq: 0,
            generation_seq: 0,
            render_count: 0,
        }
    }

    pub fn state(&self) -> WorkflowState {
        self.state
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn material(&self) -> &'static RoofOption {
        self.material
    }

    pub fn color(&self) -> &'static ColorOption {
        self.color
    }

    pub fn image(&self) -> Option<&ImagePayload> {
        self.image.as_ref()
    }

    pub fn analysis(&self) -> Option<&AnalysisResult> {
        self.analysis.as_ref()
    }

    pub fn generated(&self) -> Option<&ImagePayload> {
        self.generated.as_ref()
    }

    pub fn error(&self) -> Option<UiError> {
        self.error
    }

    pub fn insight(&self) -> Option<&Insight> {
        self.insight.as_ref()
    }

    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    /// 現在の言語でのエラーバナー文言
    pub fn error_message(&self) -> Option<&'static str> {
        self.error
            .map(|e| ui_text(self.language).error_message(e))
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.state, WorkflowState::Analyzing | WorkflowState::Generating)
    }

    /// 生成ボタンが有効か
    pub fn can_generate(&self) -> bool {
        self.image.is_some()
            && matches!(self.state, WorkflowState::ReadyToEdit | WorkflowState::Complete)
    }

    /// インサイト取得の前提（画像と解析結果があり、解析中でない）
    pub fn wants_insight(&self) -> bool {
        self.image.is_some()
            && self.analysis.is_some()
            && !matches!(self.state, WorkflowState::Idle | WorkflowState::Analyzing)
    }

    /// 画像を受け付けて解析を開始する
    ///
    /// 検証エラーの場合は状態を一切変えない。Idle 以外からは受け付けない
    /// （再アップロードはリセットしてから行う）。
    pub fn select_image(&mut self, image: ImagePayload) -> Result<AnalysisRequest> {
        validate_payload(&image)?;

        if self.state != WorkflowState::Idle {
            return Err(Error::InvalidState(format!(
                "image upload is not allowed while {}",
                self.state.as_str()
            )));
        }

        self.epoch += 1;
        self.analysis_seq += 1;
        self.image = Some(image.clone());
        self.analysis = None;
        self.generated = None;
        self.insight = None;
        self.error = None;
        self.state = WorkflowState::Analyzing;

        Ok(AnalysisRequest {
            ticket: Ticket { epoch: self.epoch, seq: self.analysis_seq },
            image,
            language: self.language,
        })
    }

    /// 解析結果を取り込む。取り込んだ場合 true
    ///
    /// 失敗しても ReadyToEdit へ進める（利用者が行き詰まらないように）。
    pub fn finish_analysis(&mut self, ticket: Ticket, outcome: Result<AnalysisResult>) -> bool {
        if ticket != (Ticket { epoch: self.epoch, seq: self.analysis_seq })
            || self.state != WorkflowState::Analyzing
        {
            return false;
        }

        match outcome {
            Ok(analysis) => self.analysis = Some(analysis),
            Err(_) => self.error = Some(UiError::Analysis),
        }
        self.state = WorkflowState::ReadyToEdit;
        true
    }

    /// 素材を選択する。インサイトの再取得が必要なら true
    pub fn select_material(&mut self, id: &str) -> Result<bool> {
        let material = catalog::material(id)?;
        let changed = material.id != self.material.id;
        self.material = material;
        Ok(changed && self.wants_insight())
    }

    pub fn select_color(&mut self, id: &str) -> Result<()> {
        self.color = catalog::color(id)?;
        Ok(())
    }

    /// 表示言語を切り替える。インサイトの再取得が必要なら true
    pub fn set_language(&mut self, language: Language) -> bool {
        let changed = language != self.language;
        self.language = language;
        changed && self.wants_insight()
    }

    /// インサイト取得リクエストを発行する（デバウンス満了時に呼ぶ）
    ///
    /// 発行のたびに以前のインサイトリクエストは無効になる。
    pub fn insight_request(&mut self) -> Option<InsightRequest> {
        if !self.wants_insight() {
            return None;
        }
        let image = self.image.clone()?;
        let style = self.analysis.as_ref()?.style.clone();

        self.insight_seq += 1;
        Some(InsightRequest {
            ticket: Ticket { epoch: self.epoch, seq: self.insight_seq },
            image,
            style,
            material_id: self.material.id,
            material_name: self.material.display_name(self.language),
            language: self.language,
        })
    }

    /// インサイトを取り込む。最新リクエストの結果でなければ捨てる
    pub fn apply_insight(&mut self, request: &InsightRequest, text: String) -> bool {
        if request.ticket != (Ticket { epoch: self.epoch, seq: self.insight_seq }) {
            return false;
        }
        self.insight = Some(Insight {
            text,
            material_id: request.material_id,
            style: request.style.clone(),
            language: request.language,
        });
        true
    }

    /// 生成を開始する。前提を満たさなければ何もせず None
    pub fn begin_generation(&mut self) -> Option<GenerationRequest> {
        if !self.can_generate() {
            return None;
        }
        let image = self.image.clone()?;
        let style = self
            .analysis
            .as_ref()
            .map(|a| a.style.clone())
            .unwrap_or_else(|| FALLBACK_STYLE.to_string());

        self.generation_seq += 1;
        self.error = None;
        self.state = WorkflowState::Generating;

        Some(GenerationRequest {
            ticket: Ticket { epoch: self.epoch, seq: self.generation_seq },
            image,
            material_name: self.material.name,
            color_name: self.color.name,
            style,
        })
    }

    /// 生成結果を取り込む。取り込んだ場合 true
    pub fn finish_generation(&mut self, ticket: Ticket, outcome: Result<ImagePayload>) -> bool {
        if ticket != (Ticket { epoch: self.epoch, seq: self.generation_seq })
            || self.state != WorkflowState::Generating
        {
            return false;
        }

        match outcome {
            Ok(image) => {
                self.generated = Some(image);
                self.render_count += 1;
                self.state = WorkflowState::Complete;
            }
            Err(_) => {
                self.error = Some(UiError::Generation);
                self.state = WorkflowState::ReadyToEdit;
            }
        }
        true
    }

    /// 無条件で Idle に戻す。選択中の素材・色と言語は保持する
    pub fn reset(&mut self) {
        self.epoch += 1;
        self.state = WorkflowState::Idle;
        self.image = None;
        self.analysis = None;
        self.generated = None;
        self.insight = None;
        self.error = None;
    }
}
