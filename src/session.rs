//! セッション（ワークフロー + AI呼び出し + ナレーション + デバウンス）
//!
//! ワークフローの状態遷移に合わせてゲートウェイを呼び、結果を取り込み、
//! 読み上げとリビールの開始を判断する。

use crate::debounce::{Debouncer, INSIGHT_DEBOUNCE};
use crate::error::Result;
use roof_ai_common::{
    ImagePayload, Language, Narrator, RoofAi, SpeechEngine, Viewport, Workflow, WorkflowState,
};
use std::time::Duration;
use tracing::{debug, info, warn};

pub struct Session<A: RoofAi, E: SpeechEngine> {
    ai: A,
    workflow: Workflow,
    narrator: Narrator<E>,
    viewport: Viewport,
    insight_timer: Debouncer<()>,
}

impl<A: RoofAi, E: SpeechEngine> Session<A, E> {
    pub fn new(ai: A, engine: E, language: Language) -> Self {
        Self::with_debounce(ai, engine, language, INSIGHT_DEBOUNCE)
    }

    pub fn with_debounce(ai: A, engine: E, language: Language, delay: Duration) -> Self {
        Self {
            ai,
            workflow: Workflow::new(language),
            narrator: Narrator::new(engine, language),
            viewport: Viewport::new(),
            insight_timer: Debouncer::new(delay),
        }
    }

    pub fn ai(&self) -> &A {
        &self.ai
    }

    pub fn workflow(&self) -> &Workflow {
        &self.workflow
    }

    pub fn narrator(&self) -> &Narrator<E> {
        &self.narrator
    }

    /// 読み上げエンジンからのイベントを流し込む時に使う
    pub fn narrator_mut(&mut self) -> &mut Narrator<E> {
        &mut self.narrator
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn insight_pending(&self) -> bool {
        self.insight_timer.is_pending()
    }

    /// 画像をアップロードして解析まで行う
    ///
    /// 検証エラーは Err。解析の失敗はワークフローのエラー表示になり Ok を返す。
    pub async fn upload(&mut self, image: ImagePayload) -> Result<WorkflowState> {
        let request = self.workflow.select_image(image)?;
        info!(mime_type = %request.image.mime_type, "analyzing image");

        let outcome = self.ai.analyze_image(&request.image, request.language).await;
        match &outcome {
            Ok(analysis) => info!(style = %analysis.style, "analysis complete"),
            Err(e) => warn!("analysis failed: {}", e),
        }

        if self.workflow.finish_analysis(request.ticket, outcome) && self.workflow.wants_insight() {
            self.insight_timer.schedule(());
        }
        Ok(self.workflow.state())
    }

    pub fn select_material(&mut self, id: &str) -> Result<()> {
        let refetch = self.workflow.select_material(id)?;
        if refetch {
            self.narrator.cancel();
            self.insight_timer.schedule(());
        }
        debug!(material = id, refetch, "material selected");
        Ok(())
    }

    pub fn select_color(&mut self, id: &str) -> Result<()> {
        self.workflow.select_color(id)?;
        debug!(color = id, "color selected");
        Ok(())
    }

    pub fn set_language(&mut self, language: Language) {
        let refetch = self.workflow.set_language(language);
        self.narrator.set_language(language);
        if refetch {
            self.insight_timer.schedule(());
        }
    }

    pub fn toggle_language(&mut self) -> Language {
        let language = self.workflow.language().toggled();
        self.set_language(language);
        language
    }

    pub fn toggle_audio(&mut self) -> bool {
        self.narrator.toggle_audio()
    }

    /// 予約中のインサイト取得が発火するのを待ち、取得して読み上げる
    pub async fn settle_insight(&mut self) -> Option<String> {
        self.insight_timer.fired().await?;
        self.fetch_insight().await
    }

    /// インサイトを即時取得する（最新でなければ捨てる）
    pub async fn fetch_insight(&mut self) -> Option<String> {
        let request = self.workflow.insight_request()?;
        self.narrator.cancel();
        debug!(material = request.material_id, style = %request.style, "fetching insight");

        let text = self
            .ai
            .get_material_insight(
                &request.image,
                &request.style,
                request.material_name,
                request.language,
            )
            .await;

        if !self.workflow.apply_insight(&request, text.clone()) {
            debug!("stale insight dropped");
            return None;
        }
        self.narrator.insight_arrived(&text);
        Some(text)
    }

    /// 屋根の再レンダリング。前提を満たさない場合は何もせず false
    pub async fn generate(&mut self) -> bool {
        let Some(request) = self.workflow.begin_generation() else {
            debug!(state = self.workflow.state().as_str(), "generate ignored");
            return false;
        };
        self.narrator.cancel();
        info!(
            material = request.material_name,
            color = request.color_name,
            style = %request.style,
            "generating roof image"
        );

        let outcome = self
            .ai
            .generate_roof_image(
                &request.image,
                request.material_name,
                request.color_name,
                &request.style,
            )
            .await;
        if let Err(e) = &outcome {
            warn!("generation failed: {}", e);
        }

        self.workflow.finish_generation(request.ticket, outcome);
        if self.workflow.state() == WorkflowState::Complete {
            self.viewport.on_generated(self.workflow.render_count());
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        self.insight_timer.cancel();
        self.narrator.clear();
        self.workflow.reset();
        self.viewport.reset();
        info!("session reset");
    }
}
