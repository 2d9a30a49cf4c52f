//! メインアプリケーションコンポーネント

use crate::api::gemini::GeminiWeb;
use crate::components::{
    analysis_panel::AnalysisPanel, consultant_panel::ConsultantPanel, header::Header,
    material_panel::MaterialPanel, settings_panel::SettingsPanel, upload_area::UploadArea,
    visualizer::Visualizer,
};
use crate::speech::WebSpeech;
use crate::storage;
use gloo::timers::callback::Timeout;
use leptos::logging;
use leptos::prelude::*;
use leptos::task::spawn_local;
use roof_ai_common::workflow::INSIGHT_DEBOUNCE_MS;
use roof_ai_common::{
    ui_text, ImagePayload, Language, Narrator, RoofAi, SpeechEvent, UiText, Viewport, Workflow,
    WorkflowState,
};

/// アプリケーションの状態と操作
///
/// AI呼び出しはすべて spawn_local で投げ、結果はチケットが一致した時だけ反映される。
#[derive(Clone, Copy)]
pub struct AppState {
    pub workflow: RwSignal<Workflow>,
    pub viewport: RwSignal<Viewport>,
    pub api_key: RwSignal<String>,
    pub audio_enabled: RwSignal<bool>,
    pub speaking: RwSignal<bool>,
    narrator: StoredValue<Option<Narrator<WebSpeech>>, LocalStorage>,
    insight_timer: StoredValue<Option<Timeout>, LocalStorage>,
}

impl AppState {
    pub fn new(language: Language) -> Self {
        let narrator = StoredValue::new_local(None::<Narrator<WebSpeech>>);
        let speaking = RwSignal::new(false);

        // 発話イベントは次のタスクで反映する
        let engine = WebSpeech::new(move |event: SpeechEvent| {
            spawn_local(async move {
                narrator.update_value(|n| {
                    if let Some(n) = n.as_mut() {
                        n.handle_event(event);
                        speaking.set(n.is_speaking());
                    }
                });
            });
        });
        engine.on_voices_changed(move || {
            spawn_local(async move {
                narrator.update_value(|n| {
                    if let Some(n) = n.as_mut() {
                        n.refresh_voices();
                    }
                });
            });
        });
        narrator.set_value(Some(Narrator::new(engine, language)));

        Self {
            workflow: RwSignal::new(Workflow::new(language)),
            viewport: RwSignal::new(Viewport::new()),
            api_key: RwSignal::new(storage::load_api_key().unwrap_or_default()),
            audio_enabled: RwSignal::new(true),
            speaking,
            narrator,
            insight_timer: StoredValue::new_local(None),
        }
    }

    pub fn language(&self) -> Language {
        self.workflow.with(|wf| wf.language())
    }

    pub fn text(&self) -> &'static UiText {
        ui_text(self.language())
    }

    pub fn state(&self) -> WorkflowState {
        self.workflow.with(|wf| wf.state())
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.with(|key| !key.trim().is_empty())
    }

    fn client(&self) -> GeminiWeb {
        GeminiWeb::new(self.api_key.get_untracked())
    }

    fn with_narrator<U>(&self, f: impl FnOnce(&mut Narrator<WebSpeech>) -> U) -> Option<U> {
        self.narrator
            .try_update_value(|n| n.as_mut().map(f))
            .flatten()
    }

    fn cancel_narration(&self) {
        self.with_narrator(|n| n.cancel());
        self.speaking.set(false);
    }

    /// 検証済みの画像を受け取り、解析を開始する
    pub fn upload(self, image: ImagePayload) {
        let request = match self.workflow.try_update(|wf| wf.select_image(image)) {
            Some(Ok(request)) => request,
            Some(Err(e)) => {
                logging::warn!("upload rejected: {}", e);
                return;
            }
            None => return,
        };

        let client = self.client();
        spawn_local(async move {
            let outcome = client.analyze_image(&request.image, request.language).await;
            if let Err(e) = &outcome {
                logging::warn!("analysis failed: {}", e);
            }
            let wants_insight = self
                .workflow
                .try_update(|wf| wf.finish_analysis(request.ticket, outcome) && wf.wants_insight())
                .unwrap_or(false);
            if wants_insight {
                self.schedule_insight();
            }
        });
    }

    pub fn select_material(self, id: &str) {
        match self.workflow.try_update(|wf| wf.select_material(id)) {
            Some(Ok(true)) => {
                self.cancel_narration();
                self.schedule_insight();
            }
            Some(Ok(false)) | None => {}
            Some(Err(e)) => logging::warn!("{}", e),
        }
    }

    pub fn select_color(self, id: &str) {
        if let Some(Err(e)) = self.workflow.try_update(|wf| wf.select_color(id)) {
            logging::warn!("{}", e);
        }
    }

    pub fn toggle_language(self) {
        let language = self.workflow.with_untracked(|wf| wf.language()).toggled();
        let refetch = self
            .workflow
            .try_update(|wf| wf.set_language(language))
            .unwrap_or(false);
        self.with_narrator(|n| n.set_language(language));
        if refetch {
            self.schedule_insight();
        }
    }

    pub fn toggle_audio(self) {
        if let Some(enabled) = self.with_narrator(|n| n.toggle_audio()) {
            self.audio_enabled.set(enabled);
            if !enabled {
                self.speaking.set(false);
            }
        }
    }

    /// 既存の予約を破棄して予約し直す
    fn schedule_insight(self) {
        let timer = Timeout::new(INSIGHT_DEBOUNCE_MS as u32, move || self.fetch_insight());
        self.insight_timer.set_value(Some(timer));
    }

    fn fetch_insight(self) {
        let Some(request) = self.workflow.try_update(|wf| wf.insight_request()).flatten() else {
            return;
        };
        self.cancel_narration();

        let client = self.client();
        spawn_local(async move {
            let text = client
                .get_material_insight(
                    &request.image,
                    &request.style,
                    request.material_name,
                    request.language,
                )
                .await;
            let accepted = self
                .workflow
                .try_update(|wf| wf.apply_insight(&request, text.clone()))
                .unwrap_or(false);
            if accepted {
                self.with_narrator(|n| n.insight_arrived(&text));
            }
        });
    }

    pub fn generate(self) {
        let Some(request) = self.workflow.try_update(|wf| wf.begin_generation()).flatten() else {
            return;
        };
        self.cancel_narration();

        let client = self.client();
        spawn_local(async move {
            let outcome = client
                .generate_roof_image(
                    &request.image,
                    request.material_name,
                    request.color_name,
                    &request.style,
                )
                .await;
            if let Err(e) = &outcome {
                logging::warn!("generation failed: {}", e);
            }
            self.workflow
                .update(|wf| {
                    wf.finish_generation(request.ticket, outcome);
                });
        });
    }

    pub fn reset(self) {
        self.insight_timer.set_value(None);
        self.with_narrator(|n| n.clear());
        self.speaking.set(false);
        self.workflow.update(|wf| wf.reset());
        self.viewport.update(|v| v.reset());
    }

    pub fn save_api_key(self, api_key: String) {
        if let Err(e) = storage::save_api_key(&api_key) {
            logging::warn!("failed to store API key: {}", e);
        }
        self.api_key.set(api_key);
    }

    pub fn clear_api_key(self) {
        storage::clear_api_key();
        self.api_key.set(String::new());
    }
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let app = AppState::new(Language::default());
    let has_image = move || app.workflow.with(|wf| wf.image().is_some());

    view! {
        <div class="app">
            <Header app=app />
            <main class="main">
                <SettingsPanel app=app />
                <Show
                    when=has_image
                    fallback=move || view! {
                        <section class="hero">
                            <p class="hero-tag">{move || app.text().next_gen_arch}</p>
                            <h2 class="hero-title">
                                {move || app.text().future_proof}
                                " "
                                <span class="accent">{move || app.text().your_shelter}</span>
                            </h2>
                            <p class="hero-desc">{move || app.text().hero_desc}</p>
                        </section>
                        <UploadArea app=app />
                    }
                >
                    <div class="workspace">
                        <div class="workspace-main">
                            <Visualizer app=app />
                            <AnalysisPanel app=app />
                        </div>
                        <aside class="workspace-side">
                            <ConsultantPanel app=app />
                            <MaterialPanel app=app />
                        </aside>
                    </div>
                </Show>
            </main>
        </div>
    }
}
