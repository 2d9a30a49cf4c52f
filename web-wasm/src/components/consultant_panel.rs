//! AIコンサルタント（インサイト表示と読み上げ状態）

use crate::app::AppState;
use leptos::prelude::*;
use roof_ai_common::WorkflowState;

#[component]
pub fn ConsultantPanel(app: AppState) -> impl IntoView {
    let insight = move || app.workflow.with(|wf| wf.insight().map(|i| i.text.clone()));
    let placeholder = move || {
        if app.state() == WorkflowState::Analyzing {
            app.text().analyzing
        } else {
            app.text().awaiting_select
        }
    };

    view! {
        <section class="panel consultant-panel" class:speaking=move || app.speaking.get()>
            <div class="panel-header">
                <h3 class="panel-title">{move || app.text().ai_consultant}</h3>
                <span class="voice-indicator">
                    {move || app.text().voice_label(app.audio_enabled.get())}
                </span>
            </div>
            {move || match insight() {
                Some(text) => view! { <p class="insight-text">{text}</p> }.into_any(),
                None => view! { <p class="insight-placeholder">{placeholder}</p> }.into_any(),
            }}
        </section>
    }
}
