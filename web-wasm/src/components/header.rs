//! ヘッダーコンポーネント（言語切替・音声切替・リセット）

use crate::app::AppState;
use leptos::prelude::*;
use roof_ai_common::Language;

#[component]
pub fn Header(app: AppState) -> impl IntoView {
    let language_label = move || match app.language() {
        Language::En => "EN",
        Language::Es => "ES",
    };
    let voice_label = move || app.text().voice_label(app.audio_enabled.get());
    let has_image = move || app.workflow.with(|wf| wf.image().is_some());

    view! {
        <header class="header">
            <div class="brand">
                <h1>"ROOF"<span class="accent">"AI"</span></h1>
                <span class="status-dot"></span>
                <span class="status-text">{move || app.text().system_online}</span>
            </div>
            <div class="header-actions">
                <button
                    class="btn btn-ghost"
                    class:active=move || app.audio_enabled.get()
                    class:speaking=move || app.speaking.get()
                    on:click=move |_| app.toggle_audio()
                >
                    {voice_label}
                </button>
                <button class="btn btn-ghost" on:click=move |_| app.toggle_language()>
                    {language_label}
                </button>
                <Show when=has_image>
                    <button class="btn btn-secondary" on:click=move |_| app.reset()>
                        {move || app.text().reset_system}
                    </button>
                </Show>
            </div>
        </header>
    }
}
