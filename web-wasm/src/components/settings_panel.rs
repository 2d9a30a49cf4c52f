//! 設定パネルコンポーネント（Gemini APIキー）

use crate::app::AppState;
use leptos::prelude::*;

#[component]
pub fn SettingsPanel(app: AppState) -> impl IntoView {
    let (draft, set_draft) = signal(app.api_key.get_untracked());
    let status = move || {
        if app.has_api_key() {
            "✓"
        } else {
            ""
        }
    };

    view! {
        <div class="settings-panel">
            <div class="form-group">
                <label for="api-key">{move || app.text().api_key}</label>
                <input
                    type="password"
                    id="api-key"
                    placeholder="AIza..."
                    prop:value=move || draft.get()
                    on:input=move |ev| {
                        set_draft.set(event_target_value(&ev));
                    }
                />
                <a
                    href="https://aistudio.google.com/app/apikey"
                    target="_blank"
                    rel="noopener noreferrer"
                    class="api-key-link"
                >
                    "aistudio.google.com →"
                </a>
                <div class="api-actions">
                    <button
                        class="btn btn-primary btn-small"
                        on:click=move |_| app.save_api_key(draft.get_untracked().trim().to_string())
                    >
                        "Save"
                    </button>
                    <button
                        class="btn btn-tertiary btn-small"
                        on:click=move |_| {
                            set_draft.set(String::new());
                            app.clear_api_key();
                        }
                    >
                        "Clear"
                    </button>
                    <span class="api-key-status">{status}</span>
                </div>
            </div>
        </div>
    }
}
