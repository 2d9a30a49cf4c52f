//! 解析ログ（建築様式・推奨素材・理由）

use crate::app::AppState;
use leptos::prelude::*;

#[component]
pub fn AnalysisPanel(app: AppState) -> impl IntoView {
    let analysis = move || app.workflow.with(|wf| wf.analysis().cloned());

    view! {
        <section class="panel analysis-panel">
            <h3 class="panel-title">{move || app.text().analysis_log}</h3>
            {move || match analysis() {
                Some(result) => view! {
                    <dl class="analysis-list">
                        <dt>{move || app.text().arch_style}</dt>
                        <dd class="analysis-style">{result.style.clone()}</dd>
                        <dt>{move || app.text().mat_matrix}</dt>
                        <dd>
                            <ul class="recommendations">
                                {result
                                    .recommendations
                                    .iter()
                                    .map(|r| view! { <li>{r.clone()}</li> })
                                    .collect_view()}
                            </ul>
                        </dd>
                        <dt>{move || app.text().ai_reasoning}</dt>
                        <dd class="analysis-reasoning">{result.reasoning.clone()}</dd>
                    </dl>
                }
                .into_any(),
                None => view! { <p class="text-muted">{move || app.text().scanning}</p> }.into_any(),
            }}
        </section>
    }
}
