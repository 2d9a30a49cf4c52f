//! 素材・カラー選択と生成ボタン

use crate::app::AppState;
use leptos::prelude::*;
use roof_ai_common::{ROOF_COLORS, ROOF_MATERIALS};

#[component]
pub fn MaterialPanel(app: AppState) -> impl IntoView {
    let selected_material = move || app.workflow.with(|wf| wf.material().id);
    let selected_color = move || app.workflow.with(|wf| wf.color().id);
    let busy = move || app.workflow.with(|wf| wf.is_busy());
    let can_generate = move || app.workflow.with(|wf| wf.can_generate());

    view! {
        <section class="panel material-panel">
            <h3 class="panel-title">{move || app.text().material_select}</h3>
            <div class="material-grid">
                {ROOF_MATERIALS
                    .iter()
                    .map(|material| {
                        let id = material.id;
                        view! {
                            <button
                                class="material-card"
                                class:selected=move || selected_material() == id
                                disabled=busy
                                on:click=move |_| app.select_material(id)
                            >
                                <span class="material-name">
                                    {move || material.display_name(app.language())}
                                </span>
                                <span class="material-desc">
                                    {move || material.display_description(app.language())}
                                </span>
                                <span class="material-code">{material.short_code()}</span>
                            </button>
                        }
                    })
                    .collect_view()}
            </div>

            <h3 class="panel-title">{move || app.text().color_grade}</h3>
            <div class="color-row">
                {ROOF_COLORS
                    .iter()
                    .map(|color| {
                        let id = color.id;
                        view! {
                            <button
                                class="color-swatch"
                                class:selected=move || selected_color() == id
                                style:background-color=color.hex
                                title=move || color.display_name(app.language())
                                disabled=busy
                                on:click=move |_| app.select_color(id)
                            ></button>
                        }
                    })
                    .collect_view()}
            </div>
            <p class="color-name">
                {move || app.workflow.with(|wf| wf.color().display_name(wf.language()))}
            </p>

            <button
                class="btn btn-primary btn-render"
                disabled=move || !can_generate()
                on:click=move |_| app.generate()
            >
                {move || {
                    if app.state() == roof_ai_common::WorkflowState::Generating {
                        app.text().processing
                    } else {
                        app.text().initiate_render
                    }
                }}
            </button>
        </section>
    }
}
