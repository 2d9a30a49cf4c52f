//! ビジュアライザ（オリジナル/生成画像の切替、リビール演出、書き出し）
//!
//! 新しい生成画像が届いたら requestAnimationFrame でモザイクから原寸へ描き直す。
//! 縮小描画は画面外のcanvasに行い、平滑化なしで表示用canvasへ引き伸ばす。

use crate::app::AppState;
use gloo::render::{request_animation_frame, AnimationFrame};
use leptos::html::Canvas;
use leptos::logging;
use leptos::prelude::*;
use roof_ai_common::reveal::scaled_size;
use roof_ai_common::{RevealFrame, ViewMode, WorkflowState, EXPORT_FILE_NAME};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlAnchorElement, HtmlCanvasElement, HtmlImageElement};

/// アニメーションループが参照するもの一式
#[derive(Clone)]
struct RevealLoop {
    app: AppState,
    canvas: NodeRef<Canvas>,
    image: HtmlImageElement,
    offscreen: HtmlCanvasElement,
    percent: RwSignal<Option<u32>>,
    filter: RwSignal<String>,
    frame: StoredValue<Option<AnimationFrame>, LocalStorage>,
}

impl RevealLoop {
    fn schedule(self) {
        let frame_loop = self.clone();
        let handle = request_animation_frame(move |timestamp| frame_loop.step(timestamp));
        self.frame.set_value(Some(handle));
    }

    fn step(self, timestamp: f64) {
        let Some(frame) = self.app.viewport.try_update(|v| v.tick(timestamp)).flatten() else {
            // 中止された（オリジナル表示・リセット）
            self.percent.set(None);
            return;
        };

        if let Err(e) = self.draw(&frame) {
            logging::warn!("reveal frame failed: {:?}", e);
        }

        if frame.done {
            self.percent.set(None);
        } else {
            self.percent.set(Some(frame.percent()));
            self.schedule();
        }
    }

    fn draw(&self, frame: &RevealFrame) -> Result<(), JsValue> {
        let canvas = self
            .canvas
            .get_untracked()
            .ok_or_else(|| JsValue::from_str("canvas is not mounted"))?;
        let (width, height) = (self.image.natural_width(), self.image.natural_height());
        if canvas.width() != width || canvas.height() != height {
            canvas.set_width(width);
            canvas.set_height(height);
        }

        let (small_w, small_h) = scaled_size(width, height, frame.factor);
        self.offscreen.set_width(small_w);
        self.offscreen.set_height(small_h);
        let small = context_2d(&self.offscreen)?;
        small.set_image_smoothing_enabled(false);
        small.draw_image_with_html_image_element_and_dw_and_dh(
            &self.image,
            0.0,
            0.0,
            small_w as f64,
            small_h as f64,
        )?;

        let ctx = context_2d(&canvas)?;
        ctx.set_image_smoothing_enabled(false);
        ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
        ctx.draw_image_with_html_canvas_element_and_dw_and_dh(
            &self.offscreen,
            0.0,
            0.0,
            width as f64,
            height as f64,
        )?;

        self.filter.set(if frame.filter.is_identity() {
            String::new()
        } else {
            frame.filter.to_css()
        });
        Ok(())
    }
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context is not available"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(JsValue::from)
}

fn create_canvas() -> Result<HtmlCanvasElement, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("document is not available"))?
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(JsValue::from)
}

/// 画像の読み込み完了を待ってからループを始める
fn start_reveal(
    app: AppState,
    canvas: NodeRef<Canvas>,
    data_url: &str,
    percent: RwSignal<Option<u32>>,
    filter: RwSignal<String>,
    frame: StoredValue<Option<AnimationFrame>, LocalStorage>,
) -> Result<(), JsValue> {
    let image = HtmlImageElement::new()?;
    let reveal = RevealLoop {
        app,
        canvas,
        image: image.clone(),
        offscreen: create_canvas()?,
        percent,
        filter,
        frame,
    };

    percent.set(Some(0));
    let on_load = Closure::once_into_js(move || reveal.schedule());
    image.set_onload(Some(on_load.unchecked_ref()));
    image.set_src(data_url);
    Ok(())
}

fn download(data_url: &str) -> Result<(), JsValue> {
    let anchor: HtmlAnchorElement = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("document is not available"))?
        .create_element("a")?
        .dyn_into()?;
    anchor.set_href(data_url);
    anchor.set_download(EXPORT_FILE_NAME);
    anchor.click();
    Ok(())
}

#[component]
pub fn Visualizer(app: AppState) -> impl IntoView {
    let canvas_ref = NodeRef::<Canvas>::new();
    let percent = RwSignal::new(None::<u32>);
    let filter = RwSignal::new(String::new());
    let frame = StoredValue::new_local(None::<AnimationFrame>);

    // 生成番号が進んだ時だけリビールを始める
    Effect::new(move |_| {
        let render = app.workflow.with(|wf| wf.render_count());
        let Some(data_url) = app
            .workflow
            .with_untracked(|wf| wf.generated().map(|g| g.to_data_url()))
        else {
            return;
        };
        let started = app
            .viewport
            .try_update(|v| v.on_generated(render))
            .unwrap_or(false);
        if started {
            if let Err(e) = start_reveal(app, canvas_ref, &data_url, percent, filter, frame) {
                logging::warn!("failed to start reveal: {:?}", e);
                app.viewport.update(|v| v.show_generated());
            }
        }
    });

    let mode = move || app.viewport.with(|v| v.mode());
    let has_generated = move || app.workflow.with(|wf| wf.generated().is_some());
    let animating = move || percent.get().is_some();

    let shown_image = move || {
        app.workflow.with(|wf| {
            let generated = wf.generated().filter(|_| mode() == ViewMode::Generated);
            generated.or(wf.image()).map(|img| img.to_data_url())
        })
    };

    let show_original = move |_| {
        frame.set_value(None);
        percent.set(None);
        app.viewport.update(|v| v.show_original());
    };
    let show_generated = move |_| app.viewport.update(|v| v.show_generated());

    let on_export = move |_| {
        let data_url = app
            .workflow
            .with_untracked(|wf| wf.generated().map(|g| g.to_data_url()));
        if let Some(data_url) = data_url {
            if let Err(e) = download(&data_url) {
                logging::warn!("export failed: {:?}", e);
            }
        }
    };

    view! {
        <section class="visualizer">
            <Show when=move || app.workflow.with(|wf| wf.error_message().is_some())>
                <div class="error-banner">
                    {move || app.workflow.with(|wf| wf.error_message()).unwrap_or_default()}
                </div>
            </Show>

            <div class="viewport">
                <img
                    class="viewport-image"
                    style:display=move || if animating() { "none" } else { "block" }
                    src=move || shown_image().unwrap_or_default()
                    alt=""
                />
                <canvas
                    node_ref=canvas_ref
                    class="viewport-canvas"
                    style:display=move || if animating() { "block" } else { "none" }
                    style:filter=move || filter.get()
                ></canvas>

                <Show when=move || app.state() == WorkflowState::Generating>
                    <div class="overlay">
                        <div class="spinner"></div>
                        <p class="overlay-title">{move || app.text().processing}</p>
                        <p class="overlay-sub">{move || app.text().physics}</p>
                    </div>
                </Show>
                <Show when=move || app.state() == WorkflowState::Analyzing>
                    <div class="overlay overlay-scan">
                        <p class="overlay-title">{move || app.text().scanning}</p>
                    </div>
                </Show>
                <Show when=animating>
                    <div class="reveal-badge">
                        {move || app.text().resolving}
                        " "
                        {move || percent.get().unwrap_or(0)}
                        "%"
                    </div>
                </Show>
            </div>

            <Show when=has_generated>
                <div class="viewport-controls">
                    <button
                        class="btn btn-ghost"
                        class:active=move || mode() == ViewMode::Original
                        on:click=show_original
                    >
                        {move || app.text().original}
                    </button>
                    <button
                        class="btn btn-ghost"
                        class:active=move || mode() == ViewMode::Generated
                        on:click=show_generated
                    >
                        {move || app.text().render}
                    </button>
                    <button class="btn btn-secondary" on:click=on_export>
                        {move || app.text().export}
                    </button>
                </div>
            </Show>
        </section>
    }
}
