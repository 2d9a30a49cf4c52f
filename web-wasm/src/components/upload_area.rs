//! アップロードエリアコンポーネント

use crate::app::AppState;
use leptos::logging;
use leptos::prelude::*;
use roof_ai_common::upload::payload_from_data_url;
use roof_ai_common::{validate_upload, WorkflowState};
use wasm_bindgen::prelude::*;
use web_sys::{DragEvent, File, FileList, FileReader, HtmlInputElement};

#[component]
pub fn UploadArea(app: AppState) -> impl IntoView {
    let (is_dragover, set_is_dragover) = signal(false);
    let is_enabled = move || app.has_api_key() && app.state() == WorkflowState::Idle;

    // 先頭の1枚だけを受け付ける
    let handle_files = move |files: FileList| {
        let Some(file) = files.get(0) else {
            return;
        };
        let text = app.text();
        if let Err(rejection) = validate_upload(&file.type_(), file.size() as u64) {
            logging::warn!("upload rejected: {}", rejection);
            alert(rejection.message(text));
            return;
        }
        read_file(file, app);
    };

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(false);

        if !is_enabled() {
            return;
        }

        if let Some(files) = ev.data_transfer().and_then(|dt| dt.files()) {
            handle_files(files);
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        if is_enabled() {
            set_is_dragover.set(true);
        }
    };

    let on_dragleave = move |_: DragEvent| {
        set_is_dragover.set(false);
    };

    let on_click = move |_| {
        if !is_enabled() {
            return;
        }
        if let Err(e) = open_file_dialog(handle_files) {
            logging::warn!("failed to open file dialog: {:?}", e);
        }
    };

    view! {
        <div
            class="upload-area"
            class:dragover=move || is_dragover.get()
            class:disabled=move || !is_enabled()
            on:drop=on_drop
            on:dragover=on_dragover
            on:dragleave=on_dragleave
            on:click=on_click
        >
            <Show
                when=move || app.has_api_key()
                fallback=move || view! {
                    <div class="upload-icon">"🔑"</div>
                    <p>{move || app.text().api_key}</p>
                }
            >
                <div class="upload-icon">"⬆"</div>
                <h3>
                    {move || {
                        if is_dragover.get() {
                            app.text().release_upload
                        } else {
                            app.text().init_project
                        }
                    }}
                </h3>
                <p>
                    {move || {
                        if is_dragover.get() {
                            app.text().incoming_stream
                        } else {
                            app.text().drag_drop
                        }
                    }}
                </p>
                <p class="text-muted">{move || app.text().supported_formats}</p>
                <span class="btn btn-primary">{move || app.text().access_drive}</span>
            </Show>
        </div>
    }
}

fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

/// ファイル選択ダイアログを開く
fn open_file_dialog<F>(handle_files: F) -> Result<(), JsValue>
where
    F: Fn(FileList) + 'static,
{
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("document is not available"))?;
    let input: HtmlInputElement = document.create_element("input")?.dyn_into()?;
    input.set_type("file");
    input.set_accept("image/*");

    let target = input.clone();
    let closure = Closure::wrap(Box::new(move |_: web_sys::Event| {
        if let Some(files) = target.files() {
            handle_files(files);
        }
    }) as Box<dyn FnMut(_)>);

    input.set_onchange(Some(closure.as_ref().unchecked_ref()));
    closure.forget();
    input.click();
    Ok(())
}

/// Data URL として読み込み、解析を開始する
fn read_file(file: File, app: AppState) {
    let reader = match FileReader::new() {
        Ok(reader) => reader,
        Err(e) => {
            logging::warn!("FileReader is not available: {:?}", e);
            return;
        }
    };

    let reader_clone = reader.clone();
    let closure = Closure::wrap(Box::new(move |_: web_sys::ProgressEvent| {
        let Some(data_url) = reader_clone.result().ok().and_then(|r| r.as_string()) else {
            return;
        };
        match payload_from_data_url(&data_url) {
            Some(image) => app.upload(image),
            None => logging::warn!("could not read image data"),
        }
    }) as Box<dyn FnMut(_)>);

    reader.set_onload(Some(closure.as_ref().unchecked_ref()));
    closure.forget();

    if let Err(e) = reader.read_as_data_url(&file) {
        logging::warn!("failed to read file: {:?}", e);
    }
}
