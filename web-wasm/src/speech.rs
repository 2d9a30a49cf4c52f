//! Web Speech API による読み上げ

use roof_ai_common::{SpeechEngine, SpeechEvent, Utterance, Voice};
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::{SpeechSynthesis, SpeechSynthesisUtterance, SpeechSynthesisVoice};

/// ブラウザの speechSynthesis を包むエンジン
///
/// 発話ごとに番号を振り、取り消し済みの発話から遅れて届いた
/// 終了/エラー通知は捨てる。
pub struct WebSpeech {
    synth: Option<SpeechSynthesis>,
    on_event: Rc<dyn Fn(SpeechEvent)>,
    current: Rc<Cell<u64>>,
}

impl WebSpeech {
    pub fn new(on_event: impl Fn(SpeechEvent) + 'static) -> Self {
        let synth = web_sys::window().and_then(|w| w.speech_synthesis().ok());
        if synth.is_none() {
            leptos::logging::warn!("speechSynthesis is not available; narration disabled");
        }
        Self {
            synth,
            on_event: Rc::new(on_event),
            current: Rc::new(Cell::new(0)),
        }
    }

    /// 声の一覧の変化を通知する（一覧は非同期に読み込まれる）
    pub fn on_voices_changed(&self, callback: impl Fn() + 'static) {
        let Some(synth) = &self.synth else {
            return;
        };
        let closure = Closure::<dyn Fn()>::new(callback);
        synth.set_onvoiceschanged(Some(closure.as_ref().unchecked_ref()));
        closure.forget();
    }

    fn native_voices(&self) -> Vec<SpeechSynthesisVoice> {
        self.synth
            .as_ref()
            .map(|synth| {
                synth
                    .get_voices()
                    .iter()
                    .filter_map(|v| v.dyn_into::<SpeechSynthesisVoice>().ok())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn event_handler(&self, id: u64, event: SpeechEvent) -> JsValue {
        let on_event = Rc::clone(&self.on_event);
        let current = Rc::clone(&self.current);
        Closure::once_into_js(move || {
            if current.get() == id {
                on_event(event);
            }
        })
    }
}

impl SpeechEngine for WebSpeech {
    fn voices(&self) -> Vec<Voice> {
        self.native_voices()
            .iter()
            .map(|v| Voice::new(v.name(), v.lang()))
            .collect()
    }

    fn speak(&mut self, utterance: Utterance) {
        let Some(synth) = self.synth.clone() else {
            return;
        };
        let native = match SpeechSynthesisUtterance::new_with_text(&utterance.text) {
            Ok(native) => native,
            Err(e) => {
                leptos::logging::warn!("failed to create utterance: {:?}", e);
                return;
            }
        };

        native.set_lang(utterance.lang);
        native.set_rate(utterance.rate);
        native.set_pitch(utterance.pitch);
        if let Some(voice) = &utterance.voice {
            let matched = self
                .native_voices()
                .into_iter()
                .find(|v| v.name() == voice.name);
            native.set_voice(matched.as_ref());
        }

        let id = self.current.get() + 1;
        self.current.set(id);
        native.set_onstart(Some(self.event_handler(id, SpeechEvent::Start).unchecked_ref()));
        native.set_onend(Some(self.event_handler(id, SpeechEvent::End).unchecked_ref()));
        native.set_onerror(Some(self.event_handler(id, SpeechEvent::Error).unchecked_ref()));

        synth.speak(&native);
    }

    fn cancel(&mut self) {
        self.current.set(self.current.get() + 1);
        if let Some(synth) = &self.synth {
            synth.cancel();
        }
    }
}
