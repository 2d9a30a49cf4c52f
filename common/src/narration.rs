//! 音声ナレーション制御
//!
//! 音声合成エンジン自体はホスト側（ブラウザの Web Speech API など）にあり、
//! ここでは声の選択と、再生/停止の判断だけを行う。

use serde::{Deserialize, Serialize};

use crate::i18n::ui_text;
use crate::types::Language;

/// 優先する音声プロバイダ（声の名前に含まれる文字列）
pub const PREFERRED_PROVIDER: &str = "Google";

pub const SPEECH_RATE: f32 = 1.0;
pub const SPEECH_PITCH: f32 = 1.0;

/// ホストが提供する声
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    pub name: String,
    pub lang: String,
}

impl Voice {
    pub fn new(name: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lang: lang.into(),
        }
    }

    fn is_preferred(&self) -> bool {
        self.name.contains(PREFERRED_PROVIDER)
    }

    fn lang_is(&self, tags: &[&str]) -> bool {
        tags.iter().any(|t| self.lang.eq_ignore_ascii_case(t))
    }

    fn lang_starts_with(&self, prefix: &str) -> bool {
        self.lang.to_ascii_lowercase().starts_with(prefix)
    }
}

/// 言語に合う声を選ぶ。見つからなければ None（ホストの既定の声）
///
/// - es: 優先プロバイダの es-MX/es-US → 優先プロバイダの es* → 任意の es*
/// - en: 優先プロバイダの en-US → 任意の en*
pub fn select_voice(voices: &[Voice], language: Language) -> Option<&Voice> {
    match language {
        Language::Es => voices
            .iter()
            .find(|v| v.is_preferred() && v.lang_is(&["es-MX", "es-US"]))
            .or_else(|| voices.iter().find(|v| v.is_preferred() && v.lang_starts_with("es")))
            .or_else(|| voices.iter().find(|v| v.lang_starts_with("es"))),
        Language::En => voices
            .iter()
            .find(|v| v.is_preferred() && v.lang_is(&["en-US"]))
            .or_else(|| voices.iter().find(|v| v.lang_starts_with("en"))),
    }
}

/// 読み上げ1回分の指示
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub lang: &'static str,
    pub rate: f32,
    pub pitch: f32,
    pub voice: Option<Voice>,
}

/// エンジンからの通知
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechEvent {
    Start,
    End,
    Error,
}

/// 音声合成エンジン
pub trait SpeechEngine {
    /// 現在利用可能な声の一覧
    fn voices(&self) -> Vec<Voice>;

    fn speak(&mut self, utterance: Utterance);

    fn cancel(&mut self);
}

/// ナレーション制御
///
/// `speaking` はエンジンの開始通知で立ち、終了/エラー通知で下りる。
pub struct Narrator<E: SpeechEngine> {
    engine: E,
    voices: Vec<Voice>,
    language: Language,
    enabled: bool,
    speaking: bool,
    latest: Option<String>,
}

impl<E: SpeechEngine> Narrator<E> {
    pub fn new(engine: E, language: Language) -> Self {
        let voices = engine.voices();
        Self {
            engine,
            voices,
            language,
            enabled: true,
            speaking: false,
            latest: None,
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_speaking(&self) -> bool {
        self.speaking
    }

    pub fn latest_text(&self) -> Option<&str> {
        self.latest.as_deref()
    }

    /// トグルボタンの表示文言
    pub fn label(&self) -> &'static str {
        ui_text(self.language).voice_label(self.enabled)
    }

    /// 声の一覧を取り直す（ホストの一覧変更通知で呼ぶ）
    pub fn refresh_voices(&mut self) {
        self.voices = self.engine.voices();
    }

    /// 言語を切り替える。再生中の読み上げは止めない
    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn selected_voice(&self) -> Option<&Voice> {
        select_voice(&self.voices, self.language)
    }

    /// 現在の読み上げを止めてから text を読み上げる
    pub fn speak(&mut self, text: &str) {
        self.engine.cancel();
        self.speaking = false;

        let utterance = Utterance {
            text: text.to_string(),
            lang: self.language.speech_tag(),
            rate: SPEECH_RATE,
            pitch: SPEECH_PITCH,
            voice: self.selected_voice().cloned(),
        };
        self.engine.speak(utterance);
    }

    pub fn handle_event(&mut self, event: SpeechEvent) {
        self.speaking = matches!(event, SpeechEvent::Start);
    }

    pub fn cancel(&mut self) {
        self.engine.cancel();
        self.speaking = false;
    }

    /// 読み上げを止め、保持しているテキストも捨てる（リセット時）
    pub fn clear(&mut self) {
        self.cancel();
        self.latest = None;
    }

    /// 新しいインサイトを受け取る。有効なら読み上げる
    pub fn insight_arrived(&mut self, text: &str) {
        self.latest = Some(text.to_string());
        if self.enabled {
            self.speak(text);
        }
    }

    /// 音声の有効/無効を切り替え、切り替え後の状態を返す
    ///
    /// 無効化で再生を止め、有効化で直近のインサイトを読み直す。
    pub fn toggle_audio(&mut self) -> bool {
        self.enabled = !self.enabled;
        if !self.enabled {
            self.cancel();
        } else if let Some(text) = self.latest.clone() {
            self.speak(&text);
        }
        self.enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct MockEngine {
        voices: Vec<Voice>,
        spoken: Vec<Utterance>,
        cancels: usize,
    }

    impl SpeechEngine for MockEngine {
        fn voices(&self) -> Vec<Voice> {
            self.voices.clone()
        }

        fn speak(&mut self, utterance: Utterance) {
            self.spoken.push(utterance);
        }

        fn cancel(&mut self) {
            self.cancels += 1;
        }
    }

    fn host_voices() -> Vec<Voice> {
        vec![
            Voice::new("Microsoft Sabina", "es-MX"),
            Voice::new("Google español", "es-ES"),
            Voice::new("Google español de Estados Unidos", "es-US"),
            Voice::new("Samantha", "en-US"),
            Voice::new("Google UK English Female", "en-GB"),
            Voice::new("Google US English", "en-US"),
        ]
    }

    // =============================================
    // 声の選択
    // =============================================

    #[test]
    fn test_select_voice_spanish_prefers_provider_latam() {
        let voices = host_voices();
        let v = select_voice(&voices, Language::Es).unwrap();
        assert_eq!(v.name, "Google español de Estados Unidos");
    }

    #[test]
    fn test_select_voice_spanish_provider_any_region() {
        let voices = vec![
            Voice::new("Microsoft Sabina", "es-MX"),
            Voice::new("Google español", "es-ES"),
        ];
        assert_eq!(select_voice(&voices, Language::Es).unwrap().name, "Google español");
    }

    #[test]
    fn test_select_voice_spanish_any_vendor() {
        let voices = vec![
            Voice::new("Google US English", "en-US"),
            Voice::new("Monica", "es-ES"),
        ];
        assert_eq!(select_voice(&voices, Language::Es).unwrap().name, "Monica");
    }

    #[test]
    fn test_select_voice_english() {
        let voices = host_voices();
        assert_eq!(select_voice(&voices, Language::En).unwrap().name, "Google US English");

        let voices = vec![Voice::new("Daniel", "en-GB"), Voice::new("Google español", "es-ES")];
        assert_eq!(select_voice(&voices, Language::En).unwrap().name, "Daniel");
    }

    #[test]
    fn test_select_voice_none_falls_back_to_host_default() {
        let voices = vec![Voice::new("Kyoko", "ja-JP")];
        assert!(select_voice(&voices, Language::En).is_none());
        assert!(select_voice(&voices, Language::Es).is_none());
        assert!(select_voice(&[], Language::En).is_none());
    }

    // =============================================
    // 再生制御
    // =============================================

    fn narrator(language: Language) -> Narrator<MockEngine> {
        Narrator::new(MockEngine { voices: host_voices(), ..Default::default() }, language)
    }

    #[test]
    fn test_insight_arrived_speaks_with_language_settings() {
        let mut n = narrator(Language::Es);
        n.insight_arrived("La pizarra dura un siglo.");

        let spoken = &n.engine().spoken;
        assert_eq!(spoken.len(), 1);
        assert_eq!(spoken[0].text, "La pizarra dura un siglo.");
        assert_eq!(spoken[0].lang, "es-ES");
        assert_eq!(spoken[0].rate, 1.0);
        assert_eq!(spoken[0].pitch, 1.0);
        assert_eq!(
            spoken[0].voice.as_ref().map(|v| v.lang.as_str()),
            Some("es-US")
        );
    }

    #[test]
    fn test_speak_cancels_current_first() {
        let mut n = narrator(Language::En);
        n.insight_arrived("first");
        n.insight_arrived("second");
        assert_eq!(n.engine().cancels, 2);
        assert_eq!(n.engine().spoken.len(), 2);
    }

    #[test]
    fn test_speaking_flag_follows_events() {
        let mut n = narrator(Language::En);
        n.insight_arrived("text");
        assert!(!n.is_speaking());
        n.handle_event(SpeechEvent::Start);
        assert!(n.is_speaking());
        n.handle_event(SpeechEvent::End);
        assert!(!n.is_speaking());
        n.handle_event(SpeechEvent::Start);
        n.handle_event(SpeechEvent::Error);
        assert!(!n.is_speaking());
    }

    #[test]
    fn test_disabled_stores_without_speaking() {
        let mut n = narrator(Language::En);
        assert!(!n.toggle_audio());
        n.insight_arrived("quiet");
        assert!(n.engine().spoken.is_empty());
        assert_eq!(n.latest_text(), Some("quiet"));
        assert_eq!(n.label(), "MUTED");
    }

    #[test]
    fn test_toggle_audio_respeaks_latest() {
        let mut n = narrator(Language::En);
        n.insight_arrived("metal sheds snow");
        n.handle_event(SpeechEvent::Start);

        assert!(!n.toggle_audio());
        assert!(!n.is_speaking());

        assert!(n.toggle_audio());
        let spoken = &n.engine().spoken;
        assert_eq!(spoken.len(), 2);
        assert_eq!(spoken[1].text, "metal sheds snow");
    }

    #[test]
    fn test_toggle_audio_without_text_is_silent() {
        let mut n = narrator(Language::En);
        n.toggle_audio();
        n.toggle_audio();
        assert!(n.engine().spoken.is_empty());
    }

    #[test]
    fn test_clear_forgets_latest() {
        let mut n = narrator(Language::En);
        n.insight_arrived("old");
        n.clear();
        assert!(n.latest_text().is_none());
        n.toggle_audio();
        n.toggle_audio();
        assert_eq!(n.engine().spoken.len(), 1);
    }

    #[test]
    fn test_language_change_does_not_cancel() {
        let mut n = narrator(Language::En);
        n.insight_arrived("text");
        let cancels = n.engine().cancels;
        n.set_language(Language::Es);
        assert_eq!(n.engine().cancels, cancels);
        assert_eq!(n.selected_voice().unwrap().lang, "es-US");
    }

    #[test]
    fn test_refresh_voices() {
        let mut n = Narrator::new(MockEngine::default(), Language::En);
        assert!(n.selected_voice().is_none());
        n.engine_mut().voices = host_voices();
        n.refresh_voices();
        assert_eq!(n.selected_voice().unwrap().name, "Google US English");
    }
}
