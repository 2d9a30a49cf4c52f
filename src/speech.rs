//! ターミナル用の読み上げエンジン
//!
//! 音声合成の代わりに読み上げ内容を標準出力へ書き、履歴を残す。

use roof_ai_common::{SpeechEngine, Utterance, Voice};

#[derive(Debug, Default)]
pub struct ConsoleSpeech {
    voices: Vec<Voice>,
    transcript: Vec<Utterance>,
    quiet: bool,
    cancels: usize,
}

impl ConsoleSpeech {
    pub fn new() -> Self {
        Self::default()
    }

    /// 出力せず履歴だけ残す
    pub fn quiet() -> Self {
        Self {
            quiet: true,
            ..Self::default()
        }
    }

    pub fn with_voices(mut self, voices: Vec<Voice>) -> Self {
        self.voices = voices;
        self
    }

    pub fn transcript(&self) -> &[Utterance] {
        &self.transcript
    }

    pub fn cancel_count(&self) -> usize {
        self.cancels
    }
}

impl SpeechEngine for ConsoleSpeech {
    fn voices(&self) -> Vec<Voice> {
        self.voices.clone()
    }

    fn speak(&mut self, utterance: Utterance) {
        if !self.quiet {
            let voice = utterance
                .voice
                .as_ref()
                .map(|v| v.name.as_str())
                .unwrap_or("default");
            println!("🔊 [{} / {}] {}", utterance.lang, voice, utterance.text);
        }
        self.transcript.push(utterance);
    }

    fn cancel(&mut self) {
        self.cancels += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roof_ai_common::{Language, Narrator};

    #[test]
    fn test_transcript_records_utterances() {
        let engine = ConsoleSpeech::quiet().with_voices(vec![Voice::new("Google US English", "en-US")]);
        let mut narrator = Narrator::new(engine, Language::En);
        narrator.insight_arrived("Slate lasts a century.");

        let transcript = narrator.engine().transcript();
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript[0].lang, "en-US");
        assert_eq!(
            transcript[0].voice.as_ref().map(|v| v.name.as_str()),
            Some("Google US English")
        );
    }

    #[test]
    fn test_no_voices_uses_host_default() {
        let mut narrator = Narrator::new(ConsoleSpeech::quiet(), Language::Es);
        narrator.insight_arrived("texto");
        assert!(narrator.engine().transcript()[0].voice.is_none());
        assert_eq!(narrator.engine().cancel_count(), 1);
    }
}
