//! プログレッシブ・リビール（粗いモザイクから原寸へ）
//!
//! 描画そのものはブラウザ(canvas)とCLI(image)で別実装。ここでは
//! 経過時間 → 解像度係数・フィルタ値の計算と、表示切替の状態だけを持つ。

/// アニメーション全体の長さ（ミリ秒）
pub const REVEAL_DURATION_MS: f64 = 2000.0;

/// 開始時の解像度係数
pub const MIN_RESOLUTION: f64 = 0.02;

/// 経過時間から進捗（0.0〜1.0）
pub fn progress(elapsed_ms: f64) -> f64 {
    if elapsed_ms.is_nan() || elapsed_ms <= 0.0 {
        return 0.0;
    }
    (elapsed_ms / REVEAL_DURATION_MS).min(1.0)
}

pub fn ease_in_cubic(p: f64) -> f64 {
    p * p * p
}

/// 進捗から解像度係数。完了時はちょうど 1.0
pub fn resolution_factor(p: f64) -> f64 {
    if p >= 1.0 {
        return 1.0;
    }
    MIN_RESOLUTION + (1.0 - MIN_RESOLUTION) * ease_in_cubic(p.max(0.0))
}

/// 縮小描画のサイズ（各辺最低1px）
pub fn scaled_size(width: u32, height: u32, factor: f64) -> (u32, u32) {
    let scale = |n: u32| ((n as f64 * factor).floor() as u32).max(1);
    (scale(width), scale(height))
}

/// ぼかし・コントラストの補助フィルタ
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealFilter {
    pub blur_px: f64,
    pub contrast: f64,
}

impl RevealFilter {
    pub fn at(p: f64) -> Self {
        let remaining = 100.0 - p.clamp(0.0, 1.0) * 100.0;
        Self {
            blur_px: remaining * 0.1,
            contrast: 1.0 + remaining * 0.005,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.blur_px == 0.0 && self.contrast == 1.0
    }

    /// CSS filter 文字列
    pub fn to_css(&self) -> String {
        format!("blur({:.2}px) contrast({:.3})", self.blur_px, self.contrast)
    }
}

/// 1フレーム分の描画指示
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealFrame {
    pub progress: f64,
    pub factor: f64,
    pub filter: RevealFilter,
    pub done: bool,
}

impl RevealFrame {
    pub fn at(elapsed_ms: f64) -> Self {
        let p = progress(elapsed_ms);
        Self {
            progress: p,
            factor: resolution_factor(p),
            filter: RevealFilter::at(p),
            done: p >= 1.0,
        }
    }

    /// 進捗表示（0〜100）
    pub fn percent(&self) -> u32 {
        (self.progress * 100.0).round() as u32
    }
}

/// 1回分のアニメーション
///
/// 最初の tick のタイムスタンプを起点にする。一時停止・巻き戻しはない。
#[derive(Debug, Clone, Default)]
pub struct RevealAnimation {
    started_at: Option<f64>,
    finished: bool,
    cancelled: bool,
}

impl RevealAnimation {
    pub fn new() -> Self {
        Self::default()
    }

    /// タイムスタンプ(ms)に対応するフレーム。終了/中止後は None
    pub fn tick(&mut self, now_ms: f64) -> Option<RevealFrame> {
        if self.cancelled || self.finished {
            return None;
        }
        let start = *self.started_at.get_or_insert(now_ms);
        let frame = RevealFrame::at(now_ms - start);
        self.finished = frame.done;
        Some(frame)
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_running(&self) -> bool {
        !self.cancelled && !self.finished
    }
}

/// 表示中の画像
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    Original,
    #[default]
    Generated,
}

/// 表示切替とリビールの紐付け
///
/// 新しい生成画像（render番号が進んだ時）だけがアニメーションを開始する。
/// 一度表示した画像へ戻る時は静止画で出す。
#[derive(Debug, Clone, Default)]
pub struct Viewport {
    mode: ViewMode,
    revealed: u64,
    animation: Option<RevealAnimation>,
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn is_animating(&self) -> bool {
        self.animation.as_ref().is_some_and(|a| a.is_running())
    }

    /// 生成画像の番号を通知する。新しい画像ならアニメーションを開始して true
    pub fn on_generated(&mut self, render: u64) -> bool {
        if render == 0 || render <= self.revealed {
            return false;
        }
        self.revealed = render;
        self.mode = ViewMode::Generated;
        self.animation = Some(RevealAnimation::new());
        true
    }

    /// オリジナル表示へ。進行中のアニメーションは中止
    pub fn show_original(&mut self) {
        if let Some(animation) = self.animation.as_mut() {
            animation.cancel();
        }
        self.animation = None;
        self.mode = ViewMode::Original;
    }

    /// 生成画像表示へ（アニメーションは再生しない）
    pub fn show_generated(&mut self) {
        self.mode = ViewMode::Generated;
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        match mode {
            ViewMode::Original => self.show_original(),
            ViewMode::Generated => self.show_generated(),
        }
    }

    /// アニメーションを1フレーム進める。完了フレームを返した後は None
    pub fn tick(&mut self, now_ms: f64) -> Option<RevealFrame> {
        if self.mode != ViewMode::Generated {
            return None;
        }
        let frame = self.animation.as_mut()?.tick(now_ms);
        if frame.map_or(true, |f| f.done) {
            self.animation = None;
        }
        frame
    }

    /// リセット時。番号は保持して古い画像の再アニメーションを防ぐ
    pub fn reset(&mut self) {
        self.animation = None;
        self.mode = ViewMode::Generated;
    }
}
