//! デバウンス（最後のイベントから一定時間静かになったら1回だけ発火）
//!
//! タイマーは tokio タスクで、予約し直すと前のタスクを abort する。
//! abort が間に合わず送信済みの値は世代番号で捨てる。

use roof_ai_common::workflow::INSIGHT_DEBOUNCE_MS;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// インサイト取得の待ち時間
pub const INSIGHT_DEBOUNCE: Duration = Duration::from_millis(INSIGHT_DEBOUNCE_MS);

pub struct Debouncer<T> {
    delay: Duration,
    generation: u64,
    tx: mpsc::UnboundedSender<(u64, T)>,
    rx: mpsc::UnboundedReceiver<(u64, T)>,
    pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            delay,
            generation: 0,
            tx,
            rx,
            pending: None,
        }
    }

    /// 予約（既存の予約は取り消す）
    pub fn schedule(&mut self, value: T) {
        self.cancel();

        let tx = self.tx.clone();
        let delay = self.delay;
        let generation = self.generation;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send((generation, value));
        }));
    }

    pub fn cancel(&mut self) {
        self.generation += 1;
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// 予約が発火するまで待つ。予約がなければすぐ None
    pub async fn fired(&mut self) -> Option<T> {
        while self.pending.is_some() {
            let (generation, value) = self.rx.recv().await?;
            if generation == self.generation {
                self.pending = None;
                return Some(value);
            }
        }
        None
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
