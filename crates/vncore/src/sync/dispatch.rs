//! 背景翻譯派送
//!
//! 在 tokio 執行緒上執行 [`TranslationJob`]，完成的結果經由 channel 送回 UI 執行緒，
//! 由 UI 在下一次更新時交給 [`SyncEngine::complete`](super::SyncEngine::complete)。

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::info;

use super::engine::{TranslationDone, TranslationJob};
use crate::translate::TranslationAdapter;

/// 背景翻譯派送器
pub struct TranslationDispatcher {
    runtime: Handle,
    done_tx: mpsc::UnboundedSender<TranslationDone>,
    done_rx: mpsc::UnboundedReceiver<TranslationDone>,
}

impl TranslationDispatcher {
    pub fn new(runtime: Handle) -> Self {
        let (done_tx, done_rx) = mpsc::unbounded_channel();
        Self {
            runtime,
            done_tx,
            done_rx,
        }
    }

    /// 派送工作；完成後呼叫 `on_done`（例如要求 UI 重繪）
    pub fn dispatch(
        &self,
        job: TranslationJob,
        translator: TranslationAdapter,
        on_done: impl FnOnce() + Send + 'static,
    ) {
        info!("派送翻譯工作 {} ({} 字元)", job.direction(), job.source().chars().count());
        let done_tx = self.done_tx.clone();
        self.runtime.spawn(async move {
            let done = job.run(&translator).await;
            // 接收端已關閉時結果連同閘門一起丟棄
            let _ = done_tx.send(done);
            on_done();
        });
    }

    /// 取出所有已完成的工作（不等待）
    pub fn drain(&mut self) -> Vec<TranslationDone> {
        let mut finished = Vec::new();
        while let Ok(done) = self.done_rx.try_recv() {
            finished.push(done);
        }
        finished
    }

    /// 等待下一個完成的工作
    #[cfg(test)]
    pub(crate) async fn next(&mut self) -> Option<TranslationDone> {
        self.done_rx.recv().await
    }
}
