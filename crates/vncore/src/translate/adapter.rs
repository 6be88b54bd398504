//! 翻譯轉接層
//!
//! 失敗時記錄並回傳原文，呼叫端只能透過 [`Outcome::is_fallback`] 或日誌分辨失敗。

use std::sync::Arc;

use super::{TranslateError, Translator};
use crate::outcome::Outcome;

/// 翻譯轉接層的結果
pub type TranslationOutcome = Outcome<String, TranslateError>;

/// 翻譯轉接層
#[derive(Clone)]
pub struct TranslationAdapter {
    translator: Arc<dyn Translator>,
}

impl TranslationAdapter {
    pub fn new(translator: Arc<dyn Translator>) -> Self {
        Self { translator }
    }

    /// 翻譯文字
    ///
    /// 空白輸入直接回傳空字串，不發出請求；每次呼叫最多一次網路往返。
    pub async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> TranslationOutcome {
        if text.trim().is_empty() {
            return Outcome::Converted(String::new());
        }

        let result = self.translator.translate(text, source_lang, target_lang).await;
        Outcome::from_result(result, "翻譯", || text.to_string())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::translate::google::tests::{serve_once, translator_for};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// 回傳固定譯文並計算呼叫次數的假翻譯器
    pub(crate) struct FakeTranslator {
        pub reply: Option<String>,
        pub calls: AtomicUsize,
    }

    impl FakeTranslator {
        pub(crate) fn replying(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Some(reply.to_string()),
                calls: AtomicUsize::new(0),
            })
        }

        /// 永遠回應 503
        pub(crate) fn failing() -> Arc<Self> {
            Arc::new(Self {
                reply: None,
                calls: AtomicUsize::new(0),
            })
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Translator for FakeTranslator {
        async fn translate(
            &self,
            _text: &str,
            _source_lang: &str,
            _target_lang: &str,
        ) -> Result<String, TranslateError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply.clone().ok_or(TranslateError::Status(503))
        }
    }

    #[tokio::test]
    async fn test_empty_input_makes_no_call() {
        let fake = FakeTranslator::replying("x");
        let adapter = TranslationAdapter::new(fake.clone());

        assert_eq!(adapter.translate("", "zh", "vi").await.into_value(), "");
        assert_eq!(adapter.translate("  \n\t", "zh", "vi").await.into_value(), "");
        assert_eq!(fake.calls(), 0);
    }

    #[tokio::test]
    async fn test_success_calls_once() {
        let fake = FakeTranslator::replying("Xin chào");
        let adapter = TranslationAdapter::new(fake.clone());

        let outcome = adapter.translate("你好", "zh", "vi").await;
        assert!(!outcome.is_fallback());
        assert_eq!(outcome.into_value(), "Xin chào");
        assert_eq!(fake.calls(), 1);
    }

    #[tokio::test]
    async fn test_failure_returns_original_text() {
        let fake = FakeTranslator::failing();
        let adapter = TranslationAdapter::new(fake.clone());

        let outcome = adapter.translate("你好", "zh", "vi").await;
        assert!(matches!(outcome.error(), Some(TranslateError::Status(503))));
        assert_eq!(outcome.into_value(), "你好");
        // 不重試
        assert_eq!(fake.calls(), 1);
    }

    #[tokio::test]
    async fn test_http_non_success_returns_original_text() {
        let (endpoint, _server) = serve_once("500 Internal Server Error", "{}").await;
        let adapter = TranslationAdapter::new(Arc::new(translator_for(&endpoint)));

        let outcome = adapter.translate("Xin chào", "vi", "zh").await;
        assert!(outcome.is_fallback());
        assert_eq!(outcome.value(), "Xin chào");
    }

    #[tokio::test]
    async fn test_http_malformed_body_returns_original_text() {
        let (endpoint, _server) = serve_once("200 OK", "not json").await;
        let adapter = TranslationAdapter::new(Arc::new(translator_for(&endpoint)));

        let outcome = adapter.translate("你好", "zh", "vi").await;
        assert!(matches!(outcome.error(), Some(TranslateError::ResponseShape(_))));
        assert_eq!(outcome.into_value(), "你好");
    }

    #[tokio::test]
    async fn test_http_chunks_without_text_returns_original_text() {
        let (endpoint, _server) = serve_once("200 OK", r#"[[[null,"你好"]]]"#).await;
        let adapter = TranslationAdapter::new(Arc::new(translator_for(&endpoint)));

        let outcome = adapter.translate("你好", "zh", "vi").await;
        assert!(outcome.is_fallback());
        assert!(matches!(outcome.error(), Some(TranslateError::ResponseShape(_))));
        assert_eq!(outcome.into_value(), "你好");
    }
}
