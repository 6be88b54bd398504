//! 翻譯模組
//!
//! - `google`: 以 HTTP 呼叫公開翻譯端點的實作
//! - `adapter`: 不會失敗的統一介面（失敗時回傳原文）

pub mod adapter;
pub mod google;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use adapter::{TranslationAdapter, TranslationOutcome};
pub use google::GoogleTranslator;

/// 預設翻譯端點
pub const DEFAULT_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// 翻譯錯誤
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("翻譯服務連線失敗: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("翻譯服務回應狀態碼 {0}")]
    Status(u16),

    #[error("翻譯回應格式錯誤: {0}")]
    ResponseShape(String),

    #[error("翻譯服務無法使用: {0}")]
    Unavailable(String),
}

/// 遠端翻譯介面
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, TranslateError>;
}

/// 無法建立客戶端時使用的翻譯器，每次呼叫都回報 [`TranslateError::Unavailable`]
#[derive(Debug, Clone)]
pub struct UnavailableTranslator {
    reason: String,
}

impl UnavailableTranslator {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl Translator for UnavailableTranslator {
    async fn translate(
        &self,
        _text: &str,
        _source_lang: &str,
        _target_lang: &str,
    ) -> Result<String, TranslateError> {
        Err(TranslateError::Unavailable(self.reason.clone()))
    }
}

/// 依設定建立 HTTP 翻譯器；失敗時記錄錯誤並改用 [`UnavailableTranslator`]
pub fn connect(config: &TranslationConfig) -> Arc<dyn Translator> {
    match GoogleTranslator::new(config) {
        Ok(translator) => {
            tracing::info!("翻譯端點: {}", translator.endpoint());
            Arc::new(translator)
        }
        Err(e) => {
            tracing::error!("無法建立翻譯客戶端，翻譯將回傳原文: {}", e);
            Arc::new(UnavailableTranslator::new(e.to_string()))
        }
    }
}

/// 翻譯設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationConfig {
    /// 翻譯端點 URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// 中文語言代碼
    #[serde(default = "default_chinese")]
    pub chinese: String,
    /// 越南文語言代碼
    #[serde(default = "default_vietnamese")]
    pub vietnamese: String,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}
fn default_chinese() -> String {
    "zh".to_string()
}
fn default_vietnamese() -> String {
    "vi".to_string()
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            chinese: default_chinese(),
            vietnamese: default_vietnamese(),
        }
    }
}
