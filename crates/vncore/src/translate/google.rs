//! 公開翻譯端點客戶端
//!
//! 請求：`GET {endpoint}?client=gtx&sl=..&tl=..&dt=t&q=..`
//! 回應：JSON 陣列，第一個元素是 `[譯文片段, 原文片段, ...]` 的陣列，依序串接即為完整譯文。

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::{TranslateError, TranslationConfig, Translator};

/// HTTP 翻譯客戶端
#[derive(Debug, Clone)]
pub struct GoogleTranslator {
    client: reqwest::Client,
    endpoint: String,
}

impl GoogleTranslator {
    /// 依設定建立客戶端
    pub fn new(config: &TranslationConfig) -> Result<Self, TranslateError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("vncore/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, TranslateError> {
        debug!("翻譯請求 {} → {} ({} 字元)", source_lang, target_lang, text.chars().count());

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", source_lang),
                ("tl", target_lang),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslateError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        parse_response(&body)
    }
}

/// 解析翻譯回應，串接所有譯文片段
pub fn parse_response(body: &str) -> Result<String, TranslateError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| TranslateError::ResponseShape(e.to_string()))?;

    let chunks = value
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslateError::ResponseShape("缺少譯文區段".to_string()))?;

    if chunks.is_empty() {
        return Err(TranslateError::ResponseShape("譯文區段為空".to_string()));
    }

    let mut translated = String::new();
    let mut found = false;
    for chunk in chunks {
        let parts = chunk
            .as_array()
            .ok_or_else(|| TranslateError::ResponseShape(format!("譯文片段不是陣列: {}", chunk)))?;
        if let Some(text) = parts.first().and_then(Value::as_str) {
            translated.push_str(text);
            found = true;
        }
    }

    if !found {
        return Err(TranslateError::ResponseShape("沒有任何譯文片段".to_string()));
    }
    Ok(translated)
}
