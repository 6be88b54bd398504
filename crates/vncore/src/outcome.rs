//! 轉接層結果型別
//!
//! 轉接層（編碼、翻譯）失敗時不會把錯誤拋給呼叫端，而是回傳一個可以直接顯示的
//! 備援值。`Outcome` 讓備援路徑在測試中仍然可以被檢查。

use std::fmt;

/// 轉接層呼叫的結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T, E> {
    /// 轉換成功
    Converted(T),
    /// 轉換失敗，`value` 為備援值
    Fallback { value: T, error: E },
}

impl<T, E> Outcome<T, E> {
    /// 不論成功與否都可以顯示的值
    pub fn value(&self) -> &T {
        match self {
            Outcome::Converted(value) => value,
            Outcome::Fallback { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Outcome::Converted(value) => value,
            Outcome::Fallback { value, .. } => value,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Outcome::Fallback { .. })
    }

    /// 失敗原因（成功時為 `None`）
    pub fn error(&self) -> Option<&E> {
        match self {
            Outcome::Converted(_) => None,
            Outcome::Fallback { error, .. } => Some(error),
        }
    }

    /// 將 `Result` 轉為 `Outcome`，失敗時以 `fallback` 產生備援值並記錄警告
    pub(crate) fn from_result(
        result: Result<T, E>,
        context: &str,
        fallback: impl FnOnce() -> T,
    ) -> Self
    where
        E: fmt::Display,
    {
        match result {
            Ok(value) => Outcome::Converted(value),
            Err(error) => {
                tracing::warn!("{} 失敗，改用備援值: {}", context, error);
                Outcome::Fallback {
                    value: fallback(),
                    error,
                }
            }
        }
    }
}
