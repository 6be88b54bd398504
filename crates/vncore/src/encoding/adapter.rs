//! 編碼轉接層
//!
//! 包裝 TCVN3/Unicode 與位元組轉碼函式，失敗時記錄並回傳備援值：
//! - TCVN3/Unicode：回傳未轉換的原文
//! - GBK/Windows-1252 系列：回傳空字串（空位元組）

use std::sync::Arc;

use super::{CodecError, Tcvn3Codec, VietCodec};
use crate::outcome::Outcome;

/// 編碼轉接層的結果
pub type CodecOutcome<T> = Outcome<T, CodecError>;

/// 編碼轉接層
#[derive(Clone)]
pub struct CodecAdapter {
    codec: Arc<dyn VietCodec>,
}

impl CodecAdapter {
    /// 使用自訂的 TCVN3 轉換器
    pub fn with_codec(codec: Arc<dyn VietCodec>) -> Self {
        Self { codec }
    }

    /// TCVN3 → Unicode
    ///
    /// # Example
    /// ```
    /// use vncore::encoding::CodecAdapter;
    ///
    /// let adapter = CodecAdapter::default();
    /// assert_eq!(adapter.to_unicode("Xin chµo").into_value(), "Xin chào");
    /// ```
    pub fn to_unicode(&self, text: &str) -> CodecOutcome<String> {
        if text.is_empty() {
            return Outcome::Converted(String::new());
        }
        Outcome::from_result(self.codec.to_unicode(text), "TCVN3 → Unicode", || {
            text.to_string()
        })
    }

    /// Unicode → TCVN3
    pub fn to_tcvn3(&self, text: &str) -> CodecOutcome<String> {
        if text.is_empty() {
            return Outcome::Converted(String::new());
        }
        Outcome::from_result(self.codec.to_tcvn3(text), "Unicode → TCVN3", || {
            text.to_string()
        })
    }

    pub fn decode(&self, input: impl AsRef<[u8]>, encoding: &str) -> CodecOutcome<String> {
        Outcome::from_result(super::decode(input, encoding), "位元組解碼", String::new)
    }

    pub fn encode(&self, text: &str, encoding: &str) -> CodecOutcome<Vec<u8>> {
        Outcome::from_result(super::encode(text, encoding), "位元組編碼", Vec::new)
    }

    pub fn convert_encoding(
        &self,
        input: impl AsRef<[u8]>,
        source: &str,
        target: &str,
    ) -> CodecOutcome<Vec<u8>> {
        Outcome::from_result(
            super::convert_encoding(input, source, target),
            "編碼轉換",
            Vec::new,
        )
    }
}

impl Default for CodecAdapter {
    fn default() -> Self {
        Self {
            codec: Tcvn3Codec::shared(),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// 永遠失敗的轉換器
    pub(crate) struct BrokenCodec;

    impl VietCodec for BrokenCodec {
        fn to_unicode(&self, _text: &str) -> Result<String, CodecError> {
            Err(CodecError::Conversion("表格損毀".to_string()))
        }

        fn to_tcvn3(&self, _text: &str) -> Result<String, CodecError> {
            Err(CodecError::Conversion("表格損毀".to_string()))
        }
    }

    #[test]
    fn test_to_tcvn3_converts() {
        let adapter = CodecAdapter::default();
        let outcome = adapter.to_tcvn3("Tiếng Việt");
        assert!(!outcome.is_fallback());
        assert_eq!(outcome.into_value(), "TiÕng ViÖt");
    }

    #[test]
    fn test_empty_text_skips_codec() {
        let adapter = CodecAdapter::with_codec(Arc::new(BrokenCodec));
        assert_eq!(adapter.to_unicode(""), Outcome::Converted(String::new()));
        assert_eq!(adapter.to_tcvn3(""), Outcome::Converted(String::new()));
    }

    #[test]
    fn test_viet_failure_returns_original_text() {
        let adapter = CodecAdapter::with_codec(Arc::new(BrokenCodec));

        let outcome = adapter.to_unicode("ViÖt");
        assert!(outcome.is_fallback());
        assert_eq!(outcome.value(), "ViÖt");

        let outcome = adapter.to_tcvn3("Việt");
        assert!(matches!(outcome.error(), Some(CodecError::Conversion(_))));
        assert_eq!(outcome.into_value(), "Việt");
    }

    #[test]
    fn test_charset_failure_returns_empty() {
        let adapter = CodecAdapter::default();

        let decoded = adapter.decode([0x41u8], "shift-jis");
        assert!(decoded.is_fallback());
        assert_eq!(decoded.value(), "");

        let encoded = adapter.encode("abc", "shift-jis");
        assert!(encoded.value().is_empty());

        let converted = adapter.convert_encoding("abc", "utf8", "nope");
        assert!(matches!(
            converted.error(),
            Some(CodecError::UnsupportedEncoding(name)) if name == "nope"
        ));
        assert!(converted.value().is_empty());
    }

    #[test]
    fn test_convert_encoding_identity() {
        let adapter = CodecAdapter::default();
        let text = "Xin chào 你好";
        let outcome = adapter.convert_encoding(text, "utf8", "utf8");
        assert_eq!(outcome, Outcome::Converted(text.as_bytes().to_vec()));
    }

    #[test]
    fn test_gbk_roundtrip_through_adapter() {
        let adapter = CodecAdapter::default();
        let bytes = adapter.encode("翻译", "gbk").into_value();
        assert_eq!(adapter.decode(&bytes, "gbk").into_value(), "翻译");
    }
}
