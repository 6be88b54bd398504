//! 編解碼模組
//!
//! - `tcvn3`: TCVN3 ⇄ Unicode 越南文字元對應
//! - `adapter`: 不會失敗的統一介面（失敗時回傳備援值）
//! - 本檔：GBK / Windows-1252 / UTF-8 位元組轉碼

pub mod adapter;
pub mod tcvn3;

use std::fmt;
use std::str::FromStr;

use encoding_rs::{Encoding, GBK, UTF_8, WINDOWS_1252};
use thiserror::Error;

pub use adapter::CodecAdapter;
pub use tcvn3::{Tcvn3Codec, VietCodec};

/// 編碼轉換錯誤
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("編碼表格式錯誤: {0}")]
    MalformedTable(String),

    #[error("不支援的編碼: {0}")]
    UnsupportedEncoding(String),

    #[error("轉換失敗: {0}")]
    Conversion(String),
}

/// 支援的位元組編碼
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Charset {
    Utf8,
    Gbk,
    Windows1252,
}

impl Charset {
    /// 所有支援的編碼（UI 下拉選單使用）
    pub const ALL: [Charset; 3] = [Charset::Utf8, Charset::Gbk, Charset::Windows1252];

    pub fn name(self) -> &'static str {
        match self {
            Charset::Utf8 => "utf-8",
            Charset::Gbk => "gbk",
            Charset::Windows1252 => "windows-1252",
        }
    }

    fn to_rs(self) -> &'static Encoding {
        match self {
            Charset::Utf8 => UTF_8,
            Charset::Gbk => GBK,
            Charset::Windows1252 => WINDOWS_1252,
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Charset {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Ok(Charset::Utf8),
            "gbk" | "cp936" | "gb2312" => Ok(Charset::Gbk),
            "windows-1252" | "cp1252" | "latin1" | "iso-8859-1" => Ok(Charset::Windows1252),
            _ => Err(CodecError::UnsupportedEncoding(s.to_string())),
        }
    }
}

/// 將指定編碼的位元組轉換為 UTF-8 字串
///
/// 輸入可以是字串、位元組切片或 `Vec<u8>`。
/// 無效的位元組會被替換為 U+FFFD，不視為錯誤。
///
/// # Example
/// ```
/// use vncore::encoding::decode;
///
/// // "你好" in GBK
/// let text = decode([0xc4, 0xe3, 0xba, 0xc3], "gbk").unwrap();
/// assert_eq!(text, "你好");
/// ```
pub fn decode(input: impl AsRef<[u8]>, encoding: &str) -> Result<String, CodecError> {
    let charset: Charset = encoding.parse()?;
    let (decoded, had_errors) = charset.to_rs().decode_without_bom_handling(input.as_ref());
    if had_errors {
        tracing::debug!("{} 解碼時遇到無效位元組，已替換為 U+FFFD", charset);
    }
    Ok(decoded.into_owned())
}

/// 將 UTF-8 字串轉換為指定編碼的位元組
///
/// 無法編碼的字元會以 HTML 數值字元參照輸出（`encoding_rs` 的行為）。
///
/// # Example
/// ```
/// use vncore::encoding::encode;
///
/// let bytes = encode("你好", "gbk").unwrap();
/// assert_eq!(bytes, vec![0xc4, 0xe3, 0xba, 0xc3]);
/// ```
pub fn encode(text: &str, encoding: &str) -> Result<Vec<u8>, CodecError> {
    let charset: Charset = encoding.parse()?;
    let (encoded, _, had_unmappable) = charset.to_rs().encode(text);
    if had_unmappable {
        tracing::debug!("{} 編碼時遇到無法對應的字元", charset);
    }
    Ok(encoded.into_owned())
}

/// 在兩種位元組編碼之間轉換，以 UTF-8 作為中介
///
/// 來源與目標相同時直接回傳原始位元組。
pub fn convert_encoding(
    input: impl AsRef<[u8]>,
    source: &str,
    target: &str,
) -> Result<Vec<u8>, CodecError> {
    let source_charset: Charset = source.parse()?;
    let target_charset: Charset = target.parse()?;
    let input = input.as_ref();

    if source_charset == target_charset {
        return Ok(input.to_vec());
    }

    let pivot = decode(input, source_charset.name())?;
    encode(&pivot, target_charset.name())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_charset_aliases() {
        assert_eq!("UTF8".parse::<Charset>(), Ok(Charset::Utf8));
        assert_eq!(" cp936 ".parse::<Charset>(), Ok(Charset::Gbk));
        assert_eq!("Windows-1252".parse::<Charset>(), Ok(Charset::Windows1252));
        assert_eq!(
            "big5".parse::<Charset>(),
            Err(CodecError::UnsupportedEncoding("big5".to_string()))
        );
    }

    #[test]
    fn test_decode_gbk_chinese() {
        let bytes = [0xc4, 0xe3, 0xba, 0xc3];
        assert_eq!(decode(&bytes[..], "gbk").unwrap(), "你好");
    }

    #[test]
    fn test_decode_accepts_str_and_vec() {
        assert_eq!(decode("Hello", "windows-1252").unwrap(), "Hello");
        assert_eq!(decode(vec![0xe9u8], "windows-1252").unwrap(), "é");
    }

    #[test]
    fn test_decode_invalid_bytes_replaced() {
        // 0x81 後面缺少尾位元組
        let text = decode([0x41, 0x81], "gbk").unwrap();
        assert!(text.starts_with('A'));
        assert!(text.contains('\u{FFFD}'));
    }

    #[test]
    fn test_encode_windows_1252() {
        assert_eq!(encode("café", "windows-1252").unwrap(), vec![b'c', b'a', b'f', 0xe9]);
    }

    #[test]
    fn test_encode_unsupported() {
        assert!(matches!(
            encode("x", "klingon"),
            Err(CodecError::UnsupportedEncoding(_))
        ));
    }

    #[test]
    fn test_convert_identity() {
        let text = "Tiếng Việt 你好";
        assert_eq!(convert_encoding(text, "utf8", "utf8").unwrap(), text.as_bytes());
        assert_eq!(convert_encoding(text, "utf8", "UTF-8").unwrap(), text.as_bytes());
    }

    #[test]
    fn test_convert_gbk_to_utf8() {
        let gbk = encode("中文", "gbk").unwrap();
        let utf8 = convert_encoding(&gbk, "gbk", "utf8").unwrap();
        assert_eq!(String::from_utf8(utf8).unwrap(), "中文");
    }

    #[test]
    fn test_convert_unknown_name() {
        let err = convert_encoding("abc", "utf8", "ebcdic").unwrap_err();
        assert_eq!(err.to_string(), "不支援的編碼: ebcdic");
    }
}
