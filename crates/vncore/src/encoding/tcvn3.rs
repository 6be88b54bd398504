//! TCVN3 ⇄ Unicode 越南文轉換
//!
//! TCVN3（ABC，TCVN 5712 VN3）是以 .Vn 字型顯示的 8 位元編碼。
//! 在字串中每個 TCVN3 位元組以同值的 Latin-1 字元表示（例如 0xB5 → 'µ'）。
//! TCVN3 沒有大寫帶聲調字母的獨立碼位，Unicode → TCVN3 時會折疊為小寫碼位。

use std::collections::HashMap;
use std::sync::Arc;

use super::CodecError;

/// TCVN3 ⇄ Unicode 轉換介面
pub trait VietCodec: Send + Sync {
    fn to_unicode(&self, text: &str) -> Result<String, CodecError>;
    fn to_tcvn3(&self, text: &str) -> Result<String, CodecError>;
}

/// 內建對應表：(Unicode 字元, TCVN3 位元組)
const TCVN3_TABLE: &[(char, u8)] = &[
    // 大寫基本字母
    ('Ă', 0xA1), ('Â', 0xA2), ('Ê', 0xA3), ('Ô', 0xA4), ('Ơ', 0xA5), ('Ư', 0xA6), ('Đ', 0xA7),
    // 小寫基本字母
    ('ă', 0xA8), ('â', 0xA9), ('ê', 0xAA), ('ô', 0xAB), ('ơ', 0xAC), ('ư', 0xAD), ('đ', 0xAE),
    // a
    ('à', 0xB5), ('ả', 0xB6), ('ã', 0xB7), ('á', 0xB8), ('ạ', 0xB9),
    // ă
    ('ằ', 0xBB), ('ẳ', 0xBC), ('ẵ', 0xBD), ('ắ', 0xBE), ('ặ', 0xC6),
    // â
    ('ầ', 0xC7), ('ẩ', 0xC8), ('ẫ', 0xC9), ('ấ', 0xCA), ('ậ', 0xCB),
    // e
    ('è', 0xCC), ('ẻ', 0xCE), ('ẽ', 0xCF), ('é', 0xD0), ('ẹ', 0xD1),
    // ê
    ('ề', 0xD2), ('ể', 0xD3), ('ễ', 0xD4), ('ế', 0xD5), ('ệ', 0xD6),
    // i
    ('ì', 0xD7), ('ỉ', 0xD8), ('ĩ', 0xDC), ('í', 0xDD), ('ị', 0xDE),
    // o
    ('ò', 0xDF), ('ỏ', 0xE1), ('õ', 0xE2), ('ó', 0xE3), ('ọ', 0xE4),
    // ô
    ('ồ', 0xE5), ('ổ', 0xE6), ('ỗ', 0xE7), ('ố', 0xE8), ('ộ', 0xE9),
    // ơ
    ('ờ', 0xEA), ('ở', 0xEB), ('ỡ', 0xEC), ('ớ', 0xED), ('ợ', 0xEE),
    // u
    ('ù', 0xEF), ('ủ', 0xF1), ('ũ', 0xF2), ('ú', 0xF3), ('ụ', 0xF4),
    // ư
    ('ừ', 0xF5), ('ử', 0xF6), ('ữ', 0xF7), ('ứ', 0xF8), ('ự', 0xF9),
    // y
    ('ỳ', 0xFA), ('ỷ', 0xFB), ('ỹ', 0xFC), ('ý', 0xFD), ('ỵ', 0xFE),
];

lazy_static::lazy_static! {
    static ref BUILTIN_CODEC: Arc<Tcvn3Codec> = {
        let entries: Vec<(char, char)> = TCVN3_TABLE
            .iter()
            .map(|&(unicode, byte)| (unicode, char::from(byte)))
            .collect();
        // 內建表由單元測試驗證，不會失敗
        Arc::new(Tcvn3Codec::build(&entries))
    };
}

/// 以對應表實作的 TCVN3 轉換器
#[derive(Debug, Clone)]
pub struct Tcvn3Codec {
    to_unicode: HashMap<char, char>,
    to_tcvn3: HashMap<char, char>,
}

impl Tcvn3Codec {
    /// 共用的內建轉換器
    pub fn shared() -> Arc<Tcvn3Codec> {
        Arc::clone(&BUILTIN_CODEC)
    }

    /// 從自訂對應表建立轉換器
    ///
    /// `entries` 為 (Unicode 字元, TCVN3 字元) 配對；
    /// 空表或重複的鍵值會回傳 [`CodecError::MalformedTable`]。
    pub fn from_table(entries: &[(char, char)]) -> Result<Self, CodecError> {
        if entries.is_empty() {
            return Err(CodecError::MalformedTable("對應表為空".to_string()));
        }

        let mut seen_unicode = HashMap::new();
        let mut seen_tcvn3 = HashMap::new();
        for &(unicode, tcvn3) in entries {
            if seen_unicode.insert(unicode, tcvn3).is_some() {
                return Err(CodecError::MalformedTable(format!(
                    "重複的 Unicode 字元 U+{:04X}",
                    unicode as u32
                )));
            }
            if seen_tcvn3.insert(tcvn3, unicode).is_some() {
                return Err(CodecError::MalformedTable(format!(
                    "重複的 TCVN3 碼位 0x{:02X}",
                    tcvn3 as u32
                )));
            }
        }

        Ok(Self::build(entries))
    }

    fn build(entries: &[(char, char)]) -> Self {
        let mut to_unicode = HashMap::with_capacity(entries.len());
        let mut to_tcvn3 = HashMap::with_capacity(entries.len() * 2);

        for &(unicode, tcvn3) in entries {
            to_unicode.insert(tcvn3, unicode);
            to_tcvn3.insert(unicode, tcvn3);
        }

        // 大寫帶聲調字母折疊到小寫碼位（表中已有獨立碼位的大寫字母除外）
        for &(unicode, tcvn3) in entries {
            let mut upper = unicode.to_uppercase();
            if let (Some(u), None) = (upper.next(), upper.next()) {
                if u != unicode {
                    to_tcvn3.entry(u).or_insert(tcvn3);
                }
            }
        }

        Self {
            to_unicode,
            to_tcvn3,
        }
    }

    fn map(table: &HashMap<char, char>, text: &str) -> String {
        text.chars()
            .map(|c| table.get(&c).copied().unwrap_or(c))
            .collect()
    }
}

impl Default for Tcvn3Codec {
    fn default() -> Self {
        Tcvn3Codec::clone(&BUILTIN_CODEC)
    }
}

impl VietCodec for Tcvn3Codec {
    fn to_unicode(&self, text: &str) -> Result<String, CodecError> {
        Ok(Self::map(&self.to_unicode, text))
    }

    fn to_tcvn3(&self, text: &str) -> Result<String, CodecError> {
        Ok(Self::map(&self.to_tcvn3, text))
    }
}
