//! 欄位同步模組
//!
//! 兩個畫面的欄位狀態與其轉移：
//! - `ConverterState`: 轉換畫面（TCVN3 → Unicode、Unicode → TCVN3 兩區，手動送出）
//! - `TranslationState`: 翻譯畫面（中文 / 越南文 Unicode / 越南文 TCVN3，越南文兩欄即時同步）
//!
//! 轉移都是純函式：吃進目前狀態與事件，回傳新狀態。
//! `engine` 負責串接翻譯、閘門與歷史紀錄。

pub mod dispatch;
pub mod engine;
pub mod gate;

use crate::encoding::CodecAdapter;
use crate::history::{Direction, HistoryRecord};

pub use dispatch::TranslationDispatcher;
pub use engine::{SyncEngine, TranslationDone, TranslationJob};
pub use gate::{GatePermit, TranslationGate};

/// 越南文文字的編碼
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Tcvn3,
    Unicode,
}

/// 帶有編碼標記的文字
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedText {
    pub content: String,
    pub encoding: TextEncoding,
}

impl EncodedText {
    pub fn tcvn3(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            encoding: TextEncoding::Tcvn3,
        }
    }

    pub fn unicode(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            encoding: TextEncoding::Unicode,
        }
    }

    /// 轉成另一種編碼（同編碼時原樣複製）
    pub fn convert_to(&self, encoding: TextEncoding, codec: &CodecAdapter) -> EncodedText {
        let content = match (self.encoding, encoding) {
            (TextEncoding::Tcvn3, TextEncoding::Unicode) => codec.to_unicode(&self.content).into_value(),
            (TextEncoding::Unicode, TextEncoding::Tcvn3) => codec.to_tcvn3(&self.content).into_value(),
            _ => self.content.clone(),
        };
        EncodedText { content, encoding }
    }

    /// 兩段文字在編碼對應下是否代表同一內容
    pub(crate) fn in_sync_with(&self, other: &EncodedText, codec: &CodecAdapter) -> bool {
        self.convert_to(other.encoding, codec).content == other.content
    }
}

/// 去掉空白後是否為空
fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

// ============================================================================
// 轉換畫面
// ============================================================================

/// 轉換畫面的區段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Tcvn3ToUnicode,
    UnicodeToTcvn3,
}

impl Section {
    pub fn direction(self) -> Direction {
        match self {
            Section::Tcvn3ToUnicode => Direction::Tcvn3ToUnicode,
            Section::UnicodeToTcvn3 => Direction::UnicodeToTcvn3,
        }
    }
}

/// 轉換畫面的事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConverterEvent {
    EditTcvn3Input(String),
    EditUnicodeOutput(String),
    EditUnicodeInput(String),
    EditTcvn3Output(String),
    /// 按鈕或 Enter（不含 Shift）
    Submit(Section),
}

/// 轉換畫面狀態
///
/// 輸入欄變更時不會自動轉換，只有 `Submit` 才會寫入輸出欄。輸出欄可自由編輯。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConverterState {
    pub tcvn3_input: String,
    pub unicode_output: String,
    pub unicode_input: String,
    pub tcvn3_output: String,
}

impl ConverterState {
    /// 套用事件；送出成功時回傳要加入歷史的紀錄
    pub fn apply(
        mut self,
        event: ConverterEvent,
        codec: &CodecAdapter,
    ) -> (Self, Option<HistoryRecord>) {
        match event {
            ConverterEvent::EditTcvn3Input(text) => self.tcvn3_input = text,
            ConverterEvent::EditUnicodeOutput(text) => self.unicode_output = text,
            ConverterEvent::EditUnicodeInput(text) => self.unicode_input = text,
            ConverterEvent::EditTcvn3Output(text) => self.tcvn3_output = text,
            ConverterEvent::Submit(section) => {
                let (input, output) = match section {
                    Section::Tcvn3ToUnicode => (&self.tcvn3_input, &mut self.unicode_output),
                    Section::UnicodeToTcvn3 => (&self.unicode_input, &mut self.tcvn3_output),
                };
                if is_blank(input) {
                    return (self, None);
                }

                let result = match section {
                    Section::Tcvn3ToUnicode => codec.to_unicode(input),
                    Section::UnicodeToTcvn3 => codec.to_tcvn3(input),
                }
                .into_value();
                *output = result.clone();

                let record = HistoryRecord::new(section.direction(), input.clone(), result);
                return (self, Some(record));
            }
        }
        (self, None)
    }

    /// 送出按鈕是否可用
    pub fn can_submit(&self, section: Section) -> bool {
        match section {
            Section::Tcvn3ToUnicode => !is_blank(&self.tcvn3_input),
            Section::UnicodeToTcvn3 => !is_blank(&self.unicode_input),
        }
    }
}

// ============================================================================
// 翻譯畫面
// ============================================================================

/// 翻譯畫面的編輯事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationEvent {
    EditChinese(String),
    /// 編輯越南文其中一個編碼欄位，另一欄即時重算
    EditVietnamese(EncodedText),
}

/// 翻譯完成後的三欄快照
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationPair {
    pub chinese: String,
    pub unicode: EncodedText,
    pub tcvn3: EncodedText,
}

/// 翻譯畫面狀態
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationState {
    pub chinese: String,
    pub vietnamese_unicode: String,
    pub vietnamese_tcvn3: String,
}

impl TranslationState {
    pub fn apply(mut self, event: TranslationEvent, codec: &CodecAdapter) -> Self {
        match event {
            TranslationEvent::EditChinese(text) => self.chinese = text,
            TranslationEvent::EditVietnamese(text) => match text.encoding {
                TextEncoding::Tcvn3 => {
                    self.vietnamese_unicode = codec.to_unicode(&text.content).into_value();
                    self.vietnamese_tcvn3 = text.content;
                }
                TextEncoding::Unicode => {
                    self.vietnamese_tcvn3 = codec.to_tcvn3(&text.content).into_value();
                    self.vietnamese_unicode = text.content;
                }
            },
        }
        self
    }

    /// 中文 → 越南文的翻譯來源；中文為空白時回傳 `None`
    pub fn chinese_source(&self) -> Option<String> {
        (!is_blank(&self.chinese)).then(|| self.chinese.clone())
    }

    /// 越南文 → 中文的翻譯來源
    ///
    /// TCVN3 欄有內容時以它為準：先轉成 Unicode 覆寫 Unicode 欄再翻譯；
    /// 否則使用 Unicode 欄；兩欄都空時回傳 `None`。只含空白的內容仍視為有內容。
    pub fn vietnamese_source(mut self, codec: &CodecAdapter) -> (Self, Option<String>) {
        if !self.vietnamese_tcvn3.is_empty() {
            self.vietnamese_unicode = codec.to_unicode(&self.vietnamese_tcvn3).into_value();
            let source = self.vietnamese_unicode.clone();
            return (self, Some(source));
        }
        if !self.vietnamese_unicode.is_empty() {
            let source = self.vietnamese_unicode.clone();
            return (self, Some(source));
        }
        (self, None)
    }

    /// 寫入翻譯結果
    ///
    /// 越南文 → 中文時，TCVN3 欄已有內容就保留原值（不依譯文重算），否則由 Unicode 欄推得。
    pub fn finish(mut self, direction: Direction, result: String, codec: &CodecAdapter) -> Self {
        match direction {
            Direction::ChineseToVietnamese => {
                self.vietnamese_tcvn3 = codec.to_tcvn3(&result).into_value();
                self.vietnamese_unicode = result;
            }
            Direction::VietnameseToChinese => {
                self.chinese = result;
                if self.vietnamese_tcvn3.is_empty() {
                    self.vietnamese_tcvn3 = codec.to_tcvn3(&self.vietnamese_unicode).into_value();
                }
            }
            Direction::Tcvn3ToUnicode | Direction::UnicodeToTcvn3 => {
                tracing::warn!("翻譯畫面不處理 {} 方向", direction);
            }
        }
        self
    }

    pub fn pair(&self) -> TranslationPair {
        TranslationPair {
            chinese: self.chinese.clone(),
            unicode: EncodedText::unicode(self.vietnamese_unicode.clone()),
            tcvn3: EncodedText::tcvn3(self.vietnamese_tcvn3.clone()),
        }
    }

    /// 越南文兩欄是否同步
    pub fn is_synced(&self, codec: &CodecAdapter) -> bool {
        let pair = self.pair();
        pair.unicode.in_sync_with(&pair.tcvn3, codec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> CodecAdapter {
        CodecAdapter::default()
    }

    #[test]
    fn test_edit_unicode_updates_tcvn3_immediately() {
        let codec = codec();
        let state = TranslationState::default()
            .apply(TranslationEvent::EditVietnamese(EncodedText::unicode("Việt")), &codec);

        assert_eq!(state.vietnamese_unicode, "Việt");
        assert_eq!(state.vietnamese_tcvn3, codec.to_tcvn3("Việt").into_value());
        assert!(state.is_synced(&codec));
    }

    #[test]
    fn test_edit_tcvn3_updates_unicode_immediately() {
        let codec = codec();
        let state = TranslationState::default()
            .apply(TranslationEvent::EditVietnamese(EncodedText::tcvn3("TiÕng ViÖt")), &codec);

        assert_eq!(state.vietnamese_tcvn3, "TiÕng ViÖt");
        assert_eq!(state.vietnamese_unicode, "Tiếng Việt");
    }

    #[test]
    fn test_every_keystroke_propagates() {
        let codec = codec();
        let mut state = TranslationState::default();
        let mut typed = String::new();
        for c in "chào".chars() {
            typed.push(c);
            state = state.apply(TranslationEvent::EditVietnamese(EncodedText::unicode(typed.clone())), &codec);
            assert_eq!(state.vietnamese_tcvn3, codec.to_tcvn3(&typed).into_value());
        }
        assert_eq!(state.vietnamese_tcvn3, "chµo");
    }

    #[test]
    fn test_edit_chinese_does_not_propagate() {
        let codec = codec();
        let state = TranslationState::default().apply(TranslationEvent::EditChinese("你好".into()), &codec);
        assert_eq!(state.chinese, "你好");
        assert!(state.vietnamese_unicode.is_empty());
        assert!(state.vietnamese_tcvn3.is_empty());
    }

    #[test]
    fn test_converter_edit_does_not_convert() {
        let codec = codec();
        let (state, record) = ConverterState::default()
            .apply(ConverterEvent::EditTcvn3Input("chµo".into()), &codec);
        assert_eq!(state.tcvn3_input, "chµo");
        assert!(state.unicode_output.is_empty());
        assert!(record.is_none());
    }

    #[test]
    fn test_converter_submit_tcvn3() {
        let codec = codec();
        let (state, _) = ConverterState::default()
            .apply(ConverterEvent::EditTcvn3Input("Xin chµo".into()), &codec);
        let (state, record) = state.apply(ConverterEvent::Submit(Section::Tcvn3ToUnicode), &codec);

        assert_eq!(state.unicode_output, "Xin chào");
        let record = record.unwrap();
        assert_eq!(record.direction, Direction::Tcvn3ToUnicode);
        assert_eq!(record.input, "Xin chµo");
        assert_eq!(record.output, "Xin chào");
    }

    #[test]
    fn test_converter_submit_unicode() {
        let codec = codec();
        let (state, _) = ConverterState::default()
            .apply(ConverterEvent::EditUnicodeInput("Việt Nam".into()), &codec);
        let (state, record) = state.apply(ConverterEvent::Submit(Section::UnicodeToTcvn3), &codec);

        assert_eq!(state.tcvn3_output, "ViÖt Nam");
        assert_eq!(record.map(|r| r.direction), Some(Direction::UnicodeToTcvn3));
        // 另一區不受影響
        assert!(state.unicode_output.is_empty());
    }

    #[test]
    fn test_converter_submit_blank_is_noop() {
        let codec = codec();
        let (state, _) = ConverterState::default()
            .apply(ConverterEvent::EditUnicodeInput("   ".into()), &codec);
        assert!(!state.can_submit(Section::UnicodeToTcvn3));

        let before = state.clone();
        let (state, record) = state.apply(ConverterEvent::Submit(Section::UnicodeToTcvn3), &codec);
        assert_eq!(state, before);
        assert!(record.is_none());
    }

    #[test]
    fn test_converter_output_edit_does_not_propagate_back() {
        let codec = codec();
        let (state, _) = ConverterState::default()
            .apply(ConverterEvent::EditTcvn3Input("chµo".into()), &codec);
        let (state, _) = state.apply(ConverterEvent::Submit(Section::Tcvn3ToUnicode), &codec);
        let (state, record) = state.apply(ConverterEvent::EditUnicodeOutput("khác".into()), &codec);

        assert_eq!(state.unicode_output, "khác");
        assert_eq!(state.tcvn3_input, "chµo");
        assert!(record.is_none());
    }

    #[test]
    fn test_vietnamese_source_prefers_tcvn3() {
        let codec = codec();
        let state = TranslationState {
            chinese: String::new(),
            vietnamese_unicode: "cũ".into(),
            vietnamese_tcvn3: "Xin chµo".into(),
        };
        let (state, source) = state.vietnamese_source(&codec);
        assert_eq!(source.as_deref(), Some("Xin chào"));
        assert_eq!(state.vietnamese_unicode, "Xin chào");
    }

    #[test]
    fn test_vietnamese_source_falls_back_to_unicode() {
        let codec = codec();
        let state = TranslationState {
            vietnamese_unicode: "Xin chào".into(),
            ..Default::default()
        };
        let (_, source) = state.vietnamese_source(&codec);
        assert_eq!(source.as_deref(), Some("Xin chào"));

        let (_, source) = TranslationState::default().vietnamese_source(&codec);
        assert!(source.is_none());
    }

    #[test]
    fn test_finish_vietnamese_to_chinese_derives_missing_tcvn3() {
        let codec = codec();
        let state = TranslationState {
            vietnamese_unicode: "Xin chào".into(),
            ..Default::default()
        };
        let state = state.finish(Direction::VietnameseToChinese, "你好".into(), &codec);
        assert_eq!(state.chinese, "你好");
        assert_eq!(state.vietnamese_tcvn3, "Xin chµo");
    }

    #[test]
    fn test_encoded_text_sync() {
        let codec = codec();
        let unicode = EncodedText::unicode("Đường");
        let tcvn3 = unicode.convert_to(TextEncoding::Tcvn3, &codec);
        assert_eq!(tcvn3.encoding, TextEncoding::Tcvn3);
        assert!(unicode.in_sync_with(&tcvn3, &codec));
        assert!(!EncodedText::tcvn3("abc").in_sync_with(&unicode, &codec));
    }
}
