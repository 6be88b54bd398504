//! 越南文轉換核心函式庫
//!
//! 提供轉換器的核心功能：
//! - `encoding`: TCVN3 ⇄ Unicode 轉換、GBK/Windows-1252/UTF-8 轉碼
//! - `translate`: 中文 ⇄ 越南文遠端翻譯
//! - `sync`: 欄位同步狀態機與翻譯閘門
//! - `history`: 操作歷史紀錄
//! - `outcome`: 轉接層的成功/備援結果

pub mod encoding;
pub mod history;
pub mod outcome;
pub mod sync;
pub mod translate;

pub use encoding::{Charset, CodecAdapter, CodecError, Tcvn3Codec, VietCodec};
pub use history::{Direction, HistoryEntry, HistoryKind, HistoryLog, HistoryRecord};
pub use outcome::Outcome;
pub use sync::{
    ConverterEvent, ConverterState, EncodedText, Section, SyncEngine, TextEncoding,
    TranslationDispatcher, TranslationEvent, TranslationPair, TranslationState,
};
pub use translate::{
    GoogleTranslator, TranslateError, TranslationAdapter, TranslationConfig, Translator,
    UnavailableTranslator,
};
