//! 同步引擎
//!
//! 擁有兩個畫面的欄位狀態與歷史紀錄。翻譯分三段進行：
//! 1. `begin_*`：檢查條件、取得閘門、擷取翻譯來源，產生 [`TranslationJob`]
//! 2. [`TranslationJob::run`]：唯一的非同步等待點（網路請求）
//! 3. [`SyncEngine::complete`]：寫回結果、新增歷史、釋放閘門
//!
//! 等待翻譯期間仍可編輯欄位，但兩個方向的翻譯都會被閘門擋下。

use std::mem;

use tracing::{debug, info};

use super::gate::{GatePermit, TranslationGate};
use super::{ConverterEvent, ConverterState, TranslationEvent, TranslationPair, TranslationState};
use crate::encoding::CodecAdapter;
use crate::history::{Direction, HistoryId, HistoryLog, HistoryRecord};
use crate::translate::{TranslationAdapter, TranslationConfig, TranslationOutcome};

/// 已取得閘門、等待執行的翻譯工作
#[derive(Debug)]
pub struct TranslationJob {
    permit: GatePermit,
    direction: Direction,
    source: String,
    source_lang: String,
    target_lang: String,
}

impl TranslationJob {
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// 執行翻譯（一次網路往返）
    pub async fn run(self, translator: &TranslationAdapter) -> TranslationDone {
        let outcome = translator
            .translate(&self.source, &self.source_lang, &self.target_lang)
            .await;

        TranslationDone {
            permit: self.permit,
            direction: self.direction,
            source: self.source,
            outcome,
        }
    }
}

/// 已完成、等待寫回的翻譯工作
#[derive(Debug)]
pub struct TranslationDone {
    permit: GatePermit,
    direction: Direction,
    source: String,
    outcome: TranslationOutcome,
}

impl TranslationDone {
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn outcome(&self) -> &TranslationOutcome {
        &self.outcome
    }
}

/// 同步引擎
pub struct SyncEngine {
    codec: CodecAdapter,
    translator: TranslationAdapter,
    config: TranslationConfig,
    gate: TranslationGate,
    converter: ConverterState,
    translation: TranslationState,
    history: HistoryLog,
}

impl SyncEngine {
    pub fn new(
        codec: CodecAdapter,
        translator: TranslationAdapter,
        config: TranslationConfig,
    ) -> Self {
        Self {
            codec,
            translator,
            config,
            gate: TranslationGate::new(),
            converter: ConverterState::default(),
            translation: TranslationState::default(),
            history: HistoryLog::new(),
        }
    }

    pub fn codec(&self) -> &CodecAdapter {
        &self.codec
    }

    /// 翻譯轉接層（給背景工作使用）
    pub fn translator(&self) -> TranslationAdapter {
        self.translator.clone()
    }

    pub fn converter(&self) -> &ConverterState {
        &self.converter
    }

    pub fn translation(&self) -> &TranslationState {
        &self.translation
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn is_translating(&self) -> bool {
        self.gate.is_held()
    }

    /// 轉換畫面事件；送出成功時回傳新增的歷史 ID
    pub fn apply_converter(&mut self, event: ConverterEvent) -> Option<HistoryId> {
        let state = mem::take(&mut self.converter);
        let (state, record) = state.apply(event, &self.codec);
        self.converter = state;
        record.map(|record| self.history.append(record))
    }

    /// 翻譯畫面編輯事件（翻譯進行中也允許）
    pub fn apply_translation(&mut self, event: TranslationEvent) {
        let state = mem::take(&mut self.translation);
        self.translation = state.apply(event, &self.codec);
    }

    /// 開始中文 → 越南文翻譯；翻譯中或中文為空白時不做任何事
    pub fn begin_chinese_to_vietnamese(&mut self) -> Option<TranslationJob> {
        let source = self.translation.chinese_source()?;
        let permit = self.gate.try_acquire()?;

        debug!("開始翻譯 {}", Direction::ChineseToVietnamese);
        Some(TranslationJob {
            permit,
            direction: Direction::ChineseToVietnamese,
            source,
            source_lang: self.config.chinese.clone(),
            target_lang: self.config.vietnamese.clone(),
        })
    }

    /// 開始越南文 → 中文翻譯
    ///
    /// TCVN3 欄有內容時會先覆寫 Unicode 欄。翻譯中或兩欄皆空時不做任何事。
    pub fn begin_vietnamese_to_chinese(&mut self) -> Option<TranslationJob> {
        let permit = self.gate.try_acquire()?;

        let state = mem::take(&mut self.translation);
        let (state, source) = state.vietnamese_source(&self.codec);
        self.translation = state;
        let source = source?;

        debug!("開始翻譯 {}", Direction::VietnameseToChinese);
        Some(TranslationJob {
            permit,
            direction: Direction::VietnameseToChinese,
            source,
            source_lang: self.config.vietnamese.clone(),
            target_lang: self.config.chinese.clone(),
        })
    }

    /// 寫回翻譯結果、新增歷史紀錄並釋放閘門
    ///
    /// 失敗的翻譯（備援為原文）與成功的翻譯以相同方式寫回。
    pub fn complete(&mut self, done: TranslationDone) -> TranslationPair {
        let TranslationDone {
            permit,
            direction,
            source,
            outcome,
        } = done;

        let result = outcome.into_value();
        let state = mem::take(&mut self.translation);
        self.translation = state.finish(direction, result.clone(), &self.codec);

        let record = match direction {
            Direction::ChineseToVietnamese => HistoryRecord::new(direction, source, result)
                .with_tcvn3(self.translation.vietnamese_tcvn3.clone()),
            _ => HistoryRecord::new(direction, source, result),
        };
        self.history.append(record);

        drop(permit);
        info!("翻譯完成 {}", direction);
        self.translation.pair()
    }

    /// 在目前的 task 中完成整個中文 → 越南文流程
    pub async fn translate_chinese_to_vietnamese(&mut self) -> Option<TranslationPair> {
        let job = self.begin_chinese_to_vietnamese()?;
        let done = job.run(&self.translator).await;
        Some(self.complete(done))
    }

    /// 在目前的 task 中完成整個越南文 → 中文流程
    pub async fn translate_vietnamese_to_chinese(&mut self) -> Option<TranslationPair> {
        let job = self.begin_vietnamese_to_chinese()?;
        let done = job.run(&self.translator).await;
        Some(self.complete(done))
    }
}
