//! 歷史紀錄模組
//!
//! 只能新增、不能修改或刪除；最新的紀錄排在最前面。生命週期與程序相同，不做持久化。

use std::collections::VecDeque;
use std::fmt;

use chrono::{DateTime, Local};

/// 紀錄 ID（在同一個 `HistoryLog` 內遞增）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HistoryId(u64);

impl HistoryId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// 紀錄種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryKind {
    /// TCVN3 ⇄ Unicode 轉換
    EncodingTranslate,
    /// 中文 ⇄ 越南文翻譯
    ChineseVietnamese,
}

/// 轉換方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Tcvn3ToUnicode,
    UnicodeToTcvn3,
    ChineseToVietnamese,
    VietnameseToChinese,
}

impl Direction {
    pub fn kind(self) -> HistoryKind {
        match self {
            Direction::Tcvn3ToUnicode | Direction::UnicodeToTcvn3 => HistoryKind::EncodingTranslate,
            Direction::ChineseToVietnamese | Direction::VietnameseToChinese => {
                HistoryKind::ChineseVietnamese
            }
        }
    }

    /// 顯示用標籤
    pub fn label(self) -> &'static str {
        match self {
            Direction::Tcvn3ToUnicode => "TCVN3 → Unicode",
            Direction::UnicodeToTcvn3 => "Unicode → TCVN3",
            Direction::ChineseToVietnamese => "Trung → Việt",
            Direction::VietnameseToChinese => "Việt → Trung",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 尚未加入紀錄的項目內容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRecord {
    pub direction: Direction,
    pub input: String,
    pub output: String,
    /// 中文 → 越南文時同時保存的 TCVN3 譯文
    pub output_tcvn3: Option<String>,
}

impl HistoryRecord {
    pub fn new(direction: Direction, input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            direction,
            input: input.into(),
            output: output.into(),
            output_tcvn3: None,
        }
    }

    pub fn with_tcvn3(mut self, tcvn3: impl Into<String>) -> Self {
        self.output_tcvn3 = Some(tcvn3.into());
        self
    }
}

/// 已完成操作的紀錄（建立後不可變）
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    id: HistoryId,
    record: HistoryRecord,
    timestamp: DateTime<Local>,
}

impl HistoryEntry {
    pub fn id(&self) -> HistoryId {
        self.id
    }

    pub fn kind(&self) -> HistoryKind {
        self.record.direction.kind()
    }

    pub fn direction(&self) -> Direction {
        self.record.direction
    }

    pub fn input(&self) -> &str {
        &self.record.input
    }

    pub fn output(&self) -> &str {
        &self.record.output
    }

    pub fn output_tcvn3(&self) -> Option<&str> {
        self.record.output_tcvn3.as_deref()
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }
}

/// 歷史紀錄
#[derive(Debug, Default)]
pub struct HistoryLog {
    entries: VecDeque<HistoryEntry>,
    next_id: u64,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 新增紀錄到最前面，回傳指派的 ID
    pub fn append(&mut self, record: HistoryRecord) -> HistoryId {
        let id = HistoryId(self.next_id);
        self.next_id += 1;

        tracing::debug!("新增歷史紀錄 #{}: {}", id.0, record.direction);
        self.entries.push_front(HistoryEntry {
            id,
            record,
            timestamp: Local::now(),
        });
        id
    }

    /// 由新到舊
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
