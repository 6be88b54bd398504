//! 設定檔模組
//!
//! 設定存放於 `{config_dir}/vnconvert/config.json`：
//! - `translation`: 翻譯端點與語言代碼
//! - `ui`: 視窗大小、字型大小、配色與啟動畫面

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use vncore::TranslationConfig;

/// 畫面
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    /// TCVN3 ⇄ Unicode 轉換
    #[default]
    Converter,
    /// 中文 ⇄ 越南文翻譯
    Translation,
    /// GBK / Windows-1252 轉碼
    Charset,
}

/// UI 偏好設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_window_width")]
    pub window_width: f32,
    #[serde(default = "default_window_height")]
    pub window_height: f32,
    #[serde(default = "default_font_size")]
    pub font_size: f32,
    #[serde(default = "default_true")]
    pub dark_mode: bool,
    /// 啟動時顯示的畫面（會記住上次切換的畫面）
    #[serde(default)]
    pub start_screen: Screen,
}

fn default_window_width() -> f32 {
    1100.0
}
fn default_window_height() -> f32 {
    760.0
}
fn default_font_size() -> f32 {
    16.0
}
fn default_true() -> bool {
    true
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            window_width: default_window_width(),
            window_height: default_window_height(),
            font_size: default_font_size(),
            dark_mode: true,
            start_screen: Screen::default(),
        }
    }
}

/// 應用程式設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub translation: TranslationConfig,
    #[serde(default)]
    pub ui: UiConfig,
    /// 設定檔版本（用於未來遷移）
    #[serde(default = "default_config_version")]
    pub config_version: u32,
}

fn default_config_version() -> u32 {
    1
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            translation: TranslationConfig::default(),
            ui: UiConfig::default(),
            config_version: default_config_version(),
        }
    }
}

impl AppConfig {
    /// 獲取設定檔路徑
    pub fn config_path() -> PathBuf {
        config_dir().join("config.json")
    }

    /// 從檔案載入設定；檔案不存在或格式錯誤時使用預設值
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("設定檔格式錯誤，使用預設值: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("無法讀取設定檔 {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// 儲存設定到檔案
    pub fn save(&self) -> Result<(), std::io::Error> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), std::io::Error> {
        ensure_parent_dir(path)?;
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// 獲取設定目錄
pub fn config_dir() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("vnconvert")
    } else {
        PathBuf::from(".")
    }
}

/// 確保目錄存在
fn ensure_parent_dir(path: &Path) -> Result<(), std::io::Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
