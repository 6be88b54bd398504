//! 越南文轉換器 GUI 應用程式

mod app;
mod config;

use app::VnApp;
use config::AppConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> eframe::Result<()> {
    // 初始化日誌
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = AppConfig::load();
    tracing::info!("設定檔: {:?}", AppConfig::config_path());

    // 設定 eframe 選項
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([config.ui.window_width, config.ui.window_height])
            .with_min_inner_size([720.0, 480.0])
            .with_title("Vietnamese Converter"),
        ..Default::default()
    };

    // 啟動 GUI
    eframe::run_native(
        "Vietnamese Converter",
        options,
        Box::new(|cc| Ok(Box::new(VnApp::new(cc, config)))),
    )
}
