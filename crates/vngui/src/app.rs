//! 轉換器主要 UI 邏輯
//!
//! UI 不直接修改欄位：每次編輯或按鈕都轉成事件交給 `SyncEngine`，
//! 背景翻譯的結果在每一幀開頭寫回。

use eframe::egui::{self, Color32, FontId, RichText, ScrollArea, TextEdit};
use tokio::runtime::Runtime;
use vncore::{
    Charset, CodecAdapter, ConverterEvent, EncodedText, HistoryEntry, Section, SyncEngine,
    TranslationAdapter, TranslationDispatcher, TranslationEvent,
};

use crate::config::{AppConfig, Screen};

/// 轉碼畫面的暫存狀態
struct CharsetPanel {
    input: String,
    charset: Charset,
    encoded_hex: String,
    decoded: String,
}

impl Default for CharsetPanel {
    fn default() -> Self {
        Self {
            input: String::new(),
            charset: Charset::Gbk,
            encoded_hex: String::new(),
            decoded: String::new(),
        }
    }
}

/// 欄位繪製結果
struct FieldResponse {
    /// 內容被修改時的新值
    changed: Option<String>,
    /// 按下 Enter（不含 Shift）
    submitted: bool,
}

/// 轉換器 GUI 應用程式
pub struct VnApp {
    /// Tokio 運行時（翻譯請求），需與派送器同生命週期
    _runtime: Runtime,
    config: AppConfig,
    engine: SyncEngine,
    dispatcher: TranslationDispatcher,
    screen: Screen,
    charset_panel: CharsetPanel,
}

impl VnApp {
    /// 創建新的應用程式
    ///
    /// 翻譯客戶端建立失敗時仍會啟動，翻譯只回傳原文。
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        Self::configure_fonts(&cc.egui_ctx);

        let runtime = Runtime::new().expect("無法創建 Tokio 運行時");
        let dispatcher = TranslationDispatcher::new(runtime.handle().clone());

        let engine = SyncEngine::new(
            CodecAdapter::default(),
            TranslationAdapter::new(vncore::translate::connect(&config.translation)),
            config.translation.clone(),
        );

        Self {
            _runtime: runtime,
            screen: config.ui.start_screen,
            config,
            engine,
            dispatcher,
            charset_panel: CharsetPanel::default(),
        }
    }

    /// 設定字型（中文 fallback）
    fn configure_fonts(ctx: &egui::Context) {
        let mut fonts = egui::FontDefinitions::default();

        if let Some(cjk_font_data) = Self::load_system_cjk_font() {
            fonts.font_data.insert(
                "cjk".to_owned(),
                std::sync::Arc::new(egui::FontData::from_owned(cjk_font_data)),
            );

            // 預設字型已涵蓋越南文，中文字型只當 fallback
            for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
                fonts.families.entry(family).or_default().push("cjk".to_owned());
            }

            tracing::info!("已載入系統中文字型");
        } else {
            tracing::warn!("無法載入系統中文字型，中文可能無法正確顯示");
        }

        ctx.set_fonts(fonts);
    }

    /// 載入系統 CJK 字型
    fn load_system_cjk_font() -> Option<Vec<u8>> {
        use font_kit::family_name::FamilyName;
        use font_kit::properties::Properties;
        use font_kit::source::SystemSource;

        let source = SystemSource::new();

        // 簡體優先（翻譯目標為簡體中文）
        let font_names = [
            FamilyName::Title("Noto Sans CJK SC".to_string()),
            FamilyName::Title("Noto Sans SC".to_string()),
            FamilyName::Title("PingFang SC".to_string()),
            FamilyName::Title("Hiragino Sans GB".to_string()),
            FamilyName::Title("Microsoft YaHei".to_string()),
            FamilyName::Title("SimSun".to_string()),
            FamilyName::Title("WenQuanYi Micro Hei".to_string()),
            FamilyName::Title("Noto Sans CJK TC".to_string()),
            FamilyName::Title("PingFang TC".to_string()),
            FamilyName::Title("Microsoft JhengHei".to_string()),
        ];

        for family in font_names {
            if let Ok(handle) = source.select_best_match(&[family], &Properties::new()) {
                if let Ok(font) = handle.load() {
                    if let Some(data) = font.copy_font_data() {
                        tracing::info!("找到字型: {:?}", font.full_name());
                        return Some((*data).clone());
                    }
                }
            }
        }

        None
    }

    /// 寫回已完成的背景翻譯
    fn process_translations(&mut self) {
        for done in self.dispatcher.drain() {
            if let Some(error) = done.outcome().error() {
                tracing::debug!("翻譯以原文回填: {}", error);
            }
            self.engine.complete(done);
            if !self.engine.translation().is_synced(self.engine.codec()) {
                tracing::warn!("越南文 Unicode 與 TCVN3 欄位不同步");
            }
        }
    }

    fn switch_screen(&mut self, screen: Screen) {
        if self.screen == screen {
            return;
        }
        self.screen = screen;
        self.config.ui.start_screen = screen;
        if let Err(e) = self.config.save() {
            tracing::error!("Failed to save config: {}", e);
        }
    }

    /// 多行輸入欄；`submit_on_enter` 時 Enter 送出、Shift+Enter 換行
    fn text_field(
        ui: &mut egui::Ui,
        id_salt: &str,
        value: &str,
        hint: &str,
        font_size: f32,
        submit_on_enter: bool,
    ) -> FieldResponse {
        let id = ui.make_persistent_id(id_salt);
        let submitted = submit_on_enter
            && ui.memory(|m| m.has_focus(id))
            && ui.input_mut(|i| {
                !i.modifiers.shift && i.consume_key(egui::Modifiers::NONE, egui::Key::Enter)
            });

        let mut buffer = value.to_string();
        let response = ui.add(
            TextEdit::multiline(&mut buffer)
                .id(id)
                .font(FontId::proportional(font_size))
                .hint_text(hint)
                .desired_rows(5)
                .desired_width(f32::INFINITY),
        );

        FieldResponse {
            changed: response.changed().then_some(buffer),
            submitted,
        }
    }

    // ========================================================================
    // 轉換畫面
    // ========================================================================

    fn render_converter(&mut self, ui: &mut egui::Ui) {
        let font_size = self.config.ui.font_size;

        for section in [Section::Tcvn3ToUnicode, Section::UnicodeToTcvn3] {
            let state = self.engine.converter().clone();
            let can_submit = state.can_submit(section);
            let (input, output, input_label, output_label, input_hint, output_hint) = match section {
                Section::Tcvn3ToUnicode => (
                    state.tcvn3_input,
                    state.unicode_output,
                    "TCVN3",
                    "Unicode",
                    "Nhập văn bản TCVN3...",
                    "Kết quả Unicode sẽ hiển thị ở đây...",
                ),
                Section::UnicodeToTcvn3 => (
                    state.unicode_input,
                    state.tcvn3_output,
                    "Unicode",
                    "TCVN3",
                    "Nhập văn bản Unicode...",
                    "Kết quả TCVN3 sẽ hiển thị ở đây...",
                ),
            };

            let mut events = Vec::new();
            ui.group(|ui| {
                ui.heading(section.direction().label());
                ui.columns(2, |columns| {
                    columns[0].label(input_label);
                    let field = Self::text_field(
                        &mut columns[0],
                        &format!("{:?}_input", section),
                        &input,
                        input_hint,
                        font_size,
                        true,
                    );
                    if let Some(text) = field.changed {
                        events.push(match section {
                            Section::Tcvn3ToUnicode => ConverterEvent::EditTcvn3Input(text),
                            Section::UnicodeToTcvn3 => ConverterEvent::EditUnicodeInput(text),
                        });
                    }
                    let clicked = columns[0]
                        .add_enabled(can_submit, egui::Button::new("Dịch"))
                        .clicked();
                    if clicked || field.submitted {
                        events.push(ConverterEvent::Submit(section));
                    }

                    columns[1].label(output_label);
                    let field = Self::text_field(
                        &mut columns[1],
                        &format!("{:?}_output", section),
                        &output,
                        output_hint,
                        font_size,
                        false,
                    );
                    if let Some(text) = field.changed {
                        events.push(match section {
                            Section::Tcvn3ToUnicode => ConverterEvent::EditUnicodeOutput(text),
                            Section::UnicodeToTcvn3 => ConverterEvent::EditTcvn3Output(text),
                        });
                    }
                });
            });
            ui.add_space(8.0);

            // 編輯事件先於送出事件，送出時使用最新輸入
            for event in events {
                self.engine.apply_converter(event);
            }
        }
    }

    // ========================================================================
    // 翻譯畫面
    // ========================================================================

    fn render_translation(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let font_size = self.config.ui.font_size;
        let state = self.engine.translation().clone();
        let translating = self.engine.is_translating();

        ui.label("Tiếng Trung");
        let field = Self::text_field(ui, "chinese", &state.chinese, "输入中文...", font_size, false);
        if let Some(text) = field.changed {
            self.engine.apply_translation(TranslationEvent::EditChinese(text));
        }

        let mut start_chinese = false;
        let mut start_vietnamese = false;
        ui.horizontal(|ui| {
            start_chinese = ui
                .add_enabled(
                    !translating && !state.chinese.trim().is_empty(),
                    egui::Button::new("Trung → Việt"),
                )
                .clicked();
            start_vietnamese = ui
                .add_enabled(!translating, egui::Button::new("Việt → Trung"))
                .clicked();
            if translating {
                ui.spinner();
                ui.label(RichText::new("Đang dịch...").color(Color32::YELLOW));
            }
        });

        ui.columns(2, |columns| {
            columns[0].label("Tiếng Việt (Unicode)");
            let field = Self::text_field(
                &mut columns[0],
                "vietnamese_unicode",
                &state.vietnamese_unicode,
                "Văn bản Unicode...",
                font_size,
                false,
            );
            if let Some(text) = field.changed {
                self.engine
                    .apply_translation(TranslationEvent::EditVietnamese(EncodedText::unicode(text)));
            }

            columns[1].label("Tiếng Việt (TCVN3)");
            let field = Self::text_field(
                &mut columns[1],
                "vietnamese_tcvn3",
                &state.vietnamese_tcvn3,
                "Văn bản TCVN3...",
                font_size,
                false,
            );
            if let Some(text) = field.changed {
                self.engine
                    .apply_translation(TranslationEvent::EditVietnamese(EncodedText::tcvn3(text)));
            }
        });

        let job = if start_chinese {
            self.engine.begin_chinese_to_vietnamese()
        } else if start_vietnamese {
            self.engine.begin_vietnamese_to_chinese()
        } else {
            None
        };
        if let Some(job) = job {
            let ctx = ctx.clone();
            self.dispatcher
                .dispatch(job, self.engine.translator(), move || ctx.request_repaint());
        }
    }

    // ========================================================================
    // 轉碼畫面
    // ========================================================================

    fn render_charset(&mut self, ui: &mut egui::Ui) {
        let font_size = self.config.ui.font_size;
        let panel = &mut self.charset_panel;

        ui.label("Văn bản (UTF-8)");
        let field = Self::text_field(ui, "charset_input", &panel.input, "Nhập văn bản...", font_size, false);
        if let Some(text) = field.changed {
            panel.input = text;
        }

        ui.horizontal(|ui| {
            egui::ComboBox::from_label("Bảng mã")
                .selected_text(panel.charset.name())
                .show_ui(ui, |ui| {
                    for charset in Charset::ALL {
                        ui.selectable_value(&mut panel.charset, charset, charset.name());
                    }
                });

            if ui.button("Chuyển mã").clicked() {
                let codec = self.engine.codec();
                let target = panel.charset.name();
                let bytes = codec
                    .convert_encoding(&panel.input, Charset::Utf8.name(), target)
                    .into_value();
                panel.encoded_hex = bytes
                    .iter()
                    .map(|b| format!("{:02X}", b))
                    .collect::<Vec<_>>()
                    .join(" ");
                panel.decoded = codec.decode(&bytes, target).into_value();
            }
        });

        ui.add_space(8.0);
        ui.label("Byte");
        ui.label(RichText::new(&panel.encoded_hex).font(FontId::monospace(font_size)));
        ui.add_space(8.0);
        ui.label("Giải mã lại");
        ui.label(RichText::new(&panel.decoded).size(font_size));
    }

    // ========================================================================
    // 歷史
    // ========================================================================

    fn render_history(ui: &mut egui::Ui, entries: &[&HistoryEntry]) {
        ui.heading("Lịch sử dịch");
        ui.separator();

        if entries.is_empty() {
            ui.label(RichText::new("Chưa có lịch sử dịch").italics().color(Color32::GRAY));
            return;
        }

        ScrollArea::vertical().auto_shrink([false; 2]).show(ui, |ui| {
            for entry in entries {
                ui.group(|ui| {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(entry.direction().label()).strong());
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.label(
                                RichText::new(entry.timestamp().format("%H:%M:%S").to_string())
                                    .color(Color32::GRAY),
                            );
                        });
                    });
                    ui.label(format!("Input: {}", entry.input()));
                    ui.label(format!("Output: {}", entry.output()));
                    if let Some(tcvn3) = entry.output_tcvn3() {
                        ui.label(format!("TCVN3: {}", tcvn3));
                    }
                });
            }
        });
    }
}

impl eframe::App for VnApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // === 1. 背景翻譯結果 ===
        self.process_translations();

        if self.config.ui.dark_mode {
            ctx.set_visuals(egui::Visuals::dark());
        } else {
            ctx.set_visuals(egui::Visuals::light());
        }

        // === 2. UI 渲染 ===
        let mut next_screen = self.screen;
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Chuyển đổi TCVN3 ↔ Unicode");
                ui.separator();
                ui.selectable_value(&mut next_screen, Screen::Converter, "TCVN3 ↔ Unicode");
                ui.selectable_value(&mut next_screen, Screen::Translation, "Trung ↔ Việt");
                ui.selectable_value(&mut next_screen, Screen::Charset, "GBK / Windows-1252");
            });
        });
        self.switch_screen(next_screen);

        egui::SidePanel::right("history")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| {
                let entries: Vec<&HistoryEntry> = self.engine.history().iter().collect();
                Self::render_history(ui, &entries);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical().show(ui, |ui| match self.screen {
                Screen::Converter => self.render_converter(ui),
                Screen::Translation => self.render_translation(ui, ctx),
                Screen::Charset => self.render_charset(ui),
            });
        });

        // 翻譯進行中時持續重繪 spinner
        if self.engine.is_translating() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}
