use std::collections::{HashMap, HashSet};

use shared::domain::{InputMode, QrUpload};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    TextInputArea,
    QrInputArea,
    ScanLabel,
    ScanIcon,
    LoadingSpinner,
    ResultPanel,
    SafeIcon,
    WarningIcon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextSlot {
    Placeholder,
    ResultStatus,
    ResultMessage,
    ResultConfidence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultTheme {
    Safe,
    Danger,
}

/// What the scan controller and result renderer need from the page.
pub trait ScanView: Send {
    fn show(&mut self, element: Element);
    fn hide(&mut self, element: Element);
    fn set_text(&mut self, slot: TextSlot, text: &str);
    fn set_theme(&mut self, theme: ResultTheme, enabled: bool);
    fn set_active_tab(&mut self, mode: InputMode);
    fn set_scan_enabled(&mut self, enabled: bool);
    /// Raw contents of the text area, untrimmed.
    fn input_text(&self) -> String;
    fn selected_file(&self) -> Option<QrUpload>;
    /// Blocking user-facing alert.
    fn alert(&mut self, message: &str);
    /// Materializes icon markup after a render.
    fn refresh_icons(&mut self);
    fn scroll_into_view(&mut self, element: Element);
}

/// In-memory page. Starts in the page's initial state: text tab active, QR area,
/// spinner, result panel and both result icons hidden.
#[derive(Debug, Clone)]
pub struct ViewState {
    hidden: HashSet<Element>,
    texts: HashMap<TextSlot, String>,
    themes: HashSet<ResultTheme>,
    active_tab: InputMode,
    scan_enabled: bool,
    input_text: String,
    selected_file: Option<QrUpload>,
    alerts: Vec<String>,
    icon_refreshes: usize,
    last_scrolled: Option<Element>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewState {
    pub fn new() -> Self {
        let hidden = [
            Element::QrInputArea,
            Element::LoadingSpinner,
            Element::ResultPanel,
            Element::SafeIcon,
            Element::WarningIcon,
        ]
        .into_iter()
        .collect();
        let mut texts = HashMap::new();
        if let Some(placeholder) = InputMode::default().placeholder() {
            texts.insert(TextSlot::Placeholder, placeholder.to_string());
        }

        Self {
            hidden,
            texts,
            themes: HashSet::new(),
            active_tab: InputMode::default(),
            scan_enabled: true,
            input_text: String::new(),
            selected_file: None,
            alerts: Vec::new(),
            icon_refreshes: 0,
            last_scrolled: None,
        }
    }

    pub fn is_visible(&self, element: Element) -> bool {
        !self.hidden.contains(&element)
    }

    pub fn text(&self, slot: TextSlot) -> Option<&str> {
        self.texts.get(&slot).map(String::as_str)
    }

    pub fn theme_active(&self, theme: ResultTheme) -> bool {
        self.themes.contains(&theme)
    }

    pub fn active_themes(&self) -> usize {
        self.themes.len()
    }

    pub fn active_tab(&self) -> InputMode {
        self.active_tab
    }

    pub fn scan_enabled(&self) -> bool {
        self.scan_enabled
    }

    pub fn set_input_text(&mut self, text: impl Into<String>) {
        self.input_text = text.into();
    }

    pub fn append_input_line(&mut self, line: &str) {
        if !self.input_text.is_empty() {
            self.input_text.push('\n');
        }
        self.input_text.push_str(line);
    }

    pub fn select_file(&mut self, file: Option<QrUpload>) {
        self.selected_file = file;
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    pub fn icon_refreshes(&self) -> usize {
        self.icon_refreshes
    }

    pub fn last_scrolled(&self) -> Option<Element> {
        self.last_scrolled
    }
}

impl ScanView for ViewState {
    fn show(&mut self, element: Element) {
        self.hidden.remove(&element);
    }

    fn hide(&mut self, element: Element) {
        self.hidden.insert(element);
    }

    fn set_text(&mut self, slot: TextSlot, text: &str) {
        self.texts.insert(slot, text.to_string());
    }

    fn set_theme(&mut self, theme: ResultTheme, enabled: bool) {
        if enabled {
            self.themes.insert(theme);
        } else {
            self.themes.remove(&theme);
        }
    }

    fn set_active_tab(&mut self, mode: InputMode) {
        self.active_tab = mode;
    }

    fn set_scan_enabled(&mut self, enabled: bool) {
        self.scan_enabled = enabled;
    }

    fn input_text(&self) -> String {
        self.input_text.clone()
    }

    fn selected_file(&self) -> Option<QrUpload> {
        self.selected_file.clone()
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn refresh_icons(&mut self) {
        self.icon_refreshes += 1;
    }

    fn scroll_into_view(&mut self, element: Element) {
        self.last_scrolled = Some(element);
    }
}
