use std::io::Write;

use client_core::{Element, ResultTheme, ScanView, TextSlot, ViewState};
use shared::domain::{InputMode, QrUpload};

const RESET: &str = "\u{001b}[0m";
const BOLD: &str = "\u{001b}[1m";
const DIM: &str = "\u{001b}[2m";
const GREEN: &str = "\u{001b}[32m";
const RED: &str = "\u{001b}[31m";
const YELLOW: &str = "\u{001b}[33m";

const SAFE_GLYPH: &str = "✔";
const WARNING_GLYPH: &str = "⚠";

/// Echoes loading, alerts and the result panel of a [`ViewState`] page to a writer.
pub struct TerminalView<W: Write + Send> {
    page: ViewState,
    out: W,
    color: bool,
}

impl<W: Write + Send> TerminalView<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self {
            page: ViewState::new(),
            out,
            color,
        }
    }

    pub fn page(&self) -> &ViewState {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut ViewState {
        &mut self.page
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, code: &'static str) -> &'static str {
        if self.color {
            code
        } else {
            ""
        }
    }

    /// Best effort: a closed terminal must not abort the scan cycle.
    fn emit(&mut self, line: String) {
        if let Err(err) = writeln!(self.out, "{line}").and_then(|()| self.out.flush()) {
            tracing::debug!(error = %err, "terminal write failed");
        }
    }

    fn print_result_panel(&mut self) {
        if !self.page.is_visible(Element::ResultPanel) {
            return;
        }

        let (accent, glyph) = if self.page.theme_active(ResultTheme::Danger) {
            (RED, self.glyph(Element::WarningIcon, WARNING_GLYPH))
        } else {
            (GREEN, self.glyph(Element::SafeIcon, SAFE_GLYPH))
        };
        let status = self.page.text(TextSlot::ResultStatus).unwrap_or_default();
        let message = self.page.text(TextSlot::ResultMessage).unwrap_or_default();
        let confidence = self
            .page
            .text(TextSlot::ResultConfidence)
            .unwrap_or_default();

        let header = format!(
            "{}{}{glyph} {status}{}",
            self.paint(BOLD),
            self.paint(accent),
            self.paint(RESET)
        );
        let body = format!("  {message}");
        let footer = format!(
            "  {}confidence {confidence}{}",
            self.paint(DIM),
            self.paint(RESET)
        );

        self.emit(String::new());
        self.emit(header);
        self.emit(body);
        self.emit(footer);
    }

    fn glyph(&self, icon: Element, glyph: &'static str) -> &'static str {
        if self.page.is_visible(icon) {
            glyph
        } else {
            " "
        }
    }
}

impl<W: Write + Send> ScanView for TerminalView<W> {
    fn show(&mut self, element: Element) {
        let was_visible = self.page.is_visible(element);
        self.page.show(element);
        if element == Element::LoadingSpinner && !was_visible {
            let line = format!("{}Scanning...{}", self.paint(DIM), self.paint(RESET));
            self.emit(line);
        }
    }

    fn hide(&mut self, element: Element) {
        self.page.hide(element);
    }

    fn set_text(&mut self, slot: TextSlot, text: &str) {
        self.page.set_text(slot, text);
    }

    fn set_theme(&mut self, theme: ResultTheme, enabled: bool) {
        self.page.set_theme(theme, enabled);
    }

    fn set_active_tab(&mut self, mode: InputMode) {
        self.page.set_active_tab(mode);
    }

    fn set_scan_enabled(&mut self, enabled: bool) {
        self.page.set_scan_enabled(enabled);
    }

    fn input_text(&self) -> String {
        self.page.input_text()
    }

    fn selected_file(&self) -> Option<QrUpload> {
        self.page.selected_file()
    }

    fn alert(&mut self, message: &str) {
        self.page.alert(message);
        let line = format!("{}{message}{}", self.paint(YELLOW), self.paint(RESET));
        self.emit(line);
    }

    fn refresh_icons(&mut self) {
        self.page.refresh_icons();
    }

    fn scroll_into_view(&mut self, element: Element) {
        self.page.scroll_into_view(element);
        if element == Element::ResultPanel {
            self.print_result_panel();
        }
    }
}

#[cfg(test)]
#[path = "tests/terminal_tests.rs"]
mod tests;
