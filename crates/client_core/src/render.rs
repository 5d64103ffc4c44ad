use shared::domain::{InputMode, ScanResult};

use crate::view::{Element, ResultTheme, ScanView, TextSlot};

pub const SAFE_STATUS: &str = "SAFE";
pub const DANGEROUS_STATUS: &str = "DANGEROUS";
const URL_SAFE_MESSAGE: &str = "URL appears safe.";
const MESSAGE_SAFE_MESSAGE: &str = "Message appears safe.";
const SUSPICIOUS_MESSAGE: &str = "Suspicious content detected.";
const UNKNOWN_ERROR: &str = "Unknown error";

/// Texts and theme the result panel shows for one result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultPresentation {
    pub theme: ResultTheme,
    pub status: &'static str,
    pub message: String,
    pub confidence: String,
}

impl ResultPresentation {
    pub fn from_result(result: &ScanResult, mode: InputMode) -> Self {
        let (theme, status, default_message) = if result.safe {
            let message = if mode == InputMode::Url {
                URL_SAFE_MESSAGE
            } else {
                MESSAGE_SAFE_MESSAGE
            };
            (ResultTheme::Safe, SAFE_STATUS, message)
        } else {
            (ResultTheme::Danger, DANGEROUS_STATUS, SUSPICIOUS_MESSAGE)
        };

        // The error text wins over the verdict text regardless of `safe`.
        let message = if result.is_error {
            format!(
                "Connection error: {}",
                result.error_message.as_deref().unwrap_or(UNKNOWN_ERROR)
            )
        } else {
            default_message.to_string()
        };

        Self {
            theme,
            status,
            message,
            confidence: format!("{}%", result.confidence),
        }
    }

    pub fn icon(&self) -> Element {
        match self.theme {
            ResultTheme::Safe => Element::SafeIcon,
            ResultTheme::Danger => Element::WarningIcon,
        }
    }
}

/// Reveals the result panel and fills it for `result`.
pub fn render_result<V: ScanView + ?Sized>(view: &mut V, result: &ScanResult, mode: InputMode) {
    let presentation = ResultPresentation::from_result(result, mode);

    view.show(Element::ResultPanel);

    view.set_theme(ResultTheme::Danger, false);
    view.set_theme(ResultTheme::Safe, false);
    view.hide(Element::WarningIcon);
    view.hide(Element::SafeIcon);

    view.set_theme(presentation.theme, true);
    view.show(presentation.icon());
    view.set_text(TextSlot::ResultStatus, presentation.status);
    view.set_text(TextSlot::ResultMessage, &presentation.message);
    view.set_text(TextSlot::ResultConfidence, &presentation.confidence);

    view.refresh_icons();
    view.scroll_into_view(Element::ResultPanel);
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
