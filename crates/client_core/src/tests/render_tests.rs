use super::*;
use crate::view::{ScanView, ViewState};

fn errored(safe: bool, message: Option<&str>) -> ScanResult {
    ScanResult {
        safe,
        confidence: 65.0,
        is_error: true,
        error_message: message.map(str::to_string),
    }
}

#[test]
fn safe_message_depends_on_mode() {
    let result = ScanResult::verdict(true, 99.0);
    assert_eq!(
        ResultPresentation::from_result(&result, InputMode::Url).message,
        "URL appears safe."
    );
    assert_eq!(
        ResultPresentation::from_result(&result, InputMode::Text).message,
        "Message appears safe."
    );
    assert_eq!(
        ResultPresentation::from_result(&result, InputMode::Qr).message,
        "Message appears safe."
    );
}

#[test]
fn error_message_overrides_verdict_text() {
    let unsafe_error = ResultPresentation::from_result(&errored(false, Some("timeout")), InputMode::Url);
    assert_eq!(unsafe_error.status, "DANGEROUS");
    assert_eq!(unsafe_error.theme, ResultTheme::Danger);
    assert_eq!(unsafe_error.message, "Connection error: timeout");

    let missing = ResultPresentation::from_result(&errored(true, None), InputMode::Text);
    assert_eq!(missing.message, "Connection error: Unknown error");
}

#[test]
fn confidence_is_passed_through_verbatim() {
    for (confidence, expected) in [(92.0, "92%"), (97.25, "97.25%"), (140.0, "140%"), (-3.0, "-3%")] {
        let presentation =
            ResultPresentation::from_result(&ScanResult::verdict(true, confidence), InputMode::Text);
        assert_eq!(presentation.confidence, expected);
    }
}

#[test]
fn render_clears_stale_theme_between_results() {
    let mut view = ViewState::new();

    render_result(&mut view, &ScanResult::verdict(false, 10.0), InputMode::Url);
    assert!(view.theme_active(ResultTheme::Danger));
    assert!(view.is_visible(Element::WarningIcon));

    render_result(&mut view, &ScanResult::verdict(true, 90.0), InputMode::Url);
    assert!(view.theme_active(ResultTheme::Safe));
    assert!(!view.theme_active(ResultTheme::Danger));
    assert!(view.is_visible(Element::SafeIcon));
    assert!(!view.is_visible(Element::WarningIcon));
    assert_eq!(view.active_themes(), 1);
}

#[test]
fn render_reveals_panel_refreshes_icons_and_scrolls() {
    let mut view = ViewState::new();
    assert!(!view.is_visible(Element::ResultPanel));

    render_result(&mut view, &ScanResult::fallback(), InputMode::Text);

    assert!(view.is_visible(Element::ResultPanel));
    assert_eq!(view.icon_refreshes(), 1);
    assert_eq!(view.last_scrolled(), Some(Element::ResultPanel));
    assert_eq!(view.text(TextSlot::ResultStatus), Some("SAFE"));
    assert_eq!(
        view.text(TextSlot::ResultMessage),
        Some("Connection error: Backend unreachable")
    );
}

#[test]
fn render_works_through_trait_object() {
    let mut view = ViewState::new();
    let dyn_view: &mut dyn ScanView = &mut view;
    render_result(dyn_view, &ScanResult::verdict(true, 50.0), InputMode::Qr);
    assert_eq!(view.text(TextSlot::ResultConfidence), Some("50%"));
}
