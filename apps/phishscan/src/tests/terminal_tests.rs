use super::*;
use client_core::render_result;
use shared::domain::ScanResult;

fn output(view: TerminalView<Vec<u8>>) -> String {
    String::from_utf8(view.into_inner()).expect("utf8")
}

#[test]
fn prints_safe_panel_when_scrolled_into_view() {
    let mut view = TerminalView::new(Vec::new(), false);

    render_result(&mut view, &ScanResult::verdict(true, 92.0), InputMode::Url);

    let out = output(view);
    assert!(out.contains("✔ SAFE"), "{out}");
    assert!(out.contains("URL appears safe."), "{out}");
    assert!(out.contains("confidence 92%"), "{out}");
    assert!(!out.contains('\u{001b}'), "color disabled: {out:?}");
}

#[test]
fn prints_warning_glyph_for_dangerous_results_in_red() {
    let mut view = TerminalView::new(Vec::new(), true);

    render_result(&mut view, &ScanResult::verdict(false, 40.0), InputMode::Text);

    let out = output(view);
    assert!(out.contains("⚠ DANGEROUS"), "{out}");
    assert!(out.contains(RED), "{out:?}");
    assert!(out.contains("Suspicious content detected."), "{out}");
}

#[test]
fn loading_indicator_and_alerts_are_echoed() {
    let mut view = TerminalView::new(Vec::new(), false);

    view.show(Element::LoadingSpinner);
    view.show(Element::LoadingSpinner);
    view.alert("Please select a QR code image.");

    assert_eq!(view.page().alerts().len(), 1);
    let out = output(view);
    assert_eq!(out.matches("Scanning...").count(), 1);
    assert!(out.contains("Please select a QR code image."));
}

#[test]
fn page_input_is_exposed_through_view() {
    let mut view = TerminalView::new(Vec::new(), false);
    view.page_mut().append_input_line("Dear customer,");
    view.page_mut().append_input_line("verify your account");

    assert_eq!(view.input_text(), "Dear customer,\nverify your account");
    assert_eq!(view.selected_file(), None);
}
