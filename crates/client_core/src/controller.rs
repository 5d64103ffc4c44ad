use std::{
    sync::{Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use shared::{
    domain::{InputMode, ScanRequest, ScanResult},
    error::RequestError,
};
use tracing::{debug, info, warn};

use crate::{
    render::render_result,
    transport::RemoteScanner,
    view::{Element, ScanView, TextSlot},
};

/// Delay applied before a successful result is rendered.
pub const DEFAULT_MIN_RESULT_LATENCY: Duration = Duration::from_millis(800);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControllerState {
    pub active_mode: InputMode,
    pub busy: bool,
}

/// Which branch a `submit()` call took.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// A scan was already in flight; nothing happened.
    Busy,
    /// Text/URL mode with blank content; nothing happened.
    EmptyInput,
    /// QR mode without a file; the user was alerted.
    MissingQrFile,
    /// The service answered and its verdict was rendered.
    Completed(ScanResult),
    /// The scan failed and the fallback result was rendered.
    Fallback { result: ScanResult, reason: String },
}

impl SubmitOutcome {
    pub fn dispatched(&self) -> bool {
        matches!(
            self,
            SubmitOutcome::Completed(_) | SubmitOutcome::Fallback { .. }
        )
    }

    pub fn rendered(&self) -> Option<&ScanResult> {
        match self {
            SubmitOutcome::Completed(result) | SubmitOutcome::Fallback { result, .. } => {
                Some(result)
            }
            _ => None,
        }
    }
}

/// `busy` is set from a valid `submit()` until its result or fallback is on
/// screen; mode changes and further submissions are refused in that window.
pub struct ScanController<S: RemoteScanner, V: ScanView> {
    scanner: S,
    view: Mutex<V>,
    state: Mutex<ControllerState>,
    min_result_latency: Duration,
}

impl<S: RemoteScanner, V: ScanView> ScanController<S, V> {
    pub fn new(scanner: S, view: V) -> Self {
        Self {
            scanner,
            view: Mutex::new(view),
            state: Mutex::new(ControllerState::default()),
            min_result_latency: DEFAULT_MIN_RESULT_LATENCY,
        }
    }

    pub fn with_min_result_latency(mut self, latency: Duration) -> Self {
        self.min_result_latency = latency;
        self
    }

    pub fn min_result_latency(&self) -> Duration {
        self.min_result_latency
    }

    pub fn state(&self) -> ControllerState {
        *self.lock_state()
    }

    pub fn active_mode(&self) -> InputMode {
        self.lock_state().active_mode
    }

    pub fn is_busy(&self) -> bool {
        self.lock_state().busy
    }

    /// Runs `f` against the page, e.g. to type input or pick a file.
    pub fn update_view<R>(&self, f: impl FnOnce(&mut V) -> R) -> R {
        f(&mut self.lock_view())
    }

    pub fn inspect_view<R>(&self, f: impl FnOnce(&V) -> R) -> R {
        f(&self.lock_view())
    }

    /// Switches the input tab. Silently refused while a scan is in flight.
    ///
    /// Previously entered text and the selected file are left untouched.
    pub fn select_mode(&self, mode: InputMode) -> bool {
        let mut state = self.lock_state();
        if state.busy {
            debug!(requested = %mode, active = %state.active_mode, "mode change ignored while busy");
            return false;
        }
        state.active_mode = mode;

        let mut view = self.lock_view();
        view.set_active_tab(mode);
        if mode.uses_text_input() {
            view.show(Element::TextInputArea);
            view.hide(Element::QrInputArea);
        } else {
            view.hide(Element::TextInputArea);
            view.show(Element::QrInputArea);
        }
        if let Some(placeholder) = mode.placeholder() {
            view.set_text(TextSlot::Placeholder, placeholder);
        }
        debug!(mode = %mode, "input mode selected");
        true
    }

    /// Validates the current input, dispatches one scan and renders the outcome.
    pub async fn submit(&self) -> SubmitOutcome {
        let (request, mode) = match self.begin_dispatch() {
            Ok(started) => started,
            Err(outcome) => return outcome,
        };
        let guard = DispatchGuard { controller: self };

        info!(mode = %mode, "scan dispatched");
        match self.scanner.scan(&request).await {
            Ok(result) => {
                tokio::time::sleep(self.min_result_latency).await;
                render_result(&mut *self.lock_view(), &result, mode);
                drop(guard);
                SubmitOutcome::Completed(result)
            }
            Err(failure) => {
                warn!(mode = %mode, %failure, "scan failed, rendering fallback result");
                let result = ScanResult::fallback();
                render_result(&mut *self.lock_view(), &result, mode);
                drop(guard);
                SubmitOutcome::Fallback {
                    result,
                    reason: failure.to_string(),
                }
            }
        }
    }

    /// Guard, validate and enter `DISPATCHING` under one state lock.
    fn begin_dispatch(&self) -> Result<(ScanRequest, InputMode), SubmitOutcome> {
        let mut state = self.lock_state();
        if state.busy {
            debug!("submit ignored while busy");
            return Err(SubmitOutcome::Busy);
        }

        let mode = state.active_mode;
        let mut view = self.lock_view();
        let request = match ScanRequest::from_input(mode, &view.input_text(), view.selected_file())
        {
            Ok(request) => request,
            Err(RequestError::MissingQrFile) => {
                view.alert(&RequestError::MissingQrFile.to_string());
                return Err(SubmitOutcome::MissingQrFile);
            }
            Err(RequestError::EmptyContent) => {
                debug!(mode = %mode, "submit ignored, input is empty");
                return Err(SubmitOutcome::EmptyInput);
            }
        };

        state.busy = true;
        set_loading(&mut *view, true);
        view.hide(Element::ResultPanel);
        Ok((request, mode))
    }

    fn finish_dispatch(&self) {
        let mut state = self.lock_state();
        state.busy = false;
        set_loading(&mut *self.lock_view(), false);
    }

    fn lock_state(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_view(&self) -> MutexGuard<'_, V> {
        self.view.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Returns the controller to `IDLE` on every exit path, including a panicking or
/// dropped scan future.
struct DispatchGuard<'a, S: RemoteScanner, V: ScanView> {
    controller: &'a ScanController<S, V>,
}

impl<S: RemoteScanner, V: ScanView> Drop for DispatchGuard<'_, S, V> {
    fn drop(&mut self) {
        self.controller.finish_dispatch();
    }
}

fn set_loading<V: ScanView + ?Sized>(view: &mut V, loading: bool) {
    view.set_scan_enabled(!loading);
    if loading {
        view.hide(Element::ScanLabel);
        view.hide(Element::ScanIcon);
        view.show(Element::LoadingSpinner);
    } else {
        view.show(Element::ScanLabel);
        view.show(Element::ScanIcon);
        view.hide(Element::LoadingSpinner);
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
