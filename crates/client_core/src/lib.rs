pub mod controller;
pub mod render;
pub mod transport;
pub mod view;

pub use controller::{ControllerState, ScanController, SubmitOutcome, DEFAULT_MIN_RESULT_LATENCY};
pub use render::{render_result, ResultPresentation};
pub use transport::{HttpScanner, RemoteScanner, ScanOutcome, TransportFailure};
pub use view::{Element, ResultTheme, ScanView, TextSlot, ViewState};
