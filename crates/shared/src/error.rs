use thiserror::Error;

/// Input rejected before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("scan input is empty")]
    EmptyContent,
    #[error("Please select a QR code image.")]
    MissingQrFile,
}

/// Mode name that is not `text`, `url` or `qr`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown input mode '{0}' (expected text, url or qr)")]
pub struct UnknownModeError(pub String);
