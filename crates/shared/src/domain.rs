use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{RequestError, UnknownModeError};

const TEXT_PLACEHOLDER: &str = "Paste email content here to scan for threats...";
const URL_PLACEHOLDER: &str = "Paste suspicious URL here...";

/// Which kind of input the user is currently providing.
///
/// Changed only by an explicit mode selection, never inferred from content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    #[default]
    Text,
    Url,
    Qr,
}

impl InputMode {
    pub const ALL: [InputMode; 3] = [InputMode::Text, InputMode::Url, InputMode::Qr];

    pub fn as_str(self) -> &'static str {
        match self {
            InputMode::Text => "text",
            InputMode::Url => "url",
            InputMode::Qr => "qr",
        }
    }

    /// Placeholder shown in the text area; `None` for modes without one.
    pub fn placeholder(self) -> Option<&'static str> {
        match self {
            InputMode::Text => Some(TEXT_PLACEHOLDER),
            InputMode::Url => Some(URL_PLACEHOLDER),
            InputMode::Qr => None,
        }
    }

    pub fn uses_text_input(self) -> bool {
        !matches!(self, InputMode::Qr)
    }
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputMode {
    type Err = UnknownModeError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        InputMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(raw))
            .ok_or_else(|| UnknownModeError(raw.to_string()))
    }
}

/// Image selected in the QR file input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl QrUpload {
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }
}

/// A validated request ready for dispatch. Text and URL content is already trimmed
/// and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanRequest {
    Text { content: String },
    Url { content: String },
    Qr { file: QrUpload },
}

impl ScanRequest {
    /// Builds the request for `mode` from the raw widget values.
    ///
    /// Text and URL modes ignore `file`; QR mode ignores `text`.
    pub fn from_input(
        mode: InputMode,
        text: &str,
        file: Option<QrUpload>,
    ) -> Result<Self, RequestError> {
        match mode {
            InputMode::Qr => file
                .map(|file| ScanRequest::Qr { file })
                .ok_or(RequestError::MissingQrFile),
            InputMode::Text | InputMode::Url => {
                let content = text.trim();
                if content.is_empty() {
                    return Err(RequestError::EmptyContent);
                }
                let content = content.to_string();
                Ok(if mode == InputMode::Url {
                    ScanRequest::Url { content }
                } else {
                    ScanRequest::Text { content }
                })
            }
        }
    }

    pub fn mode(&self) -> InputMode {
        match self {
            ScanRequest::Text { .. } => InputMode::Text,
            ScanRequest::Url { .. } => InputMode::Url,
            ScanRequest::Qr { .. } => InputMode::Qr,
        }
    }
}

/// Verdict shown to the user for one scan cycle.
///
/// `confidence` is kept exactly as the service sent it; nothing clamps or rounds it.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanResult {
    pub safe: bool,
    pub confidence: f64,
    pub is_error: bool,
    pub error_message: Option<String>,
}

impl ScanResult {
    pub const FALLBACK_CONFIDENCE: f64 = 65.0;
    pub const FALLBACK_ERROR_MESSAGE: &'static str = "Backend unreachable";

    pub fn verdict(safe: bool, confidence: f64) -> Self {
        Self {
            safe,
            confidence,
            is_error: false,
            error_message: None,
        }
    }

    /// Locally synthesized result used when the remote scanner cannot be reached.
    /// Reports "safe" so a connectivity problem is not shown as a threat.
    pub fn fallback() -> Self {
        Self {
            safe: true,
            confidence: Self::FALLBACK_CONFIDENCE,
            is_error: true,
            error_message: Some(Self::FALLBACK_ERROR_MESSAGE.to_string()),
        }
    }
}
