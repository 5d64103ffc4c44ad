use serde::{Deserialize, Serialize};

use crate::domain::ScanResult;

pub const SCAN_PATH: &str = "/api/scan";
pub const QR_DECODE_PATH: &str = "/api/decode/qr";
pub const HEALTH_PATH: &str = "/";
/// Multipart field carrying the QR image.
pub const QR_FILE_FIELD: &str = "file";

/// JSON body of `POST /api/scan`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanTextRequest {
    pub input: String,
}

/// Response body shared by both scan endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResponse {
    pub safe: bool,
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phishing: Option<bool>,
    #[serde(default)]
    pub is_error: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_msg: Option<String>,
}

impl From<ScanResponse> for ScanResult {
    fn from(value: ScanResponse) -> Self {
        Self {
            safe: value.safe,
            confidence: value.confidence,
            is_error: value.is_error,
            error_message: value.error_msg,
        }
    }
}

/// Body of `GET /` on the scanning service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl HealthResponse {
    pub fn is_online(&self) -> bool {
        self.status.eq_ignore_ascii_case("online")
    }
}
