use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::{
    header::{ACCEPT, CONTENT_TYPE},
    multipart::{Form, Part},
    Client, Response,
};
use serde::de::DeserializeOwned;
use shared::{
    domain::{QrUpload, ScanRequest, ScanResult},
    protocol::{
        HealthResponse, ScanResponse, ScanTextRequest, HEALTH_PATH, QR_DECODE_PATH, QR_FILE_FIELD,
        SCAN_PATH,
    },
};
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

const JSON_MIME: &str = "application/json";

/// Why a dispatched scan produced no usable verdict.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportFailure {
    #[error("network error: {0}")]
    Network(String),
    #[error("server error {0}")]
    Status(u16),
    #[error("malformed response body: {0}")]
    MalformedBody(String),
}

impl From<reqwest::Error> for TransportFailure {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            TransportFailure::MalformedBody(value.to_string())
        } else if let Some(status) = value.status() {
            TransportFailure::Status(status.as_u16())
        } else {
            TransportFailure::Network(value.to_string())
        }
    }
}

/// Either the service's verdict or the reason there is none.
pub type ScanOutcome = std::result::Result<ScanResult, TransportFailure>;

#[async_trait]
pub trait RemoteScanner: Send + Sync {
    /// Sends exactly one request for `request`. Never retries.
    async fn scan(&self, request: &ScanRequest) -> ScanOutcome;
}

/// Scanner backed by the phishing-detection HTTP service.
#[derive(Debug, Clone)]
pub struct HttpScanner {
    http: Client,
    origin: Url,
}

impl HttpScanner {
    /// Scanner without a request timeout; a hung request stays in flight.
    pub fn new(origin: &str) -> Result<Self> {
        Self::build(origin, None)
    }

    pub fn with_timeout(origin: &str, timeout: Duration) -> Result<Self> {
        Self::build(origin, Some(timeout))
    }

    fn build(origin: &str, timeout: Option<Duration>) -> Result<Self> {
        let origin = Url::parse(origin).with_context(|| format!("invalid scanner origin '{origin}'"))?;
        if !matches!(origin.scheme(), "http" | "https") {
            return Err(anyhow!("scanner origin must start with http:// or https://"));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("failed to build HTTP client")?;

        Ok(Self { http, origin })
    }

    pub fn origin(&self) -> &Url {
        &self.origin
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.origin.as_str().trim_end_matches('/'))
    }

    /// Asks `GET /` on the service for its status.
    pub async fn health(&self) -> std::result::Result<HealthResponse, TransportFailure> {
        let response = self.http.get(self.endpoint(HEALTH_PATH)).send().await?;
        decode_body(response).await
    }

    async fn scan_text(&self, content: &str) -> ScanOutcome {
        let url = self.endpoint(SCAN_PATH);
        debug!(%url, "dispatching text scan");
        let response = self
            .http
            .post(url)
            .header(CONTENT_TYPE, JSON_MIME)
            .header(ACCEPT, JSON_MIME)
            .json(&ScanTextRequest {
                input: content.to_string(),
            })
            .send()
            .await?;
        decode_body::<ScanResponse>(response).await.map(Into::into)
    }

    async fn scan_qr(&self, file: &QrUpload) -> ScanOutcome {
        let url = self.endpoint(QR_DECODE_PATH);
        debug!(%url, file_name = %file.file_name, size_bytes = file.bytes.len(), "dispatching qr scan");
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.mime_type)
            .map_err(|e| TransportFailure::Network(format!("invalid upload mime type: {e}")))?;
        let form = Form::new().part(QR_FILE_FIELD, part);
        let response = self.http.post(url).multipart(form).send().await?;
        decode_body::<ScanResponse>(response).await.map(Into::into)
    }
}

#[async_trait]
impl RemoteScanner for HttpScanner {
    async fn scan(&self, request: &ScanRequest) -> ScanOutcome {
        let outcome = match request {
            ScanRequest::Text { content } | ScanRequest::Url { content } => {
                self.scan_text(content).await
            }
            ScanRequest::Qr { file } => self.scan_qr(file).await,
        };
        match &outcome {
            Ok(result) => info!(
                mode = %request.mode(),
                safe = result.safe,
                confidence = result.confidence,
                "scan completed"
            ),
            Err(failure) => info!(mode = %request.mode(), %failure, "scan failed"),
        }
        outcome
    }
}

async fn decode_body<T: DeserializeOwned>(
    response: Response,
) -> std::result::Result<T, TransportFailure> {
    let status = response.status();
    if !status.is_success() {
        return Err(TransportFailure::Status(status.as_u16()));
    }
    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|e| TransportFailure::MalformedBody(e.to_string()))
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
