//! HTTP dispatch of analysis requests.
//!
//! [`AnalysisBackend`] is the seam between the workflow and the network. The
//! production implementation is [`HttpBackend`], a thin wrapper over a
//! `reqwest::Client`; tests and host applications can supply their own.
//!
//! ## Response mapping
//!
//! | Response | Result |
//! |----------|--------|
//! | 2xx, valid result JSON | `Ok(AnalysisResult)` |
//! | 2xx, bad JSON or out-of-range values | `Err(InvalidResponse)` |
//! | non-2xx with `{"detail": "X"}` | `Err(Remote { message: "X" })` |
//! | non-2xx otherwise | `Err(Remote { message: <fallback> })` |
//! | no response | `Err(Transport)` |

use crate::config::ClientConfig;
use crate::error::AnalyzeError;
use crate::request::AnalysisRequest;
use crate::result::AnalysisResult;
use futures::future::BoxFuture;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Something that can turn a request into an analysis.
///
/// Implementations must be `Send + Sync`: a workflow handle may be cloned
/// onto other tasks while a request is in flight.
pub trait AnalysisBackend: Send + Sync {
    fn analyze(&self, request: AnalysisRequest) -> BoxFuture<'_, Result<AnalysisResult, AnalyzeError>>;
}

/// Error body of a failed response.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

/// Pull a usable message out of an error body, if it has one.
pub fn detail_message(body: &[u8]) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
    match parsed.detail? {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s),
        _ => None,
    }
}

/// `reqwest`-backed analysis client.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    config: ClientConfig,
}

impl HttpBackend {
    pub fn new(config: ClientConfig) -> Result<Self, AnalyzeError> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| AnalyzeError::InvalidConfig(format!("HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn send(&self, request: AnalysisRequest) -> Result<AnalysisResult, AnalyzeError> {
        let url = self.config.analyze_url();
        let form = request.to_form()?;
        info!(
            "Submitting '{}' ({} bytes) to {} [fields: {}]",
            request.file.name(),
            request.file.len(),
            url,
            request.field_names().join(", ")
        );

        let start = Instant::now();
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| self.map_transport(e))?;
        debug!(
            "Response {} ({} bytes) in {}ms",
            status,
            body.len(),
            start.elapsed().as_millis()
        );

        if !status.is_success() {
            let message = detail_message(&body)
                .unwrap_or_else(|| self.config.remote_fallback.message().to_string());
            warn!("Analysis rejected with HTTP {}: {}", status, message);
            return Err(AnalyzeError::Remote {
                status: status.as_u16(),
                message,
            });
        }

        AnalysisResult::from_json(&body).map_err(|reason| {
            warn!("Discarding invalid analysis response: {}", reason);
            AnalyzeError::InvalidResponse { reason }
        })
    }

    fn map_transport(&self, e: reqwest::Error) -> AnalyzeError {
        if e.is_timeout() {
            let secs = self.config.timeout_secs.unwrap_or_default();
            return AnalyzeError::Transport {
                message: format!("Request timed out after {secs} seconds"),
            };
        }
        warn!("Transport failure: {}", e);
        AnalyzeError::transport(e)
    }
}

impl AnalysisBackend for HttpBackend {
    fn analyze(&self, request: AnalysisRequest) -> BoxFuture<'_, Result<AnalysisResult, AnalyzeError>> {
        Box::pin(self.send(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_string_is_used() {
        assert_eq!(
            detail_message(br#"{"detail":"Unsupported file type"}"#).as_deref(),
            Some("Unsupported file type")
        );
    }

    #[test]
    fn missing_or_odd_detail_falls_through() {
        assert_eq!(detail_message(b""), None);
        assert_eq!(detail_message(b"<html>502</html>"), None);
        assert_eq!(detail_message(br#"{"error":"x"}"#), None);
        assert_eq!(detail_message(br#"{"detail":""}"#), None);
        // FastAPI validation errors put a list under `detail`.
        assert_eq!(detail_message(br#"{"detail":[{"msg":"field required"}]}"#), None);
    }

    #[test]
    fn backend_builds_without_timeout() {
        let config = ClientConfig::builder().no_timeout().build().unwrap();
        let backend = HttpBackend::new(config).unwrap();
        assert_eq!(backend.config().timeout_secs, None);
    }

    #[tokio::test]
    async fn relative_url_fails_as_transport() {
        let backend = HttpBackend::new(ClientConfig::default()).unwrap();
        let request = AnalysisRequest::new(
            crate::input::StagedFile::from_bytes("cv.txt", b"x".to_vec()),
            &crate::input::JobDescription::default(),
        );
        let err = backend.analyze(request).await.unwrap_err();
        assert!(err.is_transport(), "got: {err:?}");
    }
}
