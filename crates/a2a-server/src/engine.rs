//! HTTP client for the NPL policy engine.

use a2a_types::{EngineRequest, EngineResponse};
use reqwest::{header::AUTHORIZATION, StatusCode};
use std::time::Duration;
use thiserror::Error;

use crate::middleware::BearerToken;

/// Upper bound on a single engine evaluation.
pub const ENGINE_TIMEOUT: Duration = Duration::from_secs(30);

/// Path of the evaluation endpoint, relative to the engine base URL.
const EVALUATE_PATH: &str = "/npl/evaluate";

/// Ways an engine call can fail.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The request could not be built (bad base URL, unusable header value).
    #[error("{0}")]
    Build(#[source] reqwest::Error),

    /// The engine answered with a status other than 200.
    #[error("NPL engine error: {}", .status.as_u16())]
    Status { status: StatusCode, body: String },

    /// Connection, timeout or body decoding failure.
    #[error("Communication error: {0}")]
    Transport(#[source] reqwest::Error),
}

impl EngineError {
    /// Whether the failure happened on our side before anything was sent.
    pub fn is_internal(&self) -> bool {
        matches!(self, EngineError::Build(_))
    }
}

impl From<reqwest::Error> for EngineError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            EngineError::Build(err)
        } else {
            EngineError::Transport(err)
        }
    }
}

/// Client for `POST <base>/npl/evaluate`.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone, Debug)]
pub struct PolicyEngineClient {
    http: reqwest::Client,
    evaluate_url: String,
    timeout: Duration,
}

impl PolicyEngineClient {
    /// Creates a client with the standard 30 second timeout.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Build` if the HTTP client cannot be initialised.
    pub fn new(base_url: &str) -> Result<Self, EngineError> {
        Self::with_timeout(base_url, ENGINE_TIMEOUT)
    }

    /// Creates a client whose calls are bounded by `timeout`.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, EngineError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(EngineError::Build)?;

        Ok(Self {
            http,
            evaluate_url: format!("{}{}", base_url.trim_end_matches('/'), EVALUATE_PATH),
            timeout,
        })
    }

    /// Per-call timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Full URL of the evaluation endpoint.
    pub fn evaluate_url(&self) -> &str {
        &self.evaluate_url
    }

    /// Sends one evaluation request, forwarding `token` as a bearer credential.
    ///
    /// Exactly one attempt is made. A 200 response is decoded as an
    /// [`EngineResponse`]; anything else is an [`EngineError`]. Failures are
    /// returned, not logged; the caller owns reporting.
    pub async fn call(
        &self,
        request: &EngineRequest,
        token: &BearerToken,
    ) -> Result<EngineResponse, EngineError> {
        let resp = self
            .http
            .post(&self.evaluate_url)
            .header(AUTHORIZATION, format!("Bearer {}", token.as_str()))
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        if status != StatusCode::OK {
            let body = resp.text().await.unwrap_or_default();
            return Err(EngineError::Status { status, body });
        }

        Ok(resp.json::<EngineResponse>().await?)
    }
}
