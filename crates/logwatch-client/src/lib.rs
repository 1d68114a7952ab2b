#![warn(missing_docs)]
//! # logwatch-client
//!
//! ## Purpose
//! Talks to the LogWatch analysis service over HTTP.
//!
//! ## Responsibilities
//! - Validate the configured analysis endpoint.
//! - POST composed payloads as JSON and classify the reply.
//! - Probe service health and build policy document locations.
//!
//! ## Data flow
//! Composed payload -> [`AnalysisClient::analyze`] -> [`AnalysisTransport`] ->
//! [`HttpReply`] -> `ingest_reply` -> result or `ExchangeError`.
//!
//! ## Ownership and lifetimes
//! The client holds its transport behind `Arc<dyn AnalysisTransport>` so it can
//! be cloned onto the worker thread that performs the blocking call.
//!
//! ## Error model
//! Configuration problems return [`ClientError`]. A submission round-trip
//! returns `ExchangeError` and is never retried automatically.
//!
//! ## Security and privacy notes
//! Payload bodies are never logged; only sizes, status codes and timings.

use std::sync::Arc;
use std::time::{Duration, Instant};

use logwatch_analysis_contract::{AnalysisResult, ExchangeError, ingest_reply};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};
use url::{Host, Url};

/// Analysis endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/api/analyze";

/// Service health path, relative to the endpoint origin.
pub const HEALTH_PATH: &str = "/health";

/// Policy document path prefix, relative to the endpoint origin.
pub const POLICIES_PATH: &str = "/api/policies/";

/// Raw HTTP reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    /// Status code.
    pub status: u16,
    /// Body text.
    pub body: String,
}

/// Abstract HTTP transport used by [`AnalysisClient`].
pub trait AnalysisTransport: Send + Sync {
    /// POSTs `body` as `application/json` to `url`.
    ///
    /// # Errors
    /// Returns [`ClientError::Transport`] when no HTTP reply was received.
    fn post_json(&self, url: &Url, body: &Value) -> Result<HttpReply, ClientError>;

    /// GETs `url`.
    ///
    /// # Errors
    /// Returns [`ClientError::Transport`] when no HTTP reply was received.
    fn get(&self, url: &Url) -> Result<HttpReply, ClientError>;
}

/// Blocking `reqwest` transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Builds a transport with a per-request timeout.
    ///
    /// # Errors
    /// Returns [`ClientError::Transport`] when the HTTP client cannot be built.
    pub fn new(timeout: Duration) -> Result<Self, ClientError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| ClientError::Transport(format!("failed to build http client: {error}")))?;
        Ok(Self { client })
    }

    fn finish(response: reqwest::blocking::Response) -> Result<HttpReply, ClientError> {
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|error| ClientError::Transport(format!("failed to read body: {error}")))?;
        Ok(HttpReply { status, body })
    }
}

impl AnalysisTransport for HttpTransport {
    fn post_json(&self, url: &Url, body: &Value) -> Result<HttpReply, ClientError> {
        let response = self
            .client
            .post(url.clone())
            .json(body)
            .send()
            .map_err(|error| ClientError::Transport(error.to_string()))?;
        Self::finish(response)
    }

    fn get(&self, url: &Url) -> Result<HttpReply, ClientError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(|error| ClientError::Transport(error.to_string()))?;
        Self::finish(response)
    }
}

/// Service liveness as reported by the health endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceHealth {
    /// `{"status":"ok"}` received.
    Ok,
    /// Reply received, but not a healthy one.
    Degraded(String),
}

/// Analysis service client.
#[derive(Clone)]
pub struct AnalysisClient {
    endpoint: Url,
    transport: Arc<dyn AnalysisTransport>,
}

impl AnalysisClient {
    /// Creates a client for a validated endpoint.
    ///
    /// # Errors
    /// Returns [`ClientError::InvalidEndpoint`] when the URL does not parse or
    /// is not `http`/`https`.
    pub fn new(
        endpoint: &str,
        transport: Arc<dyn AnalysisTransport>,
    ) -> Result<Self, ClientError> {
        let endpoint = validate_endpoint(endpoint)?;
        Ok(Self {
            endpoint,
            transport,
        })
    }

    /// Configured analysis endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Submits one payload and classifies the reply.
    ///
    /// # Errors
    /// Returns [`ExchangeError::Transport`] when no reply arrived,
    /// [`ExchangeError::Http`] for non-2xx replies and
    /// [`ExchangeError::Ingest`] for 2xx bodies that are not JSON.
    pub fn analyze(&self, payload: &Value) -> Result<AnalysisResult, ExchangeError> {
        let started = Instant::now();
        let reply = self
            .transport
            .post_json(&self.endpoint, payload)
            .map_err(|error| ExchangeError::Transport(error.to_string()))?;

        debug!(
            status = reply.status,
            body_bytes = reply.body.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "analysis reply received"
        );
        ingest_reply(reply.status, &reply.body)
    }

    /// Probes `GET {origin}/health`.
    ///
    /// # Errors
    /// Returns [`ClientError::Transport`] when the service is unreachable.
    pub fn health(&self) -> Result<ServiceHealth, ClientError> {
        let url = self
            .endpoint
            .join(HEALTH_PATH)
            .map_err(|error| ClientError::InvalidEndpoint(error.to_string()))?;
        let reply = self.transport.get(&url)?;

        let healthy = (200..300).contains(&reply.status)
            && serde_json::from_str::<Value>(&reply.body)
                .ok()
                .and_then(|value| value.get("status").and_then(Value::as_str).map(str::to_string))
                .is_some_and(|status| status == "ok");

        if healthy {
            Ok(ServiceHealth::Ok)
        } else {
            Ok(ServiceHealth::Degraded(format!(
                "HTTP {}: {}",
                reply.status, reply.body
            )))
        }
    }

    /// Location of a policy document served next to the analysis endpoint.
    ///
    /// # Errors
    /// Returns [`ClientError::InvalidPolicyName`] for empty names or names
    /// containing `/`, `\` or `..`.
    pub fn policy_url(&self, filename: &str) -> Result<Url, ClientError> {
        validate_policy_name(filename)?;
        self.endpoint
            .join(&format!("{POLICIES_PATH}{filename}"))
            .map_err(|error| ClientError::InvalidPolicyName(error.to_string()))
    }
}

/// Parses and checks an analysis endpoint.
///
/// Plain `http` is accepted for local development; a warning is logged when
/// it targets a non-loopback host.
///
/// # Errors
/// Returns [`ClientError::InvalidEndpoint`] for unparsable URLs or schemes
/// other than `http`/`https`.
pub fn validate_endpoint(endpoint: &str) -> Result<Url, ClientError> {
    let parsed = Url::parse(endpoint)
        .map_err(|error| ClientError::InvalidEndpoint(format!("invalid url: {error}")))?;

    match parsed.scheme() {
        "https" => {}
        "http" if is_loopback(&parsed) => {}
        "http" => warn!(endpoint = %parsed, "analysis endpoint is not using https"),
        other => {
            return Err(ClientError::InvalidEndpoint(format!(
                "unsupported scheme '{other}', expected http or https"
            )));
        }
    }

    Ok(parsed)
}

/// Returns `true` when the URL targets `localhost` or a loopback address.
pub fn is_loopback(url: &Url) -> bool {
    match url.host() {
        Some(Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
        Some(Host::Ipv4(address)) => address.is_loopback(),
        Some(Host::Ipv6(address)) => address.is_loopback(),
        None => false,
    }
}

fn validate_policy_name(filename: &str) -> Result<(), ClientError> {
    if filename.trim().is_empty()
        || filename.contains('/')
        || filename.contains('\\')
        || filename.contains("..")
    {
        return Err(ClientError::InvalidPolicyName(filename.to_string()));
    }
    Ok(())
}

/// Client configuration and transport errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Endpoint violates URL or scheme requirements.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
    /// Policy filename is empty or tries to leave the policy directory.
    #[error("invalid policy filename: {0}")]
    InvalidPolicyName(String),
    /// No HTTP reply was received.
    #[error("{0}")]
    Transport(String),
}
