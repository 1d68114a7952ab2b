#![warn(missing_docs)]
//! # logwatch-app
//!
//! ## Purpose
//! Orchestrates payload composition, the analysis client, and the explorer
//! session for the `logwatch` command-line explorer.
//!
//! ## Responsibilities
//! - Resolve runtime configuration from flags and environment.
//! - Install structured logging.
//! - Run submissions off the input thread and feed replies back into the
//!   session reducer ([`Controller`]).
//! - Parse explorer commands and render session views as text.
//!
//! ## Data flow
//! Command line -> [`parse_command`] -> [`Command::into_event`] ->
//! [`Controller::dispatch`] -> session reducer -> worker thread -> analysis
//! client -> reply channel -> [`Controller::drain_replies`] -> [`render_session`].
//!
//! ## Ownership and lifetimes
//! The controller owns the session and the reply channel. Worker threads get a
//! cloned client, the composed payload and a sender, nothing borrowed.
//!
//! ## Error model
//! Subsystem failures are wrapped in [`AppError`]. Submission failures never
//! surface here; they become session state.
//!
//! ## Security and privacy notes
//! - Error text passes through [`redact_sensitive`] before it is logged.
//! - Payload bodies are never logged.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use logwatch_client::{AnalysisClient, ClientError, DEFAULT_ENDPOINT, HttpTransport};
use logwatch_core::{ParseError, RetrievalMode, Sample};
use logwatch_explorer::{DEFAULT_QUOTE_LIMIT, SortParseError};
use logwatch_ui::{SelectionError, Session};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

mod command;
mod controller;
mod render;

pub use command::{Command, HELP, parse_command};
pub use controller::Controller;
pub use render::{render_banner, render_session};

/// Build-time application version loaded from root `VERSION` file.
pub const APP_VERSION: &str = env!("LOGWATCH_VERSION");

/// Environment variable holding the log filter directive.
pub const LOG_FILTER_ENV: &str = "LOGWATCH_LOG";

/// Log filter used when [`LOG_FILTER_ENV`] is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Returns the app version sourced from root `VERSION`.
pub fn app_version() -> &'static str {
    APP_VERSION
}

/// Runtime configuration.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "logwatch",
    version = APP_VERSION,
    about = "Interactive explorer for LogWatch analysis results"
)]
pub struct AppConfig {
    /// Analysis endpoint URL.
    #[arg(long, env = "LOGWATCH_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Retrieval mode injected into `context.retrieval_mode`.
    #[arg(long, env = "LOGWATCH_RETRIEVAL_MODE", default_value = "vector")]
    pub mode: RetrievalMode,

    /// Per-request timeout in seconds.
    #[arg(long, env = "LOGWATCH_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// File with the initial payload JSON; takes precedence over `--sample`.
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Bundled sample loaded when no `--input` is given.
    #[arg(long, default_value = "low")]
    pub sample: Sample,

    /// Characters shown before an evidence quote is collapsed.
    #[arg(long, default_value_t = DEFAULT_QUOTE_LIMIT)]
    pub quote_limit: usize,
}

impl AppConfig {
    /// Request timeout as a duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Installs the global `tracing` subscriber writing to stderr.
///
/// # Errors
/// Returns [`AppError::Logging`] when a subscriber is already installed.
pub fn init_logging() -> Result<(), AppError> {
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|error| AppError::Logging(error.to_string()))
}

/// Reads payload text from `path`.
///
/// # Errors
/// Returns [`AppError::Io`] when the file cannot be read.
pub fn read_input_file(path: &Path) -> Result<String, AppError> {
    std::fs::read_to_string(path).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Initial input text: `--input` file if given, else the selected sample.
///
/// # Errors
/// Returns [`AppError::Io`] when the input file cannot be read.
pub fn initial_input(config: &AppConfig) -> Result<String, AppError> {
    match &config.input {
        Some(path) => read_input_file(path),
        None => Ok(config.sample.text().to_string()),
    }
}

/// Builds the HTTP-backed analysis client.
///
/// # Errors
/// Returns [`AppError::Client`] for an invalid endpoint or client build
/// failure.
pub fn build_client(config: &AppConfig) -> Result<AnalysisClient, AppError> {
    let transport = HttpTransport::new(config.timeout())?;
    Ok(AnalysisClient::new(&config.endpoint, Arc::new(transport))?)
}

/// Builds the initial session from configuration.
///
/// # Errors
/// Returns [`AppError::Io`] when the input file cannot be read.
pub fn build_session(config: &AppConfig) -> Result<Session, AppError> {
    Ok(Session::new(initial_input(config)?, config.mode).with_quote_limit(config.quote_limit))
}

/// Redacts common secret markers in log-safe output.
///
/// Everything after the first marker is dropped, since the secret value may
/// span the rest of the line.
pub fn redact_sensitive(input: &str) -> String {
    let lower = input.to_ascii_lowercase();
    let first = ["password", "token", "authorization", "bearer", "api_key"]
        .into_iter()
        .filter_map(|key| lower.find(key).map(|position| (position, key)))
        .min_by_key(|(position, _)| *position);

    match first {
        Some((position, key)) => format!("{}{key}=<redacted>", &input[..position]),
        None => input.to_string(),
    }
}

/// App integration error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Client configuration or transport error.
    #[error("client error: {0}")]
    Client(#[from] ClientError),
    /// Payload, mode or sample parse error.
    #[error("{0}")]
    Parse(#[from] ParseError),
    /// Unknown view or category.
    #[error("{0}")]
    Selection(#[from] SelectionError),
    /// Unknown evidence sort key.
    #[error("{0}")]
    Sort(#[from] SortParseError),
    /// Explorer command could not be understood.
    #[error("{0}")]
    Command(String),
    /// File or terminal I/O failure.
    #[error("i/o failure on {}: {source}", path.display())]
    Io {
        /// File or stream that failed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// Logging could not be initialized.
    #[error("logging setup failed: {0}")]
    Logging(String),
}
