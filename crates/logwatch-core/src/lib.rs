#![warn(missing_docs)]
//! # logwatch-core
//!
//! ## Purpose
//! Builds the request payload sent to the LogWatch analysis service.
//!
//! ## Responsibilities
//! - Parse user-edited payload text into a JSON object.
//! - Inject the session-selected retrieval mode at `context.retrieval_mode`.
//! - Ship the bundled LOW/MED/HIGH sample payloads.
//!
//! ## Data flow
//! Raw input text + [`RetrievalMode`] -> [`compose`] -> JSON object handed to
//! the analysis client.
//!
//! ## Ownership and lifetimes
//! The composed payload is an owned [`serde_json::Value`]; callers may move it
//! onto a worker thread without borrowing the session input buffer.
//!
//! ## Error model
//! Invalid JSON or a non-object top level returns [`ParseError`]. Nothing is
//! sent when composition fails.
//!
//! ## Example
//! ```rust
//! use logwatch_core::{compose, RetrievalMode};
//!
//! let payload = compose(r#"{"a":1,"context":{"b":2}}"#, RetrievalMode::Hybrid).unwrap();
//! assert_eq!(payload["context"]["b"], 2);
//! assert_eq!(payload["context"]["retrieval_mode"], "hybrid");
//! ```

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};
use thiserror::Error;

mod samples;

pub use samples::{SAMPLE_HIGH, SAMPLE_LOW, SAMPLE_MED, Sample};

/// Key of the nested object that carries request options.
pub const CONTEXT_KEY: &str = "context";

/// Key under [`CONTEXT_KEY`] that selects the retrieval strategy.
pub const RETRIEVAL_MODE_KEY: &str = "retrieval_mode";

/// Search strategy the analysis service uses for evidence retrieval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RetrievalMode {
    /// Dense vector search only.
    #[default]
    Vector,
    /// Lexical and vector search combined.
    Hybrid,
}

impl RetrievalMode {
    /// Wire value written into `context.retrieval_mode`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vector => "vector",
            Self::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for RetrievalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RetrievalMode {
    type Err = ParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "vector" => Ok(Self::Vector),
            "hybrid" => Ok(Self::Hybrid),
            other => Err(ParseError::UnknownRetrievalMode(other.to_string())),
        }
    }
}

/// Composes the outgoing analysis request.
///
/// The returned object equals the parsed input except that `context` becomes
/// `{...context, retrieval_mode: mode}`. Existing `context` keys survive, a
/// prior `retrieval_mode` is overwritten, and a missing (or non-object)
/// `context` is replaced by `{retrieval_mode: mode}`. Other top-level keys are
/// left untouched.
///
/// # Errors
/// Returns [`ParseError::Json`] when `raw` is not valid JSON.
/// Returns [`ParseError::NotAnObject`] when the top-level value is not an
/// object.
pub fn compose(raw: &str, mode: RetrievalMode) -> Result<Value, ParseError> {
    let parsed: Value =
        serde_json::from_str(raw).map_err(|error| ParseError::Json(error.to_string()))?;

    let mut object = match parsed {
        Value::Object(object) => object,
        other => return Err(ParseError::NotAnObject(json_kind(&other))),
    };

    // Entry keeps the original key position in the outgoing body.
    let context = object
        .entry(CONTEXT_KEY)
        .or_insert_with(|| Value::Object(Map::new()));
    if !context.is_object() {
        *context = Value::Object(Map::new());
    }
    if let Value::Object(context) = context {
        context.insert(
            RETRIEVAL_MODE_KEY.to_string(),
            Value::String(mode.as_str().to_string()),
        );
    }

    Ok(Value::Object(object))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Payload composition errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Input text is not valid JSON; carries the parser message.
    #[error("invalid JSON: {0}")]
    Json(String),
    /// Input parsed, but the top-level value cannot carry request options.
    #[error("payload must be a JSON object, got {0}")]
    NotAnObject(&'static str),
    /// Retrieval mode text is neither `vector` nor `hybrid`.
    #[error("unknown retrieval mode '{0}' (expected vector or hybrid)")]
    UnknownRetrievalMode(String),
    /// Sample name is not one of `low`, `med`, `high`.
    #[error("unknown sample '{0}' (expected low, med or high)")]
    UnknownSample(String),
}

#[cfg(test)]
mod tests {
    //! Unit tests for payload composition.

    use serde_json::json;

    use super::*;

    #[test]
    fn user_selection_overwrites_existing_mode() {
        let payload = compose(
            r#"{"context":{"retrieval_mode":"vector","baseline":{"known_devices":["dev-a"]}}}"#,
            RetrievalMode::Hybrid,
        )
        .expect("payload should compose");

        assert_eq!(
            payload,
            json!({
                "context": {
                    "retrieval_mode": "hybrid",
                    "baseline": {"known_devices": ["dev-a"]}
                }
            })
        );
    }

    #[test]
    fn non_object_context_is_replaced() {
        let payload = compose(r#"{"context":null}"#, RetrievalMode::Vector)
            .expect("payload should compose");
        assert_eq!(payload, json!({"context": {"retrieval_mode": "vector"}}));
    }

    #[test]
    fn rejects_top_level_array() {
        let error = compose("[1,2]", RetrievalMode::Vector).expect_err("array must be rejected");
        assert_eq!(error, ParseError::NotAnObject("array"));
    }

    #[test]
    fn parses_retrieval_mode_case_insensitively() {
        assert_eq!("Hybrid".parse::<RetrievalMode>(), Ok(RetrievalMode::Hybrid));
        assert!("bm25".parse::<RetrievalMode>().is_err());
    }
}
