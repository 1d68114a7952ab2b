//! Fake transports for client tests.

use std::sync::Mutex;

use logwatch_client::{AnalysisTransport, ClientError, HttpReply};
use serde_json::Value;
use url::Url;

/// Replies with a canned result and records every request.
#[derive(Debug)]
pub struct ScriptedTransport {
    reply: Result<HttpReply, ClientError>,
    pub requests: Mutex<Vec<(String, Url, Option<Value>)>>,
}

impl ScriptedTransport {
    /// Transport that always returns `status` and `body`.
    #[allow(dead_code)]
    pub fn replying(status: u16, body: &str) -> Self {
        Self {
            reply: Ok(HttpReply {
                status,
                body: body.to_string(),
            }),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Transport that never reaches the service.
    #[allow(dead_code)]
    pub fn unreachable(message: &str) -> Self {
        Self {
            reply: Err(ClientError::Transport(message.to_string())),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn record(&self, method: &str, url: &Url, body: Option<&Value>) {
        self.requests
            .lock()
            .expect("request log lock should work")
            .push((method.to_string(), url.clone(), body.cloned()));
    }
}

impl AnalysisTransport for ScriptedTransport {
    fn post_json(&self, url: &Url, body: &Value) -> Result<HttpReply, ClientError> {
        self.record("POST", url, Some(body));
        self.reply.clone()
    }

    fn get(&self, url: &Url) -> Result<HttpReply, ClientError> {
        self.record("GET", url, None);
        self.reply.clone()
    }
}
