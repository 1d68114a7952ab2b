//! Shared fixtures for app integration tests.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};

use logwatch_client::{AnalysisClient, AnalysisTransport, ClientError, HttpReply};
use serde_json::Value;
use url::Url;

/// Reply of the analysis service to the MED sample.
#[allow(dead_code)]
pub const MED_RESPONSE: &str = r#"{
    "request_id": "demo-med",
    "summary": {"risk_score": 45, "risk_level": "MED", "decision": "REVIEW"},
    "signals": [
        {"key": "failed_login_burst", "value": 3, "weight": 30, "reason": "3 failed logins within 5 minutes"}
    ],
    "recommended_actions": [
        {"action": "Enable MFA", "priority": "P0", "why": "credential stuffing pattern"}
    ],
    "evidence": [
        {"title": "Account Lockout Policy", "section": "2.1", "page": 4, "chunk_id": "c-7",
         "quote": "Lock the account after five consecutive failed attempts.", "distance": 0.2134}
    ]
}"#;

/// Transport answering every request with one fixed reply.
#[derive(Debug)]
pub struct FixedTransport {
    reply: Result<HttpReply, ClientError>,
}

impl AnalysisTransport for FixedTransport {
    fn post_json(&self, _url: &Url, _body: &Value) -> Result<HttpReply, ClientError> {
        self.reply.clone()
    }

    fn get(&self, _url: &Url) -> Result<HttpReply, ClientError> {
        self.reply.clone()
    }
}

/// Transport that holds each reply until the test releases it.
#[derive(Debug)]
pub struct GatedTransport {
    gate: Mutex<Receiver<()>>,
    body: String,
}

impl AnalysisTransport for GatedTransport {
    fn post_json(&self, _url: &Url, _body: &Value) -> Result<HttpReply, ClientError> {
        let gate = self.gate.lock().expect("gate lock should work");
        gate.recv()
            .map_err(|_| ClientError::Transport("gate closed".to_string()))?;
        Ok(HttpReply {
            status: 200,
            body: self.body.clone(),
        })
    }

    fn get(&self, _url: &Url) -> Result<HttpReply, ClientError> {
        Err(ClientError::Transport("not scripted".to_string()))
    }
}

/// Client whose transport always returns `status` and `body`.
#[allow(dead_code)]
pub fn replying_client(status: u16, body: &str) -> AnalysisClient {
    client(FixedTransport {
        reply: Ok(HttpReply {
            status,
            body: body.to_string(),
        }),
    })
}

/// Client whose transport never reaches the service.
#[allow(dead_code)]
pub fn unreachable_client(message: &str) -> AnalysisClient {
    client(FixedTransport {
        reply: Err(ClientError::Transport(message.to_string())),
    })
}

/// Client whose replies wait for a send on the returned gate.
#[allow(dead_code)]
pub fn gated_client(body: &str) -> (AnalysisClient, Sender<()>) {
    let (release, gate) = mpsc::channel();
    let transport = GatedTransport {
        gate: Mutex::new(gate),
        body: body.to_string(),
    };
    (client(transport), release)
}

fn client(transport: impl AnalysisTransport + 'static) -> AnalysisClient {
    AnalysisClient::new("http://127.0.0.1:8000/api/analyze", Arc::new(transport))
        .expect("loopback endpoint should be valid")
}
