//! Session controller: applies events and runs submissions off-thread.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use logwatch_analysis_contract::ExchangeError;
use logwatch_client::AnalysisClient;
use logwatch_ui::{Effect, Event, RequestToken, Session, reduce};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::redact_sensitive;

/// Owns the session and the reply channel of in-flight submissions.
pub struct Controller {
    session: Session,
    client: AnalysisClient,
    replies_tx: Sender<Event>,
    replies_rx: Receiver<Event>,
}

impl Controller {
    /// Creates a controller around an initial session.
    pub fn new(session: Session, client: AnalysisClient) -> Self {
        let (replies_tx, replies_rx) = mpsc::channel();
        Self {
            session,
            client,
            replies_tx,
            replies_rx,
        }
    }

    /// Current session snapshot.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Analysis client used for submissions.
    pub fn client(&self) -> &AnalysisClient {
        &self.client
    }

    /// Applies `event` and executes any resulting effect.
    pub fn dispatch(&mut self, event: Event) {
        let (session, effect) = reduce(std::mem::take(&mut self.session), event);
        self.session = session;

        if let Some(Effect::Dispatch { token, payload }) = effect {
            self.spawn_submission(token, payload);
        }
    }

    /// Applies every reply that has already arrived. Returns how many.
    pub fn drain_replies(&mut self) -> usize {
        let mut applied = 0;
        loop {
            match self.replies_rx.try_recv() {
                Ok(event) => {
                    self.dispatch(event);
                    applied += 1;
                }
                Err(TryRecvError::Empty) => return applied,
                // The controller holds a sender, so the channel never disconnects.
                Err(TryRecvError::Disconnected) => return applied,
            }
        }
    }

    /// Blocks until no submission is pending or `timeout` elapses.
    ///
    /// Replies to superseded submissions are applied (and discarded by the
    /// reducer) without ending the wait. Returns `true` when nothing is pending.
    pub fn wait_for_reply(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.session.is_pending() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.replies_rx.recv_timeout(remaining) {
                Ok(event) => self.dispatch(event),
                Err(RecvTimeoutError::Timeout) => return false,
                Err(RecvTimeoutError::Disconnected) => return false,
            }
        }
        true
    }

    fn spawn_submission(&mut self, token: RequestToken, payload: Value) {
        let client = self.client.clone();
        let replies = self.replies_tx.clone();

        let spawned = thread::Builder::new()
            .name(format!("logwatch-submit-{}", token.0))
            .spawn(move || {
                let outcome = client.analyze(&payload);
                if let Err(failure) = &outcome {
                    warn!(%token, error = %redact_sensitive(&failure.to_string()), "submission failed");
                }
                if replies.send(Event::ResponseReceived { token, outcome }).is_err() {
                    debug!(%token, "controller gone, dropping reply");
                }
            });

        if let Err(spawn_error) = spawned {
            error!(%token, error = %spawn_error, "cannot start submission worker");
            self.dispatch(Event::ResponseReceived {
                token,
                outcome: Err(ExchangeError::Transport(format!(
                    "cannot start submission worker: {spawn_error}"
                ))),
            });
        }
    }
}
