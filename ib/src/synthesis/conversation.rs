//! Conversation - one session's state plus the client that advances it
//!
//! Owns the [`SessionId`], the current [`ClientState`] and a
//! [`CancellationToken`] that aborts any outstanding call when the
//! conversation is shut down or dropped.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::{ClientState, ProcessRequest, SubmitRejected, SynthesisClient, SynthesisError, SynthesisResponse, TurnOutcome};
use crate::clarity::ClarityConfig;
use crate::session::SessionId;

/// A single conversation with the synthesis service
pub struct Conversation {
    session_id: SessionId,
    state: ClientState,
    client: Arc<dyn SynthesisClient>,
    clarity: ClarityConfig,
    cancel: CancellationToken,
}

impl Conversation {
    /// Start a conversation with a freshly generated session ID
    pub fn new(client: Arc<dyn SynthesisClient>, clarity: ClarityConfig) -> Self {
        Self::with_session_id(SessionId::generate(), client, clarity)
    }

    pub fn with_session_id(session_id: SessionId, client: Arc<dyn SynthesisClient>, clarity: ClarityConfig) -> Self {
        info!(%session_id, "Conversation started");
        Self {
            session_id,
            state: ClientState::new(),
            client,
            clarity,
            cancel: CancellationToken::new(),
        }
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    /// Current clarity score
    pub fn clarity(&self) -> u8 {
        self.state.clarity(&self.clarity)
    }

    /// Token cancelled when this conversation is torn down
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Start a turn: record the user input and mark the state in flight
    pub fn begin(&mut self, input: &str) -> Result<ProcessRequest, SubmitRejected> {
        let (next, request) = self.state.begin(&self.session_id, input)?;
        self.state = next;
        Ok(request)
    }

    /// Send a started turn to the service
    ///
    /// Resolves to [`SynthesisError::Cancelled`] if the conversation is shut
    /// down first.
    pub async fn dispatch(&self, request: &ProcessRequest) -> Result<SynthesisResponse, SynthesisError> {
        debug!(session_id = %self.session_id, "dispatch: called");
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                debug!("dispatch: cancelled");
                Err(SynthesisError::Cancelled)
            }
            result = self.client.process(request) => result,
        }
    }

    /// Finish the outstanding turn
    pub fn settle(&mut self, outcome: Result<SynthesisResponse, SynthesisError>) -> TurnOutcome {
        let (next, result) = self.state.settle(outcome);
        self.state = next;
        info!(
            session_id = %self.session_id,
            ?result,
            turns = self.state.history().len(),
            clarity = self.clarity(),
            "Turn settled"
        );
        result
    }

    /// Run one complete turn: begin, dispatch, settle
    pub async fn submit(&mut self, input: &str) -> Result<TurnOutcome, SubmitRejected> {
        let request = self.begin(input)?;
        let outcome = self.dispatch(&request).await;
        Ok(self.settle(outcome))
    }

    /// Abort any outstanding call; later dispatches resolve as cancelled
    pub fn shutdown(&self) {
        debug!(session_id = %self.session_id, "shutdown: called");
        self.cancel.cancel();
    }
}

impl Drop for Conversation {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
