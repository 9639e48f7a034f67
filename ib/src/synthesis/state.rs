//! Client state machine
//!
//! [`ClientState`] is an immutable record of `(history, plan, in-flight)`.
//! It changes only through two transitions:
//!
//! ```text
//!            begin(input)                settle(outcome)
//!   Idle ──────────────────► InFlight ──────────────────► Idle
//!  (+user turn)                          (+system turn, maybe +plan)
//! ```
//!
//! Each transition returns a new state and leaves the old one untouched.

use thiserror::Error;
use tracing::{debug, warn};

use super::{ProcessRequest, SynthesisError, SynthesisResponse};
use crate::clarity::ClarityConfig;
use crate::plan::Plan;
use crate::session::{History, SessionId, Turn};

/// System turn recorded when a plan arrives
pub const PLAN_CONFIRMATION: &str = "I have generated a full execution plan for you.";

/// System turn recorded when the service could not be reached
pub const TRANSPORT_ERROR_MESSAGE: &str = "Error connecting to the bridge.";

/// System turn recorded when the reply could not be interpreted
pub const UNRECOGNIZED_RESPONSE_MESSAGE: &str = "The bridge returned a response that could not be understood.";

/// System turn recorded when an outstanding request was cancelled
pub const CANCELLED_MESSAGE: &str = "Request cancelled.";

/// Why a submission did not start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitRejected {
    #[error("input is empty")]
    EmptyInput,

    #[error("a request is already in flight")]
    InFlight,
}

/// What a settled turn did to the state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The service asked clarifying questions
    Clarification,
    /// A plan was stored
    PlanGenerated,
    /// The service could not be reached
    TransportFailed,
    /// The service replied with something we do not understand
    Unrecognized,
    /// The request was cancelled before it settled
    Cancelled,
    /// Nothing was in flight, so the outcome was dropped
    Discarded,
}

impl TurnOutcome {
    /// Stable snake_case name, used in JSON output
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clarification => "clarification",
            Self::PlanGenerated => "plan_generated",
            Self::TransportFailed => "transport_failed",
            Self::Unrecognized => "unrecognized",
            Self::Cancelled => "cancelled",
            Self::Discarded => "discarded",
        }
    }
}

/// Conversation state as seen by the client
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientState {
    history: History,
    plan: Option<Plan>,
    in_flight: bool,
}

impl ClientState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn plan(&self) -> Option<&Plan> {
        self.plan.as_ref()
    }

    pub fn has_plan(&self) -> bool {
        self.plan.is_some()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Clarity score for this state
    pub fn clarity(&self, config: &ClarityConfig) -> u8 {
        config.estimate(self.history.len(), self.in_flight, self.plan.is_some())
    }

    /// Start a turn
    ///
    /// Appends the user turn, marks the state in flight, and returns the
    /// payload to send. `input` is sent as typed; only the emptiness check
    /// trims it.
    pub fn begin(&self, session_id: &SessionId, input: &str) -> Result<(ClientState, ProcessRequest), SubmitRejected> {
        debug!(%session_id, input_len = input.len(), in_flight = self.in_flight, "begin: called");
        if input.trim().is_empty() {
            debug!("begin: empty input");
            return Err(SubmitRejected::EmptyInput);
        }
        if self.in_flight {
            debug!("begin: request already in flight");
            return Err(SubmitRejected::InFlight);
        }

        let history = self.history.append(Turn::user(input));
        let request = ProcessRequest {
            session_id: session_id.clone(),
            user_input: input.to_string(),
            history: history.clone(),
        };
        let next = ClientState {
            history,
            plan: self.plan.clone(),
            in_flight: true,
        };
        Ok((next, request))
    }

    /// Finish the outstanding turn with the service's outcome
    ///
    /// Every path appends exactly one system turn and clears the in-flight
    /// flag. A plan, once present, is only ever replaced by a newer plan.
    pub fn settle(&self, outcome: Result<SynthesisResponse, SynthesisError>) -> (ClientState, TurnOutcome) {
        if !self.in_flight {
            warn!("settle: no request in flight, discarding outcome");
            return (self.clone(), TurnOutcome::Discarded);
        }

        let mut plan = self.plan.clone();
        let (turn, result) = match outcome {
            Ok(SynthesisResponse::ClarificationNeeded { analysis, questions }) => {
                debug!(question_count = questions.len(), "settle: clarification needed");
                (Turn::clarification(analysis, questions), TurnOutcome::Clarification)
            }
            Ok(SynthesisResponse::PlanGenerated { plan: generated }) => {
                debug!(section_count = generated.len(), "settle: plan generated");
                plan = Some(generated);
                (Turn::system(PLAN_CONFIRMATION), TurnOutcome::PlanGenerated)
            }
            Err(e) if e.is_cancelled() => {
                debug!("settle: request cancelled");
                (Turn::system(CANCELLED_MESSAGE), TurnOutcome::Cancelled)
            }
            Err(e) if e.is_transport() => {
                warn!(error = %e, "settle: transport failure");
                (Turn::system(TRANSPORT_ERROR_MESSAGE), TurnOutcome::TransportFailed)
            }
            Err(e) => {
                warn!(error = %e, "settle: unrecognized response");
                (Turn::system(UNRECOGNIZED_RESPONSE_MESSAGE), TurnOutcome::Unrecognized)
            }
        };

        let next = ClientState {
            history: self.history.append(turn),
            plan,
            in_flight: false,
        };
        (next, result)
    }
}
