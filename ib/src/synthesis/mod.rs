//! Synthesis request protocol
//!
//! Turns one user input into one `POST <base>/process` call and folds the
//! reply back into the conversation state.
//!
//! # Architecture
//!
//! ```text
//! input → ClientState::begin → ProcessRequest → SynthesisClient::process
//!                                                        ↓
//!         ClientState::settle ← Result<SynthesisResponse, SynthesisError>
//! ```
//!
//! [`Conversation`] owns a session's state and drives the three steps.

pub mod client;
mod conversation;
mod error;
mod http;
mod state;
mod types;

pub use client::SynthesisClient;
pub use conversation::Conversation;
pub use error::SynthesisError;
pub use http::HttpSynthesisClient;
pub use state::{
    CANCELLED_MESSAGE, ClientState, PLAN_CONFIRMATION, SubmitRejected, TRANSPORT_ERROR_MESSAGE, TurnOutcome,
    UNRECOGNIZED_RESPONSE_MESSAGE,
};
pub use types::{ProcessRequest, STATUS_CLARIFICATION_NEEDED, STATUS_PLAN_GENERATED, SynthesisResponse};

use std::sync::Arc;

use tracing::debug;

use crate::config::ApiConfig;

/// Create the HTTP synthesis client described by the config
pub fn create_client(config: &ApiConfig) -> Result<Arc<dyn SynthesisClient>, SynthesisError> {
    debug!(base_url = %config.base_url, "create_client: called");
    Ok(Arc::new(HttpSynthesisClient::from_config(config)?))
}
