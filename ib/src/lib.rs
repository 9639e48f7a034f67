//! IntentBridge - conversational intent-to-plan client
//!
//! IntentBridge keeps a conversation with a remote synthesis service. Each
//! user turn is sent together with the full prior history; the service either
//! asks clarifying questions or returns a structured execution plan, which is
//! rendered as a sectioned roadmap.
//!
//! # Core Concepts
//!
//! - **Immutable snapshots**: every turn produces a new [`ClientState`]; earlier
//!   histories are never modified
//! - **Single flight**: at most one request per conversation is outstanding
//! - **Visible failures**: transport errors, unknown replies and cancellation
//!   all leave a system turn in the history
//!
//! # Modules
//!
//! - [`session`] - Session ids, turns and history
//! - [`synthesis`] - Request protocol, state machine and HTTP client
//! - [`plan`] - Plan document
//! - [`render`] - Plan to section/block outline
//! - [`clarity`] - Clarity score heuristic
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface
//! - [`repl`] - Interactive chat

pub mod clarity;
pub mod cli;
pub mod config;
pub mod plan;
pub mod render;
pub mod repl;
pub mod session;
pub mod synthesis;

pub use clarity::ClarityConfig;
pub use config::{ApiConfig, Config};
pub use plan::Plan;
pub use render::{Block, Section, format_outline, humanize, render, stringify};
pub use session::{History, Role, SessionId, Turn};
pub use synthesis::{
    ClientState, Conversation, HttpSynthesisClient, ProcessRequest, SubmitRejected, SynthesisClient, SynthesisError,
    SynthesisResponse, TurnOutcome, create_client,
};
