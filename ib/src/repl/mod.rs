//! Interactive REPL for IntentBridge
//!
//! Reads user turns with line editing, sends each one to the synthesis
//! service, and prints clarifying questions or the generated roadmap.

mod session;

pub use session::ReplSession;

use eyre::{Context, Result};

use crate::config::Config;
use crate::synthesis::{Conversation, create_client};

/// Run the interactive REPL
///
/// This is the main entry point for `ib chat`.
pub async fn run_interactive(config: &Config, initial: Option<String>) -> Result<()> {
    config.validate()?;

    let client = create_client(&config.api).context("Failed to create synthesis client")?;
    let conversation = Conversation::new(client, config.clarity.clone());

    let mut session = ReplSession::new(conversation);
    session.run(initial).await
}
