//! SynthesisClient trait definition

use async_trait::async_trait;

use super::{ProcessRequest, SynthesisError, SynthesisResponse};

/// Client for the remote synthesis service
///
/// One call is one turn: the request carries the whole history, so the
/// client itself holds no conversation state.
#[async_trait]
pub trait SynthesisClient: Send + Sync {
    /// Send one turn and wait for the classified response
    async fn process(&self, request: &ProcessRequest) -> Result<SynthesisResponse, SynthesisError>;
}
