//! Clarity score heuristic
//!
//! A 0-100 indicator of how much information has been gathered, computed only
//! from client-observable state. It is not the synthesis service's own
//! confidence.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Scores above this are shown as high clarity
pub const HIGH_CLARITY_THRESHOLD: u8 = 80;

/// Upper bound for every score
const MAX_SCORE: u8 = 100;

/// Constants for the clarity heuristic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClarityConfig {
    /// Score once a plan has been generated
    #[serde(rename = "plan-score")]
    pub plan_score: u8,

    /// Score while a request is outstanding
    #[serde(rename = "processing-score")]
    pub processing_score: u8,

    /// Score for an empty conversation
    pub base: u8,

    /// Increment per recorded turn
    pub step: u8,

    /// Ceiling for the turn-count based score
    pub cap: u8,
}

impl Default for ClarityConfig {
    fn default() -> Self {
        Self {
            plan_score: 92,
            processing_score: 67,
            base: 48,
            step: 6,
            cap: 72,
        }
    }
}

impl ClarityConfig {
    /// Compute the clarity score
    ///
    /// A present plan wins over an in-flight request, which wins over the
    /// turn-count formula `min(base + message_count * step, cap)`.
    pub fn estimate(&self, message_count: usize, in_flight: bool, plan_present: bool) -> u8 {
        debug!(message_count, in_flight, plan_present, "estimate: called");
        let score = if plan_present {
            self.plan_score
        } else if in_flight {
            self.processing_score
        } else {
            let count = u8::try_from(message_count).unwrap_or(u8::MAX);
            self.base.saturating_add(count.saturating_mul(self.step)).min(self.cap)
        };
        score.min(MAX_SCORE)
    }
}

/// Whether a score should be presented as high clarity
pub fn is_high(score: u8) -> bool {
    score > HIGH_CLARITY_THRESHOLD
}
