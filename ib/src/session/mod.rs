//! Session identity and the append-only turn log
//!
//! A conversation is identified by a [`SessionId`] generated once when the
//! conversation starts. Every exchange with the synthesis service is recorded
//! as a [`Turn`] in a [`History`], which only ever grows.

mod history;
mod id;
mod turn;

pub use history::History;
pub use id::SessionId;
pub use turn::{Role, Turn};
