//! Plan rendering
//!
//! Turns a [`Plan`](crate::plan::Plan) into display-ready sections:
//!
//! - [`humanize`] - machine keys to human-readable titles
//! - [`stringify`] - arbitrary JSON values to text
//! - [`render`] - one [`Section`] per top-level plan key

mod humanize;
mod outline;
mod stringify;

pub use humanize::humanize;
pub use outline::{Block, Section, format_outline, render};
pub use stringify::{EMPTY_PLACEHOLDER, LIST_SEPARATOR, stringify};
