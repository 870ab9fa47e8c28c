//! User interface utilities shared by terminal front ends
//!
//! Loading spinner, streamed translation rendering and styled messages.

pub mod spinner;
pub mod streaming;
pub mod styled;

pub use spinner::{Spinner, start_request_spinner};
pub use streaming::TerminalRenderer;
pub use styled::*;
