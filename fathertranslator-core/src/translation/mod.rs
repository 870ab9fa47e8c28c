//! Streaming translation sessions
//!
//! - [`request`]: the immutable request and its preconditions
//! - [`session`]: the cancellable stream driver and its owner
//! - [`accumulator`]: append-only output text
//! - [`error`]: validation errors and session failures

pub mod accumulator;
pub mod error;
pub mod request;
pub mod session;

pub use accumulator::OutputAccumulator;
pub use error::{TranslationFailure, ValidationError};
pub use request::{ModelConfig, TranslationRequest};
pub use session::{
    NoopObserver, SessionHandle, SessionOutcome, SessionState, TranslationObserver,
    TranslationSession, run_session,
};
