//! Loading spinner utilities for terminal UI using indicatif crate

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const TICK_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// A wrapper around indicatif's ProgressBar for easy spinner management
#[derive(Debug, Clone)]
pub struct Spinner {
    pb: ProgressBar,
}

impl Spinner {
    /// Create a new spinner with the given message, drawn on stderr
    pub fn new(message: &str) -> Self {
        let pb = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars(TICK_CHARS);
        pb.set_style(style);
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.tick();

        Self { pb }
    }

    /// Spinner that never draws, for pipes and tests
    pub fn hidden() -> Self {
        Self {
            pb: ProgressBar::hidden(),
        }
    }

    pub fn set_message(&self, message: &str) {
        self.pb.set_message(message.to_string());
    }

    /// Finish the spinner and clear the line
    pub fn finish_and_clear(&self) {
        if !self.pb.is_finished() {
            self.pb.finish_and_clear();
        }
    }

    pub fn is_finished(&self) -> bool {
        self.pb.is_finished()
    }
}

/// Spinner shown while waiting for the first translated fragment
pub fn start_request_spinner(message: &str, visible: bool) -> Spinner {
    if visible {
        Spinner::new(message)
    } else {
        Spinner::hidden()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_spinner_finishes_once() {
        let spinner = start_request_spinner("Translating", false);
        assert!(!spinner.is_finished());
        spinner.finish_and_clear();
        spinner.finish_and_clear();
        assert!(spinner.is_finished());
    }
}
