//! Command-line interface module
//!
//! This module handles all CLI argument parsing and command handlers.

pub mod args;
pub mod catalog;
pub mod config;
pub mod translate;

pub use args::*;
pub use catalog::{handle_languages_command, handle_models_command};
pub use config::handle_config_command;
pub use translate::handle_translate_command;
