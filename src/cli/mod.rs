//! CLI module for rfptuner
//!
//! Handles command-line argument parsing and configuration management.

pub mod args;
pub mod config;

pub use args::{Args, Commands, GenerateArgs, Verbosity};
pub use config::Config;
