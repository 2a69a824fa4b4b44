//! Command-line client skeleton for the tib API.
//!
//! `tibctl` resolves its settings from three layers, highest precedence first:
//! command-line flags, `TIBCTL_*` environment variables, and a YAML profile
//! file. The layers are collected into an explicit [`config::ConfigStore`] at
//! start-up and passed to each command handler.
//!
//! # Modules
//!
//! - [`commands`]: Command handlers for the `profile`, `config`, and `version` commands
//! - [`config`]: CLI definitions, environment binding, and configuration file resolution
//! - [`error`]: Semantic error types for the application
//! - [`logging`]: `tracing` subscriber setup

pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
