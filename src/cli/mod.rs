//! Command-line interface module.
//!
//! Provides argument parsing and dispatch to the tools.

pub mod args;
pub mod commands;
