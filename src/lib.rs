//! aio - all-in-one command-line toolbox.
//!
//! Forty small tools grouped into `network`, `security`, `system`, `utility`
//! and `fun` categories. Each tool is one function under [`tools`]; the
//! [`cli`] module parses arguments and dispatches to them.

pub mod cli;
pub mod config;
pub mod constants;
pub mod event;
pub mod http;
pub mod logging;
pub mod output;
pub mod state;
pub mod theme;
pub mod tools;
pub mod utils;
