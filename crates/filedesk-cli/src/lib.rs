//! FileDesk CLI
//!
//! Command definitions, table/JSON output and terminal prompts for the
//! `filedesk` binary.

pub mod commands;
pub mod output;
pub mod prompt;

pub use commands::Cli;
pub use output::OutputFormat;
