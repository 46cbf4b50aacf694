//! Presentation layer for scholar-agent
//!
//! This crate contains CLI definitions, call-file input, console output
//! formatting and the interactive permission prompt.

pub mod approval;
pub mod cli;
pub mod output;

// Re-export commonly used types
pub use approval::InteractivePermissionPrompt;
pub use cli::commands::{ApprovalMode, Cli, Command, LevelFilter, OutputFormat, RunArgs, ToolsArgs};
pub use cli::input::{CallFileError, parse_call_file};
pub use output::console::ConsoleFormatter;
