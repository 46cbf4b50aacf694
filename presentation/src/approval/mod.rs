//! Terminal approval for destructive tool calls.

mod prompt;

pub use prompt::InteractivePermissionPrompt;
