//! Interactive permission prompt.
//!
//! Shown when a destructive call's policy resolves to `ask`:
//!
//! ```text
//! ───────────────────────────────────────────────
//!   Permission required: delete_item (call_3)
//! ───────────────────────────────────────────────
//! Allow this call? [y/N]
//! ```
//!
//! | Answer | Aliases | Result |
//! |--------|---------|--------|
//! | yes | `y`, `approve`, `a` | call runs |
//! | no | `n`, `deny`, `d`, empty | `PERMISSION_DENIED` |
//!
//! End of input cancels the request, which the gate also treats as a
//! denial. Prompts from concurrent calls in one batch are shown one at a
//! time.

use async_trait::async_trait;
use colored::Colorize;
use scholar_application::ports::permission_handler::{PermissionHandler, PermissionHandlerError};
use std::io::{self, BufRead, Write};
use tokio::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Answer {
    Allow,
    Deny,
    Unrecognized,
}

fn parse_answer(input: &str) -> Answer {
    match input.trim().to_lowercase().as_str() {
        "y" | "yes" | "a" | "approve" => Answer::Allow,
        "" | "n" | "no" | "d" | "deny" => Answer::Deny,
        _ => Answer::Unrecognized,
    }
}

/// [`PermissionHandler`] that asks on stderr and reads stdin.
pub struct InteractivePermissionPrompt {
    terminal: Mutex<()>,
}

impl InteractivePermissionPrompt {
    pub fn new() -> Self {
        Self {
            terminal: Mutex::new(()),
        }
    }

    fn display_prompt(call_id: &str, tool_name: &str) {
        let rule = "───────────────────────────────────────────────".yellow();
        eprintln!();
        eprintln!("{}", rule);
        eprintln!(
            "  {} {} ({})",
            "Permission required:".yellow().bold(),
            tool_name.bold(),
            call_id.dimmed()
        );
        eprintln!("{}", rule);
    }

    /// Blocking read of one line; `None` on end of input.
    fn read_line() -> Result<Option<String>, PermissionHandlerError> {
        eprint!("{} ", "Allow this call? [y/N]".magenta().bold());
        io::stderr().flush().map_err(|e| {
            PermissionHandlerError::IoError(format!("Failed to flush stderr: {}", e))
        })?;

        let mut input = String::new();
        let read = io::stdin()
            .lock()
            .read_line(&mut input)
            .map_err(|e| PermissionHandlerError::IoError(format!("Failed to read input: {}", e)))?;
        Ok((read > 0).then_some(input))
    }

    fn ask_blocking(call_id: &str, tool_name: &str) -> Result<bool, PermissionHandlerError> {
        Self::display_prompt(call_id, tool_name);
        loop {
            let Some(input) = Self::read_line()? else {
                eprintln!();
                return Err(PermissionHandlerError::Cancelled);
            };
            match parse_answer(&input) {
                Answer::Allow => {
                    eprintln!("{}", "✓ Approved".green());
                    return Ok(true);
                }
                Answer::Deny => {
                    eprintln!("{}", "✗ Denied".red());
                    return Ok(false);
                }
                Answer::Unrecognized => {
                    eprintln!("Please answer {} or {}.", "y".green(), "n".red());
                }
            }
        }
    }
}

impl Default for InteractivePermissionPrompt {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PermissionHandler for InteractivePermissionPrompt {
    async fn request_permission(
        &self,
        call_id: &str,
        tool_name: &str,
    ) -> Result<bool, PermissionHandlerError> {
        let _terminal = self.terminal.lock().await;
        let call_id = call_id.to_string();
        let tool_name = tool_name.to_string();
        tokio::task::spawn_blocking(move || Self::ask_blocking(&call_id, &tool_name))
            .await
            .map_err(|e| PermissionHandlerError::IoError(format!("prompt task failed: {}", e)))?
    }
}
