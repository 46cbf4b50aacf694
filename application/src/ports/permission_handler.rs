//! Permission handler port for approving destructive tool calls.
//!
//! This module defines the port (interface) for asking a human whether a
//! destructive tool call may run when its policy resolves to `ask`.
//!
//! # Architecture
//!
//! Following the Ports and Adapters pattern:
//! - **Port**: [`PermissionHandler`] - defined here in application layer
//! - **Adapter**: `InteractivePermissionPrompt` - implemented in presentation layer
//!
//! # Flow
//!
//! ```text
//! delete_item (destructive)
//!        ↓
//! policy resolves to "ask"
//!        ↓
//! PermissionHandler::request_permission(call_id, tool_name)
//!        ↓
//! true → run handler    false / error → PERMISSION_DENIED
//! ```
//!
//! While one call waits here, other calls in the same batch keep running.
//!
//! # Built-in Implementations
//!
//! - [`AutoDenyPermission`] - Always returns `false`
//! - [`AutoApprovePermission`] - Always returns `true`

use async_trait::async_trait;
use thiserror::Error;

/// Error type for permission requests.
///
/// These errors represent failures of the approval channel, not a "no"
/// from the user. The gate treats both the same way: the call is denied.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PermissionHandlerError {
    /// User cancelled the prompt (e.g., via Ctrl+C or EOF).
    #[error("Permission request cancelled")]
    Cancelled,
    /// Input/output error (e.g., terminal read failure).
    #[error("I/O error: {0}")]
    IoError(String),
}

/// Port for asking a human to approve one destructive call.
///
/// # Implementations
///
/// - **Interactive (CLI)**: `InteractivePermissionPrompt` in presentation layer
/// - **Auto-deny**: [`AutoDenyPermission`]
/// - **Auto-approve**: [`AutoApprovePermission`]
#[async_trait]
pub trait PermissionHandler: Send + Sync {
    /// Returns `Ok(true)` to allow the call, `Ok(false)` to deny it.
    async fn request_permission(
        &self,
        call_id: &str,
        tool_name: &str,
    ) -> Result<bool, PermissionHandlerError>;
}

/// Denies every request.
///
/// This is the safest non-interactive mode.
pub struct AutoDenyPermission;

#[async_trait]
impl PermissionHandler for AutoDenyPermission {
    async fn request_permission(
        &self,
        _call_id: &str,
        _tool_name: &str,
    ) -> Result<bool, PermissionHandlerError> {
        Ok(false)
    }
}

/// Approves every request.
///
/// # Warning
///
/// **Use with caution!** Destructive tools will delete library data without
/// asking. Only use against disposable libraries or in tests.
pub struct AutoApprovePermission;

#[async_trait]
impl PermissionHandler for AutoApprovePermission {
    async fn request_permission(
        &self,
        _call_id: &str,
        _tool_name: &str,
    ) -> Result<bool, PermissionHandlerError> {
        Ok(true)
    }
}
