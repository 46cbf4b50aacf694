//! Tool domain value objects: immutable result and error types
//!
//! These types form the **output side** of the tool pipeline. Every call,
//! whatever stage it fails at, produces exactly one [`ToolResult`].
//!
//! Error kinds in [`ToolError`] tell the conversation loop whether a retry
//! can help:
//!
//! | Kind | Code | Retryable? | Raised by |
//! |------|------|-----------|-----------|
//! | `Envelope` | `ENVELOPE_ERROR` | Yes (re-emit) | argument text is not a JSON object |
//! | `Validation` | `INVALID_ARGUMENT` | Yes (fix args) | schema violations |
//! | `Permission` | `PERMISSION_DENIED` | No | permission gate |
//! | `NotFound` | `NOT_FOUND` | Yes | unknown tool / missing entity |
//! | `Handler` | `EXECUTION_FAILED` | Loop decides | domain failure in a handler |
//! | `Fault` | `EXECUTION_FAULTED` | Loop decides | handler panicked |

use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolErrorKind {
    Envelope,
    Validation,
    Permission,
    NotFound,
    Handler,
    Fault,
}

impl ToolErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            ToolErrorKind::Envelope => "ENVELOPE_ERROR",
            ToolErrorKind::Validation => "INVALID_ARGUMENT",
            ToolErrorKind::Permission => "PERMISSION_DENIED",
            ToolErrorKind::NotFound => "NOT_FOUND",
            ToolErrorKind::Handler => "EXECUTION_FAILED",
            ToolErrorKind::Fault => "EXECUTION_FAULTED",
        }
    }

    /// Whether reissuing the call with different input may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ToolErrorKind::Envelope | ToolErrorKind::Validation | ToolErrorKind::NotFound
        )
    }
}

/// Error attached to a failed [`ToolResult`].
///
/// `Display` renders only the message, which is what the model sees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolError {
    pub kind: ToolErrorKind,
    pub message: String,
}

impl ToolError {
    pub fn new(kind: ToolErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn envelope(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::Envelope, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::Validation, message)
    }

    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::Permission, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::NotFound, message)
    }

    pub fn handler(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::Handler, message)
    }

    pub fn fault(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::Fault, message)
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ToolError {}

/// Universal outcome of one tool call.
///
/// `success` is the single source of truth: an error is present exactly
/// when the call failed. The fields are private so that invariant cannot be
/// broken by a handler.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolResult {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ToolError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<String>,
}

impl ToolResult {
    /// Create a successful result carrying `data`
    pub fn success(data: impl Into<Value>) -> Self {
        Self {
            success: true,
            data: Some(data.into()),
            error: None,
            summary: None,
        }
    }

    /// Create a successful result with no payload
    pub fn done() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
            summary: None,
        }
    }

    /// Create a failed result
    pub fn failure(error: ToolError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            summary: None,
        }
    }

    /// Attach a one-line human summary (allowed on failures for display)
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Payload; always `None` on failure.
    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&ToolError> {
        self.error.as_ref()
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn error_kind(&self) -> Option<ToolErrorKind> {
        self.error.as_ref().map(|e| e.kind)
    }
}

impl From<ToolError> for ToolResult {
    fn from(error: ToolError) -> Self {
        ToolResult::failure(error)
    }
}
