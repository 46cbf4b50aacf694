//! Shared error type for backend ports.
//!
//! Every adapter behind [`KnowledgeBasePort`](super::knowledge_base::KnowledgeBasePort),
//! [`WebPort`](super::web::WebPort), [`ScholarPort`](super::scholar::ScholarPort)
//! and [`OcrPort`](super::ocr::OcrPort) reports failures with [`BackendError`].
//! Handlers turn these into failed `ToolResult`s; messages are written to be
//! read by the model.

use scholar_domain::ToolError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The referenced entity does not exist
    #[error("{entity} '{id}' not found")]
    NotFound { entity: &'static str, id: String },

    /// The request conflicts with current state
    #[error("{0}")]
    Conflict(String),

    /// The request is well-formed but cannot be honoured
    #[error("{0}")]
    Rejected(String),

    /// The backend could not be reached or answered unexpectedly
    #[error("{service} unavailable: {message}")]
    Unavailable {
        service: &'static str,
        message: String,
    },
}

impl BackendError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        BackendError::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn unavailable(service: &'static str, message: impl Into<String>) -> Self {
        BackendError::Unavailable {
            service,
            message: message.into(),
        }
    }
}

impl From<BackendError> for ToolError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::NotFound { .. } => ToolError::not_found(err.to_string()),
            _ => ToolError::handler(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scholar_domain::ToolErrorKind;

    #[test]
    fn test_not_found_message() {
        let err = BackendError::not_found("collection", "C9");
        assert_eq!(err.to_string(), "collection 'C9' not found");
        let tool_error: ToolError = err.into();
        assert_eq!(tool_error.kind, ToolErrorKind::NotFound);
    }

    #[test]
    fn test_other_errors_are_handler_failures() {
        let tool_error: ToolError = BackendError::Rejected("nope".to_string()).into();
        assert_eq!(tool_error.kind, ToolErrorKind::Handler);
        assert_eq!(tool_error.message, "nope");

        let err = BackendError::unavailable("semantic scholar", "HTTP 503");
        assert_eq!(err.to_string(), "semantic scholar unavailable: HTTP 503");
    }
}
