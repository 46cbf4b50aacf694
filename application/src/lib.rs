//! Application layer for scholar-agent
//!
//! This crate contains the tool pipeline (parse, validate, authorize,
//! dispatch, format), the research tool handlers, port definitions and
//! application configuration. It depends only on the domain layer.

pub mod config;
pub mod handlers;
pub mod ports;
pub mod tools;
pub mod use_cases;

// Re-export commonly used types
pub use config::{AgentConfig, PermissionRule, PermissionRules};
pub use ports::{
    backend::BackendError,
    conversation_context::ConversationContextPort,
    knowledge_base::{ItemQuery, KnowledgeBasePort},
    ocr::OcrPort,
    permission_handler::{
        AutoApprovePermission, AutoDenyPermission, PermissionHandler, PermissionHandlerError,
    },
    scholar::{PaperQuery, ScholarPort},
    tool_event_logger::{NoToolEventLogger, ToolEvent, ToolEventLogger},
    tool_executor::ToolExecutorPort,
    tool_schema::ToolSchemaPort,
    web::{DisabledWeb, WebPort},
};
pub use tools::dispatch::{HandlerContext, HandlerTable, ToolHandler, ToolKit};
pub use tools::formatter::{format_result, format_result_string, format_results};
pub use tools::permission::{PermissionDecision, PermissionGate};
pub use tools::toolkit::{HandlerSettings, ResearchBackends, research_toolkit};
pub use use_cases::execute_tools::ExecuteToolsUseCase;
pub use use_cases::turn_runner::{TurnError, TurnReport, TurnRunner};
