//! Built-in research toolkit.
//!
//! Wires every catalog definition to its handler. Legacy single-verb tools
//! share the handler instance of the unified tool they map to.

use super::catalog::{self, ALIASES, LEGACY_TOOLS};
use super::dispatch::{ToolHandler, ToolKit};
use crate::handlers::academic::AcademicHandler;
use crate::handlers::collection::CollectionHandler;
use crate::handlers::context::ContextHandler;
use crate::handlers::items::{DeleteCollectionHandler, DeleteItemHandler, MoveItemHandler};
use crate::handlers::legacy::LegacyActionHandler;
use crate::handlers::library::{GetItemHandler, SearchLibraryHandler};
use crate::handlers::note::NoteHandler;
use crate::handlers::pdf::{self, ReadPdfHandler};
use crate::handlers::web::WebHandler;
use crate::ports::conversation_context::ConversationContextPort;
use crate::ports::knowledge_base::KnowledgeBasePort;
use crate::ports::ocr::OcrPort;
use crate::ports::scholar::ScholarPort;
use crate::ports::web::WebPort;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Backend adapters the handlers run against
#[derive(Clone)]
pub struct ResearchBackends {
    pub knowledge_base: Arc<dyn KnowledgeBasePort>,
    pub context: Arc<dyn ConversationContextPort>,
    pub web: Arc<dyn WebPort>,
    pub scholar: Arc<dyn ScholarPort>,
    pub ocr: Arc<dyn OcrPort>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandlerSettings {
    pub ocr_poll_interval: Duration,
    pub ocr_timeout: Duration,
}

impl Default for HandlerSettings {
    fn default() -> Self {
        Self {
            ocr_poll_interval: pdf::DEFAULT_POLL_INTERVAL,
            ocr_timeout: pdf::DEFAULT_TIMEOUT,
        }
    }
}

/// Build the full toolkit: current tools, legacy tools and aliases.
pub fn research_toolkit(backends: &ResearchBackends, settings: HandlerSettings) -> ToolKit {
    let kb = &backends.knowledge_base;

    let mut handlers: HashMap<&str, Arc<dyn ToolHandler>> = HashMap::new();
    handlers.insert("search_library", Arc::new(SearchLibraryHandler::new(kb.clone())));
    handlers.insert("get_item", Arc::new(GetItemHandler::new(kb.clone())));
    handlers.insert(
        "read_pdf",
        Arc::new(
            ReadPdfHandler::new(kb.clone(), backends.ocr.clone())
                .with_poll_interval(settings.ocr_poll_interval)
                .with_timeout(settings.ocr_timeout),
        ),
    );
    handlers.insert("web", Arc::new(WebHandler::new(backends.web.clone())));
    handlers.insert("academic", Arc::new(AcademicHandler::new(backends.scholar.clone())));
    handlers.insert("collection", Arc::new(CollectionHandler::new(kb.clone())));
    handlers.insert("note", Arc::new(NoteHandler::new(kb.clone())));
    handlers.insert(
        "context",
        Arc::new(ContextHandler::new(kb.clone(), backends.context.clone())),
    );
    handlers.insert("move_item", Arc::new(MoveItemHandler::new(kb.clone())));
    handlers.insert("delete_item", Arc::new(DeleteItemHandler::new(kb.clone())));
    handlers.insert("delete_collection", Arc::new(DeleteCollectionHandler::new(kb.clone())));

    let definitions = catalog::current_definitions();
    let mut kit = ToolKit::new();
    for definition in &definitions {
        match handlers.get(definition.name.as_str()) {
            Some(handler) => kit = kit.register(definition.clone(), handler.clone()),
            None => warn!("No handler for tool {}, leaving it out", definition.name),
        }
    }

    for (name, unified, action) in LEGACY_TOOLS {
        let legacy = definitions
            .iter()
            .find(|d| d.name == *unified)
            .and_then(|d| catalog::legacy(name, d, action));
        match (legacy, handlers.get(unified)) {
            (Some(definition), Some(target)) => {
                let handler = Arc::new(LegacyActionHandler::new(*action, target.clone()));
                kit = kit.register(definition, handler);
            }
            _ => warn!("Cannot route legacy tool {} to {}({})", name, unified, action),
        }
    }

    ALIASES
        .iter()
        .fold(kit, |kit, (alias, canonical)| kit.alias(*alias, *canonical))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::testing::backends;

    #[test]
    fn test_every_catalog_tool_has_a_handler() {
        let (spec, table) = research_toolkit(&backends(), HandlerSettings::default()).into_parts();
        let catalog = catalog::default_tool_spec();
        assert_eq!(spec.len(), catalog.len());
        for def in catalog.all() {
            assert!(table.contains(&def.name), "missing handler for {}", def.name);
        }
        assert_eq!(spec.resolve("notes"), Some("note"));
    }

    #[test]
    fn test_legacy_keeps_unified_sensitivity() {
        let (spec, _) = research_toolkit(&backends(), HandlerSettings::default()).into_parts();
        for (name, unified, _) in LEGACY_TOOLS {
            assert_eq!(spec.sensitivity(name), spec.sensitivity(unified));
            assert!(spec.get(name).unwrap().is_deprecated());
        }
    }
}
