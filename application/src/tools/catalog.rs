//! Built-in tool catalog.
//!
//! Definitions here are the single description of each tool: the JSON
//! Schema advertised to the model and the validator both derive from them.
//!
//! | Tool | Level | Shape |
//! |------|-------|-------|
//! | `search_library` | read | object |
//! | `get_item` | read | object |
//! | `read_pdf` | read | object |
//! | `web` | read | search / fetch |
//! | `academic` | read | search / paper / citations |
//! | `collection` | write | find / create / list / add_item / remove_item |
//! | `note` | write | create / read / edit |
//! | `context` | write | add / remove / list |
//! | `move_item` | write | object |
//! | `delete_item` | destructive | object |
//! | `delete_collection` | destructive | object |
//!
//! Deprecated single-verb tools reuse the schema of the action they map to.

use scholar_domain::tool::{
    ActionVariant, ObjectSchema, ParamKind, ParameterSchema, Refinement, SensitivityLevel,
    ToolDefinition, ToolParameter, ToolSpec,
};
use scholar_domain::{CitationDirection, ItemType, NoteEditMode};

/// Most item ids a single batch sub-action accepts
pub const MAX_BATCH_ITEMS: usize = 100;

/// Publication year bound, in either direction
pub const MAX_YEAR: i64 = 9999;

/// Highest page number `read_pdf` accepts
pub const MAX_PDF_PAGE: i64 = 100_000;

/// Deprecated tool → (consolidated tool, action)
pub const LEGACY_TOOLS: &[(&str, &str, &str)] = &[
    ("find_collection", "collection", "find"),
    ("create_collection", "collection", "create"),
    ("list_collections", "collection", "list"),
    ("add_to_collection", "collection", "add_item"),
    ("remove_from_collection", "collection", "remove_item"),
    ("create_note", "note", "create"),
    ("read_note", "note", "read"),
    ("edit_note", "note", "edit"),
    ("add_to_context", "context", "add"),
    ("remove_from_context", "context", "remove"),
    ("web_search", "web", "search"),
    ("web_fetch", "web", "fetch"),
    ("search_papers", "academic", "search"),
    ("get_citations", "academic", "citations"),
];

/// Names models commonly invent for the consolidated tools
pub const ALIASES: &[(&str, &str)] = &[
    ("search", "search_library"),
    ("notes", "note"),
    ("collections", "collection"),
    ("scholar", "academic"),
    ("papers", "academic"),
    ("fetch", "web_fetch"),
];

fn id_param(name: &str, description: &str) -> ToolParameter {
    ToolParameter::required(name, description, ParamKind::non_empty_string())
}

fn item_ids_param(max: Option<usize>) -> ToolParameter {
    ToolParameter::required(
        "item_ids",
        "Library item ids",
        ParamKind::array_of(ParamKind::non_empty_string(), Some(1), max),
    )
}

// ==================== Read ====================

pub fn search_library() -> ToolDefinition {
    ToolDefinition::new(
        "search_library",
        "Search the user's reference library by title, author, abstract or tag.",
        SensitivityLevel::Read,
    )
    .with_parameter(ToolParameter::required(
        "query",
        "Search text",
        ParamKind::non_empty_string(),
    ))
    .with_parameter(
        ToolParameter::optional("limit", "Maximum results", ParamKind::integer_range(1, 50))
            .with_default(10),
    )
    .with_parameter(ToolParameter::optional(
        "item_type",
        "Restrict to one item type",
        ParamKind::one_of(&ItemType::names()),
    ))
    .with_parameter(ToolParameter::optional(
        "tag",
        "Restrict to items carrying this tag",
        ParamKind::non_empty_string(),
    ))
}

pub fn get_item() -> ToolDefinition {
    ToolDefinition::new(
        "get_item",
        "Get the full metadata of one library item.",
        SensitivityLevel::Read,
    )
    .with_parameter(id_param("item_id", "Library item id"))
}

pub fn read_pdf() -> ToolDefinition {
    ToolDefinition::new(
        "read_pdf",
        "Extract the text of an item's PDF attachment, optionally limited to a page range.",
        SensitivityLevel::Read,
    )
    .with_parameter(id_param("item_id", "Library item id"))
    .with_parameter(ToolParameter::optional(
        "start_page",
        "First page (1-based)",
        ParamKind::integer_range(1, MAX_PDF_PAGE),
    ))
    .with_parameter(ToolParameter::optional(
        "end_page",
        "Last page (inclusive)",
        ParamKind::integer_range(1, MAX_PDF_PAGE),
    ))
    .with_refinement(Refinement::not_after("start_page", "end_page"))
}

pub fn web() -> ToolDefinition {
    ToolDefinition::new(
        "web",
        "Search the web or fetch a page as text.",
        SensitivityLevel::Read,
    )
    .with_action(ActionVariant::new(
        "search",
        "Web search",
        ObjectSchema::new()
            .with_parameter(ToolParameter::required(
                "query",
                "Search text",
                ParamKind::non_empty_string(),
            ))
            .with_parameter(
                ToolParameter::optional("limit", "Maximum results", ParamKind::integer_range(1, 20))
                    .with_default(5),
            ),
    ))
    .with_action(ActionVariant::new(
        "fetch",
        "Fetch one page",
        ObjectSchema::new().with_parameter(ToolParameter::required(
            "url",
            "Absolute http(s) URL",
            ParamKind::Url,
        )),
    ))
}

pub fn academic() -> ToolDefinition {
    ToolDefinition::new(
        "academic",
        "Search the academic literature index and walk the citation graph.",
        SensitivityLevel::Read,
    )
    .with_action(ActionVariant::new(
        "search",
        "Search papers",
        ObjectSchema::new()
            .with_parameter(ToolParameter::required(
                "query",
                "Search text",
                ParamKind::non_empty_string(),
            ))
            .with_parameter(
                ToolParameter::optional("limit", "Maximum results", ParamKind::integer_range(1, 50))
                    .with_default(10),
            )
            .with_parameter(ToolParameter::optional(
                "year_from",
                "Earliest publication year",
                ParamKind::integer_range(-MAX_YEAR, MAX_YEAR),
            ))
            .with_parameter(ToolParameter::optional(
                "year_to",
                "Latest publication year",
                ParamKind::integer_range(-MAX_YEAR, MAX_YEAR),
            ))
            .with_refinement(Refinement::not_after("year_from", "year_to")),
    ))
    .with_action(ActionVariant::new(
        "paper",
        "Get one paper",
        ObjectSchema::new().with_parameter(id_param("paper_id", "Paper id or DOI")),
    ))
    .with_action(ActionVariant::new(
        "citations",
        "List citing or referenced papers",
        ObjectSchema::new()
            .with_parameter(id_param("paper_id", "Paper id or DOI"))
            .with_parameter(
                ToolParameter::optional(
                    "direction",
                    "citing: papers that cite this one; references: papers it cites",
                    ParamKind::one_of(&CitationDirection::NAMES),
                )
                .with_default("citing"),
            )
            .with_parameter(
                ToolParameter::optional("limit", "Maximum results", ParamKind::integer_range(1, 100))
                    .with_default(20),
            ),
    ))
}

// ==================== Write ====================

pub fn collection() -> ToolDefinition {
    ToolDefinition::new(
        "collection",
        "Find, create and list collections, and manage their members.",
        SensitivityLevel::Write,
    )
    .with_action(ActionVariant::new(
        "find",
        "Find collections by name",
        ObjectSchema::new().with_parameter(ToolParameter::required(
            "name",
            "Collection name (substring match)",
            ParamKind::non_empty_string(),
        )),
    ))
    .with_action(ActionVariant::new(
        "create",
        "Create a collection",
        ObjectSchema::new()
            .with_parameter(ToolParameter::required(
                "name",
                "Collection name",
                ParamKind::non_empty_string(),
            ))
            .with_parameter(ToolParameter::optional(
                "parent_collection_id",
                "Parent collection id",
                ParamKind::non_empty_string(),
            )),
    ))
    .with_action(ActionVariant::new(
        "list",
        "List collections",
        ObjectSchema::new().with_parameter(ToolParameter::optional(
            "parent_collection_id",
            "Only list children of this collection",
            ParamKind::non_empty_string(),
        )),
    ))
    .with_action(ActionVariant::new(
        "add_item",
        "Add items to a collection",
        ObjectSchema::new()
            .with_parameter(id_param("collection_id", "Collection id"))
            .with_parameter(item_ids_param(Some(MAX_BATCH_ITEMS))),
    ))
    .with_action(ActionVariant::new(
        "remove_item",
        "Remove items from a collection",
        ObjectSchema::new()
            .with_parameter(id_param("collection_id", "Collection id"))
            .with_parameter(item_ids_param(Some(MAX_BATCH_ITEMS))),
    ))
}

pub fn note() -> ToolDefinition {
    ToolDefinition::new(
        "note",
        "Create, read and edit notes attached to items or collections.",
        SensitivityLevel::Write,
    )
    .with_action(ActionVariant::new(
        "create",
        "Create a note",
        ObjectSchema::new()
            .with_parameter(ToolParameter::required(
                "content",
                "Note body",
                ParamKind::non_empty_string(),
            ))
            .with_parameter(ToolParameter::optional("title", "Note title", ParamKind::string()))
            .with_parameter(ToolParameter::optional(
                "parent_item_id",
                "Item to attach the note to",
                ParamKind::non_empty_string(),
            ))
            .with_parameter(ToolParameter::optional(
                "collection_id",
                "Collection to file the note in",
                ParamKind::non_empty_string(),
            ))
            .with_parameter(ToolParameter::optional(
                "tags",
                "Tags",
                ParamKind::array_of(ParamKind::non_empty_string(), None, None),
            ))
            .with_refinement(Refinement::at_least_one_of(&["parent_item_id", "collection_id"])),
    ))
    .with_action(ActionVariant::new(
        "read",
        "Read a note",
        ObjectSchema::new().with_parameter(id_param("note_id", "Note id")),
    ))
    .with_action(ActionVariant::new(
        "edit",
        "Edit a note",
        ObjectSchema::new()
            .with_parameter(id_param("note_id", "Note id"))
            .with_parameter(ToolParameter::required(
                "content",
                "New content",
                ParamKind::non_empty_string(),
            ))
            .with_parameter(
                ToolParameter::optional(
                    "mode",
                    "How the content combines with the existing body",
                    ParamKind::one_of(&NoteEditMode::NAMES),
                )
                .with_default("replace"),
            ),
    ))
}

pub fn context() -> ToolDefinition {
    ToolDefinition::new(
        "context",
        "Manage which library items are pinned into the conversation context.",
        SensitivityLevel::Write,
    )
    .with_action(ActionVariant::new(
        "add",
        "Pin items",
        ObjectSchema::new().with_parameter(item_ids_param(None)),
    ))
    .with_action(ActionVariant::new(
        "remove",
        "Unpin items",
        ObjectSchema::new().with_parameter(item_ids_param(None)),
    ))
    .with_action(ActionVariant::new("list", "List pinned items", ObjectSchema::new()))
}

pub fn move_item() -> ToolDefinition {
    ToolDefinition::new(
        "move_item",
        "Move an item into another collection of the same library.",
        SensitivityLevel::Write,
    )
    .with_parameter(id_param("item_id", "Library item id"))
    .with_parameter(id_param("target_collection_id", "Destination collection id"))
    .with_parameter(ToolParameter::optional(
        "source_collection_id",
        "Collection to remove the item from",
        ParamKind::non_empty_string(),
    ))
}

// ==================== Destructive ====================

pub fn delete_item() -> ToolDefinition {
    ToolDefinition::new(
        "delete_item",
        "Permanently delete a library item.",
        SensitivityLevel::Destructive,
    )
    .with_parameter(id_param("item_id", "Library item id"))
}

pub fn delete_collection() -> ToolDefinition {
    ToolDefinition::new(
        "delete_collection",
        "Delete a collection, optionally deleting its items too.",
        SensitivityLevel::Destructive,
    )
    .with_parameter(id_param("collection_id", "Collection id"))
    .with_parameter(
        ToolParameter::optional(
            "delete_items",
            "Also delete every member item",
            ParamKind::Boolean,
        )
        .with_default(false),
    )
}

// ==================== Legacy ====================

/// Definition of a deprecated single-verb tool, derived from the variant
/// it maps to. Returns `None` if `unified` has no such action.
pub fn legacy(name: &str, unified: &ToolDefinition, action: &str) -> Option<ToolDefinition> {
    let variant = unified.schema.variant(action)?;
    Some(
        ToolDefinition::new(
            name,
            format!(
                "Deprecated: use {}(action={}). {}.",
                unified.name, action, variant.description
            ),
            unified.sensitivity,
        )
        .with_schema(ParameterSchema::Object(variant.schema.clone()))
        .deprecated_for(format!("{}(action={})", unified.name, action)),
    )
}

/// Every consolidated and standalone definition.
pub fn current_definitions() -> Vec<ToolDefinition> {
    vec![
        search_library(),
        get_item(),
        read_pdf(),
        web(),
        academic(),
        collection(),
        note(),
        context(),
        move_item(),
        delete_item(),
        delete_collection(),
    ]
}

/// Current definitions plus the deprecated single-verb tools.
pub fn all_definitions() -> Vec<ToolDefinition> {
    let current = current_definitions();
    let legacy: Vec<ToolDefinition> = LEGACY_TOOLS
        .iter()
        .filter_map(|(name, unified, action)| {
            current
                .iter()
                .find(|d| d.name == *unified)
                .and_then(|d| legacy(name, d, action))
        })
        .collect();
    current.into_iter().chain(legacy).collect()
}

/// Catalog of every built-in tool and alias, without handlers.
pub fn default_tool_spec() -> ToolSpec {
    all_definitions()
        .into_iter()
        .fold(ToolSpec::new(), |spec, def| spec.register(def))
        .register_aliases(ALIASES.iter().copied())
}
