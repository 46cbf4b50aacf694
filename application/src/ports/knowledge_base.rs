//! Knowledge base port
//!
//! The reference-management backend the research tools operate on: library
//! items, collections and notes. Adapters live in the infrastructure layer.

use super::backend::BackendError;
use async_trait::async_trait;
use scholar_domain::{Collection, ItemType, LibraryItem, Membership, Note, NoteDraft};

/// Filters for a library search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemQuery {
    /// Restrict to one library; `None` searches everything visible
    pub library_id: Option<String>,
    pub text: String,
    pub item_type: Option<ItemType>,
    pub tag: Option<String>,
    pub limit: usize,
}

impl ItemQuery {
    pub fn new(text: impl Into<String>, limit: usize) -> Self {
        Self {
            library_id: None,
            text: text.into(),
            item_type: None,
            tag: None,
            limit,
        }
    }

    pub fn with_library(mut self, library_id: Option<String>) -> Self {
        self.library_id = library_id;
        self
    }

    pub fn with_item_type(mut self, item_type: Option<ItemType>) -> Self {
        self.item_type = item_type;
        self
    }

    pub fn with_tag(mut self, tag: Option<String>) -> Self {
        self.tag = tag;
        self
    }
}

#[async_trait]
pub trait KnowledgeBasePort: Send + Sync {
    async fn search_items(&self, query: &ItemQuery) -> Result<Vec<LibraryItem>, BackendError>;

    async fn get_item(&self, item_id: &str) -> Result<LibraryItem, BackendError>;

    /// Collections whose name contains `name` (case-insensitive)
    async fn find_collections(
        &self,
        library_id: Option<&str>,
        name: &str,
    ) -> Result<Vec<Collection>, BackendError>;

    async fn list_collections(
        &self,
        library_id: Option<&str>,
        parent_id: Option<&str>,
    ) -> Result<Vec<Collection>, BackendError>;

    async fn get_collection(&self, collection_id: &str) -> Result<Collection, BackendError>;

    async fn create_collection(
        &self,
        library_id: Option<&str>,
        name: &str,
        parent_id: Option<&str>,
    ) -> Result<Collection, BackendError>;

    /// Add one item; adding an existing member is not an error.
    async fn add_to_collection(
        &self,
        collection_id: &str,
        item_id: &str,
    ) -> Result<Membership, BackendError>;

    async fn remove_from_collection(
        &self,
        collection_id: &str,
        item_id: &str,
    ) -> Result<(), BackendError>;

    async fn create_note(&self, draft: NoteDraft) -> Result<Note, BackendError>;

    async fn get_note(&self, note_id: &str) -> Result<Note, BackendError>;

    async fn update_note(&self, note_id: &str, content: &str) -> Result<Note, BackendError>;

    /// Move an item into `target_collection_id`, leaving `source_collection_id`
    /// when given. Both collections must share the item's library.
    async fn move_item(
        &self,
        item_id: &str,
        target_collection_id: &str,
        source_collection_id: Option<&str>,
    ) -> Result<(), BackendError>;

    async fn delete_item(&self, item_id: &str) -> Result<(), BackendError>;

    /// Returns the number of member items that were deleted along with it.
    async fn delete_collection(
        &self,
        collection_id: &str,
        delete_items: bool,
    ) -> Result<usize, BackendError>;
}
