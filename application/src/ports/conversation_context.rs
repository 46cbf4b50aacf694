//! Conversation context port.
//!
//! The set of library items pinned into the model's working context.

use super::backend::BackendError;
use async_trait::async_trait;

#[async_trait]
pub trait ConversationContextPort: Send + Sync {
    /// Pin an item. Returns `false` when it was already pinned.
    async fn add(&self, item_id: &str) -> Result<bool, BackendError>;

    /// Unpin an item. Returns `false` when it was not pinned.
    async fn remove(&self, item_id: &str) -> Result<bool, BackendError>;

    async fn list(&self) -> Result<Vec<String>, BackendError>;
}
