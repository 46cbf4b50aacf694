use async_trait::async_trait;
use scholar_application::ports::backend::BackendError;
use scholar_application::ports::conversation_context::ConversationContextPort;
use tokio::sync::RwLock;

/// Pinned item ids in the order they were added.
#[derive(Debug, Default)]
pub struct InMemoryConversationContext {
    pinned: RwLock<Vec<String>>,
}

impl InMemoryConversationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut pinned: Vec<String> = Vec::new();
        for item in items {
            let item = item.into();
            if !pinned.contains(&item) {
                pinned.push(item);
            }
        }
        Self {
            pinned: RwLock::new(pinned),
        }
    }
}

#[async_trait]
impl ConversationContextPort for InMemoryConversationContext {
    async fn add(&self, item_id: &str) -> Result<bool, BackendError> {
        let mut pinned = self.pinned.write().await;
        if pinned.iter().any(|id| id == item_id) {
            return Ok(false);
        }
        pinned.push(item_id.to_string());
        Ok(true)
    }

    async fn remove(&self, item_id: &str) -> Result<bool, BackendError> {
        let mut pinned = self.pinned.write().await;
        let before = pinned.len();
        pinned.retain(|id| id != item_id);
        Ok(pinned.len() != before)
    }

    async fn list(&self) -> Result<Vec<String>, BackendError> {
        Ok(self.pinned.read().await.clone())
    }
}
