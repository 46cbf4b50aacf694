//! Conversation context adapters.

mod memory;

pub use memory::InMemoryConversationContext;
