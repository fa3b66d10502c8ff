mod conversation_entry;
mod conversation_history;
mod context_container;

pub use conversation_entry::ConversationEntry;
pub use conversation_history::ConversationHistory;
pub use context_container::ContextContainer;
