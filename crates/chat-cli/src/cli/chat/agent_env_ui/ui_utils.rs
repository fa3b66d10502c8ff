/// Shared utilities for UI implementations
///
/// This module provides common functionality used by different UI implementations,
/// such as token usage calculation and context information formatting.

use crate::agent_env::{Worker, WorkerLifecycleState};
use crate::agent_env::context_container::ConversationEntry;

/// Token usage statistics for a worker
#[derive(Debug, Clone)]
pub struct TokenUsage {
    pub input_tokens: usize,
    pub output_tokens: usize,
    pub total_tokens: usize,
}

/// Estimate token count for text
///
/// Simple estimation: approximately 4 characters per token
fn estimate_tokens(text: &str) -> usize {
    text.len() / 4
}

/// Calculate token usage for a worker
///
/// Iterates through the conversation history and estimates token counts
/// for input (user) and output (assistant) messages.
pub fn calculate_token_usage(worker: &Worker) -> TokenUsage {
    let history = worker.context_container
        .conversation_history
        .lock()
        .unwrap();
    
    let mut input_tokens = 0;
    let mut output_tokens = 0;
    
    for entry in history.get_entries() {
        // Count user message tokens if present
        if let Some(user_msg) = &entry.user {
            if let Some(prompt) = user_msg.prompt() {
                input_tokens += estimate_tokens(prompt);
            }
        }
        
        // Count assistant message tokens if present
        if let Some(asst_msg) = &entry.assistant {
            output_tokens += estimate_tokens(asst_msg.content());
        }
    }
    
    TokenUsage {
        input_tokens,
        output_tokens,
        total_tokens: input_tokens + output_tokens,
    }
}

/// Format context information for display
///
/// Returns a formatted string with worker name, message count, and lifecycle state.
pub fn format_context_info(worker: &Worker) -> String {
    let history = worker.context_container
        .conversation_history
        .lock()
        .unwrap();
    
    let lifecycle_state = worker.lifecycle_state.lock().unwrap();
    
    format!(
        "Worker: {}\nMessages: {}\nState: {:?}",
        worker.name,
        history.len(),
        *lifecycle_state
    )
}
