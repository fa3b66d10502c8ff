use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::agent_env::{
    agent_environment::HeadlessInterface, events::AgentEnvironmentEvent, session::Session,
};

use super::events::WebUIEvent;

/// WebUI component for broadcasting events to WebSocket clients
pub struct WebUI {
    session: Arc<Session>,
    event_tx: broadcast::Sender<WebUIEvent>,
}

impl WebUI {
    /// Create new WebUI
    pub fn new(session: Arc<Session>) -> Self {
        // Large buffer to handle bursts of events
        let (event_tx, _) = broadcast::channel(10000);

        Self { session, event_tx }
    }

    /// Subscribe to WebUI events (for WebSocket handlers)
    pub fn subscribe(&self) -> broadcast::Receiver<WebUIEvent> {
        self.event_tx.subscribe()
    }

    /// Get session reference
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }
}

#[async_trait]
impl HeadlessInterface for WebUI {
    async fn handle_event(&self, event: AgentEnvironmentEvent) {
        // Convert to WebUIEvent
        let web_event = WebUIEvent::from_agent_event(event);

        // Broadcast to all subscribers (WebSocket handlers)
        // Ignore send errors (no subscribers is OK)
        let _ = self.event_tx.send(web_event);
    }
}
