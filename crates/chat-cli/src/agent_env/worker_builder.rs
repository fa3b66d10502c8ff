use std::sync::Arc;
use std::borrow::Borrow;
use eyre::Result;

use super::{Session, Worker};
use crate::cli::Agent;
use crate::cli::chat::Platform;
use crate::os::Os;

pub struct WorkerBuilder {
    agent_name: Option<String>,
    platform: Platform,
    model: Option<String>,
    initial_input: Option<String>,
}

impl WorkerBuilder {
    pub fn new() -> Self {
        Self {
            agent_name: None,
            platform: Platform::default(),
            model: None,
            initial_input: None,
        }
    }
    
    pub fn agent(mut self, agent_name: Option<String>) -> Self {
        self.agent_name = agent_name;
        self
    }
    
    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }
    
    pub fn model(mut self, model: Option<String>) -> Self {
        self.model = model;
        self
    }
    
    pub fn initial_input(mut self, input: Option<String>) -> Self {
        self.initial_input = input;
        self
    }
    
    pub async fn build(
        self,
        session: Arc<Session>,
        os: &Os,
    ) -> Result<Arc<Worker>> {
        // 1. Load agent config or use default
        let agent = if let Some(agent_name) = &self.agent_name {
            let (agent, _path) = Agent::get_agent_by_name(os, agent_name).await?;
            agent
        } else {
            Agent::default()
        };
        
        // 2. Extract resource references (file:// URLs)
        let resource_refs: Vec<String> = agent.resources
            .iter()
            .map(|r| {
                let s: &str = r.borrow();
                s.to_string()
            })
            .filter(|r| r.starts_with("file://"))
            .collect();
        
        // 3. Create worker through Session (maintains event publishing)
        let worker = session.build_worker("main".to_string());
        
        // 4. Set Os in worker for resource loading
        worker.set_os(Arc::new(os.clone()));
        
        // 5. Populate context container with references only
        if let Some(prompt) = &agent.prompt {
            worker.context_container.set_agent_prompt(prompt.clone());
        }
        
        if !resource_refs.is_empty() {
            worker.context_container.set_resource_references(resource_refs);
        }
        
        // 6. Add initial input if provided
        if let Some(input) = &self.initial_input {
            worker.context_container
                .conversation_history
                .lock()
                .unwrap()
                .push_input_message(input.clone());
        }
        
        Ok(worker)
    }
}
