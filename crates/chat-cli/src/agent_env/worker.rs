use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;
use serde::{Serialize, Deserialize};

use super::context_container::ContextContainer;
use super::model_providers::ModelProvider;
use super::events::WorkerLifecycleState;
use crate::os::Os;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum WorkerStates {
    #[default]
    Inactive,
    Working,
    Requesting,
    Receiving,
    Waiting,
    UsingTool,
    InactiveFailed,
}

#[derive(Serialize, Deserialize)]
pub struct Worker {
    pub id: Uuid,
    pub name: String,
    pub context_container: ContextContainer,
    
    /// Lifecycle state (managed by Session)
    #[serde(skip, default = "default_lifecycle_state")]
    pub lifecycle_state: Arc<Mutex<WorkerLifecycleState>>,
    
    /// Task-specific metadata (managed by Tasks)
    #[serde(skip, default = "default_task_metadata")]
    pub task_metadata: Arc<Mutex<HashMap<String, serde_json::Value>>>,
    
    /// Non-serializable runtime dependencies
    #[serde(skip, default)]
    pub model_provider: Option<Arc<dyn ModelProvider>>,
    
    #[serde(skip, default = "default_os")]
    pub os: Arc<Mutex<Option<Arc<Os>>>>,
    
    /// Legacy state tracking (to be removed)
    #[serde(skip, default = "default_worker_state")]
    pub state: Arc<Mutex<WorkerStates>>,
    #[serde(skip, default)]
    pub last_failure: Arc<Mutex<Option<String>>>,
}

fn default_lifecycle_state() -> Arc<Mutex<WorkerLifecycleState>> {
    Arc::new(Mutex::new(WorkerLifecycleState::Idle))
}

fn default_task_metadata() -> Arc<Mutex<HashMap<String, serde_json::Value>>> {
    Arc::new(Mutex::new(HashMap::new()))
}

fn default_worker_state() -> Arc<Mutex<WorkerStates>> {
    Arc::new(Mutex::new(WorkerStates::Inactive))
}

fn default_os() -> Arc<Mutex<Option<Arc<Os>>>> {
    Arc::new(Mutex::new(None))
}

impl Worker {
    pub fn new(name: String, model_provider: Arc<dyn ModelProvider>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            context_container: ContextContainer::new(),
            lifecycle_state: Arc::new(Mutex::new(WorkerLifecycleState::Idle)),
            task_metadata: Arc::new(Mutex::new(HashMap::new())),
            model_provider: Some(model_provider),
            os: Arc::new(Mutex::new(None)),
            state: Arc::new(Mutex::new(WorkerStates::Inactive)),
            last_failure: Arc::new(Mutex::new(None)),
        }
    }
    
    pub fn set_os(&self, os: Arc<Os>) {
        *self.os.lock().unwrap() = Some(os);
    }
    
    pub fn get_os(&self) -> Option<Arc<Os>> {
        self.os.lock().unwrap().clone()
    }

    pub fn set_state(&self, new_state: WorkerStates) {
        let mut state = self.state.lock().unwrap();
        *state = new_state;
    }

    pub fn get_state(&self) -> WorkerStates {
        *self.state.lock().unwrap()
    }

    pub fn set_failure(&self, error: String) {
        let mut failure = self.last_failure.lock().unwrap();
        *failure = Some(error);
    }

    pub fn get_failure(&self) -> Option<String> {
        self.last_failure.lock().unwrap().clone()
    }
    
    /// Set task-specific metadata
    pub fn set_task_metadata(&self, key: &str, value: serde_json::Value) {
        self.task_metadata.lock().unwrap().insert(key.to_string(), value);
    }
    
    /// Get task-specific metadata
    pub fn get_task_metadata(&self, key: &str) -> Option<serde_json::Value> {
        self.task_metadata.lock().unwrap().get(key).cloned()
    }
    
    /// Get task metadata as string
    pub fn get_task_metadata_string(&self, key: &str) -> Option<String> {
        self.task_metadata
            .lock()
            .unwrap()
            .get(key)
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
    }
}

/// Namespaced metadata keys to avoid conflicts
pub mod task_metadata_keys {
    pub const AGENT_LOOP_COMPLETION_STATE: &str = "agent_loop.completion_state";
    pub const AGENT_LOOP_LAST_TOOL: &str = "agent_loop.last_tool";
    pub const COMPACT_LAST_RUN: &str = "compact.last_run_timestamp";
}
