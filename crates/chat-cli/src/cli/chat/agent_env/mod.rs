// Core modules
pub mod worker_job_continuations;
pub mod model_providers;
pub mod worker;
pub mod worker_task;
pub mod worker_job;
pub mod worker_interface;
pub mod session;

// Demo module
pub mod demo;

// Re-exports for convenience
pub use worker_job_continuations::{Continuations, JobState, WorkerJobCompletionType};
pub use model_providers::{
    ModelProvider, ModelRequest, ModelResponse, ModelResponseChunk, ToolRequest,
    BedrockConverseStreamModelProvider,
};
pub use worker::{Worker, WorkerStates};
pub use worker_task::WorkerTask;
pub use worker_job::WorkerJob;
pub use worker_interface::WorkerToHostInterface;
pub use session::Session;
