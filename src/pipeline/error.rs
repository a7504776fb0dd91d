//! Pipeline Error Types

use crate::queue::QueueError;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Invalid run configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Queue setup failed: {0}")]
    Queue(#[from] QueueError),

    #[error("Failed to spawn task {task}: {source}")]
    Spawn {
        task: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Task {task} panicked")]
    TaskPanicked { task: String },
}

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;
