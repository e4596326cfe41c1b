pub mod config;
pub mod error;
pub mod pipeline;
pub mod saved;

// Re-export commonly used types
pub use error::{Result, StrandError, TransformError};
pub use pipeline::{
    NodeConfig, NodeId, NodeStatus, PipelineEngine, PipelineState, PipelineStore, SharedPipeline,
    Transform, TransformRegistry,
};
pub use saved::{SavedPipeline, SavedPipelines};
