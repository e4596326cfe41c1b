// Pipeline module - registry, state store, engine and share codec

pub mod debounce;
pub mod engine;
pub mod node;
pub mod registry;
pub mod serializer;
pub mod store;
pub mod transform;

// Re-export core types
pub use debounce::Debouncer;
pub use engine::PipelineEngine;
pub use node::*;
pub use registry::*;
pub use serializer::SharedPipeline;
pub use store::PipelineStore;
pub use transform::*;
