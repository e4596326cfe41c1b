/// Centralized error handling for Strand
pub mod strand;
pub mod transform;

pub use strand::{Result, StrandError};
pub use transform::{TransformError, TransformResult};
