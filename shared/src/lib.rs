//! FitPlan Shared Library
//!
//! Wire types, domain value types and the plan progress engine used by
//! the backend and the WASM module.

pub mod errors;
pub mod models;
pub mod plan;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use models::*;
pub use types::*;
