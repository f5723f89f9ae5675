// Public modules
pub mod error;
pub mod files;
pub mod git;
pub mod manifest;
pub mod readme;
pub mod version;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
pub use manifest::Manifest;
pub use readme::{ParsedReadme, ReconcileOptions, Section};
