//! Domain models and types.
//!
//! This module contains the core domain models, types, and business rules
//! for the exporter.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`LogGroupName`], [`TaskId`])
//! - **The export request model** ([`ExportRequest`])
//! - **Error types** ([`ExporterError`], [`LogsError`], [`StorageError`])
//! - **Result type alias** ([`Result`])
//!
//! # Type Safety
//!
//! Identifiers use the newtype pattern so a task ID can never be passed
//! where a log group name is expected:
//!
//! ```rust
//! use logship::domain::{LogGroupName, TaskId};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let group = LogGroupName::new("/aws/lambda/api")?;
//! let task = TaskId::new("0e3a95e4-89f2-4c0f-8d1e-3c1f9d0a2b61")?;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, ExporterError>`](Result).
//! Per-entry conditions (pending task, missing log group) are distinguished
//! from invocation-fatal ones via [`LogsError::is_fatal`].

pub mod errors;
pub mod ids;
pub mod request;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{ExporterError, LogsError, StorageError};
pub use ids::{LogGroupName, TaskId};
pub use request::ExportRequest;
pub use result::Result;
