//! Export dispatch orchestration
//!
//! - [`dispatcher`] - the invocation loop and time budget
//! - [`window`] - export window policies and destination prefix layout
//! - [`summary`] - per-entry outcomes and the invocation summary

pub mod dispatcher;
pub mod summary;
pub mod window;

pub use dispatcher::{Budget, Dispatcher};
pub use summary::{DispatchSummary, EntryDisposition, EntryOutcome};
pub use window::ExportWindow;
