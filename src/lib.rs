//! # bindiff - Byte-positional comparison of binary payloads
//!
//! Two payloads, "left" and "right", are uploaded under an id and compared
//! byte by byte. The result is one of:
//!
//! - `Equals`: same size and content
//! - `SizeDoNotMatch`: sizes differ (content is not scanned)
//! - `ContentDoNotMatch`: same size, with the list of differing spans as
//!   `{offset, length}` pairs in ascending order

// Module declarations
pub mod commands;
pub mod config;
pub mod diff;
pub mod executor;
pub mod hash;
pub mod logging;
pub mod service;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use diff::{compare, DiffResult, ResultType};
pub use service::{ComparisonService, PayloadService};
pub use store::{FsStore, MemoryStore, PayloadStore};
pub use types::{BinDiffError, ComparisonOutcome, DiffRun, Side};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
