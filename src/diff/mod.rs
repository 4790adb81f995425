//! Diff engine - Byte-positional comparison and result mapping

mod engine;
mod result;

pub use engine::compare;
pub use result::{DiffResult, ResultType};
