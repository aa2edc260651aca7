//! Core utilities for the tiergen scaffolder.
//!
//! This crate provides the filesystem and string primitives used across
//! the tiergen workspace.

mod error;
mod utils;
mod writer;

pub use error::{RollbackError, RollbackFailure, WriteError};
// String utilities
pub use utils::{is_pascal_case, pluralize, to_camel_case, to_pascal_case, to_snake_case};
// File operations
pub use writer::TransactionalWriter;
