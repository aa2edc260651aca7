//! Code generation building blocks.
//!
//! - [`CodeBuilder`] - tab-indented line builder for Go sources

mod code_builder;

pub use code_builder::CodeBuilder;
