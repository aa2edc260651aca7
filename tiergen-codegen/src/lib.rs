//! Dependency resolution and transactional generation for tiergen.
//!
//! This crate turns a requested [`Plan`](tiergen_ir::Plan) into files on
//! disk without ever leaving a half-generated tree behind.
//!
//! # Module Organization
//!
//! - [`dependency`] - Dependency detection, the dependency graph and the resolver
//! - [`pipeline`] - Pre-flight phases (validate → resolve → verify → graph → paths)
//! - [`conflict`] - Pre-existing output detection and overwrite policy
//! - [`paths`] - Mapping from components to output files
//! - [`render`] - Source rendering (`Renderer` trait, Go renderer)
//! - [`builder`] - Tab-indented line building for Go sources
//! - [`generator`] - Fixed-phase orchestration with rollback
//! - [`testing`] - Test utilities (feature-gated)

pub mod builder;
mod component;
pub mod conflict;
pub mod dependency;
pub mod generator;
pub mod paths;
pub mod pipeline;
pub mod render;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use component::ComponentRef;
pub use generator::{GenerationFailure, GenerationSummary, Generator, PreviewFile};
