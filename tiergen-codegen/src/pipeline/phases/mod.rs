//! Built-in pipeline phases.
//!
//! This module provides the standard phases that run in every pipeline:
//!
//! - [`ValidatePhase`] - runs lints over the requested plan
//! - [`ResolvePhase`] - makes dependencies explicit, creating repositories
//! - [`VerifyPhase`] - rejects dependencies that are still missing
//! - [`GraphPhase`] - orders components and rejects cycles
//! - [`PathsPhase`] - rejects components that would share an output file

mod graph;
mod paths;
mod resolve;
mod validate;
mod verify;

pub use graph::GraphPhase;
pub use paths::PathsPhase;
pub use resolve::ResolvePhase;
pub use validate::{
    ComponentNamingLint, DuplicateComponentLint, EmptyPlanLint, Lint, RepositoryEntityLint,
    UseCaseDependencyLint, ValidatePhase,
};
pub use verify::VerifyPhase;
