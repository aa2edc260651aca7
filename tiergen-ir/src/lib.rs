//! Generation plan types for the tiergen scaffolder.
//!
//! This crate provides the data model shared by every stage of a run. A
//! [`Plan`] is built once per invocation, resolved in place by the
//! dependency resolver, consumed by the generator and then dropped.
//!
//! # Architecture
//!
//! ```text
//! CLI flags → Plan (unresolved) → resolver → Plan (resolved) → generator
//! ```
//!
//! The types are deliberately plain data:
//! - Serializable, so a resolved plan can be dumped for inspection
//! - Free of rendering or filesystem concerns
//! - Self-contained (no dependencies beyond serde)

mod component;
mod plan;
mod types;

pub use component::{
    CustomMethod, Dependency, EntityConfig, Field, MethodParam, RepositoryConfig, UseCaseConfig,
};
pub use plan::Plan;
pub use types::{ComponentKind, DatabaseType};
