//! Dependency detection, graph construction and resolution.
//!
//! - [`DependencyDetector`] infers what a use-case needs from its name
//! - [`DependencyGraph`] orders components and reports cycles
//! - [`DependencyResolver`] fills gaps by creating repositories

mod detector;
mod graph;
mod resolver;

pub use detector::{DependencyDetector, REPOSITORY_SUFFIX, USE_CASE_SUFFIX, VERB_PREFIXES};
pub use graph::{DependencyGraph, GraphError, Node};
pub use resolver::{DependencyResolver, ResolveError, Resolution};
