//! Pre-flight pipeline for a generation plan.
//!
//! This module provides a [`Pipeline`] orchestrator that prepares a [`Plan`]
//! before anything touches the filesystem:
//!
//! - Explicit phase boundaries (validate → resolve → verify → graph → paths)
//! - Plugin hooks observing each phase (before, after, on failure)
//! - Unified diagnostics collection
//! - Shared state via [`PlanContext`]
//!
//! # Example
//!
//! ```ignore
//! use tiergen_codegen::pipeline::{Pipeline, PlanContext};
//!
//! let mut ctx = PlanContext::new(plan);
//! let result = Pipeline::new().run_on(&mut ctx);
//!
//! for diag in &ctx.diagnostics {
//!     eprintln!("{diag}");
//! }
//! result?;
//! ```
//!
//! [`Plan`]: tiergen_ir::Plan

mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod plugin;
mod runner;
mod trace;

pub use context::PlanContext;
pub use diagnostic::{Diagnostic, Severity};
pub use phase::Phase;
pub use plugin::Plugin;
pub use runner::Pipeline;
pub use trace::TracingPlugin;
