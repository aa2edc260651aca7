//! Source rendering.
//!
//! A [`Renderer`] turns one component into the text of one file. The
//! generator calls [`render_target`] once per [`OutputFile`](crate::paths::OutputFile)
//! and treats a rendering error exactly like a write error.

mod go;

use eyre::Result;
pub use go::GoRenderer;
use tiergen_ir::{EntityConfig, Plan, RepositoryConfig, UseCaseConfig};

use crate::paths::Target;

/// Renders component configs to source text.
pub trait Renderer {
    fn render_entity(&self, entity: &EntityConfig, plan: &Plan) -> Result<String>;

    fn render_repository_interface(&self, repo: &RepositoryConfig, plan: &Plan) -> Result<String>;

    fn render_repository(&self, repo: &RepositoryConfig, plan: &Plan) -> Result<String>;

    fn render_use_case(&self, use_case: &UseCaseConfig, plan: &Plan) -> Result<String>;

    fn render_mock(&self, repo: &RepositoryConfig, plan: &Plan) -> Result<String>;

    fn render_entity_test(&self, entity: &EntityConfig, plan: &Plan) -> Result<String>;

    fn render_repository_test(&self, repo: &RepositoryConfig, plan: &Plan) -> Result<String>;

    fn render_use_case_test(&self, use_case: &UseCaseConfig, plan: &Plan) -> Result<String>;
}

/// Dispatch one output target to the matching renderer method.
pub fn render_target<R: Renderer + ?Sized>(
    renderer: &R,
    target: &Target<'_>,
    plan: &Plan,
) -> Result<String> {
    match *target {
        Target::Entity(e) => renderer.render_entity(e, plan),
        Target::RepositoryInterface(r) => renderer.render_repository_interface(r, plan),
        Target::Repository(r) => renderer.render_repository(r, plan),
        Target::UseCase(u) => renderer.render_use_case(u, plan),
        Target::Mock(r) => renderer.render_mock(r, plan),
        Target::EntityTest(e) => renderer.render_entity_test(e, plan),
        Target::RepositoryTest(r) => renderer.render_repository_test(r, plan),
        Target::UseCaseTest(u) => renderer.render_use_case_test(u, plan),
    }
}
