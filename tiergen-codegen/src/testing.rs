//! Test utilities for generation.
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests.

use eyre::{Result, bail};
use tiergen_ir::{EntityConfig, Field, Plan, RepositoryConfig, UseCaseConfig};
use tiergen_manifest::Config;

use crate::render::{GoRenderer, Renderer};

/// An order entity with a repository and a use-case creating it.
pub fn order_plan() -> Plan {
    let mut total = Field::new("Total", "float64");
    total.required = true;

    Plan {
        entities: vec![EntityConfig::new("Order", "orders").with_fields(vec![
            Field::new("ID", "string"),
            total,
        ])],
        repositories: vec![RepositoryConfig::new("Order", "orders")],
        use_cases: vec![UseCaseConfig::new("CreateOrder")],
        module_path: "example.com/shop".to_string(),
        ..Plan::new()
    }
}

/// A [`GoRenderer`] that fails for one named component.
///
/// Used to exercise rollback after some files were already written.
pub struct FailingRenderer {
    inner: GoRenderer,
    fail_on: String,
}

impl FailingRenderer {
    pub fn new(config: &Config, fail_on: impl Into<String>) -> Self {
        Self {
            inner: GoRenderer::new(config),
            fail_on: fail_on.into(),
        }
    }

    fn check(&self, name: &str) -> Result<()> {
        if name == self.fail_on {
            bail!("refusing to render '{name}'");
        }
        Ok(())
    }
}

impl Renderer for FailingRenderer {
    fn render_entity(&self, entity: &EntityConfig, plan: &Plan) -> Result<String> {
        self.check(&entity.name)?;
        self.inner.render_entity(entity, plan)
    }

    fn render_repository_interface(&self, repo: &RepositoryConfig, plan: &Plan) -> Result<String> {
        self.check(&repo.name)?;
        self.inner.render_repository_interface(repo, plan)
    }

    fn render_repository(&self, repo: &RepositoryConfig, plan: &Plan) -> Result<String> {
        self.check(&repo.name)?;
        self.inner.render_repository(repo, plan)
    }

    fn render_use_case(&self, use_case: &UseCaseConfig, plan: &Plan) -> Result<String> {
        self.check(&use_case.name)?;
        self.inner.render_use_case(use_case, plan)
    }

    fn render_mock(&self, repo: &RepositoryConfig, plan: &Plan) -> Result<String> {
        self.check(&repo.name)?;
        self.inner.render_mock(repo, plan)
    }

    fn render_entity_test(&self, entity: &EntityConfig, plan: &Plan) -> Result<String> {
        self.check(&entity.name)?;
        self.inner.render_entity_test(entity, plan)
    }

    fn render_repository_test(&self, repo: &RepositoryConfig, plan: &Plan) -> Result<String> {
        self.check(&repo.name)?;
        self.inner.render_repository_test(repo, plan)
    }

    fn render_use_case_test(&self, use_case: &UseCaseConfig, plan: &Plan) -> Result<String> {
        self.check(&use_case.name)?;
        self.inner.render_use_case_test(use_case, plan)
    }
}
