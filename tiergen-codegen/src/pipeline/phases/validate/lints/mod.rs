//! Built-in lints for plan validation.

mod component_naming;
mod duplicate_component;
mod empty_plan;
mod repository_entity;
mod usecase_dependency;

pub use component_naming::ComponentNamingLint;
pub use duplicate_component::DuplicateComponentLint;
pub use empty_plan::EmptyPlanLint;
pub use repository_entity::RepositoryEntityLint;
pub use usecase_dependency::UseCaseDependencyLint;
