use tiergen_ir::{ComponentKind, EntityConfig, RepositoryConfig, UseCaseConfig};

/// Borrowed reference to one component of a [`Plan`](tiergen_ir::Plan).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ComponentRef<'a> {
    Entity(&'a EntityConfig),
    Repository(&'a RepositoryConfig),
    UseCase(&'a UseCaseConfig),
}

impl<'a> ComponentRef<'a> {
    /// The component's unqualified name.
    pub fn name(&self) -> &'a str {
        match self {
            ComponentRef::Entity(e) => &e.name,
            ComponentRef::Repository(r) => &r.name,
            ComponentRef::UseCase(u) => &u.name,
        }
    }

    pub fn kind(&self) -> ComponentKind {
        match self {
            ComponentRef::Entity(_) => ComponentKind::Entity,
            ComponentRef::Repository(_) => ComponentKind::Repository,
            ComponentRef::UseCase(_) => ComponentKind::UseCase,
        }
    }
}
