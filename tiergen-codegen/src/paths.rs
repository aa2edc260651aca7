//! Mapping from plan components to output files.
//!
//! One [`PathMap`] drives both the pre-flight conflict check and the
//! generator, so the two can never disagree about which files a run touches.

use std::{collections::HashMap, fmt, path::PathBuf};

use tiergen_core::to_snake_case;
use tiergen_ir::{EntityConfig, Plan, RepositoryConfig, UseCaseConfig};
use tiergen_manifest::{Config, PathsConfig};

use crate::ComponentRef;

/// Generation phases, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenerationPhase {
    Entities,
    Repositories,
    UseCases,
    Mocks,
    Tests,
}

impl GenerationPhase {
    pub const ALL: [GenerationPhase; 5] = [
        GenerationPhase::Entities,
        GenerationPhase::Repositories,
        GenerationPhase::UseCases,
        GenerationPhase::Mocks,
        GenerationPhase::Tests,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationPhase::Entities => "entities",
            GenerationPhase::Repositories => "repositories",
            GenerationPhase::UseCases => "usecases",
            GenerationPhase::Mocks => "mocks",
            GenerationPhase::Tests => "tests",
        }
    }

    /// Mocks and tests only run when the plan asks for them.
    pub fn is_enabled(&self, plan: &Plan) -> bool {
        match self {
            GenerationPhase::Mocks => plan.with_mocks,
            GenerationPhase::Tests => plan.with_tests,
            _ => true,
        }
    }
}

impl std::fmt::Display for GenerationPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a single output file contains.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Target<'a> {
    Entity(&'a EntityConfig),
    RepositoryInterface(&'a RepositoryConfig),
    Repository(&'a RepositoryConfig),
    UseCase(&'a UseCaseConfig),
    Mock(&'a RepositoryConfig),
    EntityTest(&'a EntityConfig),
    RepositoryTest(&'a RepositoryConfig),
    UseCaseTest(&'a UseCaseConfig),
}

impl<'a> Target<'a> {
    /// The plan component the file is generated from.
    pub fn component(&self) -> ComponentRef<'a> {
        match *self {
            Target::Entity(e) | Target::EntityTest(e) => ComponentRef::Entity(e),
            Target::RepositoryInterface(r)
            | Target::Repository(r)
            | Target::Mock(r)
            | Target::RepositoryTest(r) => ComponentRef::Repository(r),
            Target::UseCase(u) | Target::UseCaseTest(u) => ComponentRef::UseCase(u),
        }
    }

    pub fn phase(&self) -> GenerationPhase {
        match self {
            Target::Entity(_) => GenerationPhase::Entities,
            Target::RepositoryInterface(_) | Target::Repository(_) => GenerationPhase::Repositories,
            Target::UseCase(_) => GenerationPhase::UseCases,
            Target::Mock(_) => GenerationPhase::Mocks,
            Target::EntityTest(_) | Target::RepositoryTest(_) | Target::UseCaseTest(_) => {
                GenerationPhase::Tests
            }
        }
    }

    /// Short human-readable description, e.g. `repository interface`.
    pub fn label(&self) -> &'static str {
        match self {
            Target::Entity(_) => "entity",
            Target::RepositoryInterface(_) => "repository interface",
            Target::Repository(_) => "repository",
            Target::UseCase(_) => "use case",
            Target::Mock(_) => "mock",
            Target::EntityTest(_) => "entity test",
            Target::RepositoryTest(_) => "repository test",
            Target::UseCaseTest(_) => "use case test",
        }
    }
}

impl fmt::Display for Target<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.label(), self.component().name())
    }
}

/// Two files of one plan that map to the same path.
#[derive(Debug, Clone, PartialEq)]
pub struct PathCollision<'a> {
    pub path: PathBuf,
    pub first: Target<'a>,
    pub second: Target<'a>,
}

impl fmt::Display for PathCollision<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} and {} would both be written to {}",
            self.first,
            self.second,
            self.path.display()
        )
    }
}

/// A file a run will write, relative to the project root.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputFile<'a> {
    pub target: Target<'a>,
    pub path: PathBuf,
}

/// Computes output paths from the configured directories.
#[derive(Debug, Clone)]
pub struct PathMap {
    paths: PathsConfig,
    separate_interfaces: bool,
}

impl PathMap {
    pub fn new(config: &Config) -> Self {
        Self {
            paths: config.paths.clone(),
            separate_interfaces: config.generation.separate_interfaces,
        }
    }

    pub fn entity(&self, entity: &EntityConfig) -> PathBuf {
        PathBuf::from(&self.paths.domain).join(format!("{}.go", to_snake_case(&entity.name)))
    }

    pub fn entity_test(&self, entity: &EntityConfig) -> PathBuf {
        PathBuf::from(&self.paths.domain).join(format!("{}_test.go", to_snake_case(&entity.name)))
    }

    /// `None` when interfaces are not split out of the implementation.
    pub fn repository_interface(&self, repo: &RepositoryConfig) -> Option<PathBuf> {
        self.separate_interfaces.then(|| {
            PathBuf::from(&self.paths.domain)
                .join(format!("{}_repository.go", to_snake_case(&repo.name)))
        })
    }

    pub fn repository(&self, repo: &RepositoryConfig) -> PathBuf {
        PathBuf::from(&self.paths.repository)
            .join(format!("{}_repository.go", to_snake_case(&repo.name)))
    }

    pub fn repository_test(&self, repo: &RepositoryConfig) -> PathBuf {
        PathBuf::from(&self.paths.repository)
            .join(format!("{}_repository_test.go", to_snake_case(&repo.name)))
    }

    pub fn mock(&self, repo: &RepositoryConfig) -> PathBuf {
        PathBuf::from(&self.paths.mocks)
            .join(format!("{}_repository_mock.go", to_snake_case(&repo.name)))
    }

    pub fn use_case(&self, use_case: &UseCaseConfig) -> PathBuf {
        PathBuf::from(&self.paths.usecase)
            .join(format!("{}_usecase.go", to_snake_case(&use_case.name)))
    }

    pub fn use_case_test(&self, use_case: &UseCaseConfig) -> PathBuf {
        PathBuf::from(&self.paths.usecase)
            .join(format!("{}_usecase_test.go", to_snake_case(&use_case.name)))
    }

    /// Files written by one phase, in plan order.
    ///
    /// Returns nothing for a phase the plan has not enabled.
    pub fn phase_files<'a>(&self, phase: GenerationPhase, plan: &'a Plan) -> Vec<OutputFile<'a>> {
        if !phase.is_enabled(plan) {
            return Vec::new();
        }

        let mut files = Vec::new();
        let mut push = |target: Target<'a>, path: PathBuf| files.push(OutputFile { target, path });

        match phase {
            GenerationPhase::Entities => {
                for entity in &plan.entities {
                    push(Target::Entity(entity), self.entity(entity));
                }
            }
            GenerationPhase::Repositories => {
                for repo in &plan.repositories {
                    if let Some(path) = self.repository_interface(repo) {
                        push(Target::RepositoryInterface(repo), path);
                    }
                    push(Target::Repository(repo), self.repository(repo));
                }
            }
            GenerationPhase::UseCases => {
                for use_case in &plan.use_cases {
                    push(Target::UseCase(use_case), self.use_case(use_case));
                }
            }
            GenerationPhase::Mocks => {
                for repo in &plan.repositories {
                    push(Target::Mock(repo), self.mock(repo));
                }
            }
            GenerationPhase::Tests => {
                for entity in &plan.entities {
                    push(Target::EntityTest(entity), self.entity_test(entity));
                }
                for repo in &plan.repositories {
                    push(Target::RepositoryTest(repo), self.repository_test(repo));
                }
                for use_case in &plan.use_cases {
                    push(Target::UseCaseTest(use_case), self.use_case_test(use_case));
                }
            }
        }

        files
    }

    /// Every file the plan will produce, in generation order.
    pub fn expected_files<'a>(&self, plan: &'a Plan) -> Vec<OutputFile<'a>> {
        GenerationPhase::ALL
            .iter()
            .flat_map(|phase| self.phase_files(*phase, plan))
            .collect()
    }

    /// Expected files that share a path with an earlier one.
    pub fn collisions<'a>(&self, plan: &'a Plan) -> Vec<PathCollision<'a>> {
        let mut seen: HashMap<PathBuf, Target<'a>> = HashMap::new();
        let mut collisions = Vec::new();

        for file in self.expected_files(plan) {
            match seen.get(&file.path) {
                Some(first) => collisions.push(PathCollision {
                    path: file.path,
                    first: *first,
                    second: file.target,
                }),
                None => {
                    seen.insert(file.path, file.target);
                }
            }
        }

        collisions
    }
}
