use indexmap::IndexMap;
use tiergen_ir::{ComponentKind, Dependency, Plan, UseCaseConfig};

/// Conventional suffix stripped from use-case names before inference.
pub const USE_CASE_SUFFIX: &str = "UseCase";

/// Suffix that turns an entity name into its repository's node name.
pub const REPOSITORY_SUFFIX: &str = "Repository";

/// Verb prefixes tried in order; the first match wins.
pub const VERB_PREFIXES: &[&str] = &[
    "Create", "Get", "Update", "Delete", "List", "Find", "Search", "Fetch", "Remove", "Add",
    "Register", "Login", "Logout", "Activate",
];

/// Infers a use-case's repository dependency from its name.
///
/// Detection never fails. Whether a dependency is satisfied is reported
/// through [`Dependency::found`], which is always recomputed from the plan
/// passed in rather than trusted from a previous run.
#[derive(Debug, Clone, Copy, Default)]
pub struct DependencyDetector;

impl DependencyDetector {
    pub fn new() -> Self {
        Self
    }

    /// Entity name implied by a use-case name, e.g. `CreateOrder` → `Order`.
    ///
    /// Returns `None` when no verb prefix matches or nothing remains after
    /// stripping it.
    pub fn entity_name<'a>(&self, use_case_name: &'a str) -> Option<&'a str> {
        let name = use_case_name
            .strip_suffix(USE_CASE_SUFFIX)
            .unwrap_or(use_case_name);

        VERB_PREFIXES
            .iter()
            .filter_map(|prefix| name.strip_prefix(prefix))
            .find(|rest| !rest.is_empty())
    }

    /// The dependencies of `use_case`: the inferred repository first, then
    /// declared dependencies whose names are not already listed.
    pub fn detect(&self, use_case: &UseCaseConfig, plan: &Plan) -> Vec<Dependency> {
        let mut deps = Vec::new();

        if let Some(entity) = self.entity_name(&use_case.name) {
            deps.push(Dependency::repository(entity, plan.has_repository(entity)));
        }

        for declared in &use_case.dependencies {
            if deps.iter().any(|d: &Dependency| d.name == declared.name) {
                continue;
            }
            deps.push(Dependency {
                found: is_present(declared, plan),
                ..declared.clone()
            });
        }

        deps
    }

    /// Names of unresolved dependencies, grouped by use-case name.
    ///
    /// Use-cases with nothing missing are omitted. Iteration order follows
    /// the plan.
    pub fn detect_missing_dependencies(&self, plan: &Plan) -> IndexMap<String, Vec<String>> {
        plan.use_cases
            .iter()
            .filter_map(|uc| {
                let missing: Vec<String> = self
                    .detect(uc, plan)
                    .into_iter()
                    .filter(|d| !d.found)
                    .map(|d| d.name)
                    .collect();
                (!missing.is_empty()).then(|| (uc.name.clone(), missing))
            })
            .collect()
    }
}

/// Whether a declared dependency is satisfied by the plan.
///
/// Kinds a plan cannot hold (handlers, mocks, tests) live outside the
/// generated tree, so the caller's declared status stands for them.
fn is_present(dep: &Dependency, plan: &Plan) -> bool {
    match dep.kind {
        ComponentKind::Entity | ComponentKind::Repository | ComponentKind::UseCase => {
            plan.contains(dep.kind, &dep.name)
        }
        ComponentKind::Handler | ComponentKind::Mock | ComponentKind::Test => dep.found,
    }
}
