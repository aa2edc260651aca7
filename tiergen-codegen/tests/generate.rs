//! End-to-end generation: resolve a plan, check conflicts, write files.

use std::{fs, path::Path};

use eyre::{Result, bail};
use tempfile::TempDir;
use tiergen_codegen::{
    Generator,
    conflict::{AnswerAll, ConflictChecker, ConflictError, ConflictPolicy, resolve_conflicts},
    pipeline::Pipeline,
    render::{GoRenderer, Renderer},
};
use tiergen_ir::{EntityConfig, Plan, RepositoryConfig, UseCaseConfig};
use tiergen_manifest::Config;

/// Go renderer whose use-case output always fails.
struct BrokenUseCases(GoRenderer);

impl Renderer for BrokenUseCases {
    fn render_entity(&self, entity: &EntityConfig, plan: &Plan) -> Result<String> {
        self.0.render_entity(entity, plan)
    }

    fn render_repository_interface(&self, repo: &RepositoryConfig, plan: &Plan) -> Result<String> {
        self.0.render_repository_interface(repo, plan)
    }

    fn render_repository(&self, repo: &RepositoryConfig, plan: &Plan) -> Result<String> {
        self.0.render_repository(repo, plan)
    }

    fn render_use_case(&self, use_case: &UseCaseConfig, _plan: &Plan) -> Result<String> {
        bail!("template error in {}", use_case.name)
    }

    fn render_mock(&self, repo: &RepositoryConfig, plan: &Plan) -> Result<String> {
        self.0.render_mock(repo, plan)
    }

    fn render_entity_test(&self, entity: &EntityConfig, plan: &Plan) -> Result<String> {
        self.0.render_entity_test(entity, plan)
    }

    fn render_repository_test(&self, repo: &RepositoryConfig, plan: &Plan) -> Result<String> {
        self.0.render_repository_test(repo, plan)
    }

    fn render_use_case_test(&self, use_case: &UseCaseConfig, plan: &Plan) -> Result<String> {
        self.0.render_use_case_test(use_case, plan)
    }
}

/// Use-case requested before its entity, repository left out.
fn profile_plan() -> Plan {
    Plan {
        use_cases: vec![UseCaseConfig::new("UpdateProfile")],
        entities: vec![EntityConfig::new("Profile", "profiles")],
        module_path: "example.com/app".to_string(),
        ..Plan::new()
    }
}

fn relative(root: &Path, path: &Path) -> String {
    let root = std::path::absolute(root).unwrap();
    path.strip_prefix(&root)
        .unwrap()
        .to_string_lossy()
        .replace('\\', "/")
}

#[test]
fn test_resolved_plan_generates_in_phase_order() {
    let temp = TempDir::new().unwrap();
    let config = Config::default();

    let ctx = Pipeline::from_config(&config).run(profile_plan()).unwrap();
    assert_eq!(ctx.created_repositories, vec!["Profile"]);

    let generator = Generator::new(&config, GoRenderer::new(&config), temp.path());
    let summary = generator.generate(&ctx.plan).unwrap();

    let written: Vec<String> = summary
        .files
        .iter()
        .map(|f| relative(temp.path(), f))
        .collect();
    assert_eq!(
        written,
        vec![
            "internal/domain/profile.go",
            "internal/domain/profile_repository.go",
            "internal/repository/profile_repository.go",
            "internal/usecase/update_profile_usecase.go",
        ]
    );

    let use_case = fs::read_to_string(temp.path().join(&written[3])).unwrap();
    assert!(use_case.contains("profileRepository domain.ProfileRepository"));
    assert!(use_case.contains("\"example.com/app/internal/domain\""));
}

#[test]
fn test_tests_and_mocks_follow_components() {
    let temp = TempDir::new().unwrap();
    let config = Config::default();
    let plan = Plan {
        with_tests: true,
        with_mocks: true,
        ..profile_plan()
    };

    let ctx = Pipeline::from_config(&config).run(plan).unwrap();
    let generator = Generator::new(&config, GoRenderer::new(&config), temp.path());
    let summary = generator.generate(&ctx.plan).unwrap();

    let written: Vec<String> = summary
        .files
        .iter()
        .map(|f| relative(temp.path(), f))
        .collect();
    assert_eq!(
        &written[4..],
        &[
            "internal/mocks/profile_repository_mock.go",
            "internal/domain/profile_test.go",
            "internal/repository/profile_repository_test.go",
            "internal/usecase/update_profile_usecase_test.go",
        ]
    );
}

#[test]
fn test_conflicts_abort_before_any_write() {
    let temp = TempDir::new().unwrap();
    let config = Config::default();
    let ctx = Pipeline::from_config(&config).run(profile_plan()).unwrap();
    let generator = Generator::new(&config, GoRenderer::new(&config), temp.path());

    let existing = temp.path().join("internal/domain/profile.go");
    fs::create_dir_all(existing.parent().unwrap()).unwrap();
    fs::write(&existing, "package domain // hand written\n").unwrap();

    let conflicts = ConflictChecker::new()
        .check_conflicts(&generator.conflict_paths(&ctx.plan))
        .unwrap();
    assert_eq!(conflicts, vec![existing.clone()]);

    let err = resolve_conflicts(&conflicts, ConflictPolicy::Abort, &mut AnswerAll(true))
        .unwrap_err();
    assert!(matches!(err, ConflictError::Exists { ref paths } if paths.len() == 1));

    assert!(!temp.path().join("internal/repository").exists());
    assert_eq!(
        fs::read_to_string(&existing).unwrap(),
        "package domain // hand written\n"
    );
}

#[test]
fn test_forced_run_replaces_conflicting_file() {
    let temp = TempDir::new().unwrap();
    let config = Config::default();
    let ctx = Pipeline::from_config(&config).run(profile_plan()).unwrap();

    let existing = temp.path().join("internal/domain/profile.go");
    fs::create_dir_all(existing.parent().unwrap()).unwrap();
    fs::write(&existing, "old").unwrap();

    let generator = Generator::new(&config, GoRenderer::new(&config), temp.path());
    let conflicts = ConflictChecker::new()
        .check_conflicts(&generator.conflict_paths(&ctx.plan))
        .unwrap();
    let overwrite =
        resolve_conflicts(&conflicts, ConflictPolicy::Force, &mut AnswerAll(false)).unwrap();

    let summary = generator.overwrite(overwrite).generate(&ctx.plan).unwrap();

    assert_eq!(summary.len(), 4);
    assert!(fs::read_to_string(&existing).unwrap().starts_with("package domain\n"));
}

#[test]
fn test_render_failure_rolls_back_every_written_file() {
    let temp = TempDir::new().unwrap();
    let config = Config::default();
    let ctx = Pipeline::from_config(&config).run(profile_plan()).unwrap();

    let generator = Generator::new(&config, BrokenUseCases(GoRenderer::new(&config)), temp.path());
    let failure = generator.generate(&ctx.plan).unwrap_err();

    assert_eq!(failure.rolled_back.len(), 3);
    assert!(failure.rollback_succeeded());
    assert!(failure.surviving_paths().is_empty());
    assert_eq!(
        failure.cause.to_string(),
        "failed to generate use case 'UpdateProfile'"
    );
    assert!(failure.rolled_back.iter().all(|f| !f.exists()));
    assert!(!temp.path().join("internal").exists());
}

#[test]
fn test_rollback_restores_forced_overwrite() {
    let temp = TempDir::new().unwrap();
    let config = Config::default();
    let ctx = Pipeline::from_config(&config).run(profile_plan()).unwrap();

    let existing = temp.path().join("internal/domain/profile.go");
    fs::create_dir_all(existing.parent().unwrap()).unwrap();
    fs::write(&existing, "hand written").unwrap();

    let generator = Generator::new(&config, BrokenUseCases(GoRenderer::new(&config)), temp.path())
        .overwrite(true);
    generator.generate(&ctx.plan).unwrap_err();

    assert_eq!(fs::read_to_string(&existing).unwrap(), "hand written");
    assert!(!temp.path().join("internal/domain/profile_repository.go").exists());
    assert!(!temp.path().join("internal/repository").exists());
}
