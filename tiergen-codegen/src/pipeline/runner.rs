//! Pipeline orchestrator.

use eyre::Result;
use tiergen_ir::{DatabaseType, Plan};
use tiergen_manifest::Config;

use super::{
    Phase, PlanContext, Plugin,
    phases::{GraphPhase, PathsPhase, ResolvePhase, ValidatePhase, VerifyPhase},
};
use crate::{dependency::DependencyResolver, paths::PathMap};

/// The pre-flight pipeline orchestrator.
///
/// The pipeline runs the built-in phases (validate, resolve, verify, graph,
/// paths) followed by any user phases, letting plugins observe each one.
/// Nothing it does touches the filesystem.
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::from_config(&config)
///     .plugin(TracingPlugin)
///     .phase(MyCustomPhase);
///
/// let ctx = pipeline.run(plan)?;
/// ```
pub struct Pipeline {
    resolver: DependencyResolver,
    paths: PathMap,
    phases: Vec<Box<dyn Phase>>,
    plugins: Vec<Box<dyn Plugin>>,
}

impl Pipeline {
    /// Create a new pipeline with default built-in phases.
    pub fn new() -> Self {
        Self {
            resolver: DependencyResolver::default(),
            paths: PathMap::new(&Config::default()),
            phases: Vec::new(),
            plugins: Vec::new(),
        }
    }

    /// Create a pipeline honouring the generation settings of `config`.
    pub fn from_config(config: &Config) -> Self {
        Self {
            paths: PathMap::new(config),
            ..Self::new()
        }
        .default_database(config.generation.default_database)
    }

    /// Database kind given to repositories the resolve phase creates.
    pub fn default_database(mut self, database: DatabaseType) -> Self {
        self.resolver = self.resolver.with_default_database(database);
        self
    }

    /// Add a phase to run after the built-in phases.
    pub fn phase(mut self, phase: impl Phase + 'static) -> Self {
        self.phases.push(Box::new(phase));
        self
    }

    /// Add a plugin to observe every phase.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Run the pipeline on a plan.
    ///
    /// Diagnostics of a failed run are lost; use [`run_on`](Self::run_on)
    /// to keep them.
    ///
    /// # Errors
    ///
    /// Returns an error if any phase fails fatally.
    pub fn run(&self, plan: Plan) -> Result<PlanContext> {
        let mut ctx = PlanContext::new(plan);
        self.run_on(&mut ctx)?;
        Ok(ctx)
    }

    /// Run the pipeline on an existing context.
    ///
    /// Executes all phases in order:
    /// 1. ValidatePhase - lints the requested plan
    /// 2. ResolvePhase - makes dependencies explicit
    /// 3. VerifyPhase - rejects unresolved dependencies
    /// 4. GraphPhase - orders components, rejects cycles
    /// 5. PathsPhase - rejects components sharing an output file
    /// 6. User phases (if any)
    ///
    /// The context keeps its diagnostics whether or not a phase fails.
    pub fn run_on(&self, ctx: &mut PlanContext) -> Result<()> {
        // Built-in phases in execution order
        let builtin_phases: Vec<Box<dyn Phase>> = vec![
            Box::new(ValidatePhase::new()),
            Box::new(ResolvePhase::new(self.resolver.clone())),
            Box::new(VerifyPhase::new(self.resolver.clone())),
            Box::new(GraphPhase),
            Box::new(PathsPhase::new(self.paths.clone())),
        ];

        // Run built-in phases, then user phases
        for phase in builtin_phases.iter().chain(self.phases.iter()) {
            self.run_phase(phase.as_ref(), ctx)?;
        }

        Ok(())
    }

    fn run_phase(&self, phase: &dyn Phase, ctx: &mut PlanContext) -> Result<()> {
        let name = phase.name();

        for plugin in &self.plugins {
            plugin.on_before_phase(name, ctx);
        }

        if let Err(err) = phase.run(ctx) {
            for plugin in &self.plugins {
                plugin.on_phase_failed(name, ctx, &err);
            }
            return Err(err);
        }

        for plugin in &self.plugins {
            plugin.on_after_phase(name, ctx);
        }

        Ok(())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    use tiergen_ir::{EntityConfig, RepositoryConfig, UseCaseConfig};

    use super::*;
    use crate::pipeline::TracingPlugin;

    #[derive(Default)]
    struct CountingPlugin {
        before: Arc<AtomicUsize>,
        after: Arc<AtomicUsize>,
        failed: Arc<Mutex<Vec<String>>>,
    }

    impl Plugin for Arc<CountingPlugin> {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn on_before_phase(&self, _phase: &str, _ctx: &PlanContext) {
            self.before.fetch_add(1, Ordering::SeqCst);
        }

        fn on_after_phase(&self, _phase: &str, _ctx: &PlanContext) {
            self.after.fetch_add(1, Ordering::SeqCst);
        }

        fn on_phase_failed(&self, phase: &str, ctx: &PlanContext, error: &eyre::Report) {
            self.failed
                .lock()
                .unwrap()
                .push(format!("{phase}: {error} ({} errors)", ctx.error_count()));
        }
    }

    fn profile_plan() -> Plan {
        Plan {
            use_cases: vec![UseCaseConfig::new("UpdateProfile")],
            entities: vec![EntityConfig::new("Profile", "profiles")],
            ..Plan::new()
        }
    }

    #[test]
    fn test_pipeline_resolves_and_orders() {
        let ctx = Pipeline::new().run(profile_plan()).unwrap();

        assert!(ctx.plan.has_repository("Profile"));
        assert_eq!(ctx.created_repositories, vec!["Profile"]);
        assert_eq!(
            ctx.order,
            vec!["Profile", "ProfileRepository", "UpdateProfileUseCase"]
        );
        assert!(!ctx.has_errors());
    }

    #[test]
    fn test_pipeline_plugin_hooks() {
        let counting = Arc::new(CountingPlugin::default());

        let pipeline = Pipeline::new().plugin(counting.clone()).plugin(TracingPlugin);
        pipeline.run(profile_plan()).unwrap();

        // 5 built-in phases = 5 before + 5 after hooks
        assert_eq!(counting.before.load(Ordering::SeqCst), 5);
        assert_eq!(counting.after.load(Ordering::SeqCst), 5);
        assert!(counting.failed.lock().unwrap().is_empty());
    }

    #[test]
    fn test_failed_phase_skips_after_hook() {
        let counting = Arc::new(CountingPlugin::default());
        let plan = Plan {
            use_cases: vec![UseCaseConfig::new("CreateOrder")],
            ..Plan::new()
        };

        let result = Pipeline::new().plugin(counting.clone()).run(plan);

        assert!(result.is_err());
        // validate passes; resolve fails on the missing entity
        assert_eq!(counting.before.load(Ordering::SeqCst), 2);
        assert_eq!(counting.after.load(Ordering::SeqCst), 1);
        assert_eq!(
            *counting.failed.lock().unwrap(),
            ["resolve: dependency resolution failed (1 errors)"]
        );
    }

    #[test]
    fn test_path_collision_stops_pipeline() {
        let plan = Plan {
            entities: vec![
                EntityConfig::new("Order", "orders"),
                EntityConfig::new("OrderRepository", "order_repositories"),
            ],
            repositories: vec![RepositoryConfig::new("Order", "orders")],
            ..Plan::new()
        };
        let mut ctx = PlanContext::new(plan);

        let err = Pipeline::new().run_on(&mut ctx).unwrap_err();

        assert_eq!(err.to_string(), "1 output path collision(s)");
        assert_eq!(ctx.errors().map(|d| d.phase).collect::<Vec<_>>(), ["paths"]);
    }

    #[test]
    fn test_user_phase_runs_after_builtins() {
        struct RequireOrder;
        impl Phase for RequireOrder {
            fn name(&self) -> &'static str {
                "require-order"
            }
            fn run(&self, ctx: &mut PlanContext) -> Result<()> {
                if ctx.order.is_empty() {
                    ctx.add_error(self.name(), "graph phase has not run");
                    eyre::bail!("no order");
                }
                Ok(())
            }
        }

        let ctx = Pipeline::new().phase(RequireOrder).run(profile_plan()).unwrap();
        assert!(!ctx.has_errors());
    }

    #[test]
    fn test_run_on_keeps_diagnostics_on_failure() {
        let plan = Plan {
            use_cases: vec![UseCaseConfig::new("CreateOrder")],
            ..Plan::new()
        };
        let mut ctx = PlanContext::new(plan);

        let err = Pipeline::new().run_on(&mut ctx).unwrap_err();

        assert!(format!("{err:#}").contains("entity 'Order' not found"));
        assert!(ctx.has_errors());
    }

    #[test]
    fn test_pipeline_default_database() {
        let ctx = Pipeline::new()
            .default_database(DatabaseType::Mysql)
            .run(profile_plan())
            .unwrap();

        assert_eq!(ctx.plan.repositories[0].db_type, DatabaseType::Mysql);
    }
}
