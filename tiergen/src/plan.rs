//! Building a [`Plan`] from command-line flags.

use std::{
    fs,
    path::{Path, PathBuf},
};

use clap::Args;
use eyre::{Context, Result, bail, eyre};
use tiergen_core::{is_pascal_case, pluralize, to_snake_case};
use tiergen_ir::{DatabaseType, EntityConfig, Field, Plan, RepositoryConfig, UseCaseConfig};
use tiergen_manifest::{CONFIG_FILE_NAME, Config, ConfigFile};

/// Component flags shared by `generate`, `check` and `graph`.
#[derive(Args, Debug, Clone, Default)]
pub struct PlanArgs {
    /// Entity to generate, e.g. "Order:ID:string;Total:float64:required"
    #[arg(short, long = "entity", value_name = "SPEC")]
    pub entities: Vec<String>,

    /// Repository to generate (a trailing "Repository" is ignored)
    #[arg(short, long = "repo", value_name = "NAME")]
    pub repositories: Vec<String>,

    /// Use case to generate (a trailing "UseCase" is ignored)
    #[arg(short, long = "usecase", value_name = "NAME")]
    pub use_cases: Vec<String>,

    /// Also generate tests for every component
    #[arg(short = 't', long)]
    pub with_tests: bool,

    /// Also generate a mock for every repository
    #[arg(short = 'm', long)]
    pub with_mocks: bool,

    /// Project root generated files are written under
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Path to tiergen.toml (defaults to <output>/tiergen.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Go module path (defaults to the module in <output>/go.mod)
    #[arg(long, value_name = "PATH")]
    pub module: Option<String>,
}

impl PlanArgs {
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| self.output.join(CONFIG_FILE_NAME))
    }

    /// Load the configuration, falling back to defaults when no file exists.
    ///
    /// An explicitly passed `--config` must exist.
    pub fn load_config(&self) -> tiergen_manifest::Result<Config> {
        match &self.config {
            Some(path) => tiergen_manifest::parse_file(path),
            None => match ConfigFile::open_if_exists(self.config_path())? {
                Some(file) => {
                    tracing::debug!(path = %file.path().display(), "loaded configuration");
                    Ok(file.into_config())
                }
                None => Ok(Config::default()),
            },
        }
    }

    /// Build the unresolved plan the flags describe.
    pub fn build_plan(&self, config: &Config) -> Result<Plan> {
        let database = config.generation.default_database;

        let entities = self
            .entities
            .iter()
            .map(|spec| parse_entity(spec).wrap_err_with(|| format!("invalid entity '{spec}'")))
            .collect::<Result<Vec<_>>>()?;
        let repositories = self
            .repositories
            .iter()
            .map(|name| parse_repository(name, database))
            .collect::<Result<Vec<_>>>()?;
        let use_cases = self
            .use_cases
            .iter()
            .map(|name| parse_use_case(name))
            .collect::<Result<Vec<_>>>()?;

        let module_path = match &self.module {
            Some(module) => module.clone(),
            None => discover_module(&self.output)?,
        };

        Ok(Plan {
            entities,
            repositories,
            use_cases,
            with_tests: self.with_tests,
            with_mocks: self.with_mocks,
            module_path,
            project_root: self.output.clone(),
        })
    }
}

fn ensure_pascal_case(kind: &str, name: &str) -> Result<()> {
    if !is_pascal_case(name) {
        bail!("{kind} name '{name}' must be PascalCase (e.g. 'OrderItem')");
    }
    Ok(())
}

fn table_name(name: &str) -> String {
    to_snake_case(&pluralize(name))
}

/// Parse `Name[:Field:type[:tags];...]`.
pub fn parse_entity(spec: &str) -> Result<EntityConfig> {
    let (name, fields) = match spec.split_once(':') {
        Some((name, fields)) => (name.trim(), parse_fields(fields)?),
        None => (spec.trim(), Vec::new()),
    };
    ensure_pascal_case("entity", name)?;

    Ok(EntityConfig {
        add_validation: true,
        add_comments: true,
        json_style: "snake_case".to_string(),
        ..EntityConfig::new(name, table_name(name)).with_fields(fields)
    })
}

/// Parse `;`-separated `Name:type[:tag,tag]` entries.
pub fn parse_fields(input: &str) -> Result<Vec<Field>> {
    input
        .split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| parse_field(entry).wrap_err_with(|| format!("invalid field '{entry}'")))
        .collect()
}

fn parse_field(entry: &str) -> Result<Field> {
    let parts: Vec<&str> = entry.split(':').map(str::trim).collect();
    let (name, ty, tags) = match parts.as_slice() {
        [name, ty] => (*name, *ty, None),
        [name, ty, tags] => (*name, *ty, Some(*tags)),
        _ => bail!("expected Name:type[:tags]"),
    };

    ensure_pascal_case("field", name)?;
    if ty.is_empty() || ty.contains(char::is_whitespace) {
        bail!("invalid type '{ty}'");
    }

    let mut field = Field::new(name, ty);
    field.json_tag = to_snake_case(name);
    field.db_tag = to_snake_case(name);

    for tag in tags.into_iter().flat_map(|t| t.split(',')).map(str::trim) {
        match tag {
            "" => continue,
            "required" => field.required = true,
            "unique" => field.unique = true,
            "index" => field.index = true,
            other => bail!("unknown tag '{other}' (expected required, unique or index)"),
        }
        field.tags.push(tag.to_string());
    }

    Ok(field)
}

pub fn parse_repository(name: &str, database: DatabaseType) -> Result<RepositoryConfig> {
    let name = strip_suffix(name.trim(), "Repository");
    ensure_pascal_case("repository", name)?;

    Ok(RepositoryConfig {
        db_type: database,
        with_transactions: true,
        add_comments: true,
        ..RepositoryConfig::new(name, table_name(name))
    })
}

pub fn parse_use_case(name: &str) -> Result<UseCaseConfig> {
    let name = strip_suffix(name.trim(), "UseCase");
    ensure_pascal_case("use case", name)?;

    Ok(UseCaseConfig {
        add_comments: true,
        ..UseCaseConfig::new(name)
    })
}

/// Remove `suffix` unless nothing would be left.
fn strip_suffix<'a>(name: &'a str, suffix: &str) -> &'a str {
    match name.strip_suffix(suffix) {
        Some(base) if !base.is_empty() => base,
        _ => name,
    }
}

/// Module path from `<root>/go.mod`, else the root directory's name.
pub fn discover_module(root: &Path) -> Result<String> {
    let go_mod = root.join("go.mod");
    if go_mod.is_file() {
        let content = fs::read_to_string(&go_mod)
            .wrap_err_with(|| format!("failed to read {}", go_mod.display()))?;
        if let Some(module) = parse_go_mod(&content) {
            return Ok(module);
        }
        tracing::warn!(path = %go_mod.display(), "go.mod has no module directive");
    }

    let root = std::path::absolute(root)
        .wrap_err_with(|| format!("failed to resolve {}", root.display()))?;
    root.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .ok_or_else(|| eyre!("cannot derive a module path from {}; pass --module", root.display()))
}

fn parse_go_mod(content: &str) -> Option<String> {
    content.lines().find_map(|line| {
        let module = line.trim().strip_prefix("module")?;
        if !module.starts_with(char::is_whitespace) {
            return None;
        }
        let module = module.trim().trim_matches('"');
        (!module.is_empty()).then(|| module.to_string())
    })
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_parse_entity_with_fields() {
        let entity = parse_entity("OrderItem:ID:string;UnitPrice:float64:required,index").unwrap();

        assert_eq!(entity.name, "OrderItem");
        assert_eq!(entity.table_name, "order_items");
        assert_eq!(entity.fields.len(), 2);

        let price = &entity.fields[1];
        assert_eq!(price.name, "UnitPrice");
        assert_eq!(price.ty, "float64");
        assert_eq!(price.json_tag, "unit_price");
        assert!(price.required && price.index && !price.unique);
        assert_eq!(price.tags, vec!["required", "index"]);
    }

    #[test]
    fn test_parse_entity_without_fields() {
        let entity = parse_entity("Category").unwrap();
        assert_eq!(entity.table_name, "categories");
        assert!(entity.fields.is_empty());
    }

    #[test]
    fn test_parse_entity_rejects_bad_input() {
        assert!(parse_entity("order").is_err());
        assert!(parse_entity("Order:id:string").is_err());
        assert!(parse_entity("Order:ID").is_err());
        assert!(parse_entity("Order:ID:string:primary").is_err());
    }

    #[test]
    fn test_parse_repository_strips_suffix() {
        let repo = parse_repository("OrderRepository", DatabaseType::Sqlite).unwrap();
        assert_eq!(repo.name, "Order");
        assert_eq!(repo.entity, "Order");
        assert_eq!(repo.table_name, "orders");
        assert_eq!(repo.db_type, DatabaseType::Sqlite);

        // Nothing left to strip to.
        assert_eq!(
            parse_repository("Repository", DatabaseType::Postgres)
                .unwrap()
                .name,
            "Repository"
        );
    }

    #[test]
    fn test_parse_use_case_strips_suffix() {
        assert_eq!(parse_use_case("CreateOrderUseCase").unwrap().name, "CreateOrder");
        assert!(parse_use_case("create_order").is_err());
    }

    #[test]
    fn test_parse_go_mod() {
        assert_eq!(
            parse_go_mod("// comment\nmodule example.com/shop\n\ngo 1.22\n").as_deref(),
            Some("example.com/shop")
        );
        assert_eq!(parse_go_mod("modules x\n"), None);
        assert_eq!(parse_go_mod("go 1.22\n"), None);
    }

    #[test]
    fn test_discover_module() {
        let temp = TempDir::new().unwrap();
        let project = temp.path().join("shop");
        fs::create_dir(&project).unwrap();

        assert_eq!(discover_module(&project).unwrap(), "shop");

        fs::write(project.join("go.mod"), "module github.com/acme/shop\n").unwrap();
        assert_eq!(discover_module(&project).unwrap(), "github.com/acme/shop");
    }

    #[test]
    fn test_build_plan() {
        let temp = TempDir::new().unwrap();
        let args = PlanArgs {
            entities: vec!["Order:Total:float64".to_string()],
            use_cases: vec!["CreateOrder".to_string()],
            with_tests: true,
            output: temp.path().to_path_buf(),
            module: Some("example.com/shop".to_string()),
            ..PlanArgs::default()
        };

        let plan = args.build_plan(&Config::default()).unwrap();

        assert_eq!(plan.entities.len(), 1);
        assert!(plan.repositories.is_empty());
        assert_eq!(plan.use_cases[0].name, "CreateOrder");
        assert!(plan.with_tests);
        assert_eq!(plan.module_path, "example.com/shop");
        assert_eq!(plan.project_root, temp.path());
    }

    #[test]
    fn test_load_config_defaults_without_file() {
        let temp = TempDir::new().unwrap();
        let args = PlanArgs {
            output: temp.path().to_path_buf(),
            ..PlanArgs::default()
        };

        assert_eq!(args.load_config().unwrap(), Config::default());

        let explicit = PlanArgs {
            config: Some(temp.path().join("missing.toml")),
            ..args
        };
        assert!(explicit.load_config().is_err());
    }
}
