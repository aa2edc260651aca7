//! Go skeleton renderer.

use eyre::Result;
use tiergen_core::{to_camel_case, to_snake_case};
use tiergen_ir::{
    ComponentKind, Dependency, EntityConfig, Field, Plan, RepositoryConfig, UseCaseConfig,
};
use tiergen_manifest::{Config, PathsConfig};

use super::Renderer;
use crate::{
    builder::CodeBuilder,
    dependency::{REPOSITORY_SUFFIX, USE_CASE_SUFFIX},
};

const UUID_IMPORT: &str = "github.com/google/uuid";

/// Renders compact, compilable Go skeletons for each layer.
///
/// Package names and import paths come from the configured output
/// directories and the plan's module path.
#[derive(Debug, Clone)]
pub struct GoRenderer {
    paths: PathsConfig,
    separate_interfaces: bool,
    add_comments: bool,
}

impl GoRenderer {
    pub fn new(config: &Config) -> Self {
        Self {
            paths: config.paths.clone(),
            separate_interfaces: config.generation.separate_interfaces,
            add_comments: config.generation.add_comments,
        }
    }

    fn domain_package(&self) -> String {
        package_name(&self.paths.domain)
    }

    fn repository_package(&self) -> String {
        package_name(&self.paths.repository)
    }

    /// Type a repository dependency is injected as outside its own package.
    fn repository_type(&self, name: &str) -> String {
        if self.separate_interfaces {
            format!("{}.{}", self.domain_package(), name)
        } else {
            format!("*{}.{}", self.repository_package(), name)
        }
    }

    fn comments(&self, component_flag: bool) -> bool {
        self.add_comments || component_flag
    }
}

/// Package clause for a directory: its last segment.
fn package_name(dir: &str) -> String {
    dir.rsplit('/')
        .find(|segment| !segment.is_empty())
        .map(|segment| segment.replace(['-', '.'], "_"))
        .unwrap_or_else(|| "main".to_string())
}

fn import_path(plan: &Plan, dir: &str) -> String {
    let dir = dir.trim_matches('/');
    if plan.module_path.is_empty() {
        dir.to_string()
    } else {
        format!("{}/{}", plan.module_path.trim_end_matches('/'), dir)
    }
}

/// Write the package clause and a grouped import block.
fn push_header(b: &mut CodeBuilder, package: &str, std: &[&str], external: &[String]) {
    b.push_line(&format!("package {package}"));

    let mut std = std.to_vec();
    std.sort_unstable();
    std.dedup();

    match (std.as_slice(), external) {
        ([], []) => {}
        ([single], []) => {
            b.push_blank().push_line(&format!("import \"{single}\""));
        }
        _ => {
            b.push_blank().push_line("import (").push_indent();
            for path in &std {
                b.push_line(&format!("\"{path}\""));
            }
            if !std.is_empty() && !external.is_empty() {
                b.push_blank();
            }
            for path in external {
                b.push_line(&format!("\"{path}\""));
            }
            b.push_dedent().push_line(")");
        }
    }
}

/// A method shared by the repository interface, implementation and mock.
struct GoMethod {
    name: String,
    comment: String,
    params: Vec<(String, String)>,
    returns: Vec<String>,
}

impl GoMethod {
    fn new(name: &str, params: &[(&str, &str)], returns: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            comment: String::new(),
            params: params
                .iter()
                .map(|(n, t)| (n.to_string(), t.to_string()))
                .collect(),
            returns: returns.iter().map(|r| r.to_string()).collect(),
        }
    }

    fn params(&self) -> String {
        self.params
            .iter()
            .map(|(name, ty)| format!("{name} {ty}"))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn signature(&self) -> String {
        let params = self.params();
        match self.returns.as_slice() {
            [] => format!("{}({})", self.name, params),
            [single] => format!("{}({}) {}", self.name, params, single),
            many => format!("{}({}) ({})", self.name, params, many.join(", ")),
        }
    }

    fn func_type(&self) -> String {
        let params = self.params();
        match self.returns.as_slice() {
            [] => format!("func({params})"),
            [single] => format!("func({params}) {single}"),
            many => format!("func({}) ({})", params, many.join(", ")),
        }
    }

    fn args(&self) -> String {
        self.params
            .iter()
            .map(|(name, _)| name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// `return` statement of a stub body, `None` when nothing is returned.
    fn stub_return(&self, err: &str) -> Option<String> {
        if self.returns.is_empty() {
            return None;
        }
        let values: Vec<String> = self.returns.iter().map(|ty| zero_value(ty, err)).collect();
        Some(format!("return {}", values.join(", ")))
    }
}

/// Standard CRUD methods followed by the repository's custom methods.
///
/// `entity` is the entity type as seen from the rendering package.
fn repository_methods(repo: &RepositoryConfig, entity: &str) -> Vec<GoMethod> {
    let ptr = format!("*{entity}");
    let list = format!("[]*{entity}");

    let mut methods = vec![
        GoMethod::new(
            "Create",
            &[("ctx", "context.Context"), ("entity", ptr.as_str())],
            &["error"],
        ),
        GoMethod::new(
            "GetByID",
            &[("ctx", "context.Context"), ("id", "string")],
            &[ptr.as_str(), "error"],
        ),
        GoMethod::new(
            "Update",
            &[("ctx", "context.Context"), ("entity", ptr.as_str())],
            &["error"],
        ),
        GoMethod::new(
            "Delete",
            &[("ctx", "context.Context"), ("id", "string")],
            &["error"],
        ),
        GoMethod::new(
            "List",
            &[
                ("ctx", "context.Context"),
                ("limit", "int"),
                ("offset", "int"),
            ],
            &[list.as_str(), "error"],
        ),
    ];

    for custom in &repo.custom_methods {
        let mut params = vec![("ctx".to_string(), "context.Context".to_string())];
        params.extend(custom.params.iter().map(|p| (p.name.clone(), p.ty.clone())));
        methods.push(GoMethod {
            name: custom.name.clone(),
            comment: custom.comment.clone(),
            params,
            returns: custom.returns.clone(),
        });
    }

    methods
}

/// Go zero value for a type name; `err` stands in for `error` slots.
fn zero_value(ty: &str, err: &str) -> String {
    match ty {
        "error" => err.to_string(),
        "string" => "\"\"".to_string(),
        "bool" => "false".to_string(),
        "int" | "int8" | "int16" | "int32" | "int64" | "uint" | "uint8" | "uint16" | "uint32"
        | "uint64" | "float32" | "float64" | "byte" | "rune" => "0".to_string(),
        "uuid.UUID" => "uuid.Nil".to_string(),
        "any" | "interface{}" => "nil".to_string(),
        t if t.starts_with('*')
            || t.starts_with("[]")
            || t.starts_with("map[")
            || t.starts_with("chan ")
            || t.starts_with("func(") =>
        {
            "nil".to_string()
        }
        t => format!("{t}{{}}"),
    }
}

/// Condition that holds when a required field is unset.
fn missing_check(receiver: &str, field: &Field) -> String {
    let access = format!("{receiver}.{}", field.name);
    match field.ty.as_str() {
        "time.Time" => format!("{access}.IsZero()"),
        "bool" => format!("!{access}"),
        _ => format!("{access} == {}", field.zero_value()),
    }
}

fn json_name(field: &Field, style: &str) -> String {
    if !field.json_tag.is_empty() {
        return field.json_tag.clone();
    }
    match style {
        "camel" | "camelCase" => to_camel_case(&field.name),
        _ => to_snake_case(&field.name),
    }
}

fn db_name(field: &Field) -> String {
    if field.db_tag.is_empty() {
        to_snake_case(&field.name)
    } else {
        field.db_tag.clone()
    }
}

fn push_fields(b: &mut CodeBuilder, fields: &[Field], tag: impl Fn(&Field) -> String) {
    for field in fields {
        if !field.comment.is_empty() {
            b.push_comment(&field.comment);
        }
        b.push_line(&format!("{} {} `{}`", field.name, field.ty, tag(field)));
    }
}

/// Constructor parameters a use-case receives: `(field name, Go type)`.
fn injected(renderer: &GoRenderer, use_case: &UseCaseConfig) -> Vec<(String, String)> {
    let mut deps: Vec<(String, String)> = use_case
        .dependencies
        .iter()
        .filter_map(|dep| injected_dependency(renderer, dep))
        .collect();
    if use_case.with_logging {
        deps.push(("logger".to_string(), "*slog.Logger".to_string()));
    }
    deps
}

fn injected_dependency(renderer: &GoRenderer, dep: &Dependency) -> Option<(String, String)> {
    match dep.kind {
        ComponentKind::Repository => {
            let base = dep.name.strip_suffix(REPOSITORY_SUFFIX).unwrap_or(&dep.name);
            let name = format!("{base}{REPOSITORY_SUFFIX}");
            Some((to_camel_case(&name), renderer.repository_type(&name)))
        }
        ComponentKind::UseCase => {
            let base = dep.name.strip_suffix(USE_CASE_SUFFIX).unwrap_or(&dep.name);
            let name = format!("{base}{USE_CASE_SUFFIX}");
            Some((to_camel_case(&name), format!("*{name}")))
        }
        _ => None,
    }
}

impl Renderer for GoRenderer {
    fn render_entity(&self, entity: &EntityConfig, _plan: &Plan) -> Result<String> {
        let comments = self.comments(entity.add_comments);
        let required: Vec<&Field> = entity.required_fields().collect();
        let validate = entity.add_validation && !required.is_empty();

        let mut std = Vec::new();
        if validate {
            std.push("errors");
        }
        if entity.has_time_field() {
            std.push("time");
        }
        let mut external = Vec::new();
        if entity.has_uuid_field() {
            external.push(UUID_IMPORT.to_string());
        }

        let mut b = CodeBuilder::go();
        push_header(&mut b, &self.domain_package(), &std, &external);
        b.push_blank();
        if comments {
            if entity.table_name.is_empty() {
                b.push_comment(&format!("{} is a domain entity.", entity.name));
            } else {
                b.push_comment(&format!(
                    "{} is stored in the {} table.",
                    entity.name, entity.table_name
                ));
            }
        }
        b.push_line(&format!("type {} struct {{", entity.name))
            .push_indent();
        push_fields(&mut b, &entity.fields, |f| {
            format!(
                "json:\"{}\" db:\"{}\"",
                json_name(f, &entity.json_style),
                db_name(f)
            )
        });
        b.push_dedent().push_line("}");

        if validate {
            b.push_blank();
            if comments {
                b.push_comment("Validate reports the first required field that is unset.");
            }
            b.push_line(&format!("func (e *{}) Validate() error {{", entity.name))
                .push_indent();
            for field in &required {
                b.push_line(&format!("if {} {{", missing_check("e", field)))
                    .push_indent()
                    .push_line(&format!(
                        "return errors.New(\"{} is required\")",
                        db_name(field)
                    ))
                    .push_dedent()
                    .push_line("}");
            }
            b.push_line("return nil").push_dedent().push_line("}");
        }

        Ok(b.build())
    }

    fn render_repository_interface(&self, repo: &RepositoryConfig, _plan: &Plan) -> Result<String> {
        let name = repo.qualified_name();
        let methods = repository_methods(repo, &repo.entity);

        let mut b = CodeBuilder::go();
        push_header(&mut b, &self.domain_package(), &["context"], &[]);
        b.push_blank();
        if self.comments(repo.add_comments) {
            b.push_comment(&format!(
                "{} defines persistence operations for {}.",
                name, repo.entity
            ));
        }
        b.push_line(&format!("type {name} interface {{")).push_indent();
        for method in &methods {
            if !method.comment.is_empty() {
                b.push_comment(&method.comment);
            }
            b.push_line(&method.signature());
        }
        b.push_dedent().push_line("}");

        Ok(b.build())
    }

    fn render_repository(&self, repo: &RepositoryConfig, plan: &Plan) -> Result<String> {
        let comments = self.comments(repo.add_comments);
        let domain = self.domain_package();
        let interface = repo.qualified_name();
        let ty = if self.separate_interfaces {
            to_camel_case(&interface)
        } else {
            interface.clone()
        };
        let returns = if self.separate_interfaces {
            format!("{domain}.{interface}")
        } else {
            format!("*{ty}")
        };
        let methods = repository_methods(repo, &format!("{domain}.{}", repo.entity));

        let mut b = CodeBuilder::go();
        push_header(
            &mut b,
            &self.repository_package(),
            &["context", "database/sql", "errors"],
            &[import_path(plan, &self.paths.domain)],
        );
        b.push_blank();
        if comments {
            b.push_comment(&format!(
                "{} stores {} rows in {} ({}).",
                ty, repo.entity, repo.table_name, repo.db_type
            ));
        }
        b.push_line(&format!("type {ty} struct {{"))
            .push_indent()
            .push_line("db *sql.DB");
        if repo.with_transactions {
            b.push_line("tx *sql.Tx");
        }
        b.push_dedent().push_line("}").push_blank();

        if comments {
            b.push_comment(&format!("New{interface} returns a {} {}.", repo.db_type, returns));
        }
        b.push_line(&format!(
            "func New{interface}(db *sql.DB) {returns} {{"
        ))
        .push_indent()
        .push_line(&format!("return &{ty}{{db: db}}"))
        .push_dedent()
        .push_line("}");

        if repo.with_transactions {
            b.push_blank();
            if comments {
                b.push_comment("WithTx returns a copy of the repository bound to tx.");
            }
            b.push_line(&format!("func (r *{ty}) WithTx(tx *sql.Tx) *{ty} {{"))
                .push_indent()
                .push_line(&format!("return &{ty}{{db: r.db, tx: tx}}"))
                .push_dedent()
                .push_line("}");
        }

        for method in &methods {
            let err = format!("errors.New(\"{}.{}: not implemented\")", ty, method.name);
            b.push_blank()
                .push_line(&format!("func (r *{ty}) {} {{", method.signature()))
                .push_indent();
            match method.stub_return(&err) {
                Some(ret) => b.push_line(&ret),
                None => b.push_line(&format!("panic({err})")),
            };
            b.push_dedent().push_line("}");
        }

        Ok(b.build())
    }

    fn render_use_case(&self, use_case: &UseCaseConfig, plan: &Plan) -> Result<String> {
        let comments = self.comments(use_case.add_comments);
        let name = use_case.qualified_name();
        let input = format!("{}Input", use_case.name);
        let output = format!("{}Output", use_case.name);
        let deps = injected(self, use_case);

        let mut std = vec!["context", "errors"];
        if use_case.with_logging {
            std.push("log/slog");
        }
        let mut external = Vec::new();
        if use_case
            .dependencies
            .iter()
            .any(|d| d.kind == ComponentKind::Repository)
        {
            let dir = if self.separate_interfaces {
                &self.paths.domain
            } else {
                &self.paths.repository
            };
            external.push(import_path(plan, dir));
        }

        let mut b = CodeBuilder::go();
        push_header(&mut b, &package_name(&self.paths.usecase), &std, &external);

        for (ty, fields, role) in [
            (&input, &use_case.input_fields, "parameters"),
            (&output, &use_case.output_fields, "result"),
        ] {
            b.push_blank();
            if comments {
                b.push_comment(&format!("{ty} carries the {role} of {name}."));
            }
            b.push_line(&format!("type {ty} struct {{")).push_indent();
            push_fields(&mut b, fields, |f| {
                format!("json:\"{}\"", json_name(f, "snake_case"))
            });
            b.push_dedent().push_line("}");
        }

        b.push_blank();
        if comments {
            if use_case.description.is_empty() {
                b.push_comment(&format!(
                    "{name} implements the {} use case.",
                    use_case.name
                ));
            } else {
                b.push_comment(&format!("{name} {}", use_case.description));
            }
        }
        b.push_line(&format!("type {name} struct {{")).push_indent();
        for (field, ty) in &deps {
            b.push_line(&format!("{field} {ty}"));
        }
        b.push_dedent().push_line("}").push_blank();

        let params = deps
            .iter()
            .map(|(field, ty)| format!("{field} {ty}"))
            .collect::<Vec<_>>()
            .join(", ");
        if comments {
            b.push_comment(&format!("New{name} wires {name} with its dependencies."));
        }
        b.push_line(&format!("func New{name}({params}) *{name} {{"))
            .push_indent();
        if deps.is_empty() {
            b.push_line(&format!("return &{name}{{}}"));
        } else {
            b.push_line(&format!("return &{name}{{")).push_indent();
            for (field, _) in &deps {
                b.push_line(&format!("{field}: {field},"));
            }
            b.push_dedent().push_line("}");
        }
        b.push_dedent().push_line("}").push_blank();

        if comments {
            b.push_comment("Execute runs the use case.");
        }
        b.push_line(&format!(
            "func (uc *{name}) Execute(ctx context.Context, input {input}) (*{output}, error) {{"
        ))
        .push_indent()
        .push_line(&format!(
            "return nil, errors.New(\"{name}: not implemented\")"
        ))
        .push_dedent()
        .push_line("}");

        Ok(b.build())
    }

    fn render_mock(&self, repo: &RepositoryConfig, plan: &Plan) -> Result<String> {
        let domain = self.domain_package();
        let interface = repo.qualified_name();
        let mock = format!("{interface}Mock");
        let methods = repository_methods(repo, &format!("{domain}.{}", repo.entity));

        let mut b = CodeBuilder::go();
        push_header(
            &mut b,
            &package_name(&self.paths.mocks),
            &["context"],
            &[import_path(plan, &self.paths.domain)],
        );
        b.push_blank();

        if self.separate_interfaces {
            b.push_line(&format!("var _ {domain}.{interface} = (*{mock})(nil)"))
                .push_blank();
        }

        if self.comments(repo.add_comments) {
            b.push_comment(&format!(
                "{mock} delegates each method of {interface} to a function field."
            ));
        }
        b.push_line(&format!("type {mock} struct {{")).push_indent();
        for method in &methods {
            b.push_line(&format!("{}Func {}", method.name, method.func_type()));
        }
        b.push_dedent().push_line("}");

        for method in &methods {
            let call = format!("m.{}Func({})", method.name, method.args());
            b.push_blank()
                .push_line(&format!("func (m *{mock}) {} {{", method.signature()))
                .push_indent();
            if method.returns.is_empty() {
                b.push_line(&call);
            } else {
                b.push_line(&format!("return {call}"));
            }
            b.push_dedent().push_line("}");
        }

        Ok(b.build())
    }

    fn render_entity_test(&self, entity: &EntityConfig, _plan: &Plan) -> Result<String> {
        let validate = entity.add_validation && entity.required_fields().next().is_some();
        let name = &entity.name;

        let mut b = CodeBuilder::go();
        push_header(
            &mut b,
            &self.domain_package(),
            &["encoding/json", "testing"],
            &[],
        );

        b.push_blank()
            .push_line(&format!("func Test{name}_JSON(t *testing.T) {{"))
            .push_indent()
            .push_line(&format!("if _, err := json.Marshal({name}{{}}); err != nil {{"))
            .push_indent()
            .push_line(&format!("t.Fatalf(\"marshal {name}: %v\", err)"))
            .push_dedent()
            .push_line("}")
            .push_dedent()
            .push_line("}");

        if validate {
            b.push_blank()
                .push_line(&format!("func Test{name}_Validate(t *testing.T) {{"))
                .push_indent()
                .push_line(&format!("var entity {name}"))
                .push_line("if err := entity.Validate(); err == nil {")
                .push_indent()
                .push_line(&format!("t.Fatal(\"expected an error for a zero {name}\")"))
                .push_dedent()
                .push_line("}")
                .push_dedent()
                .push_line("}");
        }

        Ok(b.build())
    }

    fn render_repository_test(&self, repo: &RepositoryConfig, _plan: &Plan) -> Result<String> {
        let constructor = format!("New{}", repo.qualified_name());

        let mut b = CodeBuilder::go();
        push_header(&mut b, &self.repository_package(), &["testing"], &[]);
        b.push_blank()
            .push_line(&format!("func Test{constructor}(t *testing.T) {{"))
            .push_indent()
            .push_line(&format!("if {constructor}(nil) == nil {{"))
            .push_indent()
            .push_line(&format!("t.Fatal(\"{constructor} returned nil\")"))
            .push_dedent()
            .push_line("}")
            .push_dedent()
            .push_line("}");

        Ok(b.build())
    }

    fn render_use_case_test(&self, use_case: &UseCaseConfig, _plan: &Plan) -> Result<String> {
        let name = use_case.qualified_name();
        let args = vec!["nil"; injected(self, use_case).len()].join(", ");

        let mut b = CodeBuilder::go();
        push_header(
            &mut b,
            &package_name(&self.paths.usecase),
            &["context", "testing"],
            &[],
        );
        b.push_blank()
            .push_line(&format!("func Test{name}_Execute(t *testing.T) {{"))
            .push_indent()
            .push_line(&format!("uc := New{name}({args})"))
            .push_line(&format!(
                "if _, err := uc.Execute(context.Background(), {}Input{{}}); err == nil {{",
                use_case.name
            ))
            .push_indent()
            .push_line("t.Fatal(\"expected an error from the generated stub\")")
            .push_dedent()
            .push_line("}")
            .push_dedent()
            .push_line("}");

        Ok(b.build())
    }
}
