//! Lint for component and field naming conventions.

use tiergen_core::is_pascal_case;
use tiergen_ir::{Field, Plan};

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Lint that errors on component or field names that are not PascalCase.
///
/// Generated Go identifiers are exported, so every name must start with an
/// uppercase letter and contain only letters and digits.
pub struct ComponentNamingLint;

impl Lint for ComponentNamingLint {
    fn name(&self) -> &'static str {
        "component-naming"
    }

    fn check(&self, plan: &Plan, diagnostics: &mut Vec<Diagnostic>) {
        for entity in &plan.entities {
            check_name("entity", "entities", &entity.name, diagnostics);
            check_fields("entities", &entity.name, &entity.fields, diagnostics);
        }
        for repo in &plan.repositories {
            check_name("repository", "repositories", &repo.name, diagnostics);
        }
        for use_case in &plan.use_cases {
            check_name("use case", "usecases", &use_case.name, diagnostics);
            check_fields("usecases", &use_case.name, &use_case.input_fields, diagnostics);
            check_fields("usecases", &use_case.name, &use_case.output_fields, diagnostics);
        }
    }
}

fn check_name(kind: &str, section: &str, name: &str, diagnostics: &mut Vec<Diagnostic>) {
    if !is_pascal_case(name) {
        diagnostics.push(
            Diagnostic::error(
                "validate",
                format!("{kind} name '{name}' must be PascalCase (e.g. 'OrderItem')"),
            )
            .at(format!("{section}.{name}")),
        );
    }
}

fn check_fields(section: &str, owner: &str, fields: &[Field], diagnostics: &mut Vec<Diagnostic>) {
    for field in fields {
        if !is_pascal_case(&field.name) {
            diagnostics.push(
                Diagnostic::error(
                    "validate",
                    format!("field name '{}' must be PascalCase", field.name),
                )
                .at(format!("{section}.{owner}.{}", field.name)),
            );
        }
    }
}
