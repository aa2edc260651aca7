//! Snapshot tests for the Go renderer.
//!
//! Run `cargo insta review` to update snapshots when making intentional changes.

use tiergen_codegen::render::{GoRenderer, Renderer};
use tiergen_ir::{Dependency, EntityConfig, Field, Plan, RepositoryConfig, UseCaseConfig};
use tiergen_manifest::Config;

fn renderer() -> GoRenderer {
    GoRenderer::new(&Config::default())
}

fn plan() -> Plan {
    Plan {
        module_path: "example.com/shop".to_string(),
        ..Plan::new()
    }
}

fn order_repository() -> RepositoryConfig {
    RepositoryConfig::new("Order", "orders")
}

#[test]
fn test_entity_with_validation() {
    let mut total = Field::new("Total", "float64");
    total.required = true;
    let entity = EntityConfig {
        add_validation: true,
        ..EntityConfig::new("Order", "orders")
            .with_fields(vec![Field::new("ID", "string"), total])
    };

    let entity = renderer().render_entity(&entity, &plan()).unwrap();
    insta::assert_snapshot!("order_entity", entity);
}

#[test]
fn test_repository_interface() {
    let interface = renderer()
        .render_repository_interface(&order_repository(), &plan())
        .unwrap();
    insta::assert_snapshot!("order_repository_interface", interface);
}

#[test]
fn test_repository_implementation() {
    let implementation = renderer()
        .render_repository(&order_repository(), &plan())
        .unwrap();
    insta::assert_snapshot!("order_repository", implementation);
}

#[test]
fn test_use_case() {
    let use_case = UseCaseConfig {
        input_fields: vec![Field::new("CustomerID", "string")],
        output_fields: vec![Field::new("OrderID", "string")],
        ..UseCaseConfig::new("CreateOrder").with_dependency(Dependency::repository("Order", true))
    };

    let use_case = renderer().render_use_case(&use_case, &plan()).unwrap();
    insta::assert_snapshot!("create_order_usecase", use_case);
}

#[test]
fn test_mock() {
    let mock = renderer().render_mock(&order_repository(), &plan()).unwrap();
    insta::assert_snapshot!("order_repository_mock", mock);
}

#[test]
fn test_use_case_test() {
    let use_case = UseCaseConfig::new("CreateOrder")
        .with_dependency(Dependency::repository("Order", true));

    let test = renderer().render_use_case_test(&use_case, &plan()).unwrap();
    insta::assert_snapshot!("create_order_usecase_test", test);
}
