//! Template directory overrides

use crate::assert_generated_contains;
use crate::common::{TestProject, TestTarget};
use crate::fixtures;
use fastapi_codegen::{generate_quietly, Error, GenerateConfig};
use std::fs;
use std::path::Path;

fn write_template(root: &Path, name: &str, content: &str) {
    let path = root.join(name);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn config_with_templates(schema: &Path, target: &TestTarget, templates: &Path) -> GenerateConfig {
    GenerateConfig {
        template_root: Some(templates.to_string_lossy().to_string()),
        ..GenerateConfig::new(
            schema.to_string_lossy().to_string(),
            target.path_str(),
            "shop",
        )
    }
}

#[test]
fn test_override_replaces_single_template() {
    let project = TestProject::new();
    let schema = project.write_schema("schema.sql", fixtures::sql_schemas::USERS);
    let templates = project.path().join("templates");
    write_template(
        &templates,
        "src/project/routers/route.py.tera",
        "# {{ model.class_name }} keyed by {{ PRIMARY_KEY_NAME }}: {{ PRIMARY_KEY_TYPE }}\n",
    );
    let target = TestTarget::new();

    generate_quietly(&config_with_templates(&schema, &target, &templates)).unwrap();

    assert_eq!(
        target.read_file("src/shop/routers/users_route.py"),
        "# User keyed by id: UUID\n"
    );
    // Untouched templates still come from the bundle
    let services = target.read_file("src/shop/domain/users/user_services.py");
    assert_generated_contains!(services, "class UserServices:");
}

#[test]
fn test_override_can_replace_shared_header() {
    let project = TestProject::new();
    let schema = project.write_schema("schema.sql", fixtures::sql_schemas::USERS);
    let templates = project.path().join("templates");
    write_template(&templates, "common/header.tera", "# Property of {{ PROJECT_NAME }}\n");
    let target = TestTarget::new();

    generate_quietly(&config_with_templates(&schema, &target, &templates)).unwrap();

    let conftest = target.read_file("tests/conftest.py");
    assert!(conftest.starts_with("# Property of shop\n"));
}

#[test]
fn test_broken_override_aborts_the_run() {
    let project = TestProject::new();
    let schema = project.write_schema("schema.sql", fixtures::sql_schemas::USERS);
    let templates = project.path().join("templates");
    write_template(
        &templates,
        "src/project/domain/model/queries.py.tera",
        "{{ model.no_such_attribute }}\n",
    );
    let target = TestTarget::new();

    match generate_quietly(&config_with_templates(&schema, &target, &templates)) {
        Err(Error::Render {
            template, model, ..
        }) => {
            assert_eq!(template, "src/project/domain/model/queries.py.tera");
            assert_eq!(model.as_deref(), Some("users"));
        }
        other => panic!("Expected render error, got {:?}", other),
    }

    assert!(target.file_exists("src/shop/routers/users_route.py"));
    assert!(target.file_exists("src/shop/domain/users/user_services.py"));
    assert!(!target.file_exists("src/shop/domain/users/user_queries.py"));
    assert!(!target.file_exists("tests/conftest.py"));
}

#[test]
fn test_missing_template_directory() {
    let project = TestProject::new();
    let schema = project.write_schema("schema.sql", fixtures::sql_schemas::USERS);
    let target = TestTarget::new();

    let result = generate_quietly(&config_with_templates(
        &schema,
        &target,
        &project.path().join("no-templates"),
    ));
    assert!(matches!(result, Err(Error::Render { .. })));
    assert!(target.entries().is_empty());
}

#[test]
fn test_broken_template_directory_is_reported_before_cloning() {
    let project = TestProject::new();
    let schema = project.write_schema("schema.sql", fixtures::sql_schemas::USERS);
    let target = TestTarget::new();

    let config = GenerateConfig {
        repository_url: Some(
            project
                .path()
                .join("no-such-repository")
                .to_string_lossy()
                .to_string(),
        ),
        ..config_with_templates(&schema, &target, &project.path().join("no-templates"))
    };

    assert!(matches!(generate_quietly(&config), Err(Error::Render { .. })));
    assert!(target.entries().is_empty());
}
