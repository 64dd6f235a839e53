//! Integration tests for complete end-to-end runs through `GenerateConfig`

use crate::common::{TestProject, TestTarget};
use crate::fixtures;
use fastapi_codegen::{
    generate, generate_quietly, Error, GenerateConfig, Logger, SchemaAnalyzer, SchemaFormat,
    TemplateSource,
};
use std::fs;

fn expected_layout(project: &str, plural: &str, singular: &str) -> Vec<String> {
    let mut entries = vec![
        "src".to_string(),
        format!("src/{project}"),
        format!("src/{project}/__init__.py"),
        format!("src/{project}/core"),
        format!("src/{project}/core/service_factory.py"),
        format!("src/{project}/domain"),
        format!("src/{project}/domain/base_schemas.py"),
        format!("src/{project}/domain/{plural}"),
        format!("src/{project}/domain/{plural}/{singular}_model.py"),
        format!("src/{project}/domain/{plural}/{singular}_queries.py"),
        format!("src/{project}/domain/{plural}/{singular}_schemas.py"),
        format!("src/{project}/domain/{plural}/{singular}_services.py"),
        format!("src/{project}/routers"),
        format!("src/{project}/routers/{plural}_route.py"),
        "tests".to_string(),
        "tests/conftest.py".to_string(),
        format!("tests/test_{plural}"),
        format!("tests/test_{plural}/__init__.py"),
        format!("tests/test_{plural}/test_basic_positive.py"),
        format!("tests/test_{plural}/test_destructive.py"),
        format!("tests/test_{plural}/test_extended_positive.py"),
        format!("tests/test_{plural}/test_invalid_input_negative.py"),
        format!("tests/test_{plural}/test_valid_input_negative.py"),
        "tests/utils.py".to_string(),
    ];
    entries.sort();
    entries
}

#[test]
fn test_output_layout_is_exact() {
    let project = TestProject::new();
    let schema = project.write_schema("schema.sql", fixtures::sql_schemas::USERS);
    let target = TestTarget::new();

    let files = target.generate(&schema, "shop").unwrap();

    assert_eq!(target.entries(), expected_layout("shop", "users", "user"));
    assert_eq!(files.len(), 16);
    assert_eq!(files[0], "src/shop/routers/users_route.py");
    assert_eq!(files[files.len() - 1], "src/shop/__init__.py");
}

#[test]
fn test_missing_target_performs_no_writes() {
    let project = TestProject::new();
    let schema = project.write_schema("schema.sql", fixtures::sql_schemas::USERS);
    let target = project.path().join("does-not-exist");
    let before = fs::read_dir(project.path()).unwrap().count();

    let config = GenerateConfig::new(
        schema.to_string_lossy().to_string(),
        target.to_string_lossy().to_string(),
        "shop",
    );
    let error = generate_quietly(&config).unwrap_err();

    assert!(matches!(error, Error::TargetDirectoryMissing(_)));
    assert!(error
        .to_string()
        .starts_with("The target directory does not exist. Please try again with a different target path."));
    assert!(!target.exists());
    assert_eq!(fs::read_dir(project.path()).unwrap().count(), before);
}

#[test]
fn test_second_run_is_idempotent() {
    let project = TestProject::new();
    let schema = project.write_schema("shop.sql", fixtures::sql_schemas::SHOP);
    let target = TestTarget::new();

    let first_files = target.generate(&schema, "shop").unwrap();
    let first = target.snapshot();

    let second_files = target.generate(&schema, "shop").unwrap();
    let second = target.snapshot();

    assert_eq!(first_files, second_files);
    assert_eq!(first, second);
}

#[test]
fn test_existing_files_outside_the_layout_survive() {
    let project = TestProject::new();
    let schema = project.write_schema("schema.sql", fixtures::sql_schemas::USERS);
    let target = TestTarget::new();
    fs::create_dir(target.path().join("tests")).unwrap();
    fs::write(target.path().join("tests/keep_me.py"), "# mine\n").unwrap();

    target.generate(&schema, "shop").unwrap();

    assert_eq!(target.read_file("tests/keep_me.py"), "# mine\n");
    assert!(target.file_exists("tests/conftest.py"));
}

#[test]
fn test_invalid_project_name_is_rejected_before_writing() {
    let project = TestProject::new();
    let schema = project.write_schema("schema.sql", fixtures::sql_schemas::USERS);
    let target = TestTarget::new();

    match target.generate(&schema, "my-shop") {
        Err(Error::InvalidProjectName(name)) => assert_eq!(name, "my-shop"),
        other => panic!("Expected InvalidProjectName, got {:?}", other),
    }
    assert!(target.entries().is_empty());
}

#[test]
fn test_library_entry_point_rejects_path_like_project_names() {
    let models = SchemaAnalyzer::new()
        .analyze_source(fixtures::sql_schemas::USERS, SchemaFormat::Sql)
        .unwrap();
    let target = TestTarget::new();

    for name in ["../escaped", "../../x"] {
        let result = generate(
            &models,
            &TemplateSource::Bundled,
            target.path(),
            name,
            Logger::new(false, false),
        );
        assert!(matches!(result, Err(Error::InvalidProjectName(_))));
    }
    assert!(target.entries().is_empty());
}

#[test]
fn test_file_blocking_a_folder_is_reported_with_its_path() {
    let project = TestProject::new();
    let schema = project.write_schema("schema.sql", fixtures::sql_schemas::USERS);
    let target = TestTarget::new();
    fs::write(target.path().join("tests"), "not a folder").unwrap();

    let error = target.generate(&schema, "shop").unwrap_err();
    match &error {
        Error::Write { path, .. } => assert_eq!(path, &target.path().join("tests")),
        other => panic!("Expected write error, got {:?}", other),
    }
    assert!(error.to_string().contains("tests"));
    assert_eq!(target.read_file("tests"), "not a folder");
}

#[test]
fn test_unsupported_schema_extension() {
    let project = TestProject::new();
    let schema = project.write_schema("schema.yaml", "users: {}");
    let target = TestTarget::new();

    assert!(matches!(
        target.generate(&schema, "shop"),
        Err(Error::Parse { .. })
    ));
    assert!(target.entries().is_empty());
}

#[test]
fn test_uppercase_extension_is_accepted() {
    let project = TestProject::new();
    let schema = project.write_schema("SCHEMA.SQL", fixtures::sql_schemas::USERS);
    let target = TestTarget::new();

    assert!(target.generate(&schema, "shop").is_ok());
}

#[test]
fn test_config_file_drives_generation() {
    let project = TestProject::new();
    let schema = project.write_schema("schema.json", fixtures::json_schemas::USERS);
    let target = TestTarget::new();

    let config_path = project.path().join("codegen.json");
    GenerateConfig::new(
        schema.to_string_lossy().to_string(),
        target.path_str(),
        "inventory",
    )
    .save_to_file(&config_path)
    .unwrap();

    let mut config = GenerateConfig::from_file(&config_path).unwrap();
    config.merge(&GenerateConfig::default());
    generate_quietly(&config).unwrap();

    assert!(target.file_exists("src/inventory/routers/users_route.py"));
}
