//! Generation from JSON schema documents

use crate::assert_generated_contains;
use crate::common::{TestProject, TestTarget};
use crate::fixtures;
use fastapi_codegen::{Error, ParseError, SchemaAnalyzer, SchemaFormat};

#[test]
fn test_sql_and_json_describe_the_same_models() {
    let analyzer = SchemaAnalyzer::new();
    let from_sql = analyzer
        .analyze_source(fixtures::sql_schemas::USERS, SchemaFormat::Sql)
        .unwrap();
    let from_json = analyzer
        .analyze_source(fixtures::json_schemas::USERS, SchemaFormat::Json)
        .unwrap();

    assert_eq!(from_sql, from_json);
}

#[test]
fn test_sql_and_json_render_identical_projects() {
    let project = TestProject::new();
    let sql = project.write_schema("schema.sql", fixtures::sql_schemas::USERS);
    let json = project.write_schema("schema.json", fixtures::json_schemas::USERS);

    let sql_target = TestTarget::new();
    let json_target = TestTarget::new();
    sql_target.generate(&sql, "shop").unwrap();
    json_target.generate(&json, "shop").unwrap();

    assert_eq!(sql_target.snapshot(), json_target.snapshot());
}

#[test]
fn test_json_shop_with_name_overrides() {
    let project = TestProject::new();
    let schema = project.write_schema("shop.json", fixtures::json_schemas::SHOP);
    let target = TestTarget::new();

    target.generate(&schema, "shop").unwrap();

    assert!(target.file_exists("src/shop/routers/categories_route.py"));
    assert!(target.file_exists("src/shop/domain/categories/category_queries.py"));
    assert!(target.file_exists("src/shop/domain/products/product_schemas.py"));
    assert!(target.file_exists("tests/test_products/test_basic_positive.py"));

    let categories = target.read_file("src/shop/routers/categories_route.py");
    assert_generated_contains!(categories, "PRIMARY_KEY_TYPE = int");

    let product_schemas = target.read_file("src/shop/domain/products/product_schemas.py");
    assert_generated_contains!(product_schemas, "from decimal import Decimal");
    assert_generated_contains!(product_schemas, "price: Optional[Decimal] = None");
    assert_generated_contains!(product_schemas, "tags: Optional[dict] = None");
}

#[test]
fn test_order_without_primary_key_fails_before_writing() {
    let project = TestProject::new();
    let schema = project.write_schema(
        "orders.json",
        fixtures::json_schemas::ORDER_WITHOUT_PRIMARY_KEY,
    );
    let target = TestTarget::new();

    let error = target.generate(&schema, "shop").unwrap_err();
    match &error {
        Error::NoPrimaryKey { model } => assert_eq!(model, "orders"),
        other => panic!("Expected NoPrimaryKey, got {:?}", other),
    }
    assert!(error.to_string().contains("orders"));
    assert!(target.entries().is_empty());
}

#[test]
fn test_missing_field_type_is_reported() {
    let project = TestProject::new();
    let schema = project.write_schema("orders.json", fixtures::json_schemas::MISSING_TYPE);
    let target = TestTarget::new();

    match target.generate(&schema, "shop") {
        Err(Error::Parse {
            source: ParseError::MissingAttribute { entity, attribute },
            ..
        }) => {
            assert_eq!(entity, "Order");
            assert_eq!(attribute, "fields[0].type");
        }
        other => panic!("Expected MissingAttribute, got {:?}", other),
    }
    assert!(target.entries().is_empty());
}

#[test]
fn test_malformed_entity_is_named() {
    let project = TestProject::new();
    let schema = project.write_schema(
        "orders.json",
        r#"{"Order": {"fields": [{"name": 1, "type": "uuid"}]}}"#,
    );
    let target = TestTarget::new();

    let error = target.generate(&schema, "shop").unwrap_err();
    match &error {
        Error::Parse {
            source: ParseError::InvalidEntity { entity, .. },
            ..
        } => assert_eq!(entity, "Order"),
        other => panic!("Expected InvalidEntity, got {:?}", other),
    }
    assert!(error.to_string().contains("Order"));
    assert!(target.entries().is_empty());
}
