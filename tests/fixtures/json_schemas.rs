/// Fixture: JSON schema documents

pub const USERS: &str = r#"{
    "users": {
        "fields": [
            {"name": "id", "type": "uuid", "is_primary_key": true},
            {"name": "email", "type": "varchar", "nullable": false}
        ]
    }
}"#;

pub const SHOP: &str = r#"{
    "Category": {
        "plural": "categories",
        "fields": [
            {"name": "id", "type": "integer", "is_primary_key": true},
            {"name": "name", "type": "string", "nullable": false}
        ]
    },
    "Product": {
        "fields": [
            {"name": "id", "type": "uuid", "is_primary_key": true},
            {"name": "title", "type": "string", "nullable": false},
            {"name": "price", "type": "numeric"},
            {"name": "tags", "type": "object"}
        ]
    }
}"#;

pub const ORDER_WITHOUT_PRIMARY_KEY: &str = r#"{
    "Order": {
        "fields": [
            {"name": "total", "type": "numeric"},
            {"name": "placed_on", "type": "date"}
        ]
    }
}"#;

pub const MISSING_TYPE: &str = r#"{"Order": {"fields": [{"name": "total"}]}}"#;
