pub mod json_schemas;
pub mod sql_schemas;
