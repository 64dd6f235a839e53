use crate::{Error, Result};

/// One row of the canonical vocabulary: source token, Python annotation and
/// SQLAlchemy column type used by the rendered templates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeMapping {
    pub token: &'static str,
    pub python_type: &'static str,
    pub column_type: &'static str,
}

const fn mapping(
    token: &'static str,
    python_type: &'static str,
    column_type: &'static str,
) -> TypeMapping {
    TypeMapping {
        token,
        python_type,
        column_type,
    }
}

/// Every token either parser may emit must appear here
pub const TYPE_MAPPINGS: &[TypeMapping] = &[
    mapping("uuid", "UUID", "UUID"),
    mapping("integer", "int", "Integer"),
    mapping("smallint", "int", "Integer"),
    mapping("serial", "int", "Integer"),
    mapping("bigint", "int", "BigInteger"),
    mapping("bigserial", "int", "BigInteger"),
    mapping("varchar", "str", "String"),
    mapping("char", "str", "String"),
    mapping("text", "str", "Text"),
    mapping("boolean", "bool", "Boolean"),
    mapping("float", "float", "Float"),
    mapping("real", "float", "Float"),
    mapping("double", "float", "Float"),
    mapping("numeric", "Decimal", "Numeric"),
    mapping("decimal", "Decimal", "Numeric"),
    mapping("date", "date", "Date"),
    mapping("time", "time", "Time"),
    mapping("timestamp", "datetime", "DateTime"),
    mapping("json", "dict", "JSON"),
    mapping("jsonb", "dict", "JSON"),
    mapping("bytea", "bytes", "LargeBinary"),
    mapping("blob", "bytes", "LargeBinary"),
];

/// Maps canonical type tokens to the Python types used inside templates
#[derive(Debug, Default, Clone, Copy)]
pub struct TypeTranslator;

impl TypeTranslator {
    pub fn new() -> Self {
        Self
    }

    fn lookup(&self, type_name: &str) -> Option<&'static TypeMapping> {
        TYPE_MAPPINGS.iter().find(|m| m.token == type_name)
    }

    pub fn is_known(&self, type_name: &str) -> bool {
        self.lookup(type_name).is_some()
    }

    /// Translate a token to its Python type. Tokens are case-sensitive.
    pub fn translate(&self, type_name: &str) -> Result<&'static str> {
        self.lookup(type_name)
            .map(|m| m.python_type)
            .ok_or_else(|| Error::UnknownType(type_name.to_string()))
    }

    /// SQLAlchemy column type for a token
    pub fn column_type(&self, type_name: &str) -> Result<&'static str> {
        self.lookup(type_name)
            .map(|m| m.column_type)
            .ok_or_else(|| Error::UnknownType(type_name.to_string()))
    }

    pub fn tokens(&self) -> impl Iterator<Item = &'static str> {
        TYPE_MAPPINGS.iter().map(|m| m.token)
    }
}
