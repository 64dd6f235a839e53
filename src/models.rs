use crate::analysis::naming;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Type names preferred when a model declares more than one primary key column
pub const PREFERRED_PRIMARY_KEY_TYPES: [&str; 2] = ["uuid", "integer"];

/// A source-notation type token, already normalized to the canonical vocabulary
/// (e.g. "uuid", "integer", "varchar")
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct FieldType {
    pub name: String,
}

impl FieldType {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub is_primary_key: bool,
    pub is_nullable: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: FieldType::new(type_name),
            is_primary_key: false,
            is_nullable: true,
        }
    }

    /// Mark the field as a primary key. Primary keys are never nullable.
    pub fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self.is_nullable = false;
        self
    }

    pub fn not_null(mut self) -> Self {
        self.is_nullable = false;
        self
    }

    pub fn type_name(&self) -> &str {
        &self.field_type.name
    }
}

/// Singular and plural forms of an entity name, both valid path segments
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Names {
    pub singular_name: String,
    pub plural_name: String,
}

impl Names {
    /// Derive both forms from a declared entity or table name.
    pub fn from_declared(declared: &str) -> std::result::Result<Self, crate::analysis::ParseError> {
        let base = naming::to_identifier(declared);
        let singular_name = naming::singularize(&base);
        let plural_name = naming::pluralize(&singular_name);
        Self::new(singular_name, plural_name)
    }

    pub fn new(
        singular_name: impl Into<String>,
        plural_name: impl Into<String>,
    ) -> std::result::Result<Self, crate::analysis::ParseError> {
        let names = Self {
            singular_name: singular_name.into(),
            plural_name: plural_name.into(),
        };
        naming::validate_identifier(&names.singular_name)?;
        naming::validate_identifier(&names.plural_name)?;
        Ok(names)
    }

    /// PascalCase form of the singular name, used for generated class names
    pub fn class_name(&self) -> String {
        naming::to_class_name(&self.singular_name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Model {
    pub names: Names,
    pub fields: Vec<Field>,
}

impl Model {
    pub fn new(names: Names, fields: Vec<Field>) -> Self {
        Self { names, fields }
    }

    /// Resolve the primary key used by generated routes and queries.
    ///
    /// Among fields flagged as primary key the first one whose type is in
    /// [`PREFERRED_PRIMARY_KEY_TYPES`] wins; otherwise the first flagged field
    /// in declaration order. A model without any flagged field is an error.
    pub fn primary_key(&self) -> Result<&Field> {
        let mut fallback = None;
        for field in self.fields.iter().filter(|f| f.is_primary_key) {
            if PREFERRED_PRIMARY_KEY_TYPES.contains(&field.type_name()) {
                return Ok(field);
            }
            fallback.get_or_insert(field);
        }

        fallback.ok_or_else(|| Error::NoPrimaryKey {
            model: self.names.plural_name.clone(),
        })
    }

    pub fn non_key_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| !f.is_primary_key)
    }
}
