use crate::analysis::naming;
use crate::analysis::type_translator::TypeTranslator;
use crate::analysis::{ParseError, SchemaParser};
use crate::models::{Field, Model, Names};
use serde::Deserialize;
use serde_json::Value;

/// JSON-schema spellings accepted in addition to the canonical tokens
const JSON_TYPE_ALIASES: &[(&str, &str)] = &[
    ("string", "varchar"),
    ("int", "integer"),
    ("number", "float"),
    ("bool", "boolean"),
    ("datetime", "timestamp"),
    ("object", "json"),
];

/// Canonical tokens this parser can put into a `FieldType`
pub fn emitted_tokens() -> impl Iterator<Item = &'static str> {
    TypeTranslator::new()
        .tokens()
        .chain(JSON_TYPE_ALIASES.iter().map(|(_, canonical)| *canonical))
}

#[derive(Debug, Deserialize)]
struct RawEntity {
    fields: Option<Vec<RawField>>,
    singular: Option<String>,
    plural: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawField {
    name: Option<String>,
    #[serde(rename = "type")]
    type_name: Option<String>,
    #[serde(default, alias = "primary_key")]
    is_primary_key: bool,
    nullable: Option<bool>,
}

/// Parser for JSON documents of the form
/// `{"Entity": {"fields": [{"name": "id", "type": "uuid", "is_primary_key": true}]}}`
#[derive(Debug, Default)]
pub struct JsonSchemaParser {
    translator: TypeTranslator,
}

impl JsonSchemaParser {
    pub fn new() -> Self {
        Self {
            translator: TypeTranslator::new(),
        }
    }

    /// Resolve a declared type to a canonical token. Matching is case-sensitive.
    fn normalize_type(&self, declared: &str) -> Option<&'static str> {
        if let Some(token) = self.translator.tokens().find(|t| *t == declared) {
            return Some(token);
        }
        JSON_TYPE_ALIASES
            .iter()
            .find(|(alias, _)| *alias == declared)
            .map(|(_, canonical)| *canonical)
    }

    fn parse_entity(&self, entity: &str, value: Value) -> Result<Model, ParseError> {
        let raw: RawEntity =
            serde_json::from_value(value).map_err(|source| ParseError::InvalidEntity {
                entity: entity.to_string(),
                source,
            })?;
        let raw_fields = raw.fields.ok_or_else(|| ParseError::MissingAttribute {
            entity: entity.to_string(),
            attribute: "fields".to_string(),
        })?;

        if raw_fields.is_empty() {
            return Err(ParseError::EmptyEntity {
                entity: entity.to_string(),
            });
        }

        let fields = raw_fields
            .into_iter()
            .enumerate()
            .map(|(index, raw_field)| self.parse_field(entity, index, raw_field))
            .collect::<Result<Vec<_>, _>>()?;

        let names = match (raw.singular, raw.plural) {
            (None, None) => Names::from_declared(entity)?,
            (singular, plural) => {
                let singular = singular
                    .unwrap_or_else(|| naming::singularize(&naming::to_identifier(entity)));
                let plural = plural.unwrap_or_else(|| naming::pluralize(&singular));
                Names::new(singular, plural)?
            }
        };

        Ok(Model::new(names, fields))
    }

    fn parse_field(&self, entity: &str, index: usize, raw: RawField) -> Result<Field, ParseError> {
        let missing = |attribute: &str| ParseError::MissingAttribute {
            entity: entity.to_string(),
            attribute: format!("fields[{}].{}", index, attribute),
        };

        let name = raw.name.ok_or_else(|| missing("name"))?;
        let declared_type = raw.type_name.ok_or_else(|| missing("type"))?;
        naming::validate_field_name(&name)?;

        let canonical =
            self.normalize_type(&declared_type)
                .ok_or_else(|| ParseError::UnknownType {
                    entity: entity.to_string(),
                    field: name.clone(),
                    type_name: declared_type.clone(),
                })?;

        let mut field = Field::new(name, canonical);
        if raw.is_primary_key {
            field = field.primary_key();
        }
        if let Some(nullable) = raw.nullable {
            field.is_nullable = nullable;
        }
        Ok(field)
    }
}

impl SchemaParser for JsonSchemaParser {
    fn parse(&self, source: &str) -> Result<Vec<Model>, ParseError> {
        let document: Value = serde_json::from_str(source)?;
        let Value::Object(entities) = document else {
            return Err(ParseError::Syntax {
                line: 1,
                message: "expected a JSON object keyed by entity name".to_string(),
            });
        };

        entities
            .into_iter()
            .map(|(entity, value)| self.parse_entity(&entity, value))
            .collect()
    }
}
