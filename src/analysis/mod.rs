pub mod json_parser;
pub mod naming;
pub mod sql_lexer;
pub mod sql_parser;
pub mod type_translator;

use crate::models::Model;
use crate::{Error, Result};
use std::fs;
use std::path::Path;
use thiserror::Error as ThisError;

use json_parser::JsonSchemaParser;
use sql_parser::SqlSchemaParser;

#[derive(Debug, ThisError)]
pub enum ParseError {
    #[error("syntax error on line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("entity '{entity}' is malformed: {source}")]
    InvalidEntity {
        entity: String,
        source: serde_json::Error,
    },

    #[error("entity '{entity}' declares no fields")]
    EmptyEntity { entity: String },

    #[error("field '{entity}.{field}' has unrecognized type '{type_name}'")]
    UnknownType {
        entity: String,
        field: String,
        type_name: String,
    },

    #[error("entity '{entity}' is missing required attribute '{attribute}'")]
    MissingAttribute { entity: String, attribute: String },

    #[error("table '{table}' declares a primary key on unknown column '{column}'")]
    UnknownColumn { table: String, column: String },

    #[error("'{name}' is not a valid identifier")]
    InvalidIdentifier { name: String },

    #[error("schema declares no entities")]
    NoEntities,

    #[error("unsupported schema format '{0}': expected a .sql or .json file")]
    UnsupportedFormat(String),
}

/// Input notations understood by the analyzer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFormat {
    Sql,
    Json,
}

impl SchemaFormat {
    /// Select the notation from a file extension (case-insensitive)
    pub fn from_path(path: &Path) -> std::result::Result<Self, ParseError> {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "sql" => Ok(SchemaFormat::Sql),
            "json" => Ok(SchemaFormat::Json),
            _ => Err(ParseError::UnsupportedFormat(
                path.display().to_string(),
            )),
        }
    }

    pub fn parser(&self) -> Box<dyn SchemaParser> {
        match self {
            SchemaFormat::Sql => Box::new(SqlSchemaParser::new()),
            SchemaFormat::Json => Box::new(JsonSchemaParser::new()),
        }
    }
}

/// A schema notation parser: source text in, canonical models out
pub trait SchemaParser {
    fn parse(&self, source: &str) -> std::result::Result<Vec<Model>, ParseError>;
}

/// Reads a schema file and dispatches to the parser matching its extension
#[derive(Debug, Default)]
pub struct SchemaAnalyzer;

impl SchemaAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Parse a schema file into canonical models
    pub fn analyze_file(&self, path: &Path) -> Result<Vec<Model>> {
        let file = path.display().to_string();
        let format = SchemaFormat::from_path(path).map_err(|source| Error::Parse {
            file: file.clone(),
            source,
        })?;

        let content = fs::read_to_string(path)?;
        self.analyze_source(&content, format)
            .map_err(|source| Error::Parse { file, source })
    }

    /// Parse schema text that is already in memory
    pub fn analyze_source(
        &self,
        source: &str,
        format: SchemaFormat,
    ) -> std::result::Result<Vec<Model>, ParseError> {
        let models = format.parser().parse(source)?;
        if models.is_empty() {
            return Err(ParseError::NoEntities);
        }
        Ok(models)
    }
}
