use crate::analysis::type_translator::TypeTranslator;
use crate::models::{Field, Model, Names};
use crate::Result;
use serde::{Deserialize, Serialize};

/// Template view of a field with its translated types
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldContext {
    pub name: String,
    pub type_name: String,
    pub python_type: String,
    pub column_type: String,
    /// `python_type`, wrapped in `Optional[...]` when nullable
    pub annotation: String,
    pub is_primary_key: bool,
    pub is_nullable: bool,
}

impl FieldContext {
    pub fn from_field(field: &Field, translator: &TypeTranslator) -> Result<Self> {
        let python_type = translator.translate(field.type_name())?;
        let column_type = translator.column_type(field.type_name())?;
        let annotation = if field.is_nullable {
            format!("Optional[{}]", python_type)
        } else {
            python_type.to_string()
        };

        Ok(Self {
            name: field.name.clone(),
            type_name: field.type_name().to_string(),
            python_type: python_type.to_string(),
            column_type: column_type.to_string(),
            annotation,
            is_primary_key: field.is_primary_key,
            is_nullable: field.is_nullable,
        })
    }
}

/// Template view of a model, with its resolved primary key
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelContext {
    pub names: Names,
    pub class_name: String,
    pub fields: Vec<FieldContext>,
    /// Fields other than the resolved primary key
    pub data_fields: Vec<FieldContext>,
    pub primary_key: FieldContext,
    /// Python types needing an import in generated modules, sorted
    pub python_imports: Vec<String>,
}

impl ModelContext {
    /// Fails with `NoPrimaryKey` or `UnknownType` before anything is rendered
    pub fn from_model(model: &Model, translator: &TypeTranslator) -> Result<Self> {
        let primary_key_field = model.primary_key()?;
        let primary_key = FieldContext::from_field(primary_key_field, translator)?;

        let fields = model
            .fields
            .iter()
            .map(|f| FieldContext::from_field(f, translator))
            .collect::<Result<Vec<_>>>()?;

        let data_fields = fields
            .iter()
            .filter(|f| f.name != primary_key.name)
            .cloned()
            .collect();

        let mut python_imports: Vec<String> = fields
            .iter()
            .filter_map(|f| python_import(&f.python_type))
            .map(str::to_string)
            .collect();
        python_imports.sort();
        python_imports.dedup();

        Ok(Self {
            names: model.names.clone(),
            class_name: model.names.class_name(),
            fields,
            data_fields,
            primary_key,
            python_imports,
        })
    }
}

/// Import line needed for a Python type, if it is not a builtin
fn python_import(python_type: &str) -> Option<&'static str> {
    match python_type {
        "UUID" => Some("from uuid import UUID"),
        "Decimal" => Some("from decimal import Decimal"),
        "date" => Some("from datetime import date"),
        "time" => Some("from datetime import time"),
        "datetime" => Some("from datetime import datetime"),
        _ => None,
    }
}
