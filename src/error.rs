use crate::analysis::ParseError;
use crate::interface::config::ConfigError;
use serde::{ser::Serializer, Serialize};
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(
        "The target directory does not exist. Please try again with a different target path. ({})",
        .0.display()
    )]
    TargetDirectoryMissing(PathBuf),

    #[error("Failed to clone repository {url}: {message}")]
    RepositoryClone { url: String, message: String },

    #[error("Failed to parse {file}: {source}")]
    Parse {
        file: String,
        #[source]
        source: ParseError,
    },

    #[error("Model '{model}' has no field marked as primary key")]
    NoPrimaryKey { model: String },

    #[error("Models {first} and {second} both generate files named '{name}'")]
    DuplicateModel {
        name: String,
        first: String,
        second: String,
    },

    #[error("Unknown type '{0}': no canonical type mapping exists")]
    UnknownType(String),

    #[error("Failed to render template '{template}'{}: {message}", .model.as_ref().map(|m| format!(" for model '{}'", m)).unwrap_or_default())]
    Render {
        template: String,
        model: Option<String>,
        message: String,
    },

    #[error("Invalid project name '{0}': must be a valid identifier ([A-Za-z_][A-Za-z0-9_]*)")]
    InvalidProjectName(String),

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Serialize for Error {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.to_string().as_ref())
    }
}
