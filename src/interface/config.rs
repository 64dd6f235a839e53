use crate::analysis::naming;
use crate::analysis::SchemaFormat;
use crate::generators::TemplateSource;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Everything a generation run needs. Loaded from a JSON file, the command
/// line, or both (command line wins).
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct GenerateConfig {
    /// Schema file to read (`.sql` or `.json`)
    #[serde(default)]
    pub schema_path: String,

    /// Existing directory the project is written into
    #[serde(default)]
    pub target_path: String,

    /// Python package name of the generated project
    #[serde(default)]
    pub project_name: String,

    /// Repository cloned into the target before generation
    #[serde(default)]
    pub repository_url: Option<String>,

    /// Directory whose templates replace the bundled ones
    #[serde(default)]
    pub template_root: Option<String>,

    #[serde(default)]
    pub verbose: Option<bool>,
}

impl GenerateConfig {
    pub fn new(
        schema_path: impl Into<String>,
        target_path: impl Into<String>,
        project_name: impl Into<String>,
    ) -> Self {
        Self {
            schema_path: schema_path.into(),
            target_path: target_path.into(),
            project_name: project_name.into(),
            ..Default::default()
        }
    }

    /// Load configuration from a JSON file. Validation happens later, once
    /// command-line values have been merged in.
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::result::Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> std::result::Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Merge with another configuration, with other taking precedence for
    /// every value it sets
    pub fn merge(&mut self, other: &GenerateConfig) {
        if !other.schema_path.is_empty() {
            self.schema_path = other.schema_path.clone();
        }
        if !other.target_path.is_empty() {
            self.target_path = other.target_path.clone();
        }
        if !other.project_name.is_empty() {
            self.project_name = other.project_name.clone();
        }
        if other.repository_url.is_some() {
            self.repository_url = other.repository_url.clone();
        }
        if other.template_root.is_some() {
            self.template_root = other.template_root.clone();
        }
        if other.verbose.is_some() {
            self.verbose = other.verbose;
        }
    }

    /// Check everything that can be checked without touching the target.
    ///
    /// The target directory is checked first so a missing target is always
    /// reported as such, whatever else is wrong.
    pub fn validate(&self) -> Result<()> {
        if self.target_path.is_empty() {
            return Err(ConfigError::InvalidConfig("target directory is required".to_string()).into());
        }
        if !self.target().is_dir() {
            return Err(Error::TargetDirectoryMissing(self.target()));
        }
        if self.schema_path.is_empty() {
            return Err(ConfigError::InvalidConfig("schema file is required".to_string()).into());
        }
        self.schema_format()?;
        if naming::validate_field_name(&self.project_name).is_err() {
            return Err(Error::InvalidProjectName(self.project_name.clone()));
        }
        Ok(())
    }

    pub fn schema_format(&self) -> Result<SchemaFormat> {
        SchemaFormat::from_path(Path::new(&self.schema_path)).map_err(|source| Error::Parse {
            file: self.schema_path.clone(),
            source,
        })
    }

    pub fn target(&self) -> PathBuf {
        PathBuf::from(&self.target_path)
    }

    /// Repository to clone, treating an empty URL as none
    pub fn repository(&self) -> Option<&str> {
        self.repository_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Resolve where templates come from; done once per run
    pub fn template_source(&self) -> TemplateSource {
        match self.template_root.as_deref() {
            Some(root) if !root.is_empty() => TemplateSource::Directory(PathBuf::from(root)),
            _ => TemplateSource::Bundled,
        }
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose.unwrap_or(false)
    }
}
