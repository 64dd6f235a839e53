#![allow(dead_code)]
/// Common test utilities and helpers
use fastapi_codegen::{generate_quietly, GenerateConfig, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

/// A temporary directory holding schema files
pub struct TestProject {
    pub temp_dir: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Write a schema file and return its path
    pub fn write_schema(&self, name: &str, content: &str) -> PathBuf {
        let file_path = self.temp_dir.path().join(name);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&file_path, content).unwrap();
        file_path
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }
}

/// An existing, empty target directory for generated projects
pub struct TestTarget {
    pub output_dir: TempDir,
}

impl TestTarget {
    pub fn new() -> Self {
        Self {
            output_dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.output_dir.path()
    }

    pub fn path_str(&self) -> String {
        self.output_dir.path().to_string_lossy().to_string()
    }

    /// Run a full generation into this target
    pub fn generate(&self, schema: &Path, project_name: &str) -> Result<Vec<String>> {
        let config = GenerateConfig::new(
            schema.to_string_lossy().to_string(),
            self.path_str(),
            project_name,
        );
        generate_quietly(&config)
    }

    pub fn read_file(&self, relative: &str) -> String {
        fs::read_to_string(self.path().join(relative)).unwrap()
    }

    pub fn file_exists(&self, relative: &str) -> bool {
        self.path().join(relative).exists()
    }

    /// Every entry below the target, relative and sorted
    pub fn entries(&self) -> Vec<String> {
        let mut entries: Vec<String> = WalkDir::new(self.path())
            .min_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .map(|e| {
                e.path()
                    .strip_prefix(self.path())
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect();
        entries.sort();
        entries
    }

    /// Contents of every file below the target, keyed by relative path
    pub fn snapshot(&self) -> Vec<(String, String)> {
        self.entries()
            .into_iter()
            .filter(|entry| self.path().join(entry).is_file())
            .map(|entry| {
                let content = self.read_file(&entry);
                (entry, content)
            })
            .collect()
    }
}

/// Assert that generated content contains expected string
#[macro_export]
macro_rules! assert_generated_contains {
    ($content:expr, $expected:expr) => {
        assert!(
            $content.contains($expected),
            "Expected generated content to contain:\n{}\n\nBut got:\n{}",
            $expected,
            $content
        );
    };
}

/// Assert that generated content does NOT contain string
#[macro_export]
macro_rules! assert_generated_not_contains {
    ($content:expr, $unexpected:expr) => {
        assert!(
            !$content.contains($unexpected),
            "Expected generated content NOT to contain:\n{}\n\nBut got:\n{}",
            $unexpected,
            $content
        );
    };
}
