use crate::interface::output::Logger;
use crate::{Error, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Writes generated files below a target directory and remembers what it wrote
pub struct FileWriter {
    target_path: PathBuf,
    generated_files: Vec<String>,
    logger: Logger,
}

impl FileWriter {
    /// The target directory must already exist
    pub fn new(target_path: impl Into<PathBuf>, logger: Logger) -> Self {
        Self {
            target_path: target_path.into(),
            generated_files: Vec::new(),
            logger,
        }
    }

    /// Create each directory in order. Existing directories are reported and
    /// reused, never recreated.
    pub fn ensure_directories<P: AsRef<Path>>(&self, relative_dirs: &[P]) -> Result<()> {
        for relative in relative_dirs {
            let dir = self.target_path.join(relative);
            if dir.is_dir() {
                self.logger.info(&format!(
                    "Folder at: {} already exists. Using existing folder instead.",
                    dir.display()
                ));
                continue;
            }
            if dir.exists() {
                return Err(Error::Write {
                    path: dir,
                    source: io::Error::new(
                        io::ErrorKind::AlreadyExists,
                        "a file exists where a directory is expected",
                    ),
                });
            }
            fs::create_dir(&dir).map_err(|source| Error::Write {
                path: dir.clone(),
                source,
            })?;
            self.logger
                .info(&format!("Created folder at: {}", dir.display()));
        }
        Ok(())
    }

    /// Write a file relative to the target directory, replacing any previous content
    pub fn write_file(&mut self, relative_path: &str, content: &str) -> Result<()> {
        let file_path = self.target_path.join(relative_path);
        fs::write(&file_path, content).map_err(|source| Error::Write {
            path: file_path.clone(),
            source,
        })?;
        self.logger
            .verbose(&format!("📄 Wrote {}", file_path.display()));
        self.generated_files.push(relative_path.to_string());
        Ok(())
    }

    pub fn get_generated_files(&self) -> &[String] {
        &self.generated_files
    }

    pub fn get_target_path(&self) -> &Path {
        &self.target_path
    }

    pub fn file_exists(&self, relative_path: &str) -> bool {
        self.target_path.join(relative_path).exists()
    }
}
