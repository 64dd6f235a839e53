use crate::interface::config::GenerateConfig;
use clap::Parser;
use std::path::PathBuf;

/// Generate a FastAPI project skeleton from a SQL or JSON schema
#[derive(Parser, Debug)]
#[command(name = "fastapi-codegen", version)]
pub struct Cli {
    /// Schema file (.sql or .json)
    #[arg(value_name = "FILE", required_unless_present = "config_file")]
    pub file: Option<PathBuf>,

    /// Existing directory to generate the project into
    #[arg(value_name = "TARGET_DIRECTORY", required_unless_present = "config_file")]
    pub target_directory: Option<PathBuf>,

    /// Python package name of the generated project
    #[arg(value_name = "PROJECT_NAME", required_unless_present = "config_file")]
    pub project_name: Option<String>,

    /// Git repository to clone into the target directory first
    #[arg(long = "from_repo", value_name = "URL", default_value = "")]
    pub git_repo_url: String,

    /// Directory of templates overriding the bundled ones
    #[arg(long = "templates", value_name = "DIR")]
    pub template_root: Option<PathBuf>,

    /// JSON configuration file; command-line values take precedence
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Verbose output
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub verbose: bool,
}

impl From<&Cli> for GenerateConfig {
    fn from(cli: &Cli) -> Self {
        let path_string = |path: &Option<PathBuf>| {
            path.as_ref()
                .map(|p| p.to_string_lossy().to_string())
                .unwrap_or_default()
        };

        GenerateConfig {
            schema_path: path_string(&cli.file),
            target_path: path_string(&cli.target_directory),
            project_name: cli.project_name.clone().unwrap_or_default(),
            repository_url: Some(cli.git_repo_url.clone()).filter(|url| !url.is_empty()),
            template_root: cli
                .template_root
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            // Only an explicit flag overrides a config file
            verbose: cli.verbose.then_some(true),
        }
    }
}
