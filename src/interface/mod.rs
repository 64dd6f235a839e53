pub mod cli;
pub mod config;
pub mod output;
pub mod repository;

use crate::analysis::SchemaAnalyzer;
use crate::generators::{FastApiGenerator, GenerationPlan};
use crate::Result;
use std::path::Path;

pub use cli::*;
pub use config::*;
pub use output::*;

const TOTAL_STEPS: usize = 4;

/// Run a full generation: validate, parse, plan, load templates, clone, then render.
///
/// Every check that can fail without touching the filesystem runs before the
/// first write, so a bad schema or a model without a primary key leaves the
/// target untouched.
pub fn generate_from_config(config: &GenerateConfig) -> Result<Vec<String>> {
    let logger = Logger::new(config.is_verbose(), false);
    let mut reporter = ProgressReporter::new(logger.clone(), TOTAL_STEPS);
    run(config, &logger, &mut reporter)
}

/// Same as [`generate_from_config`] without a spinner
pub fn generate_quietly(config: &GenerateConfig) -> Result<Vec<String>> {
    let logger = Logger::new(config.is_verbose(), false);
    let mut reporter = ProgressReporter::silent(logger.clone(), TOTAL_STEPS);
    run(config, &logger, &mut reporter)
}

fn run(
    config: &GenerateConfig,
    logger: &Logger,
    reporter: &mut ProgressReporter,
) -> Result<Vec<String>> {
    config.validate()?;
    let target = config.target();

    reporter.start_step("Parsing schema");
    let models = SchemaAnalyzer::new()
        .analyze_file(Path::new(&config.schema_path))
        .inspect_err(|e| reporter.fail_step(&e.to_string()))?;
    reporter.complete_step(Some(&format!("{} models", models.len())));
    for model in &models {
        logger.verbose(&format!(
            "  - {} ({} fields)",
            model.names.plural_name,
            model.fields.len()
        ));
    }

    reporter.start_step("Resolving primary keys");
    let plan = GenerationPlan::new(&models).inspect_err(|e| reporter.fail_step(&e.to_string()))?;
    reporter.complete_step(None);

    reporter.start_step("Preparing target directory");
    // Templates load before the clone; nothing is written until they parse
    let generator = FastApiGenerator::from_source(&config.template_source(), logger.clone())
        .inspect_err(|e| reporter.fail_step(&e.to_string()))?;
    if let Some(url) = config.repository() {
        repository::clone_repository(url, &target, logger)
            .inspect_err(|e| reporter.fail_step(&e.to_string()))?;
    }
    reporter.complete_step(None);

    reporter.start_step("Writing project files");
    let generated = generator
        .generate(&plan, &target, &config.project_name)
        .inspect_err(|e| {
            reporter.fail_step(&e.to_string());
            logger.error("generation aborted; no further files were written");
        })?;
    reporter.complete_step(Some(&format!("{} files", generated.len())));

    reporter.finish(&format!(
        "Generated project '{}' in {}",
        config.project_name, config.target_path
    ));
    Ok(generated)
}
