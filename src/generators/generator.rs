use crate::analysis::naming;
use crate::analysis::type_translator::TypeTranslator;
use crate::generators::file_writer::FileWriter;
use crate::generators::template_context::ModelContext;
use crate::generators::templates::{GlobalContext, Renderer, TemplateRenderer, TemplateSource};
use crate::interface::output::Logger;
use crate::models::Model;
use crate::{Error, Result};
use std::path::Path;
use tera::Context;

/// A template and the output path it renders to. Output paths may contain
/// `{project}`, `{plural}` and `{singular}` placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Artifact {
    pub template: &'static str,
    pub output: &'static str,
}

const fn artifact(template: &'static str, output: &'static str) -> Artifact {
    Artifact { template, output }
}

/// Rendered once per model, in this order
pub const MODEL_ARTIFACTS: &[Artifact] = &[
    artifact(
        "src/project/routers/route.py.tera",
        "src/{project}/routers/{plural}_route.py",
    ),
    artifact(
        "src/project/domain/model/services.py.tera",
        "src/{project}/domain/{plural}/{singular}_services.py",
    ),
    artifact(
        "src/project/domain/model/queries.py.tera",
        "src/{project}/domain/{plural}/{singular}_queries.py",
    ),
    artifact(
        "src/project/domain/model/model.py.tera",
        "src/{project}/domain/{plural}/{singular}_model.py",
    ),
    artifact(
        "src/project/domain/model/schemas.py.tera",
        "src/{project}/domain/{plural}/{singular}_schemas.py",
    ),
    artifact(
        "tests/test_route/__init__.py.tera",
        "tests/test_{plural}/__init__.py",
    ),
    artifact(
        "tests/test_route/test_basic_positive.py.tera",
        "tests/test_{plural}/test_basic_positive.py",
    ),
    artifact(
        "tests/test_route/test_invalid_input_negative.py.tera",
        "tests/test_{plural}/test_invalid_input_negative.py",
    ),
    artifact(
        "tests/test_route/test_valid_input_negative.py.tera",
        "tests/test_{plural}/test_valid_input_negative.py",
    ),
    artifact(
        "tests/test_route/test_extended_positive.py.tera",
        "tests/test_{plural}/test_extended_positive.py",
    ),
    artifact(
        "tests/test_route/test_destructive.py.tera",
        "tests/test_{plural}/test_destructive.py",
    ),
];

/// Rendered once per run against the whole model list, after the model artifacts
pub const PROJECT_ARTIFACTS: &[Artifact] = &[
    artifact("tests/utils.py.tera", "tests/utils.py"),
    artifact("tests/conftest.py.tera", "tests/conftest.py"),
    artifact(
        "src/project/core/service_factory.py.tera",
        "src/{project}/core/service_factory.py",
    ),
    artifact(
        "src/project/domain/base_schemas.py.tera",
        "src/{project}/domain/base_schemas.py",
    ),
    artifact("src/project/__init__.py.tera", "src/{project}/__init__.py"),
];

impl Artifact {
    pub fn output_path(&self, project_name: &str, model: Option<&ModelContext>) -> String {
        let path = self.output.replace("{project}", project_name);
        match model {
            Some(model) => path
                .replace("{plural}", &model.names.plural_name)
                .replace("{singular}", &model.names.singular_name),
            None => path,
        }
    }
}

/// Everything needed to render, computed before any filesystem write
#[derive(Debug, Clone)]
pub struct GenerationPlan {
    pub models: Vec<ModelContext>,
}

impl GenerationPlan {
    /// Resolve primary keys and translate every field type. Fails on the first
    /// model that cannot be rendered, or on two models whose files would collide.
    pub fn new(models: &[Model]) -> Result<Self> {
        check_unique_names(models)?;
        let translator = TypeTranslator::new();
        let models = models
            .iter()
            .map(|model| ModelContext::from_model(model, &translator))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { models })
    }

    /// Directories to create, relative to the target, parents first
    pub fn directories(&self, project_name: &str) -> Vec<String> {
        let project_dir = format!("src/{}", project_name);
        let mut dirs = vec![
            "src".to_string(),
            project_dir.clone(),
            format!("{}/core", project_dir),
            format!("{}/domain", project_dir),
            format!("{}/routers", project_dir),
            "tests".to_string(),
        ];
        for model in &self.models {
            dirs.push(format!("{}/domain/{}", project_dir, model.names.plural_name));
            dirs.push(format!("tests/test_{}", model.names.plural_name));
        }
        dirs
    }
}

/// Models sharing a singular or plural name would overwrite each other's files
fn check_unique_names(models: &[Model]) -> Result<()> {
    let describe = |index: usize, model: &Model| {
        format!(
            "#{} ({}/{})",
            index + 1,
            model.names.singular_name,
            model.names.plural_name
        )
    };

    for (i, later) in models.iter().enumerate() {
        for (j, earlier) in models[..i].iter().enumerate() {
            let clash = if earlier.names.plural_name == later.names.plural_name {
                &later.names.plural_name
            } else if earlier.names.singular_name == later.names.singular_name {
                &later.names.singular_name
            } else {
                continue;
            };
            return Err(Error::DuplicateModel {
                name: clash.clone(),
                first: describe(j, earlier),
                second: describe(i, later),
            });
        }
    }
    Ok(())
}

/// Renders the FastAPI project skeleton for a set of models
pub struct FastApiGenerator<R: Renderer = TemplateRenderer> {
    renderer: R,
    logger: Logger,
    global: GlobalContext,
}

impl FastApiGenerator<TemplateRenderer> {
    pub fn from_source(source: &TemplateSource, logger: Logger) -> Result<Self> {
        Ok(Self::new(TemplateRenderer::new(source)?, logger))
    }
}

impl<R: Renderer> FastApiGenerator<R> {
    pub fn new(renderer: R, logger: Logger) -> Self {
        Self {
            renderer,
            logger,
            global: GlobalContext::new(env!("CARGO_PKG_NAME")),
        }
    }

    /// Create the folder structure and render every artifact of the plan.
    ///
    /// The target directory must exist and the project name must be a single
    /// identifier. Generation stops at the first render or write failure;
    /// files written before it are left in place.
    pub fn generate(
        &self,
        plan: &GenerationPlan,
        target_path: &Path,
        project_name: &str,
    ) -> Result<Vec<String>> {
        if !target_path.is_dir() {
            return Err(Error::TargetDirectoryMissing(target_path.to_path_buf()));
        }
        if naming::validate_field_name(project_name).is_err() {
            return Err(Error::InvalidProjectName(project_name.to_string()));
        }

        let mut writer = FileWriter::new(target_path, self.logger.clone());
        writer.ensure_directories(&plan.directories(project_name))?;

        for model in &plan.models {
            let context = self.model_context(model, project_name);
            for artifact in MODEL_ARTIFACTS {
                let content = self
                    .renderer
                    .render(artifact.template, &context)
                    .map_err(|e| with_model(e, &model.names.plural_name))?;
                writer.write_file(&artifact.output_path(project_name, Some(model)), &content)?;
            }
        }

        let context = self.project_context(&plan.models, project_name);
        for artifact in PROJECT_ARTIFACTS {
            let content = self.renderer.render(artifact.template, &context)?;
            writer.write_file(&artifact.output_path(project_name, None), &content)?;
        }

        Ok(writer.get_generated_files().to_vec())
    }

    fn model_context(&self, model: &ModelContext, project_name: &str) -> Context {
        let mut context = Context::new();
        context.insert("generator", &self.global);
        context.insert("model", model);
        context.insert("PRIMARY_KEY_TYPE", &model.primary_key.python_type);
        context.insert("PRIMARY_KEY_NAME", &model.primary_key.name);
        context.insert("PROJECT_NAME", project_name);
        context
    }

    fn project_context(&self, models: &[ModelContext], project_name: &str) -> Context {
        let mut context = Context::new();
        context.insert("generator", &self.global);
        context.insert("models", models);
        context.insert("PROJECT_NAME", project_name);
        context
    }
}

/// Attach the model being rendered to a render error
fn with_model(error: Error, model_name: &str) -> Error {
    match error {
        Error::Render {
            template, message, ..
        } => Error::Render {
            template,
            model: Some(model_name.to_string()),
            message,
        },
        other => other,
    }
}

/// Plan and render in one call with the given template source
pub fn generate(
    models: &[Model],
    template_source: &TemplateSource,
    target_path: &Path,
    project_name: &str,
    logger: Logger,
) -> Result<Vec<String>> {
    let plan = GenerationPlan::new(models)?;
    FastApiGenerator::from_source(template_source, logger)?.generate(&plan, target_path, project_name)
}
