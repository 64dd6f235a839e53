pub mod file_writer;
pub mod generator;
pub mod template_context;
pub mod templates;

pub use file_writer::FileWriter;
pub use generator::{generate, FastApiGenerator, GenerationPlan, MODEL_ARTIFACTS, PROJECT_ARTIFACTS};
pub use template_context::{FieldContext, ModelContext};
pub use templates::{GlobalContext, Renderer, TemplateRenderer, TemplateSource};

/// Register a template embedded at compile time
#[macro_export]
macro_rules! template {
    ($tera:expr, $name:expr, $path:expr) => {
        $tera
            .add_raw_template($name, include_str!($path))
            .map_err(|e| format!("Failed to register {}: {}", $name, e))?;
    };
}
