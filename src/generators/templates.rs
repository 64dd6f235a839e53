use crate::{template, Error, Result};
use heck::{ToLowerCamelCase, ToSnakeCase, ToUpperCamelCase};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tera::{Context, Tera, Value};
use walkdir::WalkDir;

/// Where template assets come from. Resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TemplateSource {
    /// Templates compiled into the binary
    #[default]
    Bundled,
    /// A directory whose `*.tera` files replace bundled templates of the same
    /// relative path; bundled templates fill in anything it does not provide
    Directory(PathBuf),
}

/// Values available to every template
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalContext {
    pub version: String,
    pub generator_name: String,
}

impl GlobalContext {
    pub fn new(generator_name: &str) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            generator_name: generator_name.to_string(),
        }
    }
}

/// Renders a named template against a context
pub trait Renderer {
    fn render(&self, template_name: &str, context: &Context) -> Result<String>;
}

/// Tera-backed renderer holding every registered template
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    pub fn new(source: &TemplateSource) -> Result<Self> {
        let mut tera = Tera::default();
        register_templates(&mut tera).map_err(|message| Error::Render {
            template: "<bundled>".to_string(),
            model: None,
            message,
        })?;
        if let TemplateSource::Directory(root) = source {
            register_directory_templates(&mut tera, root)?;
        }
        register_filters(&mut tera);
        Ok(Self { tera })
    }

    pub fn bundled() -> Result<Self> {
        Self::new(&TemplateSource::Bundled)
    }

    pub fn has_template(&self, template_name: &str) -> bool {
        self.tera.get_template_names().any(|name| name == template_name)
    }
}

impl Renderer for TemplateRenderer {
    fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        self.tera
            .render(template_name, context)
            .map_err(|e| Error::Render {
                template: template_name.to_string(),
                model: None,
                message: describe_tera_error(&e),
            })
    }
}

/// Flatten a tera error and its sources into one line
fn describe_tera_error(error: &tera::Error) -> String {
    let mut message = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(inner) = source {
        message.push_str(&format!(": {}", inner));
        source = inner.source();
    }
    message
}

/// Register the bundled templates from embedded strings
fn register_templates(tera: &mut Tera) -> std::result::Result<(), String> {
    template!(tera, "common/header.tera", "templates/common/header.tera");

    // Per-model templates
    template!(
        tera,
        "src/project/routers/route.py.tera",
        "templates/src/project/routers/route.py.tera"
    );
    template!(
        tera,
        "src/project/domain/model/services.py.tera",
        "templates/src/project/domain/model/services.py.tera"
    );
    template!(
        tera,
        "src/project/domain/model/queries.py.tera",
        "templates/src/project/domain/model/queries.py.tera"
    );
    template!(
        tera,
        "src/project/domain/model/model.py.tera",
        "templates/src/project/domain/model/model.py.tera"
    );
    template!(
        tera,
        "src/project/domain/model/schemas.py.tera",
        "templates/src/project/domain/model/schemas.py.tera"
    );
    template!(
        tera,
        "tests/test_route/__init__.py.tera",
        "templates/tests/test_route/__init__.py.tera"
    );
    template!(
        tera,
        "tests/test_route/test_basic_positive.py.tera",
        "templates/tests/test_route/test_basic_positive.py.tera"
    );
    template!(
        tera,
        "tests/test_route/test_invalid_input_negative.py.tera",
        "templates/tests/test_route/test_invalid_input_negative.py.tera"
    );
    template!(
        tera,
        "tests/test_route/test_valid_input_negative.py.tera",
        "templates/tests/test_route/test_valid_input_negative.py.tera"
    );
    template!(
        tera,
        "tests/test_route/test_extended_positive.py.tera",
        "templates/tests/test_route/test_extended_positive.py.tera"
    );
    template!(
        tera,
        "tests/test_route/test_destructive.py.tera",
        "templates/tests/test_route/test_destructive.py.tera"
    );

    // Project-wide templates
    template!(
        tera,
        "src/project/core/service_factory.py.tera",
        "templates/src/project/core/service_factory.py.tera"
    );
    template!(
        tera,
        "src/project/domain/base_schemas.py.tera",
        "templates/src/project/domain/base_schemas.py.tera"
    );
    template!(
        tera,
        "src/project/__init__.py.tera",
        "templates/src/project/__init__.py.tera"
    );
    template!(tera, "tests/utils.py.tera", "templates/tests/utils.py.tera");
    template!(tera, "tests/conftest.py.tera", "templates/tests/conftest.py.tera");

    Ok(())
}

/// Load every `*.tera` file under `root`, named by its path relative to `root`
fn register_directory_templates(tera: &mut Tera, root: &Path) -> Result<()> {
    if !root.is_dir() {
        return Err(Error::Render {
            template: root.display().to_string(),
            model: None,
            message: "template directory does not exist".to_string(),
        });
    }

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| Error::Render {
            template: root.display().to_string(),
            model: None,
            message: e.to_string(),
        })?;
        let path = entry.path();
        if !path.is_file() || path.extension().map_or(true, |ext| ext != "tera") {
            continue;
        }

        let name = template_name_for(root, path);
        let content = fs::read_to_string(path)?;
        tera.add_raw_template(&name, &content)
            .map_err(|e| Error::Render {
                template: name.clone(),
                model: None,
                message: describe_tera_error(&e),
            })?;
    }

    Ok(())
}

/// Relative path with `/` separators on every platform
fn template_name_for(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Register case-conversion filters
pub fn register_filters(tera: &mut Tera) {
    tera.register_filter("pascal_case", pascal_case_filter);
    tera.register_filter("snake_case", snake_case_filter);
    tera.register_filter("camel_case", camel_case_filter);
}

fn string_arg<'a>(value: &'a Value, filter: &str) -> tera::Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| format!("{} filter expects a string", filter).into())
}

fn pascal_case_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::String(
        string_arg(value, "pascal_case")?.to_upper_camel_case(),
    ))
}

fn snake_case_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::String(string_arg(value, "snake_case")?.to_snake_case()))
}

fn camel_case_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::String(
        string_arg(value, "camel_case")?.to_lower_camel_case(),
    ))
}
