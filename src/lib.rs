//! # FastAPI Codegen
//!
//! Generate a FastAPI project skeleton from a SQL or JSON schema.
//!
//! Each table or entity in the schema becomes a model with a route, services,
//! queries, an ORM model, pydantic schemas and a pytest suite. Shared files
//! (service factory, base schemas, app factory, test fixtures) are rendered once
//! for the whole project.
//!
//! ## Features
//!
//! - 🗄️ **SQL input**: `CREATE TABLE` statements, inline and table-level primary keys
//! - 📋 **JSON input**: `{"Entity": {"fields": [...]}}` documents
//! - 🔑 **Primary keys**: resolved for every model before anything is written
//! - 🧩 **Templates**: bundled `tera` templates, optionally overridden from a directory
//!
//! ## Quick Start
//!
//! ```bash
//! fastapi-codegen schema.sql ./my-service shop
//! fastapi-codegen schema.json ./my-service shop --from_repo https://example.com/skeleton.git
//! ```
//!
//! ### Programmatic Usage
//!
//! ```rust,no_run
//! use fastapi_codegen::{generate_from_config, GenerateConfig};
//!
//! let config = GenerateConfig::new("schema.sql", "./my-service", "shop");
//! let files = generate_from_config(&config)?;
//! # Ok::<(), fastapi_codegen::Error>(())
//! ```
//!
//! Given
//!
//! ```sql
//! CREATE TABLE users (id UUID PRIMARY KEY, email VARCHAR NOT NULL);
//! ```
//!
//! the project `shop` gets, among others, `src/shop/routers/users_route.py` and
//! `src/shop/domain/users/user_schemas.py`.

pub mod analysis;
mod error;
pub mod generators;
pub mod interface;
pub mod models;

pub use error::{Error, Result};
pub use models::*;

pub use analysis::{ParseError, SchemaAnalyzer, SchemaFormat};
pub use generators::{generate, TemplateSource};
pub use interface::config::GenerateConfig;
pub use interface::output::{Logger, ProgressReporter};
pub use interface::{generate_from_config, generate_quietly};
