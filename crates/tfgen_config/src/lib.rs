//! # tfgen_config
//!
//! Configuration model for tfgen.
//!
//! This crate describes everything a generation run reads but never changes:
//!
//! - **Providers**: configured Terraform providers and the request alias table
//! - **Variables**: declarations with a type tag decoded once into [`VarType`]
//! - **Backend / modules / region**: values passed straight to templates
//! - **Requests**: the inbound [`GenerateRequest`] shape
//!
//! ## Example
//!
//! ```rust,no_run
//! use tfgen_config::{CloudProvider, ConfigSource, FileConfigSource};
//!
//! let config = FileConfigSource::new("configs/terraform-generator.json")
//!     .load()
//!     .unwrap();
//!
//! let provider = CloudProvider::from_alias("azure").unwrap();
//! assert!(config.provider(provider.provider_name()).is_some());
//! ```

pub mod error;
pub mod models;
pub mod provider;
pub mod reader;
pub mod types;

pub use error::{ConfigError, ConfigResult};
pub use models::{
    Backend, Config, Environment, GenerateRequest, ModuleRef, ProviderConfig, Variable,
};
pub use provider::CloudProvider;
pub use reader::{ConfigSource, FileConfigSource};
pub use types::{FieldType, ObjectKind, ObjectSchema, VarType};
