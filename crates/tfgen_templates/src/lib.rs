//! # tfgen_templates
//!
//! HCL value formatting and template rendering for tfgen.
//!
//! - [`format`]: type-directed conversion of configuration values into HCL literals
//! - [`TemplateSource`]: lookup of `<group>/<name>` templates on disk or in memory
//! - [`TemplateRenderer`]: minijinja rendering with the formatter exposed to templates
//!
//! Functions available inside templates:
//!
//! | function                 | result                                      |
//! |--------------------------|---------------------------------------------|
//! | `title(s)`               | title-cased string                          |
//! | `add(a, b)`              | integer sum                                 |
//! | `to_json(v)`             | JSON text, `null` if it cannot serialize    |
//! | `coalesce(a, b)`         | `a` unless it is none/undefined, else `b`   |
//! | `type_of(v)`             | `string`, `bool`, `number`, `list`, `map`, `map(string)` or `any` |
//! | `format_value(v, tag)`   | HCL literal of `v` for the type tag         |
//! | `format_default(var)`    | HCL literal of a variable's default         |
//!
//! ## Example
//!
//! ```rust,no_run
//! use tfgen_templates::{DirTemplateSource, TemplateId, TemplateRenderer};
//! use serde_json::json;
//!
//! let renderer = TemplateRenderer::new(DirTemplateSource::new("templates"));
//! let text = renderer
//!     .render(&TemplateId::generic("providers.tf.tmpl"), json!({ "TerraformVersion": ">= 1.6.0" }))
//!     .unwrap();
//! ```

pub mod error;
pub mod format;
pub mod renderer;
pub mod source;

pub use error::{TemplateError, TemplateResult};
pub use format::{format_default, format_typed, format_value};
pub use renderer::TemplateRenderer;
pub use source::{DirTemplateSource, MemoryTemplateSource, TemplateId, TemplateSource, GENERIC_GROUP};
