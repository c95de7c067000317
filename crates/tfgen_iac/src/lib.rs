//! # tfgen_iac
//!
//! Terraform file tree generation for tfgen.
//!
//! Given a [`GenerateRequest`](tfgen_config::GenerateRequest), the
//! [`Generator`] validates it, resolves the provider, and writes one tree per
//! entity:
//!
//! ```text
//! <output-root>/<provider>/<organisation>/<product or customer>/
//!     providers.tf  main.tf  variables.tf  vars.tfvars
//!     backend/<entity>_nonprod.tfvars  backend/<entity>_prod.tfvars
//!     vars/<entity>_nonprod.tfvars     vars/<entity>_prod.tfvars   (customers only)
//! ```
//!
//! `<provider>` is always the Terraform provider name, and it also picks the
//! `main.tf` template group. A request for `azure` and one for `azurerm` both
//! land in `<output-root>/azurerm/...` and render `templates/azurerm/`;
//! likewise `gcp` and `google` share `google/`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use tfgen_config::{FileConfigSource, GenerateRequest};
//! use tfgen_iac::{Generator, LocalFs};
//! use tfgen_templates::{DirTemplateSource, TemplateRenderer};
//!
//! let generator = Generator::new(
//!     FileConfigSource::new("configs/terraform-generator.json"),
//!     TemplateRenderer::new(DirTemplateSource::new("templates")),
//!     LocalFs,
//! )
//! .with_output_root("output");
//!
//! let request = GenerateRequest::new("contoso", "webshop", "azure")
//!     .with_customers(["acme", "globex"]);
//! let report = generator.generate(&request).unwrap();
//! println!("wrote {} files", report.files.len());
//! ```

pub mod context;
pub mod error;
pub mod generator;
pub mod output;
pub mod planner;

pub use context::RenderContext;
pub use error::{IacError, IacResult};
pub use generator::{GenerationReport, Generator, DEFAULT_OUTPUT_ROOT};
pub use output::{DirectoryCreator, FileWriter, LocalFs, MemoryOutput};
pub use planner::{plan_files, tfvars_file_name, Entity, FileSpec, BACKEND_DIR, VARS_DIR};
