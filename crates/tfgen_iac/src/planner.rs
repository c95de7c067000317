//! Output file planning.
//!
//! [`plan_files`] decides which files an entity gets, where they go and in
//! which order. It does no I/O and does not touch the render context:
//! per-environment files carry their [`Environment`] so the caller can render
//! them with a per-environment copy of the context.

use std::path::{Path, PathBuf};

use tfgen_config::Environment;
use tfgen_templates::TemplateId;

pub const BACKEND_DIR: &str = "backend";
pub const VARS_DIR: &str = "vars";

const PROVIDERS_TEMPLATE: &str = "providers.tf.tmpl";
const MAIN_TEMPLATE: &str = "main.tf.tmpl";
const VARIABLES_TEMPLATE: &str = "variables.tf.tmpl";
const VARS_TEMPLATE: &str = "vars.tfvars.tmpl";
const BACKEND_TEMPLATE: &str = "backend.tfvars.tmpl";

/// The unit of generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entity {
    /// Single-product mode.
    Product(String),
    /// One customer in multi-tenant mode.
    Customer(String),
}

impl Entity {
    pub fn name(&self) -> &str {
        match self {
            Entity::Product(name) | Entity::Customer(name) => name,
        }
    }

    pub fn is_customer(&self) -> bool {
        matches!(self, Entity::Customer(_))
    }

    /// Subdirectories created under the entity path before rendering.
    pub fn subdirectories(&self) -> &'static [&'static str] {
        match self {
            Entity::Product(_) => &[BACKEND_DIR],
            Entity::Customer(_) => &[BACKEND_DIR, VARS_DIR],
        }
    }
}

/// One planned output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSpec {
    pub template: TemplateId,
    pub destination: PathBuf,
    /// Environment to render with; `None` uses the config's environment.
    pub environment: Option<Environment>,
}

impl FileSpec {
    fn base(template: TemplateId, destination: PathBuf) -> Self {
        Self {
            template,
            destination,
            environment: None,
        }
    }

    fn for_env(template: TemplateId, destination: PathBuf, env: Environment) -> Self {
        Self {
            template,
            destination,
            environment: Some(env),
        }
    }
}

/// `<name>_<env>.tfvars`
pub fn tfvars_file_name(name: &str, env: Environment) -> String {
    format!("{}_{}.tfvars", name, env.as_str())
}

/// Plan every file for `entity` rooted at `entity_path`.
///
/// `provider` selects the template group for `main.tf`.
pub fn plan_files(entity: &Entity, entity_path: &Path, provider: &str) -> Vec<FileSpec> {
    let mut files = vec![
        FileSpec::base(TemplateId::generic(PROVIDERS_TEMPLATE), entity_path.join("providers.tf")),
        FileSpec::base(TemplateId::new(provider, MAIN_TEMPLATE), entity_path.join("main.tf")),
        FileSpec::base(TemplateId::generic(VARIABLES_TEMPLATE), entity_path.join("variables.tf")),
        FileSpec::base(TemplateId::generic(VARS_TEMPLATE), entity_path.join("vars.tfvars")),
    ];

    for env in Environment::ALL {
        let file_name = tfvars_file_name(entity.name(), env);

        files.push(FileSpec::for_env(
            TemplateId::generic(BACKEND_TEMPLATE),
            entity_path.join(BACKEND_DIR).join(&file_name),
            env,
        ));

        if entity.is_customer() {
            files.push(FileSpec::for_env(
                TemplateId::generic(VARS_TEMPLATE),
                entity_path.join(VARS_DIR).join(&file_name),
                env,
            ));
        }
    }

    files
}
