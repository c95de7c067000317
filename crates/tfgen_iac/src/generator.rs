//! Request orchestration.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use tfgen_config::{CloudProvider, ConfigSource, GenerateRequest};
use tfgen_templates::TemplateRenderer;

use crate::context::RenderContext;
use crate::error::{IacError, IacResult};
use crate::output::{DirectoryCreator, FileWriter};
use crate::planner::{plan_files, Entity};

/// Default directory generated trees are written under.
pub const DEFAULT_OUTPUT_ROOT: &str = "output";

/// Summary of a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Canonical provider name used for paths and templates.
    pub provider: String,
    /// Entity names in processing order.
    pub entities: Vec<String>,
    /// Files written, in write order.
    pub files: Vec<PathBuf>,
}

/// Generates Terraform trees for requests.
///
/// Config, templates and output are injected; nothing is read from global
/// state. One request is processed synchronously: entity by entity, file by
/// file, stopping at the first error. Files already written are left in place.
pub struct Generator<S, O> {
    source: S,
    renderer: TemplateRenderer,
    output: O,
    output_root: PathBuf,
}

impl<S, O> Generator<S, O>
where
    S: ConfigSource,
    O: DirectoryCreator + FileWriter,
{
    pub fn new(source: S, renderer: TemplateRenderer, output: O) -> Self {
        Self {
            source,
            renderer,
            output,
            output_root: PathBuf::from(DEFAULT_OUTPUT_ROOT),
        }
    }

    pub fn with_output_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.output_root = root.into();
        self
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    /// Generate every file for `request`.
    pub fn generate(&self, request: &GenerateRequest) -> IacResult<GenerationReport> {
        let cloud = validate_request(request)?;
        let customers = customer_names(request)?;

        let config = self.source.load()?;
        let provider_name = cloud.provider_name();
        let provider = config
            .provider(provider_name)
            .ok_or_else(|| IacError::ProviderNotFound(request.provider.clone()))?;

        info!(
            "Generating Terraform for {}/{} on {} ({} customers)",
            request.organisation_name,
            request.product_name,
            provider_name,
            customers.len()
        );

        let base_path = self
            .output_root
            .join(provider_name)
            .join(&request.organisation_name);
        let mut report = GenerationReport {
            provider: provider_name.to_string(),
            ..Default::default()
        };

        if customers.is_empty() {
            let entity = Entity::Product(request.product_name.clone());
            let context = RenderContext::new(&config, request, provider, "");
            self.generate_entity(&entity, &base_path, context, provider_name, &mut report)?;
        } else {
            for customer in customers {
                let entity = Entity::Customer(customer.to_string());
                let context = RenderContext::new(&config, request, provider, customer);
                self.generate_entity(&entity, &base_path, context, provider_name, &mut report)?;
            }
        }

        info!(
            "Generated {} files for {} entities",
            report.files.len(),
            report.entities.len()
        );
        Ok(report)
    }

    fn generate_entity(
        &self,
        entity: &Entity,
        base_path: &Path,
        context: RenderContext<'_>,
        provider_name: &str,
        report: &mut GenerationReport,
    ) -> IacResult<()> {
        let entity_path = base_path.join(entity.name());
        info!("Generating files for {} at {:?}", entity.name(), entity_path);

        for dir in entity.subdirectories() {
            let path = entity_path.join(dir);
            self.output
                .create_dirs(std::slice::from_ref(&path))
                .map_err(|source| IacError::DirectoryCreation { path, source })?;
        }

        for file in plan_files(entity, &entity_path, provider_name) {
            let context = match file.environment {
                Some(env) => context.with_environment(env),
                None => context,
            };
            let content = self.renderer.render(&file.template, context)?;

            self.output
                .write_file(&file.destination, &content)
                .map_err(|source| IacError::FileWrite {
                    path: file.destination.clone(),
                    source,
                })?;
            debug!("Wrote {:?} from {}", file.destination, file.template);
            report.files.push(file.destination);
        }

        report.entities.push(entity.name().to_string());
        Ok(())
    }
}

/// Check required fields and resolve the provider alias.
fn validate_request(request: &GenerateRequest) -> IacResult<CloudProvider> {
    if request.organisation_name.trim().is_empty()
        || request.product_name.trim().is_empty()
        || request.provider.trim().is_empty()
    {
        return Err(IacError::Validation(
            "organisation_name, product_name, and provider are required".to_string(),
        ));
    }

    check_path_segment("organisation_name", &request.organisation_name)?;
    check_path_segment("product_name", &request.product_name)?;

    CloudProvider::from_alias(&request.provider)
        .ok_or_else(|| IacError::ProviderNotFound(request.provider.clone()))
}

/// Trimmed customer names in request order.
fn customer_names(request: &GenerateRequest) -> IacResult<Vec<&str>> {
    let names: Vec<&str> = request
        .customers
        .iter()
        .flatten()
        .map(|c| c.trim())
        .collect();

    for name in &names {
        if name.is_empty() {
            return Err(IacError::Validation("customer names must not be blank".to_string()));
        }
        check_path_segment("customer", name)?;
    }
    Ok(names)
}

fn check_path_segment(field: &str, value: &str) -> IacResult<()> {
    let value = value.trim();
    if value == "." || value == ".." || value.contains(['/', '\\']) {
        return Err(IacError::Validation(format!(
            "{} must be a single path segment, got {:?}",
            field, value
        )));
    }
    Ok(())
}
