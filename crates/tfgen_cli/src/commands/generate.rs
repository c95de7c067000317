//! Generate command - Render a Terraform file tree for a request.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use tfgen_config::{FileConfigSource, GenerateRequest};
use tfgen_iac::{DirectoryCreator, FileWriter, GenerationReport, Generator, LocalFs, MemoryOutput};
use tfgen_templates::{DirTemplateSource, TemplateRenderer};

#[derive(Args)]
pub struct GenerateArgs {
    /// Organisation name (top-level output directory)
    #[arg(long)]
    pub organisation: Option<String>,

    /// Product name
    #[arg(long)]
    pub product: Option<String>,

    /// Cloud provider (aws, azure, azurerm, gcp, google)
    #[arg(long)]
    pub provider: Option<String>,

    /// Customer to generate for; repeat for multi-tenant output
    #[arg(long = "customer")]
    pub customers: Vec<String>,

    /// JSON request file; flags given alongside override its fields
    #[arg(long)]
    pub request: Option<PathBuf>,

    /// Generator configuration (json, yaml or toml)
    #[arg(long, env = "TFGEN_CONFIG", default_value = "configs/terraform-generator.json")]
    pub config: PathBuf,

    /// Template directory
    #[arg(long, env = "TFGEN_TEMPLATES", default_value = "templates")]
    pub templates: PathBuf,

    /// Output root directory
    #[arg(short, long, env = "TFGEN_OUTPUT", default_value = tfgen_iac::DEFAULT_OUTPUT_ROOT)]
    pub output: PathBuf,

    /// Render into memory and list the files instead of writing them
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateArgs {
    /// Build the request from the request file (if any) and the flags.
    pub fn build_request(&self) -> Result<GenerateRequest> {
        let mut request = match &self.request {
            Some(path) => read_request(path)?,
            None => GenerateRequest::default(),
        };

        if let Some(organisation) = &self.organisation {
            request.organisation_name = organisation.clone();
        }
        if let Some(product) = &self.product {
            request.product_name = product.clone();
        }
        if let Some(provider) = &self.provider {
            request.provider = provider.clone();
        }
        if !self.customers.is_empty() {
            request.customers = Some(self.customers.clone());
        }

        Ok(request)
    }
}

fn read_request(path: &Path) -> Result<GenerateRequest> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read request file {:?}", path))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid request file {:?}", path))
}

pub fn execute(args: GenerateArgs, quiet: bool) -> Result<()> {
    let request = args.build_request()?;
    info!(
        "Generating {}/{} for provider '{}'",
        request.organisation_name, request.product_name, request.provider
    );

    let config = FileConfigSource::new(&args.config);
    let renderer = TemplateRenderer::new(DirTemplateSource::new(&args.templates));

    if args.dry_run {
        let generator = Generator::new(config, renderer, MemoryOutput::new()).with_output_root(&args.output);
        let report = run(&generator, &request)?;
        if !quiet {
            println!("🔍 Dry run: {} files would be written", report.files.len());
            for file in &report.files {
                println!("  {}", file.display());
            }
        }
        return Ok(());
    }

    let generator = Generator::new(config, renderer, LocalFs).with_output_root(&args.output);
    let report = run(&generator, &request)?;

    if !quiet {
        println!(
            "✅ Generated {} files for {} under {:?}",
            report.files.len(),
            report.entities.join(", "),
            generator.output_root().join(&report.provider)
        );
    }

    Ok(())
}

fn run<O>(generator: &Generator<FileConfigSource, O>, request: &GenerateRequest) -> Result<GenerationReport>
where
    O: DirectoryCreator + FileWriter,
{
    generator
        .generate(request)
        .context("Failed to generate Terraform files")
}
