//! Integration tests for Terraform tree generation.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::tempdir;
use tfgen_config::{FileConfigSource, GenerateRequest};
use tfgen_iac::{Generator, IacError, LocalFs, MemoryOutput};
use tfgen_templates::{DirTemplateSource, TemplateRenderer};
use walkdir::WalkDir;

fn find_workspace_path(name: &str) -> PathBuf {
    let candidates = [
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../..").join(name),
        PathBuf::from(name),
        Path::new("..").join(name),
        Path::new("../..").join(name),
    ];

    for candidate in candidates {
        if candidate.exists() {
            return candidate;
        }
    }

    PathBuf::from(name)
}

fn local_generator(out: &Path) -> Generator<FileConfigSource, LocalFs> {
    let config = FileConfigSource::new(find_workspace_path("configs/terraform-generator.json"));
    let renderer = TemplateRenderer::new(DirTemplateSource::new(find_workspace_path("templates")));
    Generator::new(config, renderer, LocalFs).with_output_root(out)
}

/// Every file under `root`, relative path → content.
fn snapshot(root: &Path) -> BTreeMap<String, String> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let relative = e.path().strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/");
            (relative, fs::read_to_string(e.path()).unwrap())
        })
        .collect()
}

fn count_in(dir: &Path) -> usize {
    if !dir.exists() {
        return 0;
    }
    fs::read_dir(dir).unwrap().count()
}

#[test]
fn test_customers_get_full_tree() {
    let dir = tempdir().unwrap();
    let gen = local_generator(dir.path());

    let request = GenerateRequest::new("contoso", "webshop", "azure").with_customers(["acme", " beta "]);
    let report = gen.generate(&request).unwrap();
    assert_eq!(report.provider, "azurerm");
    assert_eq!(report.files.len(), 16);

    for customer in ["acme", "beta"] {
        let root = dir.path().join("azurerm/contoso").join(customer);
        for file in ["providers.tf", "main.tf", "variables.tf", "vars.tfvars"] {
            assert!(root.join(file).is_file(), "{} missing {}", customer, file);
        }
        for env in ["nonprod", "prod"] {
            let name = format!("{}_{}.tfvars", customer, env);
            assert!(root.join("backend").join(&name).is_file());
            assert!(root.join("vars").join(&name).is_file());
        }
        assert_eq!(count_in(&root.join("backend")), 2);
        assert_eq!(count_in(&root.join("vars")), 2);
    }

    assert!(!dir.path().join("azurerm/contoso/ beta ").exists());
}

#[test]
fn test_product_gets_backend_only() {
    let dir = tempdir().unwrap();
    let gen = local_generator(dir.path());

    let report = gen.generate(&GenerateRequest::new("contoso", "webshop", "aws")).unwrap();
    assert_eq!(report.files.len(), 6);

    let root = dir.path().join("aws/contoso/webshop");
    assert_eq!(count_in(&root.join("backend")), 2);
    assert!(root.join("backend/webshop_nonprod.tfvars").is_file());
    assert!(root.join("backend/webshop_prod.tfvars").is_file());
    assert!(!root.join("vars").exists());
}

#[test]
fn test_unknown_provider_writes_nothing() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("output");
    let gen = local_generator(&out);

    let err = gen
        .generate(&GenerateRequest::new("contoso", "webshop", "digitalocean"))
        .unwrap_err();
    assert!(matches!(err, IacError::ProviderNotFound(_)));
    assert!(!out.exists());
}

#[test]
fn test_regeneration_is_byte_identical() {
    let dir = tempdir().unwrap();
    let gen = local_generator(dir.path());
    let request = GenerateRequest::new("contoso", "webshop", "gcp").with_customers(["acme"]);

    gen.generate(&request).unwrap();
    let first = snapshot(dir.path());

    // Scribble over one file; regeneration must restore it.
    fs::write(dir.path().join("google/contoso/acme/main.tf"), "tampered").unwrap();
    gen.generate(&request).unwrap();

    assert_eq!(snapshot(dir.path()), first);
}

#[test]
fn test_rendered_content() {
    let dir = tempdir().unwrap();
    let gen = local_generator(dir.path());
    gen.generate(&GenerateRequest::new("contoso", "webshop", "azurerm").with_customers(["acme"]))
        .unwrap();

    let root = dir.path().join("azurerm/contoso/acme");

    let providers = fs::read_to_string(root.join("providers.tf")).unwrap();
    assert!(providers.contains(r#"required_version = ">= 1.6.0""#));
    assert!(providers.contains(r#"source  = "hashicorp/azurerm""#));
    assert!(providers.contains("features {}"));

    let main = fs::read_to_string(root.join("main.tf")).unwrap();
    assert!(main.contains("# Webshop for Acme on Azure"));
    assert!(main.contains(r#"module "network""#));
    assert!(main.contains(r#"version = "1.2.0""#));

    let variables = fs::read_to_string(root.join("variables.tf")).unwrap();
    assert!(variables.contains(r#"default     = toset(["10.0.0.0/16"])"#));
    assert!(variables.contains(
        "type        = object({ publisher = string, offer = string, sku = string, version = string })"
    ));

    // Tuples carry no type constraint; HCL has no bare `tuple` type.
    assert!(!variables.contains("= tuple"));
    assert!(variables.contains(r#"default     = ["tcp", 443]"#));

    let backend = fs::read_to_string(root.join("backend/acme_prod.tfvars")).unwrap();
    assert!(backend.contains(r#"resource_group_name = "tfstate-rg""#));
    assert!(backend.contains(r#"key = "contoso/acme/prod.tfstate""#));
    assert!(!backend.contains("type ="));

    let vars = fs::read_to_string(root.join("vars/acme_nonprod.tfvars")).unwrap();
    assert!(vars.contains(r#"environment = "nonprod""#));
    assert!(vars.contains("instance_count = 2"));
    assert!(vars.contains(r#"port_range = ["tcp", 443]"#));
}

#[test]
fn test_dry_run_into_memory() {
    let config = FileConfigSource::new(find_workspace_path("configs/terraform-generator.json"));
    let renderer = TemplateRenderer::new(DirTemplateSource::new(find_workspace_path("templates")));
    let gen = Generator::new(config, renderer, MemoryOutput::new()).with_output_root("output");

    let report = gen
        .generate(&GenerateRequest::new("contoso", "webshop", "aws").with_customers(["acme"]))
        .unwrap();

    assert_eq!(report.files.len(), 8);
    assert_eq!(gen.output().write_order(), report.files);

    let main = gen.output().file("output/aws/contoso/acme/main.tf").unwrap();
    assert!(main.contains("on AWS"));
    assert!(gen
        .output()
        .dirs()
        .contains(&PathBuf::from("output/aws/contoso/acme/vars")));
}

#[test]
fn test_failure_midway_keeps_earlier_customers() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("output");
    let gen = local_generator(&out);

    // A file where beta's directory should be makes directory creation fail.
    fs::create_dir_all(out.join("aws/contoso")).unwrap();
    fs::write(out.join("aws/contoso/beta"), "").unwrap();

    let request =
        GenerateRequest::new("contoso", "webshop", "aws").with_customers(["acme", "beta", "gamma"]);
    let err = gen.generate(&request).unwrap_err();
    assert!(matches!(err, IacError::DirectoryCreation { .. }));

    assert_eq!(snapshot(&out.join("aws/contoso/acme")).len(), 8);
    assert!(!out.join("aws/contoso/gamma").exists());
}
