//! Providers command - List supported cloud providers.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use tfgen_config::{CloudProvider, Config, ConfigSource, FileConfigSource};

#[derive(Args)]
pub struct ProvidersArgs {
    /// Also report whether each provider is configured in this file
    #[arg(long, env = "TFGEN_CONFIG")]
    pub config: Option<PathBuf>,
}

pub fn execute(args: ProvidersArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => Some(
            FileConfigSource::new(path)
                .load()
                .with_context(|| format!("Failed to load configuration {:?}", path))?,
        ),
        None => None,
    };

    println!("{:<10} {:<16} {:<14} STATUS", "PROVIDER", "ALIASES", "REGION");
    for line in provider_lines(config.as_ref()) {
        println!("{}", line);
    }

    Ok(())
}

fn provider_lines(config: Option<&Config>) -> Vec<String> {
    CloudProvider::all()
        .into_iter()
        .map(|cloud| {
            let status = match config {
                Some(config) if config.provider(cloud.provider_name()).is_some() => "configured",
                Some(_) => "missing",
                None => "-",
            };
            format!(
                "{:<10} {:<16} {:<14} {}",
                cloud.provider_name(),
                cloud.aliases().join(", "),
                cloud.default_region(),
                status
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tfgen_config::ProviderConfig;

    #[test]
    fn test_lines_without_config() {
        let lines = provider_lines(None);
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("azurerm"));
        assert!(lines[1].contains("azure, azurerm"));
        assert!(lines.iter().all(|l| l.ends_with('-')));
    }

    #[test]
    fn test_lines_mark_configured_providers() {
        let config = Config {
            providers: vec![ProviderConfig {
                name: "aws".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let lines = provider_lines(Some(&config));
        assert!(lines[0].ends_with("configured"));
        assert!(lines[2].ends_with("missing"));
    }
}
