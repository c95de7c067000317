//! Cloud provider definitions.

use serde::{Deserialize, Serialize};

/// Supported cloud providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloudProvider {
    Aws,
    Azure,
    Gcp,
}

impl CloudProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            CloudProvider::Aws => "aws",
            CloudProvider::Azure => "azure",
            CloudProvider::Gcp => "gcp",
        }
    }

    /// Resolve request input (case-insensitive) through the alias table.
    ///
    /// Both the short cloud names and the Terraform provider names are
    /// accepted; anything else is `None`.
    pub fn from_alias(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "aws" => Some(CloudProvider::Aws),
            "azure" | "azurerm" => Some(CloudProvider::Azure),
            "gcp" | "google" => Some(CloudProvider::Gcp),
            _ => None,
        }
    }

    pub fn all() -> Vec<Self> {
        vec![CloudProvider::Aws, CloudProvider::Azure, CloudProvider::Gcp]
    }

    /// Get the Terraform provider name.
    pub fn provider_name(&self) -> &'static str {
        match self {
            CloudProvider::Aws => "aws",
            CloudProvider::Azure => "azurerm",
            CloudProvider::Gcp => "google",
        }
    }

    /// Request spellings that resolve to this provider.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            CloudProvider::Aws => &["aws"],
            CloudProvider::Azure => &["azure", "azurerm"],
            CloudProvider::Gcp => &["gcp", "google"],
        }
    }

    /// Get default region for the provider.
    pub fn default_region(&self) -> &'static str {
        match self {
            CloudProvider::Aws => "us-east-1",
            CloudProvider::Azure => "eastus",
            CloudProvider::Gcp => "us-central1",
        }
    }
}

impl std::fmt::Display for CloudProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_table() {
        assert_eq!(CloudProvider::from_alias("azure").map(|p| p.provider_name()), Some("azurerm"));
        assert_eq!(CloudProvider::from_alias("AzureRM").map(|p| p.provider_name()), Some("azurerm"));
        assert_eq!(CloudProvider::from_alias("GCP").map(|p| p.provider_name()), Some("google"));
        assert_eq!(CloudProvider::from_alias("google").map(|p| p.provider_name()), Some("google"));
        assert_eq!(CloudProvider::from_alias("aws").map(|p| p.provider_name()), Some("aws"));
        assert_eq!(CloudProvider::from_alias("digitalocean"), None);
        assert_eq!(CloudProvider::from_alias(""), None);
    }

    #[test]
    fn test_aliases_round_trip() {
        for provider in CloudProvider::all() {
            for alias in provider.aliases() {
                assert_eq!(CloudProvider::from_alias(alias), Some(provider));
            }
        }
    }
}
