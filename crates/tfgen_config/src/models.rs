//! Data models for generator configuration and requests.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::VarType;

/// Root generator configuration.
///
/// Loaded once per request and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Providers this configuration can generate for.
    #[serde(default)]
    pub providers: Vec<ProviderConfig>,
    /// Required Terraform version constraint (e.g. `>= 1.6.0`).
    #[serde(default)]
    pub terraform_version: String,
    /// Module references made available to templates.
    #[serde(default)]
    pub modules: Vec<ModuleRef>,
    #[serde(default)]
    pub region: String,
    /// Environment value used by the environment-independent files.
    #[serde(default)]
    pub environment: String,
    #[serde(default)]
    pub backend: Backend,
    /// Variable declarations keyed by name.
    #[serde(default)]
    pub variables: BTreeMap<String, Variable>,
}

impl Config {
    /// Find a configured provider by Terraform name, ignoring case.
    pub fn provider(&self, name: &str) -> Option<&ProviderConfig> {
        self.providers
            .iter()
            .find(|provider| provider.name.eq_ignore_ascii_case(name))
    }

    /// Copy each variable's map key into its `name` field.
    pub fn normalize(mut self) -> Self {
        for (name, variable) in self.variables.iter_mut() {
            variable.name = name.clone();
        }
        self
    }
}

/// A configured Terraform provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Terraform provider name (`aws`, `azurerm`, `google`).
    pub name: String,
    /// Registry source, e.g. `hashicorp/aws`.
    #[serde(default)]
    pub source: Option<String>,
    /// Version constraint, e.g. `~> 5.0`.
    #[serde(default)]
    pub version: Option<String>,
    /// Any additional provider settings, passed through to templates.
    #[serde(flatten)]
    pub settings: BTreeMap<String, serde_json::Value>,
}

/// Reference to a Terraform module.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleRef {
    pub name: String,
    pub source: String,
    #[serde(default)]
    pub version: Option<String>,
}

/// Remote state backend settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Backend {
    /// Backend type (`s3`, `azurerm`, `gcs`, ...).
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(flatten)]
    pub settings: BTreeMap<String, serde_json::Value>,
}

/// A variable declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    /// Variable name; taken from the config map key on load.
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub var_type: VarType,
    /// Default value; its shape should match `var_type`.
    #[serde(default)]
    pub default: serde_json::Value,
    #[serde(default)]
    pub description: Option<String>,
}

impl Variable {
    pub fn new(name: impl Into<String>, var_type: impl Into<VarType>, default: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            var_type: var_type.into(),
            default,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Inbound generation request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub organisation_name: String,
    pub product_name: String,
    pub provider: String,
    /// Customer names as received; may carry surrounding whitespace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customers: Option<Vec<String>>,
}

impl GenerateRequest {
    pub fn new(
        organisation_name: impl Into<String>,
        product_name: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            organisation_name: organisation_name.into(),
            product_name: product_name.into(),
            provider: provider.into(),
            customers: None,
        }
    }

    pub fn with_customers<I, S>(mut self, customers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.customers = Some(customers.into_iter().map(Into::into).collect());
        self
    }

    /// True when one or more customers are named.
    pub fn is_multi_tenant(&self) -> bool {
        self.customers.as_ref().is_some_and(|c| !c.is_empty())
    }
}

/// Deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    NonProd,
    Prod,
}

impl Environment {
    /// All environments, nonprod first.
    pub const ALL: [Environment; 2] = [Environment::NonProd, Environment::Prod];

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::NonProd => "nonprod",
            Environment::Prod => "prod",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_environment_order() {
        let names: Vec<_> = Environment::ALL.iter().map(|e| e.as_str()).collect();
        assert_eq!(names, vec!["nonprod", "prod"]);
    }

    #[test]
    fn test_request_multi_tenant() {
        let req = GenerateRequest::new("org", "shop", "aws");
        assert!(!req.is_multi_tenant());
        assert!(!req.clone().with_customers(Vec::<String>::new()).is_multi_tenant());
        assert!(req.with_customers(["acme"]).is_multi_tenant());
    }

    #[test]
    fn test_request_wire_shape() {
        let req: GenerateRequest = serde_json::from_value(json!({
            "organisation_name": "contoso",
            "product_name": "shop",
            "provider": "azure",
            "customers": ["acme", " beta "]
        }))
        .unwrap();
        assert_eq!(req.customers.as_deref(), Some(&["acme".to_string(), " beta ".to_string()][..]));

        let req: GenerateRequest = serde_json::from_value(json!({
            "organisation_name": "contoso",
            "product_name": "shop",
            "provider": "aws"
        }))
        .unwrap();
        assert!(req.customers.is_none());
    }

    #[test]
    fn test_config_provider_lookup_ignores_case() {
        let config = Config {
            providers: vec![ProviderConfig {
                name: "AzureRM".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        assert!(config.provider("azurerm").is_some());
        assert!(config.provider("aws").is_none());
    }

    #[test]
    fn test_variable_decoding() {
        let config: Config = serde_json::from_value(json!({
            "variables": {
                "tags": { "type": "map(string)", "default": { "team": "core" } },
                "disk": { "type": "object:os_disk", "default": {} }
            }
        }))
        .unwrap();
        let config = config.normalize();

        let tags = &config.variables["tags"];
        assert_eq!(tags.name, "tags");
        assert_eq!(tags.var_type, VarType::StringMap);
        assert_eq!(
            config.variables["disk"].var_type,
            VarType::Object(crate::types::ObjectKind::OsDisk)
        );
    }

    #[test]
    fn test_backend_settings_flatten() {
        let backend: Backend = serde_json::from_value(json!({
            "type": "azurerm",
            "resource_group_name": "tfstate-rg"
        }))
        .unwrap();
        assert_eq!(backend.kind.as_deref(), Some("azurerm"));
        assert_eq!(backend.settings["resource_group_name"], json!("tfstate-rg"));
    }
}
