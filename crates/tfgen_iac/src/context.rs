//! Template data context.

use std::collections::BTreeMap;

use serde::Serialize;

use tfgen_config::{Backend, Config, Environment, GenerateRequest, ModuleRef, ProviderConfig, Variable};

/// Data handed to every template for one entity.
///
/// The context borrows from the loaded config and the request and is never
/// mutated. Per-environment files are rendered with a copy produced by
/// [`RenderContext::with_environment`].
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RenderContext<'a> {
    pub provider: &'a ProviderConfig,
    pub terraform_version: &'a str,
    pub modules: &'a [ModuleRef],
    pub organisation_name: &'a str,
    pub product_name: &'a str,
    /// Empty in single-product mode.
    pub customer_name: &'a str,
    pub region: &'a str,
    pub environment: &'a str,
    pub backend: &'a Backend,
    pub variables: &'a BTreeMap<String, Variable>,
}

impl<'a> RenderContext<'a> {
    pub fn new(
        config: &'a Config,
        request: &'a GenerateRequest,
        provider: &'a ProviderConfig,
        customer_name: &'a str,
    ) -> Self {
        Self {
            provider,
            terraform_version: &config.terraform_version,
            modules: &config.modules,
            organisation_name: &request.organisation_name,
            product_name: &request.product_name,
            customer_name,
            region: &config.region,
            environment: &config.environment,
            backend: &config.backend,
            variables: &config.variables,
        }
    }

    /// Copy of this context with `Environment` set to `env`.
    pub fn with_environment(self, env: Environment) -> Self {
        Self {
            environment: env.as_str(),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_environment_leaves_original() {
        let config = Config {
            environment: "dev".to_string(),
            ..Default::default()
        };
        let request = GenerateRequest::new("contoso", "shop", "aws");
        let provider = ProviderConfig {
            name: "aws".to_string(),
            ..Default::default()
        };

        let base = RenderContext::new(&config, &request, &provider, "acme");
        let prod = base.with_environment(Environment::Prod);

        assert_eq!(base.environment, "dev");
        assert_eq!(prod.environment, "prod");
        assert_eq!(prod.customer_name, "acme");
    }

    #[test]
    fn test_serializes_pascal_case_keys() {
        let config = Config::default();
        let request = GenerateRequest::new("contoso", "shop", "aws");
        let provider = ProviderConfig::default();

        let value = serde_json::to_value(RenderContext::new(&config, &request, &provider, "")).unwrap();
        for key in [
            "Provider",
            "TerraformVersion",
            "Modules",
            "OrganisationName",
            "ProductName",
            "CustomerName",
            "Region",
            "Environment",
            "Backend",
            "Variables",
        ] {
            assert!(value.get(key).is_some(), "missing {}", key);
        }
    }
}
