// Load and validate FeatureStore manifests.

use crate::error::Result;
use crate::types::{
    FeatureStoreSpec, ParsedFeatureStore, FEATURE_STORE_API_VERSION, FEATURE_STORE_KIND,
};
use crate::validation;

/// A manifest that passed envelope and spec validation.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureStoreManifest {
    pub name: String,
    pub namespace: Option<String>,
    pub spec: FeatureStoreSpec,
}

/// Parses a FeatureStore YAML manifest and validates apiVersion/kind, metadata.name and the spec.
/// All problems are reported together.
pub fn load_feature_store_manifest(
    config_yaml: &str,
) -> std::result::Result<FeatureStoreManifest, Vec<String>> {
    let parsed = parse_manifest(config_yaml).map_err(|e| vec![e.to_string()])?;

    let mut errors = Vec::new();

    if parsed.api_version.as_deref() != Some(FEATURE_STORE_API_VERSION) {
        errors.push(format!("apiVersion must be '{}'", FEATURE_STORE_API_VERSION));
    }
    if parsed.kind.as_deref() != Some(FEATURE_STORE_KIND) {
        errors.push(format!("kind must be '{}'", FEATURE_STORE_KIND));
    }

    let (name, namespace) = match parsed.metadata {
        Some(metadata) => (metadata.name.filter(|n| !n.is_empty()), metadata.namespace),
        None => (None, None),
    };
    if name.is_none() {
        errors.push("metadata.name is required".to_string());
    }

    let spec = match parsed.spec {
        Some(spec) => spec,
        None => {
            errors.push("spec is required".to_string());
            return Err(errors);
        }
    };

    errors.extend(
        validation::violations(&spec)
            .into_iter()
            .map(|v| format!("[{}] spec.{}", v.rule, v)),
    );

    match name {
        Some(name) if errors.is_empty() => Ok(FeatureStoreManifest {
            name,
            namespace,
            spec,
        }),
        _ => Err(errors),
    }
}

fn parse_manifest(config_yaml: &str) -> Result<ParsedFeatureStore> {
    Ok(serde_yaml::from_str(config_yaml)?)
}

pub fn validate_feature_store_manifest(config_yaml: &str) -> std::result::Result<(), Vec<String>> {
    load_feature_store_manifest(config_yaml).map(|_| ())
}
