// In-memory FeatureStore status table: apply manifests, fold subsystem reports.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::readiness::{ConditionType, FeatureStoreStatus, ReadinessAggregator, SubsystemReport};
use crate::tools::manifest::{load_feature_store_manifest, FeatureStoreManifest};
use crate::validation;

/// One aggregator per FeatureStore, keyed by `namespace/name`.
#[derive(Debug)]
pub struct StatusBook {
    default_namespace: String,
    entries: BTreeMap<String, ReadinessAggregator>,
}

impl StatusBook {
    pub fn new(default_namespace: impl Into<String>) -> Self {
        Self {
            default_namespace: default_namespace.into(),
            entries: BTreeMap::new(),
        }
    }

    fn key(&self, namespace: Option<&str>, name: &str) -> String {
        format!("{}/{}", namespace.unwrap_or(&self.default_namespace), name)
    }

    /// Registers a manifest, or reconfigures the existing entry. A spec that
    /// breaks any rule leaves the book untouched.
    pub fn apply(&mut self, manifest: &FeatureStoreManifest) -> Result<&FeatureStoreStatus> {
        validation::validate(&manifest.spec)?;
        let key = self.key(manifest.namespace.as_deref(), &manifest.name);
        let aggregator = self
            .entries
            .entry(key)
            .and_modify(|existing| {
                existing.reconfigure(&manifest.spec);
            })
            .or_insert_with(|| ReadinessAggregator::new(&manifest.spec));
        Ok(aggregator.status())
    }

    pub fn report(
        &mut self,
        namespace: Option<&str>,
        name: &str,
        report: SubsystemReport,
    ) -> Result<&FeatureStoreStatus> {
        let key = self.key(namespace, name);
        let aggregator = self.entries.get_mut(&key).ok_or(Error::NotApplied(key))?;
        aggregator.report(report)?;
        Ok(aggregator.status())
    }

    pub fn get(&self, namespace: Option<&str>, name: &str) -> Option<&FeatureStoreStatus> {
        self.entries.get(&self.key(namespace, name)).map(ReadinessAggregator::status)
    }

    pub fn status(&self, namespace: Option<&str>, name: &str) -> Result<&FeatureStoreStatus> {
        let key = self.key(namespace, name);
        self.entries
            .get(&key)
            .map(ReadinessAggregator::status)
            .ok_or(Error::NotApplied(key))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn to_json(status: &FeatureStoreStatus) -> Result<String> {
    Ok(serde_json::to_string_pretty(status)?)
}

/// Validates and applies a manifest, returning the resulting status as JSON.
pub fn apply_feature_store_manifest(
    book: &mut StatusBook,
    config_yaml: &str,
) -> std::result::Result<String, String> {
    let manifest = load_feature_store_manifest(config_yaml)
        .map_err(|errors| format!("Validation errors:\n{}", errors.join("\n")))?;
    tracing::info!(
        name = %manifest.name,
        project = %manifest.spec.feast_project,
        "applied FeatureStore manifest"
    );
    book.apply(&manifest)
        .and_then(to_json)
        .map_err(|e| e.to_string())
}

fn record_report(
    book: &mut StatusBook,
    namespace: Option<&str>,
    name: &str,
    condition_type: &str,
    succeeded: bool,
    detail: Option<&str>,
) -> Result<String> {
    let condition_type: ConditionType = condition_type.parse()?;
    let report = if succeeded {
        SubsystemReport::succeeded(condition_type)
    } else {
        SubsystemReport::failed(condition_type, detail.unwrap_or("deployment failed"))
    };
    to_json(book.report(namespace, name, report)?)
}

pub fn report_subsystem_status(
    book: &mut StatusBook,
    namespace: Option<&str>,
    name: &str,
    condition_type: &str,
    succeeded: bool,
    detail: Option<&str>,
) -> std::result::Result<String, String> {
    record_report(book, namespace, name, condition_type, succeeded, detail)
        .map_err(|e| e.to_string())
}

pub fn get_feature_store_status(
    book: &StatusBook,
    namespace: Option<&str>,
    name: &str,
) -> std::result::Result<String, String> {
    book.status(namespace, name)
        .and_then(to_json)
        .map_err(|e| e.to_string())
}
