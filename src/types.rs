// FeatureStore configuration model (parsed YAML/JSON).
// Mutually exclusive blocks are kept as independent Options so validation can
// report both/neither; the accessors collapse them once a spec is accepted.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const FEATURE_STORE_API_VERSION: &str = "feast.dev/v1alpha1";
pub const FEATURE_STORE_KIND: &str = "FeatureStore";

pub const ONLINE_STORE_TYPES: [&str; 11] = [
    "snowflake",
    "redis",
    "ikv",
    "datastore",
    "dynamodb",
    "bigtable",
    "postgres",
    "cassandra",
    "mysql",
    "hazelcast",
    "singlestore",
];
pub const OFFLINE_STORE_TYPES: [&str; 7] = [
    "snowflake", "bigquery", "redshift", "spark", "postgres", "trino", "mssql",
];
pub const REGISTRY_STORE_TYPES: [&str; 2] = ["sql", "snowflake"];
pub const OFFLINE_FILE_TYPES: [&str; 2] = ["dask", "duckdb"];
pub const DEFAULT_OFFLINE_FILE_TYPE: &str = "dask";

pub const S3_SCHEME: &str = "s3://";
pub const GS_SCHEME: &str = "gs://";

/// Parsed `FeatureStore` manifest envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ParsedFeatureStore {
    #[serde(rename = "apiVersion")]
    pub api_version: Option<String>,
    pub kind: Option<String>,
    pub metadata: Option<ParsedMetadata>,
    pub spec: Option<FeatureStoreSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParsedMetadata {
    pub name: Option<String>,
    pub namespace: Option<String>,
}

/// Desired state of a FeatureStore.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeatureStoreSpec {
    /// Feast project id: alphanumeric and underscores, not starting with an underscore.
    pub feast_project: String,
    /// Services to deploy. An ephemeral local registry is deployed when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub services: Option<FeatureStoreServices>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeatureStoreServices {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offline_store: Option<OfflineStore>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub online_store: Option<OnlineStore>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry: Option<Registry>,
}

/// Container settings shared by every deployed service. Passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceConfigs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_pull_policy: Option<PullPolicy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceRequirements>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum PullPolicy {
    Always,
    IfNotPresent,
    Never,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ResourceRequirements {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub limits: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub requests: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct OfflineStore {
    #[serde(flatten)]
    pub service: ServiceConfigs,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persistence: Option<Persistence<OfflineStoreFilePersistence>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct OnlineStore {
    #[serde(flatten)]
    pub service: ServiceConfigs,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persistence: Option<Persistence<OnlineStoreFilePersistence>>,
}

/// Registry service selection. Exactly one of `local` and `remote` is required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Registry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local: Option<LocalRegistryConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote: Option<RemoteRegistryConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RegistrySelection<'a> {
    Local(&'a LocalRegistryConfig),
    Remote(&'a RemoteRegistryConfig),
}

impl Registry {
    /// The active selection, or `None` when both or neither are set.
    pub fn selection(&self) -> Option<RegistrySelection<'_>> {
        match (&self.local, &self.remote) {
            (Some(local), None) => Some(RegistrySelection::Local(local)),
            (None, Some(remote)) => Some(RegistrySelection::Remote(remote)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LocalRegistryConfig {
    #[serde(flatten)]
    pub service: ServiceConfigs,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persistence: Option<Persistence<RegistryFilePersistence>>,
}

/// Points to a registry served elsewhere; no registry is deployed for this FeatureStore.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RemoteRegistryConfig {
    /// `<domain>:<port>`, e.g. `registry.<namespace>.svc.cluster.local:80`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(default, alias = "featureStoreRef", skip_serializing_if = "Option::is_none")]
    pub feast_ref: Option<FeatureStoreRef>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RemoteTarget<'a> {
    Hostname(&'a str),
    FeatureStore(&'a FeatureStoreRef),
}

impl RemoteRegistryConfig {
    pub fn target(&self) -> Option<RemoteTarget<'_>> {
        match (&self.hostname, &self.feast_ref) {
            (Some(host), None) => Some(RemoteTarget::Hostname(host)),
            (None, Some(reference)) => Some(RemoteTarget::FeatureStore(reference)),
            _ => None,
        }
    }
}

/// Another FeatureStore whose registry is reused.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FeatureStoreRef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

/// Persistence block of one service kind. Exactly one of `file` and `store` is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Persistence<F> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<F>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store: Option<StorePersistence>,
}

impl<F> Default for Persistence<F> {
    fn default() -> Self {
        Self {
            file: None,
            store: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PersistenceChoice<'a, F> {
    File(&'a F),
    Store(&'a StorePersistence),
}

impl<F> Persistence<F> {
    pub fn choice(&self) -> Option<PersistenceChoice<'_, F>> {
        match (&self.file, &self.store) {
            (Some(file), None) => Some(PersistenceChoice::File(file)),
            (None, Some(store)) => Some(PersistenceChoice::Store(store)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct OnlineStoreFilePersistence {
    #[serde(default)]
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pvc: Option<PvcStore>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct OfflineStoreFilePersistence {
    /// `dask` (default) or `duckdb`.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pvc: Option<PvcStore>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RegistryFilePersistence {
    #[serde(default)]
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pvc: Option<PvcStore>,
    /// Extra settings passed to the S3 client. Only valid for `s3://` paths.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s3_additional_kwargs: Option<BTreeMap<String, String>>,
}

/// Database-backed persistence: a backend type plus the secret holding its credentials.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StorePersistence {
    #[serde(rename = "type")]
    pub type_: String,
    #[serde(default)]
    pub secret_ref: SecretRef,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SecretRef {
    #[serde(default)]
    pub name: String,
}

/// Volume claim backing a file store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PvcStore {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mount_path: Option<String>,
}

impl FeatureStoreSpec {
    pub fn new(feast_project: impl Into<String>) -> Self {
        Self {
            feast_project: feast_project.into(),
            services: None,
        }
    }

    /// Copy of the spec with the pertinent defaults filled in: an ephemeral
    /// local registry when none is configured, and the `dask` offline file type.
    pub fn with_defaults(&self) -> Self {
        let mut applied = self.clone();
        let services = applied.services.get_or_insert_with(Default::default);
        if services.registry.is_none() {
            services.registry = Some(Registry {
                local: Some(LocalRegistryConfig::default()),
                remote: None,
            });
        }
        if let Some(file) = services
            .offline_store
            .as_mut()
            .and_then(|offline| offline.persistence.as_mut())
            .and_then(|persistence| persistence.file.as_mut())
        {
            if file.type_.is_none() {
                file.type_ = Some(DEFAULT_OFFLINE_FILE_TYPE.to_string());
            }
        }
        applied
    }

    pub fn offline_store(&self) -> Option<&OfflineStore> {
        self.services.as_ref()?.offline_store.as_ref()
    }

    pub fn online_store(&self) -> Option<&OnlineStore> {
        self.services.as_ref()?.online_store.as_ref()
    }

    pub fn registry(&self) -> Option<&Registry> {
        self.services.as_ref()?.registry.as_ref()
    }

    pub fn local_registry(&self) -> Option<&LocalRegistryConfig> {
        self.registry()?.local.as_ref()
    }
}

pub(crate) fn is_bucket_uri(path: &str) -> bool {
    path.starts_with(S3_SCHEME) || path.starts_with(GS_SCHEME)
}
