// Static checks on a candidate FeatureStore spec.
// Rules run in declaration order and every violation is collected; within a
// rule, services are visited offline store, online store, registry.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ConfigurationError;
use crate::types::{
    is_bucket_uri, FeatureStoreSpec, Persistence, PvcStore, RemoteRegistryConfig,
    StorePersistence, OFFLINE_FILE_TYPES, OFFLINE_STORE_TYPES, ONLINE_STORE_TYPES,
    REGISTRY_STORE_TYPES, S3_SCHEME,
};

pub const FEAST_PROJECT_PATTERN: &str = "^[A-Za-z0-9][A-Za-z0-9_]*$";

static FEAST_PROJECT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(FEAST_PROJECT_PATTERN).expect("project pattern is a valid regex"));

const ABSOLUTE_PATH_MSG: &str = "Ephemeral stores must have absolute paths.";
const PVC_FILE_NAME_MSG: &str = "PVC path must be a file name only, with no slashes.";
const PVC_BUCKET_MSG: &str = "PVC persistence does not support S3 or GS buckets.";
const ONLINE_BUCKET_MSG: &str = "Online store does not support S3 or GS buckets.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleId {
    FeastProject,
    PersistenceChoice,
    RegistryChoice,
    RemoteRegistryChoice,
    FilePath,
    StoreType,
    S3AdditionalKwargs,
    FileType,
}

impl RuleId {
    pub fn as_str(self) -> &'static str {
        match self {
            RuleId::FeastProject => "feast-project",
            RuleId::PersistenceChoice => "persistence-choice",
            RuleId::RegistryChoice => "registry-choice",
            RuleId::RemoteRegistryChoice => "remote-registry-choice",
            RuleId::FilePath => "file-path",
            RuleId::StoreType => "store-type",
            RuleId::S3AdditionalKwargs => "s3-additional-kwargs",
            RuleId::FileType => "file-type",
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One broken rule: which rule, where, and what to fix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub rule: RuleId,
    pub field: String,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Service kinds carrying their own persistence rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Offline,
    Online,
    Registry,
}

impl StoreKind {
    pub fn allowed_types(self) -> &'static [&'static str] {
        match self {
            StoreKind::Offline => &OFFLINE_STORE_TYPES,
            StoreKind::Online => &ONLINE_STORE_TYPES,
            StoreKind::Registry => &REGISTRY_STORE_TYPES,
        }
    }

    /// Whether a file store of this kind may live in an object storage bucket.
    fn allows_buckets(self) -> bool {
        !matches!(self, StoreKind::Online)
    }

    fn persistence_field(self) -> &'static str {
        match self {
            StoreKind::Offline => "services.offlineStore.persistence",
            StoreKind::Online => "services.onlineStore.persistence",
            StoreKind::Registry => "services.registry.local.persistence",
        }
    }
}

type Check = fn(&FeatureStoreSpec, &mut Vec<Violation>);

const RULES: &[(RuleId, Check)] = &[
    (RuleId::FeastProject, check_feast_project),
    (RuleId::PersistenceChoice, check_persistence_choice),
    (RuleId::RegistryChoice, check_registry_choice),
    (RuleId::RemoteRegistryChoice, check_remote_registry_choice),
    (RuleId::FilePath, check_file_paths),
    (RuleId::StoreType, check_store_types),
    (RuleId::S3AdditionalKwargs, check_s3_additional_kwargs),
    (RuleId::FileType, check_offline_file_type),
];

/// Validates a FeatureStore spec, returning every violated rule on rejection.
pub fn validate(spec: &FeatureStoreSpec) -> Result<(), ConfigurationError> {
    let violations = violations(spec);
    if violations.is_empty() {
        Ok(())
    } else {
        tracing::debug!(
            project = %spec.feast_project,
            violations = violations.len(),
            "rejected FeatureStore configuration"
        );
        Err(ConfigurationError { violations })
    }
}

pub fn violations(spec: &FeatureStoreSpec) -> Vec<Violation> {
    let mut out = Vec::new();
    for (rule, check) in RULES {
        let before = out.len();
        check(spec, &mut out);
        debug_assert!(out[before..].iter().all(|v| v.rule == *rule));
    }
    out
}

fn violation(rule: RuleId, field: impl Into<String>, message: impl Into<String>) -> Violation {
    Violation {
        rule,
        field: field.into(),
        message: message.into(),
    }
}

fn check_feast_project(spec: &FeatureStoreSpec, out: &mut Vec<Violation>) {
    if !FEAST_PROJECT_RE.is_match(&spec.feast_project) {
        out.push(violation(
            RuleId::FeastProject,
            "feastProject",
            format!(
                "feastProject must match {} (alphanumerics and underscores, not starting with an underscore)",
                FEAST_PROJECT_PATTERN
            ),
        ));
    }
}

fn check_persistence_choice(spec: &FeatureStoreSpec, out: &mut Vec<Violation>) {
    fn check<F>(kind: StoreKind, persistence: Option<&Persistence<F>>, out: &mut Vec<Violation>) {
        let Some(persistence) = persistence else {
            return;
        };
        let message = match (persistence.file.is_some(), persistence.store.is_some()) {
            (true, true) => "One file or store persistence is allowed.",
            (false, false) => "Either file or store persistence are required.",
            _ => return,
        };
        out.push(violation(
            RuleId::PersistenceChoice,
            kind.persistence_field(),
            message,
        ));
    }

    check(
        StoreKind::Offline,
        spec.offline_store().and_then(|s| s.persistence.as_ref()),
        out,
    );
    check(
        StoreKind::Online,
        spec.online_store().and_then(|s| s.persistence.as_ref()),
        out,
    );
    check(
        StoreKind::Registry,
        spec.local_registry().and_then(|s| s.persistence.as_ref()),
        out,
    );
}

fn check_registry_choice(spec: &FeatureStoreSpec, out: &mut Vec<Violation>) {
    if let Some(registry) = spec.registry() {
        if registry.selection().is_none() {
            out.push(violation(
                RuleId::RegistryChoice,
                "services.registry",
                "One selection required.",
            ));
        }
    }
}

fn check_remote_registry_choice(spec: &FeatureStoreSpec, out: &mut Vec<Violation>) {
    let remote: Option<&RemoteRegistryConfig> = spec.registry().and_then(|r| r.remote.as_ref());
    if let Some(remote) = remote {
        if remote.target().is_none() {
            out.push(violation(
                RuleId::RemoteRegistryChoice,
                "services.registry.remote",
                "One selection required.",
            ));
        }
    }
}

fn check_file_paths(spec: &FeatureStoreSpec, out: &mut Vec<Violation>) {
    if let Some(file) = spec
        .offline_store()
        .and_then(|s| s.persistence.as_ref())
        .and_then(|p| p.file.as_ref())
    {
        if let Some(path) = file.path.as_deref() {
            check_path(StoreKind::Offline, path, file.pvc.as_ref(), out);
        }
    }
    if let Some(file) = spec
        .online_store()
        .and_then(|s| s.persistence.as_ref())
        .and_then(|p| p.file.as_ref())
    {
        check_path(StoreKind::Online, &file.path, file.pvc.as_ref(), out);
    }
    if let Some(file) = spec
        .local_registry()
        .and_then(|s| s.persistence.as_ref())
        .and_then(|p| p.file.as_ref())
    {
        check_path(StoreKind::Registry, &file.path, file.pvc.as_ref(), out);
    }
}

fn check_path(kind: StoreKind, path: &str, pvc: Option<&PvcStore>, out: &mut Vec<Violation>) {
    let field = format!("{}.file.path", kind.persistence_field());
    let bucket = is_bucket_uri(path);

    if !kind.allows_buckets() && bucket {
        out.push(violation(RuleId::FilePath, field, ONLINE_BUCKET_MSG));
        return;
    }

    let message = match pvc {
        None if path.starts_with('/') || bucket => return,
        None => ABSOLUTE_PATH_MSG,
        Some(_) if bucket => PVC_BUCKET_MSG,
        Some(_) if path.contains('/') => PVC_FILE_NAME_MSG,
        Some(_) => return,
    };
    out.push(violation(RuleId::FilePath, field, message));
}

fn check_store_types(spec: &FeatureStoreSpec, out: &mut Vec<Violation>) {
    fn check(kind: StoreKind, store: Option<&StorePersistence>, out: &mut Vec<Violation>) {
        let Some(store) = store else {
            return;
        };
        let allowed = kind.allowed_types();
        if !allowed.contains(&store.type_.as_str()) {
            out.push(violation(
                RuleId::StoreType,
                format!("{}.store.type", kind.persistence_field()),
                format!(
                    "unsupported store type `{}`, must be one of: {}",
                    store.type_,
                    allowed.join(", ")
                ),
            ));
        }
    }

    check(
        StoreKind::Offline,
        spec.offline_store()
            .and_then(|s| s.persistence.as_ref())
            .and_then(|p| p.store.as_ref()),
        out,
    );
    check(
        StoreKind::Online,
        spec.online_store()
            .and_then(|s| s.persistence.as_ref())
            .and_then(|p| p.store.as_ref()),
        out,
    );
    check(
        StoreKind::Registry,
        spec.local_registry()
            .and_then(|s| s.persistence.as_ref())
            .and_then(|p| p.store.as_ref()),
        out,
    );
}

fn check_s3_additional_kwargs(spec: &FeatureStoreSpec, out: &mut Vec<Violation>) {
    let Some(file) = spec
        .local_registry()
        .and_then(|s| s.persistence.as_ref())
        .and_then(|p| p.file.as_ref())
    else {
        return;
    };
    if file.s3_additional_kwargs.is_some() && !file.path.starts_with(S3_SCHEME) {
        out.push(violation(
            RuleId::S3AdditionalKwargs,
            "services.registry.local.persistence.file.s3_additional_kwargs",
            "Additional S3 settings are available only for S3 buckets.",
        ));
    }
}

fn check_offline_file_type(spec: &FeatureStoreSpec, out: &mut Vec<Violation>) {
    let file_type = spec
        .offline_store()
        .and_then(|s| s.persistence.as_ref())
        .and_then(|p| p.file.as_ref())
        .and_then(|f| f.type_.as_deref());
    if let Some(file_type) = file_type {
        if !OFFLINE_FILE_TYPES.contains(&file_type) {
            out.push(violation(
                RuleId::FileType,
                "services.offlineStore.persistence.file.type",
                format!(
                    "unsupported file type `{}`, must be one of: {}",
                    file_type,
                    OFFLINE_FILE_TYPES.join(", ")
                ),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        FeatureStoreRef, FeatureStoreServices, LocalRegistryConfig, OfflineStore,
        OfflineStoreFilePersistence, OnlineStore, OnlineStoreFilePersistence, Registry,
        RegistryFilePersistence, SecretRef, ServiceConfigs,
    };
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    fn spec_with(services: FeatureStoreServices) -> FeatureStoreSpec {
        FeatureStoreSpec {
            feast_project: "test_project".to_string(),
            services: Some(services),
        }
    }

    fn store(type_: &str) -> StorePersistence {
        StorePersistence {
            type_: type_.to_string(),
            secret_ref: SecretRef {
                name: "creds".to_string(),
            },
        }
    }

    fn pvc() -> PvcStore {
        PvcStore {
            name: "feast-data".to_string(),
            ..Default::default()
        }
    }

    fn online_file(path: &str, pvc: Option<PvcStore>) -> FeatureStoreSpec {
        spec_with(FeatureStoreServices {
            online_store: Some(OnlineStore {
                service: ServiceConfigs::default(),
                persistence: Some(Persistence {
                    file: Some(OnlineStoreFilePersistence {
                        path: path.to_string(),
                        pvc,
                    }),
                    store: None,
                }),
            }),
            ..Default::default()
        })
    }

    fn registry_file(file: RegistryFilePersistence) -> FeatureStoreSpec {
        spec_with(FeatureStoreServices {
            registry: Some(Registry {
                local: Some(LocalRegistryConfig {
                    service: ServiceConfigs::default(),
                    persistence: Some(Persistence {
                        file: Some(file),
                        store: None,
                    }),
                }),
                remote: None,
            }),
            ..Default::default()
        })
    }

    fn rules(spec: &FeatureStoreSpec) -> Vec<RuleId> {
        violations(spec).into_iter().map(|v| v.rule).collect()
    }

    #[test]
    fn test_minimal_spec_is_accepted() {
        assert!(validate(&FeatureStoreSpec::new("my_project")).is_ok());
    }

    #[test]
    fn test_feast_project_pattern() {
        for ok in ["a", "A1", "feast_demo", "9_lives"] {
            assert!(validate(&FeatureStoreSpec::new(ok)).is_ok(), "{ok}");
        }
        for bad in ["", "_hidden", "with-dash", "has space", "dots.not.allowed"] {
            assert_eq!(
                rules(&FeatureStoreSpec::new(bad)),
                vec![RuleId::FeastProject],
                "{bad}"
            );
        }
    }

    #[test]
    fn test_file_and_store_together_is_rejected() {
        let spec = spec_with(FeatureStoreServices {
            offline_store: Some(OfflineStore {
                service: ServiceConfigs::default(),
                persistence: Some(Persistence {
                    file: Some(OfflineStoreFilePersistence::default()),
                    store: Some(store("spark")),
                }),
            }),
            ..Default::default()
        });
        let err = validate(&spec).unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert_eq!(err.violations[0].rule, RuleId::PersistenceChoice);
        assert_eq!(err.violations[0].field, "services.offlineStore.persistence");
        assert_eq!(
            err.violations[0].message,
            "One file or store persistence is allowed."
        );
    }

    #[test]
    fn test_empty_local_registry_persistence_is_rejected() {
        let spec = spec_with(FeatureStoreServices {
            registry: Some(Registry {
                local: Some(LocalRegistryConfig {
                    service: ServiceConfigs::default(),
                    persistence: Some(Persistence::default()),
                }),
                remote: None,
            }),
            ..Default::default()
        });
        let err = validate(&spec).unwrap_err();
        assert_eq!(err.violations[0].rule, RuleId::PersistenceChoice);
        assert_eq!(
            err.violations[0].message,
            "Either file or store persistence are required."
        );
    }

    #[test]
    fn test_absent_persistence_is_legal() {
        let spec = spec_with(FeatureStoreServices {
            offline_store: Some(OfflineStore::default()),
            online_store: Some(OnlineStore::default()),
            registry: Some(Registry {
                local: Some(LocalRegistryConfig::default()),
                remote: None,
            }),
        });
        assert!(validate(&spec).is_ok());
    }

    #[test]
    fn test_registry_requires_one_selection() {
        let both = spec_with(FeatureStoreServices {
            registry: Some(Registry {
                local: Some(LocalRegistryConfig::default()),
                remote: Some(RemoteRegistryConfig {
                    hostname: Some("registry:80".to_string()),
                    feast_ref: None,
                }),
            }),
            ..Default::default()
        });
        assert_eq!(rules(&both), vec![RuleId::RegistryChoice]);

        let neither = spec_with(FeatureStoreServices {
            registry: Some(Registry::default()),
            ..Default::default()
        });
        assert_eq!(rules(&neither), vec![RuleId::RegistryChoice]);
    }

    #[test]
    fn test_remote_registry_requires_one_target() {
        let remote = |hostname: Option<&str>, feast_ref: Option<FeatureStoreRef>| {
            spec_with(FeatureStoreServices {
                registry: Some(Registry {
                    local: None,
                    remote: Some(RemoteRegistryConfig {
                        hostname: hostname.map(str::to_string),
                        feast_ref,
                    }),
                }),
                ..Default::default()
            })
        };
        let reference = FeatureStoreRef {
            name: "shared".to_string(),
            namespace: None,
        };
        assert!(validate(&remote(Some("registry.feast.svc.cluster.local:80"), None)).is_ok());
        assert!(validate(&remote(None, Some(reference.clone()))).is_ok());
        assert_eq!(
            rules(&remote(Some("registry:80"), Some(reference))),
            vec![RuleId::RemoteRegistryChoice]
        );
        assert_eq!(rules(&remote(None, None)), vec![RuleId::RemoteRegistryChoice]);
    }

    #[test]
    fn test_online_bucket_paths_are_rejected_with_or_without_pvc() {
        for path in ["s3://bucket/online.db", "gs://bucket/online.db"] {
            for claim in [None, Some(pvc())] {
                let err = validate(&online_file(path, claim)).unwrap_err();
                assert_eq!(err.violations.len(), 1);
                assert_eq!(err.violations[0].message, ONLINE_BUCKET_MSG);
            }
        }
    }

    #[test]
    fn test_ephemeral_path_must_be_absolute() {
        assert!(validate(&online_file("/data/online_store.db", None)).is_ok());
        let err = validate(&online_file("data/online_store.db", None)).unwrap_err();
        assert_eq!(err.violations[0].message, ABSOLUTE_PATH_MSG);
        assert_eq!(
            err.violations[0].field,
            "services.onlineStore.persistence.file.path"
        );
    }

    #[test]
    fn test_pvc_path_must_be_file_name() {
        assert!(validate(&online_file("online_store.db", Some(pvc()))).is_ok());
        let err = validate(&online_file("/data/online_store.db", Some(pvc()))).unwrap_err();
        assert_eq!(err.violations[0].message, PVC_FILE_NAME_MSG);
        let err = validate(&online_file("nested/online_store.db", Some(pvc()))).unwrap_err();
        assert_eq!(err.violations[0].message, PVC_FILE_NAME_MSG);
    }

    #[test]
    fn test_registry_bucket_paths() {
        let ephemeral = registry_file(RegistryFilePersistence {
            path: "gs://bucket/registry.db".to_string(),
            ..Default::default()
        });
        assert!(validate(&ephemeral).is_ok());

        let claimed = registry_file(RegistryFilePersistence {
            path: "s3://bucket/registry.db".to_string(),
            pvc: Some(pvc()),
            s3_additional_kwargs: None,
        });
        let err = validate(&claimed).unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert_eq!(err.violations[0].message, PVC_BUCKET_MSG);
    }

    #[test]
    fn test_offline_path_rules_apply_only_when_set() {
        let offline = |path: Option<&str>, pvc: Option<PvcStore>| {
            spec_with(FeatureStoreServices {
                offline_store: Some(OfflineStore {
                    service: ServiceConfigs::default(),
                    persistence: Some(Persistence {
                        file: Some(OfflineStoreFilePersistence {
                            type_: Some("duckdb".to_string()),
                            path: path.map(str::to_string),
                            pvc,
                        }),
                        store: None,
                    }),
                }),
                ..Default::default()
            })
        };
        assert!(validate(&offline(None, None)).is_ok());
        assert!(validate(&offline(Some("s3://bucket/offline"), None)).is_ok());
        assert!(validate(&offline(Some("offline"), Some(pvc()))).is_ok());
        assert_eq!(rules(&offline(Some("relative/dir"), None)), vec![RuleId::FilePath]);
    }

    #[test]
    fn test_offline_bucket_under_pvc_is_single_violation() {
        let spec = spec_with(FeatureStoreServices {
            offline_store: Some(OfflineStore {
                service: ServiceConfigs::default(),
                persistence: Some(Persistence {
                    file: Some(OfflineStoreFilePersistence {
                        type_: Some("dask".to_string()),
                        path: Some("s3://bucket/offline".to_string()),
                        pvc: Some(pvc()),
                    }),
                    store: None,
                }),
            }),
            ..Default::default()
        });
        let found = violations(&spec);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].rule, RuleId::FilePath);
        assert_eq!(found[0].field, "services.offlineStore.persistence.file.path");
        assert_eq!(found[0].message, PVC_BUCKET_MSG);
    }

    #[test]
    fn test_offline_file_type_enumeration() {
        let spec = spec_with(FeatureStoreServices {
            offline_store: Some(OfflineStore {
                service: ServiceConfigs::default(),
                persistence: Some(Persistence {
                    file: Some(OfflineStoreFilePersistence {
                        type_: Some("parquet".to_string()),
                        ..Default::default()
                    }),
                    store: None,
                }),
            }),
            ..Default::default()
        });
        assert_eq!(rules(&spec), vec![RuleId::FileType]);
    }

    #[test]
    fn test_s3_additional_kwargs_require_s3_path() {
        let kwargs = BTreeMap::from([("ServerSideEncryption".to_string(), "AES256".to_string())]);
        let on_s3 = registry_file(RegistryFilePersistence {
            path: "s3://bucket/registry.db".to_string(),
            pvc: None,
            s3_additional_kwargs: Some(kwargs.clone()),
        });
        assert!(validate(&on_s3).is_ok());

        for path in ["gs://bucket/registry.db", "/data/registry.db"] {
            let spec = registry_file(RegistryFilePersistence {
                path: path.to_string(),
                pvc: None,
                s3_additional_kwargs: Some(kwargs.clone()),
            });
            assert_eq!(rules(&spec), vec![RuleId::S3AdditionalKwargs], "{path}");
        }
    }

    #[test]
    fn test_all_violations_reported_in_rule_order() {
        let spec = FeatureStoreSpec {
            feast_project: "_bad".to_string(),
            services: Some(FeatureStoreServices {
                offline_store: Some(OfflineStore {
                    service: ServiceConfigs::default(),
                    persistence: Some(Persistence {
                        file: None,
                        store: Some(store("redis")),
                    }),
                }),
                online_store: Some(OnlineStore {
                    service: ServiceConfigs::default(),
                    persistence: Some(Persistence {
                        file: Some(OnlineStoreFilePersistence {
                            path: "relative.db".to_string(),
                            pvc: None,
                        }),
                        store: Some(store("redis")),
                    }),
                }),
                registry: Some(Registry::default()),
            }),
        };
        let err = validate(&spec).unwrap_err();
        let diagnostics = err.diagnostics();
        let ids: Vec<&str> = diagnostics.iter().map(|(id, _)| *id).collect();
        assert_eq!(
            ids,
            vec![
                "feast-project",
                "persistence-choice",
                "registry-choice",
                "file-path",
                "store-type",
            ]
        );
        assert!(diagnostics[4].1.starts_with("services.offlineStore.persistence.store.type"));
    }

    #[test]
    fn test_violation_display_and_error_message() {
        let err = validate(&FeatureStoreSpec::new("")).unwrap_err();
        let text = err.to_string();
        assert!(text.starts_with("invalid FeatureStore configuration: feastProject: "));
    }

    fn type_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            proptest::sample::select(
                ONLINE_STORE_TYPES
                    .iter()
                    .chain(OFFLINE_STORE_TYPES.iter())
                    .chain(REGISTRY_STORE_TYPES.iter())
                    .map(|s| s.to_string())
                    .collect::<Vec<_>>()
            ),
            "[a-z]{1,12}",
        ]
    }

    fn store_spec(kind: StoreKind, type_: &str) -> FeatureStoreSpec {
        let persistence_store = Some(store(type_));
        let services = match kind {
            StoreKind::Offline => FeatureStoreServices {
                offline_store: Some(OfflineStore {
                    service: ServiceConfigs::default(),
                    persistence: Some(Persistence {
                        file: None,
                        store: persistence_store,
                    }),
                }),
                ..Default::default()
            },
            StoreKind::Online => FeatureStoreServices {
                online_store: Some(OnlineStore {
                    service: ServiceConfigs::default(),
                    persistence: Some(Persistence {
                        file: None,
                        store: persistence_store,
                    }),
                }),
                ..Default::default()
            },
            StoreKind::Registry => FeatureStoreServices {
                registry: Some(Registry {
                    local: Some(LocalRegistryConfig {
                        service: ServiceConfigs::default(),
                        persistence: Some(Persistence {
                            file: None,
                            store: persistence_store,
                        }),
                    }),
                    remote: None,
                }),
                ..Default::default()
            },
        };
        spec_with(services)
    }

    proptest! {
        #[test]
        fn prop_store_type_matches_kind_enumeration(
            kind in prop_oneof![
                Just(StoreKind::Offline),
                Just(StoreKind::Online),
                Just(StoreKind::Registry),
            ],
            type_ in type_strategy(),
        ) {
            let spec = store_spec(kind, &type_);
            let rejected = rules(&spec).contains(&RuleId::StoreType);
            prop_assert_eq!(rejected, !kind.allowed_types().contains(&type_.as_str()));
        }

        #[test]
        fn prop_validation_is_idempotent(project in "[A-Za-z0-9_]{0,16}", path in "[a-z/:.]{0,16}") {
            let spec = online_file(&path, None);
            let spec = FeatureStoreSpec { feast_project: project, ..spec };
            let snapshot = spec.clone();
            prop_assert_eq!(violations(&spec), violations(&spec));
            prop_assert_eq!(spec, snapshot);
        }
    }
}
