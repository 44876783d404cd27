// Reference data for persistence backends (list_persistence_types, describe_feature_store_schema).

use serde_json::{json, Value};

use crate::error::Result;
use crate::types::{
    FeatureStoreSpec, OFFLINE_FILE_TYPES, OFFLINE_STORE_TYPES, ONLINE_STORE_TYPES,
    REGISTRY_STORE_TYPES,
};

fn persistence_types() -> Value {
    json!({
        "offlineStore": {
            "file": {
                "types": OFFLINE_FILE_TYPES,
                "path": "absolute path or s3:// / gs:// bucket; file name only when a pvc is attached"
            },
            "store": { "types": OFFLINE_STORE_TYPES }
        },
        "onlineStore": {
            "file": {
                "path": "absolute path; file name only when a pvc is attached; buckets are not supported"
            },
            "store": { "types": ONLINE_STORE_TYPES }
        },
        "registry": {
            "file": {
                "path": "absolute path or s3:// / gs:// bucket; file name only when a pvc is attached",
                "s3_additional_kwargs": "only for s3:// paths"
            },
            "store": { "types": REGISTRY_STORE_TYPES }
        }
    })
}

pub fn list_persistence_types_json() -> String {
    let types = persistence_types();
    serde_json::to_string_pretty(&types).unwrap_or_else(|_| types.to_string())
}

/// JSON schema of the FeatureStore `spec`.
pub fn describe_feature_store_schema_json() -> Result<String> {
    let schema = schemars::schema_for!(FeatureStoreSpec);
    Ok(serde_json::to_string_pretty(&schema)?)
}
