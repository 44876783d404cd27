//! Configuration validation and readiness aggregation for Feast FeatureStore deployments.

pub mod config;
pub mod error;
pub mod readiness;
pub mod telemetry;
pub mod tools;
pub mod types;
pub mod validation;

pub use error::{ConfigurationError, Error, ProtocolError, Result};
pub use readiness::{
    Condition, ConditionStatus, ConditionType, FeatureStoreStatus, Phase, ReadinessAggregator,
    ServiceHostnames, SubsystemReport,
};
pub use types::FeatureStoreSpec;
pub use validation::{validate, violations, RuleId, StoreKind, Violation};
