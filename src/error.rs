// Crate error types: configuration violations, report protocol errors, I/O-boundary failures.

use thiserror::Error;

use crate::readiness::ConditionType;
use crate::validation::Violation;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
    #[error("YAML parse error: {0}")]
    SerdeYaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),
    #[error("failed to load config from FEAST_MCP_* env vars: {0}")]
    Config(#[from] envy::Error),
    #[error("FeatureStore '{0}' has not been applied")]
    NotApplied(String),
    #[error("failed to initialise tracing subscriber: {0}")]
    Telemetry(String),
}

/// A candidate configuration broke one or more rules. Nothing was applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid FeatureStore configuration: {}", render(.violations))]
pub struct ConfigurationError {
    pub violations: Vec<Violation>,
}

impl ConfigurationError {
    /// `(rule-id, message)` pairs in evaluation order.
    pub fn diagnostics(&self) -> Vec<(&'static str, String)> {
        self.violations
            .iter()
            .map(|violation| (violation.rule.as_str(), violation.to_string()))
            .collect()
    }
}

fn render(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A subsystem report the aggregator cannot accept. Indicates a caller defect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("unknown condition type `{0}`")]
    UnknownConditionType(String),
    #[error("the {0} condition is derived and cannot be reported")]
    AggregateNotReportable(ConditionType),
    #[error("{0} is not enabled by the applied configuration")]
    SubsystemNotEnabled(ConditionType),
}
