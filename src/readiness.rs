// Fold per-subsystem deployment reports into the FeatureStore status.
// `Pending` is the initial phase. Every report recomputes the aggregate
// `FeatureStore` condition and the phase; no phase is terminal.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;
use crate::types::FeatureStoreSpec;

pub const READY_REASON: &str = "Ready";
pub const PENDING_REASON: &str = "Pending";

pub const READY_MESSAGE: &str = "FeatureStore installation complete";
pub const PENDING_MESSAGE: &str = "FeatureStore installation in progress";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionType {
    Client,
    OfflineStore,
    OnlineStore,
    Registry,
    FeatureStore,
}

/// Headline order when several subsystems fail at once.
pub const FAILURE_PRIORITY: [ConditionType; 4] = [
    ConditionType::Registry,
    ConditionType::OfflineStore,
    ConditionType::OnlineStore,
    ConditionType::Client,
];

impl ConditionType {
    pub fn as_str(self) -> &'static str {
        match self {
            ConditionType::Client => "Client",
            ConditionType::OfflineStore => "OfflineStore",
            ConditionType::OnlineStore => "OnlineStore",
            ConditionType::Registry => "Registry",
            ConditionType::FeatureStore => "FeatureStore",
        }
    }

    pub fn ready_message(self) -> &'static str {
        match self {
            ConditionType::Client => "Client installation complete",
            ConditionType::OfflineStore => "Offline Store installation complete",
            ConditionType::OnlineStore => "Online Store installation complete",
            ConditionType::Registry => "Registry installation complete",
            ConditionType::FeatureStore => READY_MESSAGE,
        }
    }

    pub fn failed_reason(self) -> &'static str {
        match self {
            ConditionType::Client => "ClientDeploymentFailed",
            ConditionType::OfflineStore => "OfflineStoreDeploymentFailed",
            ConditionType::OnlineStore => "OnlineStoreDeploymentFailed",
            ConditionType::Registry => "RegistryDeploymentFailed",
            ConditionType::FeatureStore => "FeatureStoreFailed",
        }
    }

    /// Whether the applied spec deploys this subsystem.
    pub fn is_enabled_by(self, applied: &FeatureStoreSpec) -> bool {
        match self {
            ConditionType::Client => true,
            ConditionType::OfflineStore => applied.offline_store().is_some(),
            ConditionType::OnlineStore => applied.online_store().is_some(),
            ConditionType::Registry => applied.local_registry().is_some(),
            ConditionType::FeatureStore => false,
        }
    }
}

impl fmt::Display for ConditionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConditionType {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Client" => Ok(ConditionType::Client),
            "OfflineStore" => Ok(ConditionType::OfflineStore),
            "OnlineStore" => Ok(ConditionType::OnlineStore),
            "Registry" => Ok(ConditionType::Registry),
            "FeatureStore" => Ok(ConditionType::FeatureStore),
            other => Err(ProtocolError::UnknownConditionType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionStatus {
    True,
    False,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(rename = "type")]
    pub type_: ConditionType,
    pub status: ConditionStatus,
    pub reason: String,
    pub message: String,
    pub last_transition_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Ready,
    #[default]
    Pending,
    Failed,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Ready => "Ready",
            Phase::Pending => "Pending",
            Phase::Failed => "Failed",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Service hostnames in the format `<domain>:<port>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceHostnames {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offline_store: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub online_store: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry: Option<String>,
}

/// Observed state of a FeatureStore.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureStoreStatus {
    /// Applied configuration, including pertinent defaults.
    pub applied: FeatureStoreSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_config_map: Option<String>,
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feast_version: Option<String>,
    pub phase: Phase,
    #[serde(default)]
    pub service_hostnames: ServiceHostnames,
}

impl FeatureStoreStatus {
    pub fn condition(&self, type_: ConditionType) -> Option<&Condition> {
        self.conditions.iter().find(|c| c.type_ == type_)
    }

    fn set_condition(
        &mut self,
        type_: ConditionType,
        status: ConditionStatus,
        reason: &str,
        message: String,
        now: DateTime<Utc>,
    ) {
        match self.conditions.iter_mut().find(|c| c.type_ == type_) {
            Some(existing) => {
                if existing.status != status {
                    existing.status = status;
                    existing.last_transition_time = now;
                }
                existing.reason = reason.to_string();
                existing.message = message;
            }
            None => self.conditions.push(Condition {
                type_,
                status,
                reason: reason.to_string(),
                message,
                last_transition_time: now,
            }),
        }
    }
}

/// Outcome of one subsystem lifecycle event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubsystemReport {
    pub condition_type: ConditionType,
    pub succeeded: bool,
    pub detail: Option<String>,
}

impl SubsystemReport {
    pub fn succeeded(condition_type: ConditionType) -> Self {
        Self {
            condition_type,
            succeeded: true,
            detail: None,
        }
    }

    pub fn failed(condition_type: ConditionType, detail: impl Into<String>) -> Self {
        Self {
            condition_type,
            succeeded: false,
            detail: Some(detail.into()),
        }
    }
}

/// Owns the status of a single FeatureStore. Updates go through `&mut self`,
/// so callers sharing an aggregator must hold exclusive access per report.
#[derive(Debug, Clone)]
pub struct ReadinessAggregator {
    status: FeatureStoreStatus,
}

impl ReadinessAggregator {
    pub fn new(spec: &FeatureStoreSpec) -> Self {
        Self {
            status: FeatureStoreStatus {
                applied: spec.with_defaults(),
                ..Default::default()
            },
        }
    }

    pub fn status(&self) -> &FeatureStoreStatus {
        &self.status
    }

    pub fn into_status(self) -> FeatureStoreStatus {
        self.status
    }

    pub fn phase(&self) -> Phase {
        self.status.phase
    }

    /// Subsystems taking part in the aggregate, in failure priority order.
    pub fn enabled_subsystems(&self) -> Vec<ConditionType> {
        FAILURE_PRIORITY
            .into_iter()
            .filter(|t| t.is_enabled_by(&self.status.applied))
            .collect()
    }

    pub fn report(&mut self, report: SubsystemReport) -> Result<Phase, ProtocolError> {
        self.report_at(report, Utc::now())
    }

    pub fn report_at(
        &mut self,
        report: SubsystemReport,
        now: DateTime<Utc>,
    ) -> Result<Phase, ProtocolError> {
        let type_ = report.condition_type;
        if type_ == ConditionType::FeatureStore {
            tracing::warn!(condition = %type_, "rejected report for derived condition");
            return Err(ProtocolError::AggregateNotReportable(type_));
        }
        if !type_.is_enabled_by(&self.status.applied) {
            tracing::warn!(condition = %type_, "rejected report for disabled subsystem");
            return Err(ProtocolError::SubsystemNotEnabled(type_));
        }

        if report.succeeded {
            self.status.set_condition(
                type_,
                ConditionStatus::True,
                READY_REASON,
                type_.ready_message().to_string(),
                now,
            );
        } else {
            let detail = report.detail.as_deref().unwrap_or("deployment failed");
            self.status.set_condition(
                type_,
                ConditionStatus::False,
                type_.failed_reason(),
                format!("Error: {}", detail),
                now,
            );
        }

        Ok(self.recompute(now))
    }

    /// Replaces the applied configuration. Conditions of subsystems the new
    /// spec no longer deploys are dropped; the aggregate is recomputed.
    pub fn reconfigure(&mut self, spec: &FeatureStoreSpec) -> Phase {
        self.reconfigure_at(spec, Utc::now())
    }

    pub fn reconfigure_at(&mut self, spec: &FeatureStoreSpec, now: DateTime<Utc>) -> Phase {
        self.status.applied = spec.with_defaults();
        let applied = &self.status.applied;
        self.status
            .conditions
            .retain(|c| c.type_ == ConditionType::FeatureStore || c.type_.is_enabled_by(applied));
        if self.status.condition(ConditionType::FeatureStore).is_some() {
            self.recompute(now)
        } else {
            self.status.phase
        }
    }

    pub fn set_service_hostnames(&mut self, hostnames: ServiceHostnames) {
        self.status.service_hostnames = hostnames;
    }

    pub fn set_client_config_map(&mut self, name: impl Into<String>) {
        self.status.client_config_map = Some(name.into());
    }

    pub fn set_feast_version(&mut self, version: impl Into<String>) {
        self.status.feast_version = Some(version.into());
    }

    fn recompute(&mut self, now: DateTime<Utc>) -> Phase {
        let enabled = self.enabled_subsystems();
        let mut first_failure: Option<(String, String)> = None;
        let mut all_ready = true;
        for type_ in enabled {
            match self.status.condition(type_) {
                Some(c) if c.status == ConditionStatus::False => {
                    if first_failure.is_none() {
                        first_failure = Some((c.reason.clone(), c.message.clone()));
                    }
                }
                Some(c) if c.status == ConditionStatus::True => {}
                _ => all_ready = false,
            }
        }

        let (phase, status, reason, message) = match first_failure {
            Some((reason, message)) => (Phase::Failed, ConditionStatus::False, reason, message),
            None if all_ready => (
                Phase::Ready,
                ConditionStatus::True,
                READY_REASON.to_string(),
                READY_MESSAGE.to_string(),
            ),
            None => (
                Phase::Pending,
                ConditionStatus::Unknown,
                PENDING_REASON.to_string(),
                PENDING_MESSAGE.to_string(),
            ),
        };

        self.status
            .set_condition(ConditionType::FeatureStore, status, &reason, message, now);
        if self.status.phase != phase {
            tracing::info!(
                project = %self.status.applied.feast_project,
                from = %self.status.phase,
                to = %phase,
                "FeatureStore phase changed"
            );
            self.status.phase = phase;
        }
        phase
    }
}
