//! Feast operator MCP server: validate FeatureStore manifests and aggregate deployment readiness.

use std::sync::Arc;

use feast_operator_mcp::config::ServerConfig;
use feast_operator_mcp::telemetry;
use feast_operator_mcp::tools::{self, status::StatusBook};
use rmcp::{
    handler::server::ServerHandler,
    model::{CallToolResult, Content},
    tool, tool_handler, tool_router,
    transport::stdio,
    ServiceExt,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct ManifestParams {
    /// FeatureStore YAML manifest (apiVersion feast.dev/v1alpha1, kind FeatureStore)
    config: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct ReportParams {
    /// FeatureStore name (metadata.name)
    name: String,
    /// Kubernetes namespace (optional, server default otherwise)
    #[serde(default)]
    namespace: Option<String>,
    /// Subsystem: Client, OfflineStore, OnlineStore, Registry
    condition_type: String,
    /// Whether the subsystem deployment succeeded
    succeeded: bool,
    /// Failure detail (optional)
    #[serde(default)]
    detail: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct StatusParams {
    /// FeatureStore name (metadata.name)
    name: String,
    /// Kubernetes namespace (optional, server default otherwise)
    #[serde(default)]
    namespace: Option<String>,
}

#[derive(Clone)]
struct FeastMcpService {
    tool_router: rmcp::handler::server::tool::ToolRouter<Self>,
    book: Arc<Mutex<StatusBook>>,
}

fn text_result(result: Result<String, String>) -> CallToolResult {
    match result {
        Ok(out) => CallToolResult::success(vec![Content::text(out)]),
        Err(e) => CallToolResult::error(vec![Content::text(e)]),
    }
}

#[tool_router]
impl FeastMcpService {
    fn new(config: &ServerConfig) -> Self {
        Self {
            tool_router: Self::tool_router(),
            book: Arc::new(Mutex::new(StatusBook::new(config.default_namespace.clone()))),
        }
    }

    #[tool(description = "Validate a FeatureStore YAML manifest (apiVersion, kind, metadata.name, spec rules)")]
    async fn validate_feature_store_manifest(
        &self,
        params: rmcp::handler::server::wrapper::Parameters<ManifestParams>,
    ) -> Result<CallToolResult, rmcp::ErrorData> {
        match tools::manifest::validate_feature_store_manifest(&params.0.config) {
            Ok(()) => Ok(CallToolResult::success(vec![Content::text("Configuration is valid.")])),
            Err(errors) => Ok(CallToolResult::error(vec![Content::text(format!(
                "Validation errors:\n{}",
                errors.join("\n")
            ))])),
        }
    }

    #[tool(description = "Validate and apply a FeatureStore manifest; returns the initial status with defaults applied")]
    async fn apply_feature_store_manifest(
        &self,
        params: rmcp::handler::server::wrapper::Parameters<ManifestParams>,
    ) -> Result<CallToolResult, rmcp::ErrorData> {
        let mut book = self.book.lock().await;
        Ok(text_result(tools::status::apply_feature_store_manifest(
            &mut book,
            &params.0.config,
        )))
    }

    #[tool(description = "Report a subsystem deployment outcome (Client, OfflineStore, OnlineStore, Registry) and return the aggregated status")]
    async fn report_subsystem_status(
        &self,
        params: rmcp::handler::server::wrapper::Parameters<ReportParams>,
    ) -> Result<CallToolResult, rmcp::ErrorData> {
        let p = params.0;
        let mut book = self.book.lock().await;
        Ok(text_result(tools::status::report_subsystem_status(
            &mut book,
            p.namespace.as_deref(),
            &p.name,
            &p.condition_type,
            p.succeeded,
            p.detail.as_deref(),
        )))
    }

    #[tool(description = "Get the current status (phase and conditions) of an applied FeatureStore")]
    async fn get_feature_store_status(
        &self,
        params: rmcp::handler::server::wrapper::Parameters<StatusParams>,
    ) -> Result<CallToolResult, rmcp::ErrorData> {
        let p = params.0;
        let book = self.book.lock().await;
        Ok(text_result(tools::status::get_feature_store_status(
            &book,
            p.namespace.as_deref(),
            &p.name,
        )))
    }

    #[tool(description = "List supported persistence types per service (offline store, online store, registry)")]
    async fn list_persistence_types(&self) -> Result<CallToolResult, rmcp::ErrorData> {
        let out = tools::reference::list_persistence_types_json();
        Ok(CallToolResult::success(vec![Content::text(out)]))
    }

    #[tool(description = "Describe the FeatureStore spec as a JSON schema")]
    async fn describe_feature_store_schema(&self) -> Result<CallToolResult, rmcp::ErrorData> {
        Ok(text_result(
            tools::reference::describe_feature_store_schema_json().map_err(|e| e.to_string()),
        ))
    }
}

#[tool_handler]
impl ServerHandler for FeastMcpService {
    fn get_info(&self) -> rmcp::model::ServerInfo {
        rmcp::model::ServerInfo::new(
            rmcp::model::ServerCapabilities::builder()
                .enable_tools()
                .build(),
        )
        .with_instructions(
            "MCP for the Feast operator: validate FeatureStore manifests and aggregate deployment readiness.",
        )
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = ServerConfig::from_env()?;
    telemetry::init_tracing(&config.log_filter)?;
    tracing::info!(namespace = %config.default_namespace, "starting feast operator MCP server");

    let service = FeastMcpService::new(&config);
    let transport = stdio();
    let server = service.serve(transport).await?;
    server.waiting().await?;
    Ok(())
}
