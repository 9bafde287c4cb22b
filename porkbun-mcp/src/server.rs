//! MCP Server implementation for Porkbun.
//!
//! Exposes 5 tools: domain listing and availability, DNS listing, upsert and delete.

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    tool, tool_handler, tool_router,
};
use serde::Serialize;

use porkbun_core::CoreError;
use porkbun_core::services::{DnsService, DomainService, ServiceContext, UpsertOutcome};
use porkbun_core::types::{DnsRecordType, RecordSpec};

use crate::schemas::{
    CheckDomainParams, DnsDeleteParams, DnsListParams, DnsUpdateParams, ListDomainsParams,
};

/// Sanitize error messages to prevent sensitive information leakage.
///
/// Logs the full error to stderr but returns a generic message to the client.
fn sanitize_internal_error(error: impl std::fmt::Display, context: &str) -> McpError {
    log::error!("{context} error: {error}");
    McpError::internal_error(
        format!("{context} failed - check server logs for details"),
        None,
    )
}

/// Expected failures (unknown domain, bad input, rejected key) are the caller's to
/// fix and are passed through; anything else is sanitized.
fn map_core_error(error: CoreError, context: &str) -> McpError {
    if error.is_expected() {
        log::warn!("{context} error: {error}");
        McpError::invalid_params(format!("{context} failed: {error}"), None)
    } else {
        sanitize_internal_error(error, context)
    }
}

fn json_result<T: Serialize>(value: &T, context: &str) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| sanitize_internal_error(e, &format!("Serialize {context}")))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

#[derive(Serialize)]
struct UpsertResponse<'a> {
    action: &'a str,
    record_id: &'a str,
}

#[derive(Serialize)]
struct DeleteResponse<'a> {
    deleted: &'a str,
}

/// MCP Server for Porkbun.
///
/// Provides AI agents with domain and DNS management through the Model Context
/// Protocol.
#[derive(Clone)]
pub struct PorkbunMcp {
    /// Domain service for account-level operations.
    domain_service: Arc<DomainService>,
    /// DNS service for record operations.
    dns_service: Arc<DnsService>,
    /// Tool router generated by macro.
    tool_router: ToolRouter<Self>,
}

impl PorkbunMcp {
    /// Create a new MCP server instance.
    #[must_use]
    pub fn new(ctx: &Arc<ServiceContext>) -> Self {
        Self {
            domain_service: Arc::new(DomainService::new(Arc::clone(ctx))),
            dns_service: Arc::new(DnsService::new(Arc::clone(ctx))),
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_router]
impl PorkbunMcp {
    /// List every domain in the account.
    #[tool(description = "List all domains in the Porkbun account")]
    async fn list_domains(
        &self,
        _params: Parameters<ListDomainsParams>,
    ) -> Result<CallToolResult, McpError> {
        let domains = self
            .domain_service
            .list_domains()
            .await
            .map_err(|e| map_core_error(e, "List domains"))?;

        json_result(&domains, "domains")
    }

    /// Availability and pricing for a domain.
    #[tool(description = "Check if a domain is available and get its registration, renewal and transfer pricing")]
    async fn check_domain(
        &self,
        Parameters(params): Parameters<CheckDomainParams>,
    ) -> Result<CallToolResult, McpError> {
        let pricing = self
            .domain_service
            .check_domain(&params.domain)
            .await
            .map_err(|e| map_core_error(e, "Check domain"))?;

        json_result(&pricing, "pricing")
    }

    /// List DNS records for a domain.
    #[tool(description = "Get all DNS records for a domain")]
    async fn dns_list(
        &self,
        Parameters(params): Parameters<DnsListParams>,
    ) -> Result<CallToolResult, McpError> {
        let records = self
            .dns_service
            .list_records(&params.domain, None)
            .await
            .map_err(|e| map_core_error(e, "List records"))?;

        json_result(&records, "records")
    }

    /// Create or update the record with this type and name.
    #[tool(
        description = "Create or update a DNS record. An existing record with the same type and name is edited; otherwise a new record is created"
    )]
    async fn dns_update(
        &self,
        Parameters(params): Parameters<DnsUpdateParams>,
    ) -> Result<CallToolResult, McpError> {
        let record_type: DnsRecordType = params
            .record_type
            .parse()
            .map_err(|e: porkbun_api::UnsupportedRecordType| {
                McpError::invalid_params(e.to_string(), None)
            })?;

        let spec = RecordSpec::new(record_type, params.name.unwrap_or_default(), params.content)
            .with_ttl(params.ttl)
            .with_prio(params.prio);

        let outcome = self
            .dns_service
            .upsert_record(&params.domain, &spec)
            .await
            .map_err(|e| map_core_error(e, "Update record"))?;

        let (action, record_id) = match &outcome {
            UpsertOutcome::Created { record_id } => ("created", record_id),
            UpsertOutcome::Updated { record_id } => ("updated", record_id),
            UpsertOutcome::Unchanged { record_id } => ("unchanged", record_id),
        };
        json_result(&UpsertResponse { action, record_id }, "upsert result")
    }

    /// Delete one record by id.
    #[tool(description = "Delete a DNS record by its ID")]
    async fn dns_delete(
        &self,
        Parameters(params): Parameters<DnsDeleteParams>,
    ) -> Result<CallToolResult, McpError> {
        self.dns_service
            .delete_record(&params.domain, &params.record_id)
            .await
            .map_err(|e| map_core_error(e, "Delete record"))?;

        json_result(
            &DeleteResponse {
                deleted: &params.record_id,
            },
            "delete result",
        )
    }
}

#[tool_handler]
impl ServerHandler for PorkbunMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Porkbun MCP Server - Manage domains and DNS records of a Porkbun account. \
                 Use list_domains to see the account's domains, check_domain for availability \
                 and pricing, dns_list to view records, dns_update to create or update a record \
                 and dns_delete to remove one by ID."
                    .into(),
            ),
        }
    }
}

#[cfg(test)]
#[path = "server_tests.rs"]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests;
