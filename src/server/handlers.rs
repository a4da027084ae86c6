//! MCP tool handlers for the Animia SMS server.
//!
//! This module implements all the MCP tools using the rmcp SDK's tool_router pattern.

use crate::models::SmsStatus;
use crate::services::{BulkSendRequest, SmsService};
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::Arc;

/// The MCP server that exposes SMS dispatch tools for Animia beneficiaries.
#[derive(Clone)]
pub struct AnimiaSmsServer {
    sms_service: Arc<dyn SmsService>,
    tool_router: ToolRouter<Self>,
}

#[tool_handler]
impl ServerHandler for AnimiaSmsServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "animia-sms-dispatch".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some("SMS notifications for Animia anaemia-programme beneficiaries: contact lookup, single and bulk sends with messaging-app fallback, SMS history and statistics.".into()),
        }
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
struct NormalizePhoneParams {
    phone: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct BeneficiaryIdParams {
    beneficiary_id: i64,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct SendToNumberParams {
    phone: String,
    message: String,
    #[serde(default)]
    prefer_native: Option<bool>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct SendBeneficiarySmsParams {
    beneficiary_id: i64,
    message: String,
    /// History tag such as registration, follow_up or screening (default: general)
    #[serde(default)]
    sms_type: Option<String>,
    #[serde(default)]
    prefer_native: Option<bool>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct SendBulkSmsParams {
    message: String,
    #[serde(default)]
    beneficiary_ids: Option<Vec<i64>>,
    #[serde(default)]
    limit: Option<usize>,
    #[serde(default)]
    unique_numbers: Option<bool>,
    /// History tag (default: bulk)
    #[serde(default)]
    sms_type: Option<String>,
    #[serde(default)]
    prefer_native: Option<bool>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct UpdateSmsStatusParams {
    sms_id: i64,
    status: SmsStatus,
    #[serde(default)]
    error_message: Option<String>,
}

fn to_mcp_error(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INTERNAL_ERROR,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string_pretty(value).map_err(to_mcp_error)?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

#[tool_router]
impl AnimiaSmsServer {
    /// Create a new server on top of the SMS service.
    pub fn new(sms_service: Arc<dyn SmsService>) -> Self {
        Self {
            sms_service,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Normalize a phone number to +<country><digits> form and report whether it is valid (10 to 15 digits). 10-digit numbers get the default country code."
    )]
    async fn normalize_phone(
        &self,
        params: Parameters<NormalizePhoneParams>,
    ) -> Result<CallToolResult, McpError> {
        json_result(&self.sms_service.check_phone(&params.0.phone))
    }

    #[tool(
        description = "List the phone contacts (primary, alternative, doctor) an SMS to this beneficiary would reach"
    )]
    async fn list_beneficiary_contacts(
        &self,
        params: Parameters<BeneficiaryIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let contacts = self
            .sms_service
            .list_contacts(params.0.beneficiary_id)
            .await
            .map_err(to_mcp_error)?;

        json_result(&contacts)
    }

    #[tool(
        description = "Send an SMS to a single phone number. Tries direct sending first when available, otherwise opens the messaging app pre-filled."
    )]
    async fn send_sms_to_number(
        &self,
        params: Parameters<SendToNumberParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let response = self
            .sms_service
            .send_to_number(&params.phone, &params.message, params.prefer_native)
            .await
            .map_err(to_mcp_error)?;

        json_result(&response)
    }

    #[tool(
        description = "Send a personalized SMS to every valid phone number of a beneficiary (primary, alternative, doctor), one at a time. Each send is recorded in SMS history."
    )]
    async fn send_beneficiary_sms(
        &self,
        params: Parameters<SendBeneficiarySmsParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let response = self
            .sms_service
            .send_to_beneficiary(
                params.beneficiary_id,
                &params.message,
                params.sms_type.as_deref(),
                params.prefer_native,
            )
            .await
            .map_err(to_mcp_error)?;

        json_result(&response)
    }

    #[tool(
        description = "Send an SMS to many beneficiaries: the given IDs, or the most recent ones up to `limit`. With unique_numbers=true the plain message is sent once per distinct phone number."
    )]
    async fn send_bulk_sms(
        &self,
        params: Parameters<SendBulkSmsParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let request = BulkSendRequest {
            message: params.message,
            beneficiary_ids: params.beneficiary_ids.unwrap_or_default(),
            limit: params.limit,
            unique_numbers: params.unique_numbers.unwrap_or(false),
            sms_type: params.sms_type,
            prefer_native: params.prefer_native,
        };

        let response = self
            .sms_service
            .send_bulk(request)
            .await
            .map_err(to_mcp_error)?;

        json_result(&response)
    }

    #[tool(description = "Get the SMS history recorded for a beneficiary")]
    async fn get_sms_history(
        &self,
        params: Parameters<BeneficiaryIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let beneficiary_id = params.0.beneficiary_id;

        let records = self
            .sms_service
            .history(beneficiary_id)
            .await
            .map_err(to_mcp_error)?;

        json_result(&serde_json::json!({
            "beneficiary_id": beneficiary_id,
            "count": records.len(),
            "records": records,
        }))
    }

    #[tool(description = "Get programme-wide SMS statistics: totals sent, successful, failed and beneficiaries contacted")]
    async fn get_sms_statistics(&self) -> Result<CallToolResult, McpError> {
        let stats = self
            .sms_service
            .statistics()
            .await
            .map_err(to_mcp_error)?;

        json_result(&stats)
    }

    #[tool(
        description = "Record a delivery report for a stored SMS: sent, delivered, failed or pending, with an optional error message"
    )]
    async fn update_sms_status(
        &self,
        params: Parameters<UpdateSmsStatusParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        self.sms_service
            .update_status(params.sms_id, params.status, params.error_message.as_deref())
            .await
            .map_err(to_mcp_error)?;

        json_result(&serde_json::json!({
            "sms_id": params.sms_id,
            "status": params.status,
            "updated": true,
        }))
    }

    #[tool(
        description = "Get this server's counters: backend HTTP requests and errors, dispatch attempts, successes per channel, failures and fallbacks"
    )]
    async fn get_dispatch_metrics(&self) -> Result<CallToolResult, McpError> {
        json_result(&self.sms_service.metrics())
    }
}
