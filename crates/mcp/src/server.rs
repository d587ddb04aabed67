//! MCP-facing server surface.
//!
//! The handler is deliberately thin: `list_tools` serves the static catalog
//! and `call_tool` hands everything to the dispatcher, so protocol plumbing
//! stays out of the core. Unknown tools and upstream failures come back as
//! ordinary text envelopes, never as protocol errors.

use std::future::Future;
use std::sync::Arc;

use anyhow::Result;
use huddle_api::BotApi;
use rmcp::{
    RoleServer, ServerHandler, ServiceExt,
    model::{
        CallToolRequestParams, CallToolResult, ErrorData as McpError, Implementation,
        ListToolsResult, PaginatedRequestParams, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
};
use tracing::info;

use crate::{catalog, dispatch};

/// Handler wiring the tool catalog and dispatcher to an MCP transport.
#[derive(Clone)]
pub struct MeetingBotServer {
    api: Arc<dyn BotApi>,
}

impl MeetingBotServer {
    pub fn new(api: Arc<dyn BotApi>) -> Self {
        Self { api }
    }
}

impl ServerHandler for MeetingBotServer {
    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<ListToolsResult, McpError>> + Send + '_ {
        std::future::ready(Ok(ListToolsResult::with_all_items(catalog::tools())))
    }

    fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<CallToolResult, McpError>> + Send + '_ {
        async move {
            let arguments = request.arguments.unwrap_or_default();
            let outcome = dispatch::dispatch(self.api.as_ref(), request.name.as_ref(), &arguments).await;
            Ok(dispatch::into_envelope(outcome))
        }
    }

    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            protocol_version: ProtocolVersion::LATEST,
            server_info: Implementation {
                name: "huddle".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: Some("Huddle MCP".to_string()),
                ..Default::default()
            },
            instructions: Some(
                "Drives meeting bots through a bot-management API.\n\
                 Typical flow:\n\
                 1) create_meeting_bot with the meeting URL.\n\
                 2) Poll get_bot_status until the bot has joined.\n\
                 3) Interact mid-meeting with make_bot_speak, send_chat_message, \
                 send_image_to_meeting, or send_video_to_meeting (image/video need HTTPS URLs; video must be MP4).\n\
                 4) After the meeting, fetch get_meeting_transcript, get_chat_messages, and get_recording.\n\
                 5) Clean up with remove_meeting_bot, and delete_bot_data to purge what was captured.\n\
                 Every tool returns a single human-readable text block; failures start with '❌ Error:'."
                    .to_string(),
            ),
        }
    }
}

/// Serve the handler over stdio until the client disconnects.
pub async fn serve_stdio(api: Arc<dyn BotApi>) -> Result<()> {
    let service = MeetingBotServer::new(api);
    let server = service.serve(rmcp::transport::stdio()).await?;
    info!("meeting-bot MCP server running on stdio");
    server.waiting().await?;
    Ok(())
}
