//! Routing and the uniform response envelope.
//!
//! [`dispatch`] runs one invocation end to end: validate the argument bag
//! into a [`ToolRequest`], issue the single bound upstream call, then hand
//! the raw payload to the operation's formatter. [`into_envelope`] is the
//! only place failures are recovered; every call resolves to exactly one
//! text block, with failures prefixed by [`ERROR_PREFIX`].

use huddle_api::BotApi;
use reqwest::Method;
use rmcp::model::{CallToolResult, Content};
use serde_json::{Map, Value, json};
use tracing::{debug, warn};

use crate::error::ToolError;
use crate::format;
use crate::params::ToolRequest;

/// Marker prefixing every failure envelope.
pub const ERROR_PREFIX: &str = "❌ Error:";

/// All upstream endpoints live under this base path.
const API_BASE_PATH: &str = "/api/v1";

/// Run one tool invocation end to end.
///
/// Returns the rendered display text on success. Failures are typed so the
/// envelope boundary stays the single recovery point.
pub async fn dispatch(
    api: &dyn BotApi,
    name: &str,
    arguments: &Map<String, Value>,
) -> Result<String, ToolError> {
    let request = ToolRequest::parse(name, arguments)?;
    debug!(tool = request.tool_name(), "dispatching tool call");
    execute(api, request).await
}

/// Convert a dispatch outcome into the uniform text envelope.
///
/// Success and failure share the same envelope shape; callers distinguish
/// them by the [`ERROR_PREFIX`] marker alone.
pub fn into_envelope(outcome: Result<String, ToolError>) -> CallToolResult {
    let text = match outcome {
        Ok(text) => text,
        Err(error) => {
            warn!(%error, "tool call failed");
            format!("{ERROR_PREFIX} {error}")
        }
    };
    CallToolResult::success(vec![Content::text(text)])
}

async fn execute(api: &dyn BotApi, request: ToolRequest) -> Result<String, ToolError> {
    match request {
        ToolRequest::CreateBot(params) => {
            let body = json!({
                "meeting_url": params.meeting_url,
                "bot_name": params.bot_name,
            });
            let payload = api.request(Method::POST, &bots_path(), Some(body)).await?;
            Ok(format::bot_created(&payload))
        }
        ToolRequest::BotStatus(params) => {
            let payload = api.request(Method::GET, &bot_path(&params.bot_id, ""), None).await?;
            Ok(format::bot_status(&payload))
        }
        ToolRequest::MeetingTranscript(params) => {
            let payload = api
                .request(Method::GET, &bot_path(&params.bot_id, "/transcript"), None)
                .await?;
            Ok(format::transcript(&payload, &params.bot_id))
        }
        ToolRequest::ListBots => {
            let payload = api.request(Method::GET, &bots_path(), None).await?;
            Ok(format::bot_list(&payload))
        }
        ToolRequest::RemoveBot(params) => {
            // Leave returns the updated bot, rendered as a post-action status.
            let payload = api
                .request(Method::POST, &bot_path(&params.bot_id, "/leave"), Some(json!({})))
                .await?;
            Ok(format::bot_status(&payload))
        }
        ToolRequest::Speak(params) => {
            let body = json!({
                "text": params.text,
                "text_to_speech_settings": {
                    "google": {
                        "voice_language_code": params.voice_language_code,
                        "voice_name": params.voice_name,
                    }
                }
            });
            api.request(Method::POST, &bot_path(&params.bot_id, "/speech"), Some(body))
                .await?;
            Ok(format::speech_started(&params.bot_id, &params.text, &params.voice_name))
        }
        ToolRequest::SendChat(params) => {
            let body = json!({ "message": params.message });
            api.request(
                Method::POST,
                &bot_path(&params.bot_id, "/send_chat_message"),
                Some(body),
            )
            .await?;
            Ok(format::chat_sent(&params.bot_id, &params.message))
        }
        ToolRequest::ChatMessages(params) => {
            let payload = api
                .request(Method::GET, &bot_path(&params.bot_id, "/chat_messages"), None)
                .await?;
            Ok(format::chat_messages(&payload, &params.bot_id))
        }
        ToolRequest::Recording(params) => {
            let payload = api
                .request(Method::GET, &bot_path(&params.bot_id, "/recording"), None)
                .await?;
            Ok(format::recording(&payload, &params.bot_id))
        }
        ToolRequest::SendImage(params) => {
            let body = json!({ "url": params.image_url });
            api.request(Method::POST, &bot_path(&params.bot_id, "/output_image"), Some(body))
                .await?;
            Ok(format::image_sent(&params.bot_id, &params.image_url))
        }
        ToolRequest::SendVideo(params) => {
            let body = json!({ "url": params.video_url });
            api.request(Method::POST, &bot_path(&params.bot_id, "/output_video"), Some(body))
                .await?;
            Ok(format::video_sent(&params.bot_id, &params.video_url))
        }
        ToolRequest::DeleteData(params) => {
            api.request(Method::POST, &bot_path(&params.bot_id, "/delete_data"), None)
                .await?;
            Ok(format::data_deleted(&params.bot_id))
        }
    }
}

fn bots_path() -> String {
    format!("{API_BASE_PATH}/bots")
}

fn bot_path(bot_id: &str, suffix: &str) -> String {
    format!("{API_BASE_PATH}/bots/{bot_id}{suffix}")
}
