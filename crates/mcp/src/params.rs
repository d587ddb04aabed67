//! Per-operation parameters and their validation.
//!
//! Tool arguments arrive as an untyped JSON object. [`ToolRequest::parse`]
//! narrows that bag into exactly one typed variant per operation, so nothing
//! dynamically typed crosses into the dispatch layer. The same structs carry
//! the `schemars` derives the catalog uses to publish input schemas.

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::catalog;
use crate::error::ToolError;

/// Display name used when the caller does not pick one.
pub const DEFAULT_BOT_NAME: &str = "Meeting Bot";
/// Text-to-speech language applied when unspecified.
pub const DEFAULT_VOICE_LANGUAGE_CODE: &str = "en-US";
/// Text-to-speech voice applied when unspecified.
pub const DEFAULT_VOICE_NAME: &str = "en-US-Casual-K";

fn default_bot_name() -> String {
    DEFAULT_BOT_NAME.to_string()
}

fn default_voice_language_code() -> String {
    DEFAULT_VOICE_LANGUAGE_CODE.to_string()
}

fn default_voice_name() -> String {
    DEFAULT_VOICE_NAME.to_string()
}

/// Parameters for `create_meeting_bot`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateBotParams {
    #[schemars(description = "URL of the meeting to join (Zoom, Google Meet, or Teams).")]
    pub meeting_url: String,
    #[serde(default = "default_bot_name")]
    #[schemars(description = "Display name the bot joins with.")]
    pub bot_name: String,
}

/// Parameters for every operation addressing a single bot.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct BotIdParams {
    #[schemars(description = "ID of the bot.")]
    pub bot_id: String,
}

/// `list_meeting_bots` takes no arguments.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListBotsParams {}

/// Parameters for `make_bot_speak`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SpeakParams {
    #[schemars(description = "ID of the bot.")]
    pub bot_id: String,
    #[schemars(description = "Text the bot speaks into the meeting.")]
    pub text: String,
    #[serde(default = "default_voice_language_code")]
    #[schemars(description = "Text-to-speech language code, for example en-US.")]
    pub voice_language_code: String,
    #[serde(default = "default_voice_name")]
    #[schemars(description = "Text-to-speech voice name, for example en-US-Casual-K.")]
    pub voice_name: String,
}

/// Parameters for `send_chat_message`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SendChatParams {
    #[schemars(description = "ID of the bot.")]
    pub bot_id: String,
    #[schemars(description = "Chat message the bot posts into the meeting.")]
    pub message: String,
}

/// Parameters for `send_image_to_meeting`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SendImageParams {
    #[schemars(description = "ID of the bot.")]
    pub bot_id: String,
    #[schemars(description = "HTTPS URL of the image to display.")]
    pub image_url: String,
}

/// Parameters for `send_video_to_meeting`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SendVideoParams {
    #[schemars(description = "ID of the bot.")]
    pub bot_id: String,
    #[schemars(description = "HTTPS URL of an MP4 video to play.")]
    pub video_url: String,
}

/// One fully validated tool invocation, tagged by operation.
#[derive(Debug, Clone)]
pub enum ToolRequest {
    CreateBot(CreateBotParams),
    BotStatus(BotIdParams),
    MeetingTranscript(BotIdParams),
    ListBots,
    RemoveBot(BotIdParams),
    Speak(SpeakParams),
    SendChat(SendChatParams),
    ChatMessages(BotIdParams),
    Recording(BotIdParams),
    SendImage(SendImageParams),
    SendVideo(SendVideoParams),
    DeleteData(BotIdParams),
}

impl ToolRequest {
    /// Route a raw invocation to its operation and validate the argument bag.
    ///
    /// Unknown names fail with [`ToolError::UnknownTool`]; everything else
    /// that fails here is a [`ToolError::Validation`] naming the offending
    /// key. No network traffic happens before this returns `Ok`.
    pub fn parse(name: &str, arguments: &Map<String, Value>) -> Result<Self, ToolError> {
        match name {
            catalog::CREATE_MEETING_BOT => Ok(Self::CreateBot(CreateBotParams {
                meeting_url: required_str(arguments, "meeting_url")?,
                bot_name: optional_str(arguments, "bot_name", DEFAULT_BOT_NAME)?,
            })),
            catalog::GET_BOT_STATUS => Ok(Self::BotStatus(bot_id(arguments)?)),
            catalog::GET_MEETING_TRANSCRIPT => Ok(Self::MeetingTranscript(bot_id(arguments)?)),
            catalog::LIST_MEETING_BOTS => Ok(Self::ListBots),
            catalog::REMOVE_MEETING_BOT => Ok(Self::RemoveBot(bot_id(arguments)?)),
            catalog::MAKE_BOT_SPEAK => Ok(Self::Speak(SpeakParams {
                bot_id: required_str(arguments, "bot_id")?,
                text: required_str(arguments, "text")?,
                voice_language_code: optional_str(arguments, "voice_language_code", DEFAULT_VOICE_LANGUAGE_CODE)?,
                voice_name: optional_str(arguments, "voice_name", DEFAULT_VOICE_NAME)?,
            })),
            catalog::SEND_CHAT_MESSAGE => Ok(Self::SendChat(SendChatParams {
                bot_id: required_str(arguments, "bot_id")?,
                message: required_str(arguments, "message")?,
            })),
            catalog::GET_CHAT_MESSAGES => Ok(Self::ChatMessages(bot_id(arguments)?)),
            catalog::GET_RECORDING => Ok(Self::Recording(bot_id(arguments)?)),
            catalog::SEND_IMAGE_TO_MEETING => {
                let params = SendImageParams {
                    bot_id: required_str(arguments, "bot_id")?,
                    image_url: required_str(arguments, "image_url")?,
                };
                if !params.image_url.starts_with("https://") {
                    return Err(ToolError::validation("image_url must start with https://"));
                }
                Ok(Self::SendImage(params))
            }
            catalog::SEND_VIDEO_TO_MEETING => {
                let params = SendVideoParams {
                    bot_id: required_str(arguments, "bot_id")?,
                    video_url: required_str(arguments, "video_url")?,
                };
                if !params.video_url.starts_with("https://") {
                    return Err(ToolError::validation("video_url must start with https://"));
                }
                if !params.video_url.ends_with(".mp4") {
                    return Err(ToolError::validation("video_url must end with .mp4"));
                }
                Ok(Self::SendVideo(params))
            }
            catalog::DELETE_BOT_DATA => Ok(Self::DeleteData(bot_id(arguments)?)),
            other => Err(ToolError::UnknownTool(other.to_string())),
        }
    }

    /// Catalog name this request routes back to.
    pub fn tool_name(&self) -> &'static str {
        match self {
            Self::CreateBot(_) => catalog::CREATE_MEETING_BOT,
            Self::BotStatus(_) => catalog::GET_BOT_STATUS,
            Self::MeetingTranscript(_) => catalog::GET_MEETING_TRANSCRIPT,
            Self::ListBots => catalog::LIST_MEETING_BOTS,
            Self::RemoveBot(_) => catalog::REMOVE_MEETING_BOT,
            Self::Speak(_) => catalog::MAKE_BOT_SPEAK,
            Self::SendChat(_) => catalog::SEND_CHAT_MESSAGE,
            Self::ChatMessages(_) => catalog::GET_CHAT_MESSAGES,
            Self::Recording(_) => catalog::GET_RECORDING,
            Self::SendImage(_) => catalog::SEND_IMAGE_TO_MEETING,
            Self::SendVideo(_) => catalog::SEND_VIDEO_TO_MEETING,
            Self::DeleteData(_) => catalog::DELETE_BOT_DATA,
        }
    }
}

fn bot_id(arguments: &Map<String, Value>) -> Result<BotIdParams, ToolError> {
    Ok(BotIdParams {
        bot_id: required_str(arguments, "bot_id")?,
    })
}

/// A required key must be present, non-null, a string, and non-empty.
fn required_str(arguments: &Map<String, Value>, key: &str) -> Result<String, ToolError> {
    match arguments.get(key) {
        Some(Value::String(value)) if !value.is_empty() => Ok(value.clone()),
        _ => Err(ToolError::validation(format!(
            "Missing or invalid required parameter: {key}"
        ))),
    }
}

/// Optional keys fall back to their declared default when absent, null, or
/// empty; a present non-string value is still rejected.
fn optional_str(arguments: &Map<String, Value>, key: &str, default: &str) -> Result<String, ToolError> {
    match arguments.get(key) {
        None | Some(Value::Null) => Ok(default.to_string()),
        Some(Value::String(value)) if value.is_empty() => Ok(default.to_string()),
        Some(Value::String(value)) => Ok(value.clone()),
        Some(_) => Err(ToolError::validation(format!(
            "Invalid value for optional parameter: {key}"
        ))),
    }
}
