//! Static catalog of the tools this server advertises.
//!
//! One entry per operation: stable name (the dispatcher's routing key), a
//! human description, and an input schema generated from the operation's
//! parameter struct. The catalog and the router in
//! [`crate::params::ToolRequest::parse`] must stay in sync; the tests at the
//! bottom hold that invariant.

use std::sync::Arc;

use rmcp::model::Tool;
use schemars::{JsonSchema, schema_for};
use serde_json::{Map, Value};

use crate::params::{
    BotIdParams, CreateBotParams, ListBotsParams, SendChatParams, SendImageParams, SendVideoParams,
    SpeakParams,
};

pub const CREATE_MEETING_BOT: &str = "create_meeting_bot";
pub const GET_BOT_STATUS: &str = "get_bot_status";
pub const GET_MEETING_TRANSCRIPT: &str = "get_meeting_transcript";
pub const LIST_MEETING_BOTS: &str = "list_meeting_bots";
pub const REMOVE_MEETING_BOT: &str = "remove_meeting_bot";
pub const MAKE_BOT_SPEAK: &str = "make_bot_speak";
pub const SEND_CHAT_MESSAGE: &str = "send_chat_message";
pub const GET_CHAT_MESSAGES: &str = "get_chat_messages";
pub const GET_RECORDING: &str = "get_recording";
pub const SEND_IMAGE_TO_MEETING: &str = "send_image_to_meeting";
pub const SEND_VIDEO_TO_MEETING: &str = "send_video_to_meeting";
pub const DELETE_BOT_DATA: &str = "delete_bot_data";

/// Every tool this server routes, in catalog order.
pub fn tools() -> Vec<Tool> {
    vec![
        tool::<CreateBotParams>(
            CREATE_MEETING_BOT,
            "Create a bot that joins a meeting to record and transcribe it",
        ),
        tool::<BotIdParams>(GET_BOT_STATUS, "Get the current status of a meeting bot"),
        tool::<BotIdParams>(
            GET_MEETING_TRANSCRIPT,
            "Get the transcript captured by a meeting bot",
        ),
        tool::<ListBotsParams>(LIST_MEETING_BOTS, "List all active meeting bots"),
        tool::<BotIdParams>(REMOVE_MEETING_BOT, "Make a bot leave its meeting"),
        tool::<SpeakParams>(
            MAKE_BOT_SPEAK,
            "Make the bot speak in the meeting using text-to-speech",
        ),
        tool::<SendChatParams>(
            SEND_CHAT_MESSAGE,
            "Send a chat message from the bot into the meeting",
        ),
        tool::<BotIdParams>(
            GET_CHAT_MESSAGES,
            "Get the chat messages the bot has seen in the meeting",
        ),
        tool::<BotIdParams>(GET_RECORDING, "Get the recording produced by a meeting bot"),
        tool::<SendImageParams>(
            SEND_IMAGE_TO_MEETING,
            "Display an image in the meeting through the bot (Google Meet only)",
        ),
        tool::<SendVideoParams>(
            SEND_VIDEO_TO_MEETING,
            "Play an MP4 video in the meeting through the bot (Google Meet only)",
        ),
        tool::<BotIdParams>(
            DELETE_BOT_DATA,
            "Permanently delete the recordings, transcripts, and chat data a bot captured",
        ),
    ]
}

/// Catalog names in declaration order.
pub fn tool_names() -> Vec<String> {
    tools().iter().map(|tool| tool.name.to_string()).collect()
}

fn tool<P: JsonSchema>(name: &'static str, description: &'static str) -> Tool {
    Tool::new(name, description, input_schema::<P>())
}

fn input_schema<P: JsonSchema>() -> Arc<Map<String, Value>> {
    let schema = schema_for!(P);
    match serde_json::to_value(schema) {
        // Derived struct schemas always serialize to a JSON object.
        Ok(Value::Object(object)) => Arc::new(object),
        _ => Arc::new(Map::new()),
    }
}
