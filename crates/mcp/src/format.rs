//! Rendering of upstream payloads into display text.
//!
//! Formatters are pure and total: each accepts the raw JSON the gateway
//! returned, normalizes it through an explicit serde shape (including the
//! unions for payloads the upstream serves in more than one form), and
//! renders a string. Fields the upstream omits render as empty values
//! rather than failing, matching how the service's own dashboard treats
//! partial bots.

use chrono::{DateTime, Local};
use serde::Deserialize;
use serde_json::Value;

const DIVIDER_WIDTH: usize = 50;
const MEETING_URL_PREVIEW_CHARS: usize = 50;

/// States in which a bot is considered present in its meeting. Anything
/// else renders as inactive; new upstream states degrade gracefully.
const ACTIVE_BOT_STATES: &[&str] = &["joining", "joined", "joined_recording"];

/// Bot fields shared by the status, creation, and list renderings.
#[derive(Debug, Default, Deserialize)]
struct BotFields {
    #[serde(default)]
    id: String,
    #[serde(default)]
    meeting_url: String,
    #[serde(default)]
    state: String,
    #[serde(default)]
    transcription_state: String,
}

/// The transcript endpoint serves either entry arrays (current) or a
/// readiness object (legacy deployments).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TranscriptPayload {
    Entries(Vec<TranscriptEntry>),
    Legacy(LegacyTranscript),
}

#[derive(Debug, Deserialize)]
struct TranscriptEntry {
    #[serde(default)]
    timestamp_ms: u64,
    #[serde(default)]
    speaker_name: String,
    #[serde(default)]
    transcription: String,
}

#[derive(Debug, Default, Deserialize)]
struct LegacyTranscript {
    #[serde(default)]
    ready: bool,
    #[serde(default)]
    transcript: Option<String>,
    #[serde(default)]
    transcription_state: String,
}

/// The list endpoint serves either a bare array or `{"bots": [...]}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BotListPayload {
    Bare(Vec<Value>),
    Wrapped {
        #[serde(default)]
        bots: Vec<Value>,
    },
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    message: String,
    #[serde(default)]
    sender_name: String,
    #[serde(default)]
    created_at: String,
}

#[derive(Debug, Default, Deserialize)]
struct RecordingPayload {
    #[serde(default)]
    url: String,
    #[serde(default, alias = "file_size_bytes")]
    file_size: Option<u64>,
    #[serde(default)]
    duration_ms: Option<u64>,
}

/// Multi-line status block for one bot; also used to render the result of a
/// leave request (the upstream returns the updated bot).
pub fn bot_status(payload: &Value) -> String {
    let bot = bot_fields(payload);
    let state_icon = state_icon(&bot.state);
    let transcript_icon = transcript_icon(&bot.transcription_state);
    let activity = if is_active(&bot.state) {
        "active and recording"
    } else {
        "not active"
    };
    let readiness = if bot.transcription_state == "complete" {
        "ready"
    } else {
        "not ready yet"
    };

    [
        format!("🤖 Bot Status for {}:", bot.id),
        String::new(),
        format!("📊 State: {} {}", bot.state, state_icon),
        format!("📝 Transcription State: {} {}", bot.transcription_state, transcript_icon),
        format!("🔗 Meeting URL: {}", bot.meeting_url),
        String::new(),
        format!("{} Bot is {}", state_icon, activity),
        format!("{} Transcript is {}", transcript_icon, readiness),
    ]
    .join("\n")
}

/// Confirmation for a freshly created bot.
pub fn bot_created(payload: &Value) -> String {
    let bot = bot_fields(payload);
    [
        "✅ Successfully created meeting bot!".to_string(),
        String::new(),
        format!("🤖 Bot ID: {}", bot.id),
        format!("🔗 Meeting URL: {}", bot.meeting_url),
        format!("📊 State: {}", bot.state),
        format!("📝 Transcription State: {}", bot.transcription_state),
        String::new(),
        format!("💡 You can check the bot status using bot ID: {}", bot.id),
    ]
    .join("\n")
}

/// Indexed summary of every known bot.
pub fn bot_list(payload: &Value) -> String {
    let bots = bot_entries(payload);
    if bots.is_empty() {
        return "📋 No active meeting bots found.".to_string();
    }

    let entries = bots
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let bot = bot_fields(entry);
            format!(
                "{}. Bot ID: {}\n   📊 State: {} {}\n   📝 Transcription: {} {}\n   🔗 Meeting: {}",
                index + 1,
                bot.id,
                bot.state,
                state_icon(&bot.state),
                bot.transcription_state,
                transcript_icon(&bot.transcription_state),
                truncate_url(&bot.meeting_url),
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!("📋 Active Meeting Bots ({}):\n\n{}", bots.len(), entries)
}

/// Transcript rendering across both upstream shapes.
pub fn transcript(payload: &Value, bot_id: &str) -> String {
    match serde_json::from_value::<TranscriptPayload>(payload.clone()) {
        Ok(TranscriptPayload::Entries(entries)) => transcript_entries(&entries, bot_id),
        Ok(TranscriptPayload::Legacy(legacy)) => legacy_transcript(&legacy, bot_id),
        Err(_) => legacy_transcript(&LegacyTranscript::default(), bot_id),
    }
}

fn transcript_entries(entries: &[TranscriptEntry], bot_id: &str) -> String {
    if entries.is_empty() {
        return format!("❌ No transcript available for bot {bot_id}");
    }

    let mut rendered = format!("📝 Meeting Transcript for bot {bot_id}:\n\n");
    rendered.push_str(&divider());
    rendered.push('\n');
    for entry in entries {
        rendered.push_str(&format!(
            "[{}] {}:\n{}\n\n",
            clock_time(entry.timestamp_ms),
            entry.speaker_name,
            entry.transcription
        ));
    }
    rendered.push_str(&divider());
    rendered.push_str(&format!("\n📊 Total entries: {}", entries.len()));
    rendered
}

fn legacy_transcript(legacy: &LegacyTranscript, bot_id: &str) -> String {
    if legacy.ready
        && let Some(text) = legacy.transcript.as_deref()
        && !text.is_empty()
    {
        return [
            format!("📝 Meeting Transcript for bot {bot_id}:"),
            String::new(),
            divider(),
            text.to_string(),
            divider(),
        ]
        .join("\n");
    }

    let state_icon = if legacy.transcription_state == "in_progress" {
        "🔄"
    } else {
        "⏳"
    };
    [
        format!("{state_icon} Transcript not ready for bot {bot_id}"),
        format!("Current transcription state: {}", legacy.transcription_state),
        String::new(),
        "💡 The transcript will be available after the meeting ends and processing completes."
            .to_string(),
    ]
    .join("\n")
}

/// Chat history with local-time stamps.
pub fn chat_messages(payload: &Value, bot_id: &str) -> String {
    let messages: Vec<ChatMessage> = serde_json::from_value(payload.clone()).unwrap_or_default();
    if messages.is_empty() {
        return format!("💬 No chat messages found for bot {bot_id}");
    }

    let mut rendered = format!("💬 Chat Messages for bot {bot_id}:\n\n");
    rendered.push_str(&divider());
    rendered.push('\n');
    for message in &messages {
        rendered.push_str(&format!(
            "[{}] {}:\n{}\n\n",
            local_clock_time(&message.created_at),
            message.sender_name,
            message.message
        ));
    }
    rendered.push_str(&divider());
    rendered.push_str(&format!("\n📊 Total messages: {}", messages.len()));
    rendered
}

/// Recording link with humanized size and duration.
pub fn recording(payload: &Value, bot_id: &str) -> String {
    let recording: RecordingPayload = serde_json::from_value(payload.clone()).unwrap_or_default();
    let size = recording
        .file_size
        .map_or_else(|| "Unknown size".to_string(), human_file_size);
    let duration = recording
        .duration_ms
        .map_or_else(|| "Unknown duration".to_string(), human_duration);

    [
        format!("🎬 Recording for bot {bot_id}:"),
        String::new(),
        format!("🔗 URL: {}", recording.url),
        format!("💾 Size: {size}"),
        format!("⏱️ Duration: {duration}"),
    ]
    .join("\n")
}

/// Itemized confirmation for a data purge. The upstream response carries no
/// detail, so the listing is fixed.
pub fn data_deleted(bot_id: &str) -> String {
    [
        format!("🗑️ Successfully deleted data for bot {bot_id}:"),
        String::new(),
        "• Recordings".to_string(),
        "• Transcripts".to_string(),
        "• Chat messages".to_string(),
        "• Participant data".to_string(),
        String::new(),
        "⚠️ This action cannot be undone.".to_string(),
    ]
    .join("\n")
}

pub fn speech_started(bot_id: &str, text: &str, voice_name: &str) -> String {
    format!("🗣️ Bot {bot_id} is speaking with voice {voice_name}:\n\"{text}\"")
}

pub fn chat_sent(bot_id: &str, message: &str) -> String {
    format!("💬 Sent chat message from bot {bot_id}:\n\"{message}\"")
}

pub fn image_sent(bot_id: &str, image_url: &str) -> String {
    format!("🖼️ Displaying image in the meeting via bot {bot_id}:\n🔗 {image_url}")
}

pub fn video_sent(bot_id: &str, video_url: &str) -> String {
    format!("🎥 Playing video in the meeting via bot {bot_id}:\n🔗 {video_url}")
}

fn bot_fields(payload: &Value) -> BotFields {
    serde_json::from_value(payload.clone()).unwrap_or_default()
}

fn bot_entries(payload: &Value) -> Vec<Value> {
    match serde_json::from_value::<BotListPayload>(payload.clone()) {
        Ok(BotListPayload::Bare(bots)) => bots,
        Ok(BotListPayload::Wrapped { bots }) => bots,
        Err(_) => Vec::new(),
    }
}

fn is_active(state: &str) -> bool {
    ACTIVE_BOT_STATES.contains(&state)
}

fn state_icon(state: &str) -> &'static str {
    if is_active(state) { "✅" } else { "❌" }
}

fn transcript_icon(transcription_state: &str) -> &'static str {
    if transcription_state == "complete" { "✅" } else { "⏳" }
}

fn divider() -> String {
    "─".repeat(DIVIDER_WIDTH)
}

fn truncate_url(url: &str) -> String {
    let preview: String = url.chars().take(MEETING_URL_PREVIEW_CHARS).collect();
    format!("{preview}...")
}

/// `[MM:SS]` offset from the start of the meeting.
fn clock_time(timestamp_ms: u64) -> String {
    let total_seconds = timestamp_ms / 1000;
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Binary-prefixed human size, rounded to at most two decimals.
fn human_file_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut scaled = bytes as f64;
    let mut unit = 0;
    while scaled >= 1024.0 && unit < UNITS.len() - 1 {
        scaled /= 1024.0;
        unit += 1;
    }
    let rounded = (scaled * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[unit])
}

/// Hours/minutes/seconds breakdown, omitting empty leading units.
fn human_duration(duration_ms: u64) -> String {
    let total_seconds = duration_ms / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    if hours > 0 {
        format!("{hours}h {minutes}m {seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}

/// Wall-clock time of a chat message in the local timezone; unparseable
/// stamps render verbatim.
fn local_clock_time(created_at: &str) -> String {
    match DateTime::parse_from_rfc3339(created_at) {
        Ok(timestamp) => timestamp.with_timezone(&Local).format("%H:%M:%S").to_string(),
        Err(_) => created_at.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_bot() -> Value {
        json!({
            "id": "bot_s7vIvDdUZUQGY0t0",
            "meeting_url": "https://meet.google.com/cfq-cwuk-sao",
            "state": "joined_recording",
            "transcription_state": "in_progress",
        })
    }

    #[test]
    fn status_reports_all_three_active_states() {
        for state in ["joining", "joined", "joined_recording"] {
            let rendered = bot_status(&json!({ "id": "b", "state": state }));
            assert!(
                rendered.contains("✅ Bot is active and recording"),
                "state '{state}' must render as active"
            );
        }

        let ended = bot_status(&json!({ "id": "b", "state": "ended" }));
        assert!(ended.contains("❌ Bot is not active"));
    }

    #[test]
    fn status_flags_transcript_readiness() {
        let ready = bot_status(&json!({ "id": "b", "transcription_state": "complete" }));
        assert!(ready.contains("✅ Transcript is ready"));

        let pending = bot_status(&sample_bot());
        assert!(pending.contains("⏳ Transcript is not ready yet"));
    }

    #[test]
    fn creation_renders_raw_fields_and_hint() {
        let rendered = bot_created(&sample_bot());
        assert!(rendered.starts_with("✅ Successfully created meeting bot!"));
        assert!(rendered.contains("🤖 Bot ID: bot_s7vIvDdUZUQGY0t0"));
        assert!(rendered.contains("📊 State: joined_recording"));
        assert!(rendered.contains("check the bot status using bot ID: bot_s7vIvDdUZUQGY0t0"));
    }

    #[test]
    fn list_normalizes_bare_and_wrapped_shapes_identically() {
        assert_eq!(bot_list(&json!([])), bot_list(&json!({ "bots": [] })));
        assert_eq!(bot_list(&json!([])), "📋 No active meeting bots found.");

        let bare = bot_list(&json!([sample_bot()]));
        let wrapped = bot_list(&json!({ "bots": [sample_bot()] }));
        assert_eq!(bare, wrapped, "the wrapper object must not change the rendering");
    }

    #[test]
    fn list_numbers_entries_and_truncates_urls() {
        let long_url = format!("https://meet.google.com/{}", "x".repeat(80));
        let rendered = bot_list(&json!([
            { "id": "bot_1", "state": "joined", "transcription_state": "complete", "meeting_url": long_url },
            { "id": "bot_2", "state": "ended", "transcription_state": "failed", "meeting_url": "short" },
        ]));

        assert!(rendered.starts_with("📋 Active Meeting Bots (2):"));
        assert!(rendered.contains("1. Bot ID: bot_1"));
        assert!(rendered.contains("2. Bot ID: bot_2"));
        let truncated: String = format!("https://meet.google.com/{}", "x".repeat(80))
            .chars()
            .take(50)
            .collect();
        assert!(rendered.contains(&format!("🔗 Meeting: {truncated}...")));
    }

    #[test]
    fn transcript_entries_render_zero_padded_offsets() {
        let rendered = transcript(
            &json!([{ "timestamp_ms": 65000, "speaker_name": "Alice", "transcription": "hi" }]),
            "bot_1",
        );
        assert!(rendered.contains("[01:05] Alice:\nhi"));
        assert!(rendered.contains("📊 Total entries: 1"));
    }

    #[test]
    fn empty_transcript_array_reports_no_transcript() {
        assert_eq!(
            transcript(&json!([]), "bot_1"),
            "❌ No transcript available for bot bot_1"
        );
    }

    #[test]
    fn legacy_transcript_ready_renders_text_between_dividers() {
        let rendered = transcript(
            &json!({ "ready": true, "transcript": "full text here", "transcription_state": "complete" }),
            "bot_1",
        );
        assert!(rendered.contains("full text here"));
        assert!(rendered.contains(&"─".repeat(50)));
    }

    #[test]
    fn legacy_transcript_in_progress_uses_spinner_icon() {
        let rendered = transcript(
            &json!({ "ready": false, "transcription_state": "in_progress" }),
            "bot_1",
        );
        assert!(
            rendered.starts_with("🔄 Transcript not ready for bot bot_1"),
            "in_progress must use the spinner, not the hourglass: {rendered}"
        );
        assert!(rendered.contains("Current transcription state: in_progress"));

        let queued = transcript(&json!({ "ready": false, "transcription_state": "queued" }), "bot_1");
        assert!(queued.starts_with("⏳ Transcript not ready for bot bot_1"));
    }

    #[test]
    fn chat_renders_sender_and_message_with_count() {
        let rendered = chat_messages(
            &json!([
                { "message": "hello", "sender_name": "Alice", "created_at": "not-a-timestamp" },
                { "message": "hi", "sender_name": "Bob", "created_at": "also-raw" },
            ]),
            "bot_1",
        );
        assert!(rendered.contains("[not-a-timestamp] Alice:\nhello"));
        assert!(rendered.contains("📊 Total messages: 2"));

        assert_eq!(
            chat_messages(&json!([]), "bot_1"),
            "💬 No chat messages found for bot bot_1"
        );
    }

    #[test]
    fn recording_humanizes_size_and_duration() {
        let rendered = recording(
            &json!({ "url": "https://cdn.example.com/rec.mp4", "file_size": 1536, "duration_ms": 3661000 }),
            "bot_1",
        );
        assert!(rendered.contains("💾 Size: 1.5 KB"));
        assert!(rendered.contains("⏱️ Duration: 1h 1m 1s"));

        let unknown = recording(&json!({ "url": "https://cdn.example.com/rec.mp4" }), "bot_1");
        assert!(unknown.contains("💾 Size: Unknown size"));
        assert!(unknown.contains("⏱️ Duration: Unknown duration"));
    }

    #[test]
    fn recording_accepts_the_byte_suffixed_field_name() {
        let rendered = recording(&json!({ "file_size_bytes": 1048576 }), "bot_1");
        assert!(rendered.contains("💾 Size: 1 MB"));
    }

    #[test]
    fn file_sizes_cover_every_unit() {
        assert_eq!(human_file_size(0), "0 B");
        assert_eq!(human_file_size(512), "512 B");
        assert_eq!(human_file_size(1536), "1.5 KB");
        assert_eq!(human_file_size(1048576), "1 MB");
        assert_eq!(human_file_size(5_368_709_120), "5 GB");
    }

    #[test]
    fn durations_omit_empty_leading_units() {
        assert_eq!(human_duration(0), "0s");
        assert_eq!(human_duration(5000), "5s");
        assert_eq!(human_duration(61000), "1m 1s");
        assert_eq!(human_duration(3661000), "1h 1m 1s");
        assert_eq!(human_duration(3600000), "1h 0m 0s");
    }

    #[test]
    fn delete_confirmation_is_itemized() {
        let rendered = data_deleted("bot_1");
        assert!(rendered.contains("🗑️ Successfully deleted data for bot bot_1"));
        assert!(rendered.contains("• Recordings"));
        assert!(rendered.contains("• Transcripts"));
    }

    #[test]
    fn formatters_are_pure() {
        let payload = sample_bot();
        assert_eq!(bot_status(&payload), bot_status(&payload));
        assert_eq!(bot_list(&json!([payload.clone()])), bot_list(&json!([payload.clone()])));
        assert_eq!(transcript(&json!([]), "b"), transcript(&json!([]), "b"));
    }

    #[test]
    fn malformed_payloads_still_render() {
        // A bot payload of the wrong shape falls back to empty fields.
        let rendered = bot_status(&json!("weird"));
        assert!(rendered.contains("🤖 Bot Status for :"));

        // A transcript payload of the wrong shape takes the not-ready branch.
        let rendered = transcript(&json!(42), "bot_1");
        assert!(rendered.contains("Transcript not ready for bot bot_1"));
    }
}
