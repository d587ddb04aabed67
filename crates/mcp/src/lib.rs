//! MCP server core for driving meeting bots.
//!
//! This crate turns the upstream bot-management HTTP API into a fixed
//! catalog of typed MCP tools. The pieces line up as a per-call pipeline:
//!
//! - [`catalog`]: the declarative tool table advertised to clients
//! - [`params`]: per-operation parameter validation into a typed request
//! - [`dispatch`]: routing, the single gateway call, and the uniform text
//!   envelope every invocation resolves to
//! - [`format`]: rendering of the upstream's JSON payload shapes
//! - [`server`]: the `rmcp` handler and stdio serve loop
//!
//! Nothing here is stateful between calls; each invocation builds its
//! request, talks to the gateway once, and renders the result.

pub mod catalog;
pub mod dispatch;
pub mod error;
pub mod format;
pub mod params;
pub mod server;

pub use error::ToolError;
pub use server::{MeetingBotServer, serve_stdio};
