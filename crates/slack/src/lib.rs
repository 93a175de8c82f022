//! Slack Integration - slash commands, message events, outbound posting
//!
//! This crate provides the Slack interface for the go-link directory:
//! - **Slash Commands** (`commands`) - `/go`, `/add`, `/edit`, `/delete`, `/list`
//! - **Events** (`events`) - typed Events API decoding and the trigger-word watcher
//! - **Block Kit** (`blocks`) - rich message builders for link cards and lists
//! - **Web API** (`api`) - `chat.postMessage` client for proactive messages
//!
//! # Getting Started
//!
//! 1. Create a Slack app at https://api.slack.com/apps
//! 2. Add slash commands `/go`, `/add`, `/edit`, `/delete`, `/list` pointing
//!    at the matching `/command/*` endpoints
//! 3. Subscribe to `message.channels` events pointing at `/event`
//! 4. Set `GOLINKS_SLACK_BOT_TOKEN`
//!
//! # Key Types
//!
//! - `CommandRouter` - validates and dispatches slash-command payloads
//! - `LinkCommandService` - trait the production directory service implements
//! - `LinkEventHandler` - scans message events for the trigger word
//! - `ChatClient` - outbound message delivery seam

pub mod api;
pub mod blocks;
pub mod commands;
pub mod events;
