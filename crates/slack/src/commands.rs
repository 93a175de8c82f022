use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use golinks_core::{parse_name_and_url, validate_command_prefix, Link};

use crate::blocks::MessageTemplate;

/// Form fields Slack sends with every slash command.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SlashCommandPayload {
    pub command: String,
    pub text: String,
    pub channel_id: String,
    pub user_id: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandKind {
    Go,
    Add,
    Edit,
    Delete,
    List,
}

impl CommandKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Go => "go",
            Self::Add => "add",
            Self::Edit => "edit",
            Self::Delete => "delete",
            Self::List => "list",
        }
    }
}

/// What goes back to Slack: a plain line of text or a Block Kit message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandReply {
    Text(String),
    Message(MessageTemplate),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandRouteError {
    #[error("command service failed: {0}")]
    Service(String),
}

/// The single implementation point for command semantics, parameterized
/// over the store through whatever backs the implementor.
#[async_trait]
pub trait LinkCommandService: Send + Sync {
    async fn go(&self, query: &str) -> Result<CommandReply, CommandRouteError>;
    async fn add(&self, name: &str, url: &str) -> Result<CommandReply, CommandRouteError>;
    async fn edit(&self, name: &str, url: &str) -> Result<CommandReply, CommandRouteError>;
    async fn delete(&self, name: &str) -> Result<CommandReply, CommandRouteError>;
    async fn list(&self) -> Result<CommandReply, CommandRouteError>;

    /// Exact-name lookup used by the message-event watcher; group matching
    /// is deliberately not applied there.
    async fn resolve_exact(&self, name: &str) -> Result<Option<Link>, CommandRouteError>;
}

/// Validates and dispatches slash-command payloads.
///
/// Prefix and argument problems are answered here with their canonical
/// texts; only well-formed requests reach the service.
#[derive(Clone)]
pub struct CommandRouter {
    service: Arc<dyn LinkCommandService>,
}

impl CommandRouter {
    pub fn new(service: Arc<dyn LinkCommandService>) -> Self {
        Self { service }
    }

    pub async fn dispatch(
        &self,
        kind: CommandKind,
        payload: &SlashCommandPayload,
    ) -> Result<CommandReply, CommandRouteError> {
        if let Err(error) = validate_command_prefix(&payload.command) {
            return Ok(CommandReply::Text(error.to_string()));
        }

        let text = payload.text.trim();
        match kind {
            CommandKind::Go => self.service.go(text).await,
            CommandKind::Add => match parse_name_and_url(text) {
                Ok((name, url)) => self.service.add(name, url).await,
                Err(error) => Ok(CommandReply::Text(error.to_string())),
            },
            CommandKind::Edit => match parse_name_and_url(text) {
                Ok((name, url)) => self.service.edit(name, url).await,
                Err(error) => Ok(CommandReply::Text(error.to_string())),
            },
            CommandKind::Delete => self.service.delete(text).await,
            CommandKind::List => self.service.list().await,
        }
    }
}
