use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Value};
use thiserror::Error;

use crate::blocks::MessageTemplate;

const SLACK_API_BASE: &str = "https://slack.com/api";

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("slack transport failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("slack api rejected the message: {0}")]
    Api(String),
}

/// Outbound delivery seam. The production implementation talks to the
/// Slack Web API; tests record or drop messages.
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn post_message(
        &self,
        channel: &str,
        message: &MessageTemplate,
    ) -> Result<(), ChatError>;
}

pub struct HttpChatClient {
    http: reqwest::Client,
    bot_token: SecretString,
    base_url: String,
}

impl HttpChatClient {
    pub fn new(bot_token: SecretString) -> Self {
        Self { http: reqwest::Client::new(), bot_token, base_url: SLACK_API_BASE.to_string() }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl ChatClient for HttpChatClient {
    async fn post_message(
        &self,
        channel: &str,
        message: &MessageTemplate,
    ) -> Result<(), ChatError> {
        let response = self
            .http
            .post(format!("{}/chat.postMessage", self.base_url))
            .bearer_auth(self.bot_token.expose_secret())
            .json(&message_payload(channel, message))
            .send()
            .await?;

        let body: Value = response.json().await?;
        if body["ok"].as_bool() != Some(true) {
            let reason = body["error"].as_str().unwrap_or("unknown").to_string();
            return Err(ChatError::Api(reason));
        }

        Ok(())
    }
}

/// `chat.postMessage` body: fallback text plus the Block Kit payload.
pub fn message_payload(channel: &str, message: &MessageTemplate) -> Value {
    json!({
        "channel": channel,
        "text": message.fallback_text,
        "blocks": message.blocks,
    })
}

/// Drops every message; stands in for Slack when no token is around.
#[derive(Default)]
pub struct NoopChatClient;

#[async_trait]
impl ChatClient for NoopChatClient {
    async fn post_message(
        &self,
        _channel: &str,
        _message: &MessageTemplate,
    ) -> Result<(), ChatError> {
        Ok(())
    }
}

/// Captures every post for assertions.
#[derive(Default)]
pub struct RecordingChatClient {
    posts: tokio::sync::Mutex<Vec<(String, MessageTemplate)>>,
}

impl RecordingChatClient {
    pub async fn posts(&self) -> Vec<(String, MessageTemplate)> {
        self.posts.lock().await.clone()
    }
}

#[async_trait]
impl ChatClient for RecordingChatClient {
    async fn post_message(
        &self,
        channel: &str,
        message: &MessageTemplate,
    ) -> Result<(), ChatError> {
        self.posts.lock().await.push((channel.to_string(), message.clone()));
        Ok(())
    }
}
