use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::api::ChatClient;
use crate::blocks::link_message;
use crate::commands::LinkCommandService;

/// Raw Events API envelope with every field optional, so a shape mismatch
/// becomes a typed error instead of a panic deeper down.
#[derive(Debug, Deserialize)]
struct RawEnvelope {
    #[serde(rename = "type")]
    kind: String,
    challenge: Option<String>,
    event: Option<RawEvent>,
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    #[serde(rename = "type")]
    kind: String,
    channel: Option<String>,
    user: Option<String>,
    text: Option<String>,
    bot_id: Option<String>,
}

/// A channel message worth inspecting for the trigger word.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageEvent {
    pub channel: String,
    pub user: Option<String>,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InboundEvent {
    UrlVerification { challenge: String },
    Message(MessageEvent),
    Ignored,
}

#[derive(Debug, Error)]
pub enum EventError {
    #[error("event payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed event: missing `{field}`")]
    MalformedEvent { field: &'static str },
}

/// Decodes an Events API request body.
///
/// `url_verification` yields the challenge to echo; `event_callback` with
/// an inner channel message yields [`InboundEvent::Message`]. Bot-authored
/// messages and every other envelope or event type are acknowledged as
/// [`InboundEvent::Ignored`] so Slack stops redelivering them.
pub fn decode_event(body: &str) -> Result<InboundEvent, EventError> {
    let envelope: RawEnvelope = serde_json::from_str(body)?;

    match envelope.kind.as_str() {
        "url_verification" => {
            let challenge =
                envelope.challenge.ok_or(EventError::MalformedEvent { field: "challenge" })?;
            Ok(InboundEvent::UrlVerification { challenge })
        }
        "event_callback" => {
            let event = envelope.event.ok_or(EventError::MalformedEvent { field: "event" })?;
            if event.kind != "message" {
                return Ok(InboundEvent::Ignored);
            }
            if event.bot_id.is_some() {
                // Never react to bot traffic; that includes our own posts.
                return Ok(InboundEvent::Ignored);
            }

            let channel = event.channel.ok_or(EventError::MalformedEvent { field: "event.channel" })?;
            let text = event.text.ok_or(EventError::MalformedEvent { field: "event.text" })?;
            Ok(InboundEvent::Message(MessageEvent { channel, user: event.user, text }))
        }
        _ => Ok(InboundEvent::Ignored),
    }
}

/// First whitespace-delimited token after the trigger substring, if any.
pub fn trigger_candidate<'a>(text: &'a str, trigger: &str) -> Option<&'a str> {
    let (_, rest) = text.split_once(trigger)?;
    rest.split_whitespace().next()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventOutcome {
    Posted,
    DeliveryFailed,
    LookupFailed,
    NoMatch,
    NoTrigger,
}

/// Watches channel messages for the trigger word and posts the matching
/// link back into the channel.
///
/// Only exact names resolve here; a failed lookup or delivery is logged
/// and swallowed, never retried.
pub struct LinkEventHandler {
    service: Arc<dyn LinkCommandService>,
    chat: Arc<dyn ChatClient>,
    trigger_word: String,
}

impl LinkEventHandler {
    pub fn new(
        service: Arc<dyn LinkCommandService>,
        chat: Arc<dyn ChatClient>,
        trigger_word: impl Into<String>,
    ) -> Self {
        Self { service, chat, trigger_word: trigger_word.into() }
    }

    pub async fn handle_message(&self, event: &MessageEvent) -> EventOutcome {
        let Some(candidate) = trigger_candidate(&event.text, &self.trigger_word) else {
            return EventOutcome::NoTrigger;
        };

        let link = match self.service.resolve_exact(candidate).await {
            Ok(Some(link)) => link,
            Ok(None) => {
                debug!(
                    event_name = "ingress.slack.trigger_unresolved",
                    channel = %event.channel,
                    candidate,
                    "trigger word candidate did not match a stored link"
                );
                return EventOutcome::NoMatch;
            }
            Err(error) => {
                warn!(
                    event_name = "ingress.slack.trigger_lookup_failed",
                    channel = %event.channel,
                    candidate,
                    error = %error,
                    "link lookup failed while handling a message event"
                );
                return EventOutcome::LookupFailed;
            }
        };

        match self.chat.post_message(&event.channel, &link_message(&link)).await {
            Ok(()) => {
                debug!(
                    event_name = "egress.slack.link_posted",
                    channel = %event.channel,
                    link_name = %link.name,
                    "posted link for trigger word"
                );
                EventOutcome::Posted
            }
            Err(error) => {
                warn!(
                    event_name = "egress.slack.post_failed",
                    channel = %event.channel,
                    link_name = %link.name,
                    error = %error,
                    "failed to deliver link message; dropping without retry"
                );
                EventOutcome::DeliveryFailed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use golinks_core::Link;

    use super::{
        decode_event, trigger_candidate, EventError, EventOutcome, InboundEvent, LinkEventHandler,
        MessageEvent,
    };
    use crate::api::{ChatClient, ChatError, RecordingChatClient};
    use crate::blocks::MessageTemplate;
    use crate::commands::{CommandReply, CommandRouteError, LinkCommandService};

    struct FixedService {
        link: Option<Link>,
    }

    #[async_trait]
    impl LinkCommandService for FixedService {
        async fn go(&self, _query: &str) -> Result<CommandReply, CommandRouteError> {
            unimplemented!("not exercised by event tests")
        }

        async fn add(&self, _name: &str, _url: &str) -> Result<CommandReply, CommandRouteError> {
            unimplemented!("not exercised by event tests")
        }

        async fn edit(&self, _name: &str, _url: &str) -> Result<CommandReply, CommandRouteError> {
            unimplemented!("not exercised by event tests")
        }

        async fn delete(&self, _name: &str) -> Result<CommandReply, CommandRouteError> {
            unimplemented!("not exercised by event tests")
        }

        async fn list(&self) -> Result<CommandReply, CommandRouteError> {
            unimplemented!("not exercised by event tests")
        }

        async fn resolve_exact(&self, _name: &str) -> Result<Option<Link>, CommandRouteError> {
            Ok(self.link.clone())
        }
    }

    struct FailingChatClient;

    #[async_trait]
    impl ChatClient for FailingChatClient {
        async fn post_message(
            &self,
            _channel: &str,
            _message: &MessageTemplate,
        ) -> Result<(), ChatError> {
            Err(ChatError::Api("channel_not_found".to_string()))
        }
    }

    fn message(text: &str) -> MessageEvent {
        MessageEvent { channel: "C1".to_string(), user: Some("U1".to_string()), text: text.to_string() }
    }

    #[test]
    fn url_verification_yields_the_challenge() {
        let decoded =
            decode_event(r#"{"type":"url_verification","challenge":"abc123"}"#).expect("decode");
        assert_eq!(decoded, InboundEvent::UrlVerification { challenge: "abc123".to_string() });
    }

    #[test]
    fn url_verification_without_challenge_is_malformed() {
        let error = decode_event(r#"{"type":"url_verification"}"#).expect_err("must fail");
        assert!(matches!(error, EventError::MalformedEvent { field: "challenge" }));
    }

    #[test]
    fn message_callback_decodes_to_typed_event() {
        let body = r#"{
            "type": "event_callback",
            "event": {"type": "message", "channel": "C42", "user": "U7", "text": "go: meet"}
        }"#;

        let decoded = decode_event(body).expect("decode");
        assert_eq!(
            decoded,
            InboundEvent::Message(MessageEvent {
                channel: "C42".to_string(),
                user: Some("U7".to_string()),
                text: "go: meet".to_string(),
            })
        );
    }

    #[test]
    fn callback_without_inner_event_is_malformed() {
        let error = decode_event(r#"{"type":"event_callback"}"#).expect_err("must fail");
        assert!(matches!(error, EventError::MalformedEvent { field: "event" }));
    }

    #[test]
    fn message_without_text_is_malformed() {
        let body = r#"{"type":"event_callback","event":{"type":"message","channel":"C1"}}"#;
        let error = decode_event(body).expect_err("must fail");
        assert!(matches!(error, EventError::MalformedEvent { field: "event.text" }));
    }

    #[test]
    fn non_message_and_unknown_envelopes_are_ignored() {
        let reaction = r#"{"type":"event_callback","event":{"type":"reaction_added"}}"#;
        assert_eq!(decode_event(reaction).expect("decode"), InboundEvent::Ignored);

        let unknown = r#"{"type":"app_rate_limited"}"#;
        assert_eq!(decode_event(unknown).expect("decode"), InboundEvent::Ignored);
    }

    #[test]
    fn bot_messages_are_ignored() {
        let body = r#"{
            "type": "event_callback",
            "event": {"type": "message", "channel": "C1", "bot_id": "B1", "text": "go: meet"}
        }"#;
        assert_eq!(decode_event(body).expect("decode"), InboundEvent::Ignored);
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(matches!(decode_event("{not json"), Err(EventError::Json(_))));
    }

    #[test]
    fn trigger_candidate_takes_first_token_after_trigger() {
        assert_eq!(trigger_candidate("anyone have go: meet handy?", "go:"), Some("meet"));
        assert_eq!(trigger_candidate("go:meet", "go:"), Some("meet"));
        assert_eq!(trigger_candidate("go:   eng-wiki now", "go:"), Some("eng-wiki"));
        assert_eq!(trigger_candidate("nothing to see", "go:"), None);
        assert_eq!(trigger_candidate("trailing go:", "go:"), None);
    }

    #[tokio::test]
    async fn resolved_trigger_posts_the_link_to_the_channel() {
        let chat = Arc::new(RecordingChatClient::default());
        let handler = LinkEventHandler::new(
            Arc::new(FixedService { link: Some(Link::new("meet", "https://meet.google.com")) }),
            chat.clone(),
            "go:",
        );

        let outcome = handler.handle_message(&message("can someone go: meet me?")).await;
        assert_eq!(outcome, EventOutcome::Posted);

        let posts = chat.posts().await;
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].0, "C1");
        assert!(posts[0].1.fallback_text.contains("https://meet.google.com"));
    }

    #[tokio::test]
    async fn unresolved_candidate_posts_nothing() {
        let chat = Arc::new(RecordingChatClient::default());
        let handler =
            LinkEventHandler::new(Arc::new(FixedService { link: None }), chat.clone(), "go:");

        let outcome = handler.handle_message(&message("go: nosuchname")).await;
        assert_eq!(outcome, EventOutcome::NoMatch);
        assert!(chat.posts().await.is_empty());
    }

    #[tokio::test]
    async fn text_without_trigger_is_left_alone() {
        let chat = Arc::new(RecordingChatClient::default());
        let handler = LinkEventHandler::new(
            Arc::new(FixedService { link: Some(Link::new("meet", "https://meet.google.com")) }),
            chat.clone(),
            "go:",
        );

        let outcome = handler.handle_message(&message("plain channel banter")).await;
        assert_eq!(outcome, EventOutcome::NoTrigger);
        assert!(chat.posts().await.is_empty());
    }

    #[tokio::test]
    async fn delivery_failure_is_swallowed() {
        let handler = LinkEventHandler::new(
            Arc::new(FixedService { link: Some(Link::new("meet", "https://meet.google.com")) }),
            Arc::new(FailingChatClient),
            "go:",
        );

        let outcome = handler.handle_message(&message("go: meet")).await;
        assert_eq!(outcome, EventOutcome::DeliveryFailed);
    }
}
