//! HTTP surface for the Slack integration.
//!
//! Endpoints:
//! - `GET  /`                — welcome text
//! - `POST /command/go`      — slash command, form fields `command` + `text`
//! - `POST /command/add`     — slash command, `text` is "name url"
//! - `POST /command/edit`    — slash command, same shape as add
//! - `POST /command/delete`  — slash command, `text` is the name
//! - `POST /command/list`    — slash command
//! - `POST /interaction`     — interactive callbacks, always answered "ok"
//! - `POST /event`           — Events API envelope (JSON)
//!
//! Every command answer is HTTP 200: Slack renders whatever body comes
//! back and retries on anything else, so even logical failures ship as
//! 200 with explanatory text.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderValue, Method};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tracing::{debug, info, warn};
use uuid::Uuid;

use golinks_slack::commands::{CommandKind, CommandReply, CommandRouter, SlashCommandPayload};
use golinks_slack::events::{decode_event, InboundEvent, LinkEventHandler};

const WELCOME_TEXT: &str = "Welcome to the go-link directory. Try `/go <name>` in Slack.";
const FAILURE_TEXT: &str = "Something went wrong, please try again later";

#[derive(Clone)]
pub struct AppState {
    pub commands: CommandRouter,
    pub events: Arc<LinkEventHandler>,
}

/// Slack sends a couple dozen form fields; these are the ones we read.
#[derive(Debug, Default, Deserialize)]
pub struct SlashForm {
    #[serde(default)]
    command: String,
    #[serde(default)]
    text: String,
    #[serde(default)]
    channel_id: String,
    #[serde(default)]
    user_id: String,
}

impl SlashForm {
    fn into_payload(self) -> SlashCommandPayload {
        SlashCommandPayload {
            command: self.command,
            text: self.text,
            channel_id: self.channel_id,
            user_id: self.user_id,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(welcome))
        .route("/command/go", post(go_command))
        .route("/command/add", post(add_command))
        .route("/command/edit", post(edit_command))
        .route("/command/delete", post(delete_command))
        .route("/command/list", post(list_command))
        .route("/interaction", post(interaction))
        .route("/event", post(receive_event))
        .layer(cors_layer())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(HeaderValue::from_static("https://slack.com"))
        .allow_methods([Method::GET, Method::POST])
}

async fn welcome() -> &'static str {
    WELCOME_TEXT
}

async fn interaction() -> &'static str {
    "ok"
}

async fn go_command(State(state): State<AppState>, Form(form): Form<SlashForm>) -> Response {
    run_command(state, CommandKind::Go, form).await
}

async fn add_command(State(state): State<AppState>, Form(form): Form<SlashForm>) -> Response {
    run_command(state, CommandKind::Add, form).await
}

async fn edit_command(State(state): State<AppState>, Form(form): Form<SlashForm>) -> Response {
    run_command(state, CommandKind::Edit, form).await
}

async fn delete_command(State(state): State<AppState>, Form(form): Form<SlashForm>) -> Response {
    run_command(state, CommandKind::Delete, form).await
}

async fn list_command(State(state): State<AppState>, Form(form): Form<SlashForm>) -> Response {
    run_command(state, CommandKind::List, form).await
}

async fn run_command(state: AppState, kind: CommandKind, form: SlashForm) -> Response {
    let correlation_id = Uuid::new_v4().to_string();
    let payload = form.into_payload();

    info!(
        event_name = "ingress.slack.command_received",
        command = kind.as_str(),
        correlation_id = %correlation_id,
        channel_id = %payload.channel_id,
        "received slash command"
    );

    match state.commands.dispatch(kind, &payload).await {
        Ok(CommandReply::Text(text)) => text.into_response(),
        Ok(CommandReply::Message(message)) => {
            Json(serde_json::json!({ "blocks": message.blocks })).into_response()
        }
        Err(error) => {
            warn!(
                event_name = "ingress.slack.command_failed",
                command = kind.as_str(),
                correlation_id = %correlation_id,
                error = %error,
                "command dispatch failed"
            );
            FAILURE_TEXT.into_response()
        }
    }
}

async fn receive_event(State(state): State<AppState>, body: String) -> Response {
    match decode_event(&body) {
        Ok(InboundEvent::UrlVerification { challenge }) => challenge.into_response(),
        Ok(InboundEvent::Message(event)) => {
            let outcome = state.events.handle_message(&event).await;
            debug!(
                event_name = "ingress.slack.message_event_handled",
                channel = %event.channel,
                outcome = ?outcome,
                "handled message event"
            );
            ().into_response()
        }
        Ok(InboundEvent::Ignored) => ().into_response(),
        Err(error) => {
            warn!(
                event_name = "ingress.slack.event_malformed",
                error = %error,
                "dropping malformed event payload"
            );
            ().into_response()
        }
    }
}
