use thiserror::Error;

/// User-facing command failures.
///
/// The `Display` rendering of each variant is the exact text sent back to
/// Slack; every variant ends up in an HTTP 200 body because Slack treats
/// any non-200 as a delivery failure and retries.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LinkError {
    #[error("Please provide a valid command")]
    InvalidCommand,
    #[error("Text must contain a name and a URL, ex: `/add meet https://meet.google.com`")]
    MissingArguments,
    #[error("That URL is not valid. Links must start with http:// or https://.")]
    InvalidUrl,
    #[error("A link named `{0}` already exists")]
    NameExists(String),
    #[error("No link named `{0}` was found. Make sure the name exists or add it first.")]
    NameNotFound(String),
}
