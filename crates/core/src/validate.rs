use crate::errors::LinkError;

/// Checks the `command` field of a slash-command payload.
///
/// Slack always sends the literal command (`/go`, `/add`, ...); anything
/// empty or not starting with `/` means the payload did not come from a
/// slash command and gets the shared "valid command" rejection.
pub fn validate_command_prefix(command: &str) -> Result<(), LinkError> {
    let trimmed = command.trim();
    if trimmed.is_empty() || !trimmed.starts_with('/') {
        return Err(LinkError::InvalidCommand);
    }
    Ok(())
}

/// A URL is accepted when it is at least 6 characters and uses an http(s)
/// scheme. Anything else (ftp, bare hosts, fragments) is rejected.
pub fn validate_url(url: &str) -> bool {
    url.len() >= 6 && (url.starts_with("http://") || url.starts_with("https://"))
}

/// Splits free-form command text into a (name, url) pair.
///
/// The payload looks like `meet https://meet.google.com`; tokens past the
/// second are ignored.
pub fn parse_name_and_url(text: &str) -> Result<(&str, &str), LinkError> {
    let mut parts = text.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some(name), Some(url)) => Ok((name, url)),
        _ => Err(LinkError::MissingArguments),
    }
}
