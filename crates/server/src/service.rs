use async_trait::async_trait;
use tracing::warn;

use golinks_core::{group_links, resolve, validate_url, Link, LinkError, Resolution};
use golinks_db::repositories::{LinkRepository, RepositoryError};
use golinks_slack::blocks::{directory_message, group_message, link_message};
use golinks_slack::commands::{CommandReply, CommandRouteError, LinkCommandService};

pub const SAVE_FAILURE_TEXT: &str = "Failed to save your link, please try again later";

/// The one place command semantics live, parameterized over the store.
///
/// Both the slash-command endpoints and the message-event watcher go
/// through this service; swapping the repository (SQL in production,
/// in-memory in tests) changes nothing about behavior.
pub struct DirectoryService<R> {
    repository: R,
}

impl<R> DirectoryService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

impl<R: LinkRepository> DirectoryService<R> {
    fn save_failure(&self, operation: &'static str, name: &str, error: RepositoryError) -> CommandReply {
        warn!(
            event_name = "store.link.write_failed",
            operation,
            link_name = %name,
            error = %error,
            "link store write failed; answering with retry hint"
        );
        CommandReply::Text(SAVE_FAILURE_TEXT.to_string())
    }
}

fn read_failure(error: RepositoryError) -> CommandRouteError {
    CommandRouteError::Service(error.to_string())
}

#[async_trait]
impl<R: LinkRepository> LinkCommandService for DirectoryService<R> {
    async fn go(&self, query: &str) -> Result<CommandReply, CommandRouteError> {
        let links = self.repository.list().await.map_err(read_failure)?;

        Ok(match resolve(&links, query) {
            Resolution::Exact(link) => CommandReply::Message(link_message(&link)),
            Resolution::Group(members) => CommandReply::Message(group_message(query, &members)),
            Resolution::NotFound => CommandReply::Text(format!(
                "No command found with the name `{query}`. Try `/list` to see every registered link."
            )),
        })
    }

    async fn add(&self, name: &str, url: &str) -> Result<CommandReply, CommandRouteError> {
        let existing = match self.repository.get(name).await {
            Ok(existing) => existing,
            Err(error) => return Ok(self.save_failure("add", name, error)),
        };
        if existing.is_some() {
            return Ok(CommandReply::Text(LinkError::NameExists(name.to_string()).to_string()));
        }
        if !validate_url(url) {
            return Ok(CommandReply::Text(LinkError::InvalidUrl.to_string()));
        }

        match self.repository.insert(&Link::new(name, url)).await {
            Ok(()) => Ok(CommandReply::Text(format!("{name} added with URL {url}"))),
            Err(error) => Ok(self.save_failure("add", name, error)),
        }
    }

    async fn edit(&self, name: &str, url: &str) -> Result<CommandReply, CommandRouteError> {
        let existing = match self.repository.get(name).await {
            Ok(existing) => existing,
            Err(error) => return Ok(self.save_failure("edit", name, error)),
        };
        if existing.is_none() {
            return Ok(CommandReply::Text(LinkError::NameNotFound(name.to_string()).to_string()));
        }
        if !validate_url(url) {
            return Ok(CommandReply::Text(LinkError::InvalidUrl.to_string()));
        }

        match self.repository.update(name, url).await {
            Ok(()) => Ok(CommandReply::Text(format!("Updated `{name}` to point at {url}"))),
            Err(error) => Ok(self.save_failure("edit", name, error)),
        }
    }

    async fn delete(&self, name: &str) -> Result<CommandReply, CommandRouteError> {
        let existing = match self.repository.get(name).await {
            Ok(existing) => existing,
            Err(error) => return Ok(self.save_failure("delete", name, error)),
        };
        if existing.is_none() {
            return Ok(CommandReply::Text(LinkError::NameNotFound(name.to_string()).to_string()));
        }

        match self.repository.delete(name).await {
            Ok(()) => Ok(CommandReply::Text(format!("Removed `{name}` from the directory"))),
            Err(error) => Ok(self.save_failure("delete", name, error)),
        }
    }

    async fn list(&self) -> Result<CommandReply, CommandRouteError> {
        let links = self.repository.list().await.map_err(read_failure)?;
        if links.is_empty() {
            return Ok(CommandReply::Text(
                "No commands found yet. Register one with `/add <name> <url>`.".to_string(),
            ));
        }

        Ok(CommandReply::Message(directory_message(&group_links(&links))))
    }

    async fn resolve_exact(&self, name: &str) -> Result<Option<Link>, CommandRouteError> {
        self.repository.get(name).await.map_err(read_failure)
    }
}
