use async_trait::async_trait;
use thiserror::Error;

use golinks_core::Link;

pub mod link;
pub mod memory;

pub use link::SqlLinkRepository;
pub use memory::InMemoryLinkRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("decode error: {0}")]
    Decode(String),
}

/// Store interface the command logic is parameterized over.
///
/// The caller checks existence before insert/update/delete; the store only
/// guarantees name uniqueness (via its unique index), so a race between two
/// writers is last-write-wins or a database error, never silent corruption.
#[async_trait]
pub trait LinkRepository: Send + Sync {
    async fn insert(&self, link: &Link) -> Result<(), RepositoryError>;
    async fn update(&self, name: &str, url: &str) -> Result<(), RepositoryError>;
    async fn delete(&self, name: &str) -> Result<(), RepositoryError>;
    async fn get(&self, name: &str) -> Result<Option<Link>, RepositoryError>;
    async fn list(&self) -> Result<Vec<Link>, RepositoryError>;
}
