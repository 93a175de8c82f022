use std::collections::HashMap;

use tokio::sync::RwLock;

use golinks_core::Link;

use super::{LinkRepository, RepositoryError};

/// Map-backed repository for tests and local experiments.
#[derive(Default)]
pub struct InMemoryLinkRepository {
    links: RwLock<HashMap<String, String>>,
}

#[async_trait::async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn insert(&self, link: &Link) -> Result<(), RepositoryError> {
        let mut links = self.links.write().await;
        if links.contains_key(&link.name) {
            return Err(RepositoryError::Decode(format!("name `{}` already stored", link.name)));
        }
        links.insert(link.name.clone(), link.url.clone());
        Ok(())
    }

    async fn update(&self, name: &str, url: &str) -> Result<(), RepositoryError> {
        let mut links = self.links.write().await;
        if let Some(stored) = links.get_mut(name) {
            *stored = url.to_string();
        }
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<(), RepositoryError> {
        let mut links = self.links.write().await;
        links.remove(name);
        Ok(())
    }

    async fn get(&self, name: &str) -> Result<Option<Link>, RepositoryError> {
        let links = self.links.read().await;
        Ok(links.get(name).map(|url| Link::new(name, url.clone())))
    }

    async fn list(&self) -> Result<Vec<Link>, RepositoryError> {
        let links = self.links.read().await;
        Ok(links.iter().map(|(name, url)| Link::new(name.clone(), url.clone())).collect())
    }
}
