use sqlx::Row;

use golinks_core::Link;

use super::{LinkRepository, RepositoryError};
use crate::DbPool;

pub struct SqlLinkRepository {
    pool: DbPool,
}

impl SqlLinkRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl LinkRepository for SqlLinkRepository {
    async fn insert(&self, link: &Link) -> Result<(), RepositoryError> {
        sqlx::query("INSERT INTO link (name, url) VALUES (?, ?)")
            .bind(&link.name)
            .bind(&link.url)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn update(&self, name: &str, url: &str) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE link SET url = ? WHERE name = ?")
            .bind(url)
            .bind(name)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM link WHERE name = ?").bind(name).execute(&self.pool).await?;
        Ok(())
    }

    async fn get(&self, name: &str) -> Result<Option<Link>, RepositoryError> {
        let row = sqlx::query("SELECT name, url FROM link WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|row| decode_link(&row)).transpose()
    }

    async fn list(&self) -> Result<Vec<Link>, RepositoryError> {
        let rows = sqlx::query("SELECT name, url FROM link").fetch_all(&self.pool).await?;
        rows.iter().map(decode_link).collect()
    }
}

fn decode_link(row: &sqlx::sqlite::SqliteRow) -> Result<Link, RepositoryError> {
    let name: String =
        row.try_get("name").map_err(|error| RepositoryError::Decode(error.to_string()))?;
    let url: String =
        row.try_get("url").map_err(|error| RepositoryError::Decode(error.to_string()))?;
    Ok(Link { name, url })
}
