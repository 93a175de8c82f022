use sqlx::migrate::{MigrateError, Migrator};

use crate::DbPool;

pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

pub async fn run_pending(pool: &DbPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await
}

#[cfg(test)]
mod tests {
    use super::run_pending;
    use crate::connect_with_settings;

    #[tokio::test]
    async fn migrations_create_link_table() {
        let pool = connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");
        run_pending(&pool).await.expect("run migrations");

        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'link'",
        )
        .fetch_one(&pool)
        .await
        .expect("check link table");
        assert_eq!(count, 1);

        pool.close().await;
    }

    #[tokio::test]
    async fn link_names_are_unique() {
        let pool = connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");
        run_pending(&pool).await.expect("run migrations");

        sqlx::query("INSERT INTO link (name, url) VALUES (?, ?)")
            .bind("meet")
            .bind("https://meet.google.com")
            .execute(&pool)
            .await
            .expect("first insert");

        let duplicate = sqlx::query("INSERT INTO link (name, url) VALUES (?, ?)")
            .bind("meet")
            .bind("https://elsewhere.example.com")
            .execute(&pool)
            .await;
        assert!(duplicate.is_err(), "unique constraint should reject duplicate names");

        pool.close().await;
    }
}
