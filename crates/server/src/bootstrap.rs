use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use golinks_core::config::{AppConfig, ConfigError, LoadOptions};
use golinks_db::{connect_with_settings, migrations, DbPool, SqlLinkRepository};
use golinks_slack::api::HttpChatClient;
use golinks_slack::commands::CommandRouter;
use golinks_slack::events::LinkEventHandler;

use crate::routes::AppState;
use crate::service::DirectoryService;

pub struct Application {
    pub config: AppConfig,
    pub db_pool: DbPool,
    pub state: AppState,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("database connection failed: {0}")]
    DatabaseConnect(#[source] sqlx::Error),
    #[error("database migration failed: {0}")]
    Migration(#[source] sqlx::migrate::MigrateError),
}

pub async fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    with_config(config).await
}

pub async fn with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(event_name = "system.bootstrap.start", "starting application bootstrap");

    let db_pool = connect_with_settings(
        &config.database.url,
        config.database.max_connections,
        config.database.timeout_secs,
    )
    .await
    .map_err(BootstrapError::DatabaseConnect)?;
    info!(event_name = "system.bootstrap.database_connected", "database connection established");

    migrations::run_pending(&db_pool).await.map_err(BootstrapError::Migration)?;
    info!(event_name = "system.bootstrap.migrations_applied", "database migrations applied");

    let service = Arc::new(DirectoryService::new(SqlLinkRepository::new(db_pool.clone())));
    let chat = Arc::new(HttpChatClient::new(config.slack.bot_token.clone()));
    let state = AppState {
        commands: CommandRouter::new(service.clone()),
        events: Arc::new(LinkEventHandler::new(
            service,
            chat,
            config.slack.trigger_word.clone(),
        )),
    };

    Ok(Application { config, db_pool, state })
}
