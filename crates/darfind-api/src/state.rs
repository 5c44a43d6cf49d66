//! Application state wiring storage, the model provider and the chat service.
//!
//! `ChatService` is generic over its repository; AppState pins it to the
//! SQLite implementation.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use secrecy::SecretString;

use darfind_core::chat::prompt::PromptBuilder;
use darfind_core::chat::service::ChatService;
use darfind_infra::config::{OPENAI_API_KEY_ENV, SECRET_KEY_ENV, require_secret, resolve_database_url};
use darfind_infra::llm::create_provider;
use darfind_infra::sqlite::pool::DatabasePool;
use darfind_infra::sqlite::session::SqliteSessionRepository;
use darfind_types::config::DarfindConfig;

pub type ConcreteChatService = ChatService<SqliteSessionRepository>;

/// Shared state handed to every HTTP handler.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
    /// Value expected in the `X-SECRET-KEY` header.
    pub secret_key: Arc<SecretString>,
    pub web_dir: PathBuf,
}

impl AppState {
    /// Wire the state for `serve`: read both secrets from the environment
    /// and build the configured provider.
    pub fn init(config: &DarfindConfig, repo: SqliteSessionRepository) -> anyhow::Result<Self> {
        let api_key = require_secret(OPENAI_API_KEY_ENV)?;
        let secret_key = require_secret(SECRET_KEY_ENV)?;

        let provider = create_provider(&config.llm, api_key);

        let chat_service = ChatService::new(
            repo,
            provider,
            PromptBuilder::new(config.prompt.clone()),
            &config.llm,
        );

        Ok(Self::new(chat_service, secret_key, &config.server.web_dir))
    }

    pub fn new(chat_service: ConcreteChatService, secret_key: SecretString, web_dir: impl AsRef<Path>) -> Self {
        Self {
            chat_service: Arc::new(chat_service),
            secret_key: Arc::new(secret_key),
            web_dir: web_dir.as_ref().to_path_buf(),
        }
    }
}

/// Create the data directory, connect to the database and run migrations.
pub async fn open_repository(
    config: &DarfindConfig,
    data_dir: &Path,
) -> anyhow::Result<SqliteSessionRepository> {
    tokio::fs::create_dir_all(data_dir)
        .await
        .with_context(|| format!("failed to create data directory {}", data_dir.display()))?;

    let db_url = resolve_database_url(config, data_dir);
    let pool = DatabasePool::new(&db_url)
        .await
        .with_context(|| format!("failed to open database {db_url}"))?;

    Ok(SqliteSessionRepository::new(pool))
}
