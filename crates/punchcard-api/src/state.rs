//! Application state wiring the list service to its infrastructure.
//!
//! AppState holds the concrete service instance used by both CLI and REST API.
//! `ContentService` is generic over repository/registry traits; AppState pins
//! it to the SQLite repository and the static registry.

use std::path::PathBuf;
use std::sync::Arc;

use punchcard_core::registry::StaticTypeRegistry;
use punchcard_core::service::content::ContentService;
use punchcard_infra::registry::load_registry;
use punchcard_infra::sqlite::content::SqliteContentRepository;
use punchcard_infra::sqlite::pool::{database_url, DatabasePool};
use punchcard_types::config::PunchcardConfig;

/// Concrete type alias for the service generics pinned to infra implementations.
pub type ConcreteContentService = ContentService<SqliteContentRepository, StaticTypeRegistry>;

/// Shared application state.
///
/// Used by both CLI commands and REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub content_service: Arc<ConcreteContentService>,
    pub config: Arc<PunchcardConfig>,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Initialize the application state: connect to DB, load types, wire the service.
    pub async fn init(data_dir: PathBuf, config: PunchcardConfig) -> anyhow::Result<Self> {
        tokio::fs::create_dir_all(&data_dir).await?;

        let db_pool = DatabasePool::new(&database_url(&data_dir)).await?;
        let registry = load_registry(&data_dir, &config).await?;

        let content_service = ContentService::new(
            SqliteContentRepository::new(db_pool),
            registry,
            config.sort_fields.clone(),
        );

        Ok(Self {
            content_service: Arc::new(content_service),
            config: Arc::new(config),
            data_dir,
        })
    }
}
