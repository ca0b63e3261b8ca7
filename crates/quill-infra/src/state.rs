//! Application state - the wired services plus the storage behind them.

use quill_core::Services;
use quill_core::services::ServiceSettings;

use crate::config::AppConfig;
use crate::memory::in_memory_repositories;

#[cfg(feature = "postgres")]
use anyhow::Context;
#[cfg(feature = "postgres")]
use sea_orm::DbConn;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
    #[cfg(feature = "postgres")]
    pub db: Option<DbConn>,
}

impl AppState {
    /// Services over fresh in-memory storage.
    pub fn in_memory(settings: ServiceSettings) -> Self {
        Self {
            services: Services::new(in_memory_repositories(), settings),
            #[cfg(feature = "postgres")]
            db: None,
        }
    }

    /// Build the state the configuration asks for.
    ///
    /// A configured database that cannot be reached is an error, not a
    /// silent fallback to memory.
    pub async fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        #[cfg(feature = "postgres")]
        if let Some(db_config) = &config.database {
            let db = crate::database::connect(db_config)
                .await
                .context("failed to connect to the database")?;
            let repos = crate::database::postgres_repositories(&db);
            tracing::info!("Application state initialized (postgres)");
            return Ok(Self {
                services: Services::new(repos, config.services),
                db: Some(db),
            });
        }

        #[cfg(not(feature = "postgres"))]
        if config.database.is_some() {
            tracing::warn!("DATABASE_URL ignored: built without the postgres feature");
        }

        if cfg!(feature = "postgres") {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        }
        tracing::info!("Application state initialized (in-memory)");
        Ok(Self::in_memory(config.services))
    }
}
