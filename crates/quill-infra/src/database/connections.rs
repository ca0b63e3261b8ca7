use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DbConn, DbErr};

use crate::config::DatabaseConfig;

/// Open the connection pool described by `config`.
pub async fn connect(config: &DatabaseConfig) -> Result<DbConn, DbErr> {
    tracing::info!("Initializing database connection pool...");

    let opts = ConnectOptions::new(&config.url)
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(300))
        .sqlx_logging(config.sqlx_logging)
        .to_owned();

    let db = Database::connect(opts).await?;
    tracing::info!(
        "Database connected (pool: {}-{})",
        config.min_connections,
        config.max_connections
    );

    Ok(db)
}
