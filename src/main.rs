use std::sync::Arc;

use moviedb::{
    AppState, app,
    config::{Config, StoreBackend},
    db,
    store::{DbStore, MemoryStore, MovieStore},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,moviedb=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Config::from_env()?;

    let store: Arc<dyn MovieStore> = match config.backend {
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
        StoreBackend::Database => {
            let conn = db::connect_and_migrate(&config.database_url).await?;
            Arc::new(DbStore::new(conn))
        }
    };

    let router = app(Arc::new(AppState { store }));

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, router).await?;

    Ok(())
}
