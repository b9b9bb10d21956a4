use std::{sync::Arc, time::Duration};

use movieshelf::{AppState, config::Config, db, store::MovieStore, tmdb::TmdbClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,movieshelf=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Config::from_env()?;

    let http = wreq::Client::builder()
        .timeout(Duration::from_secs(config.tmdb_timeout_secs))
        .build()?;

    let db = db::connect_and_init(&config.database_url).await?;
    let store = MovieStore::new(db);
    let tmdb = TmdbClient::new(http, &config);

    let state = Arc::new(AppState { store, tmdb: Arc::new(tmdb) });

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, movieshelf::app(state)).await?;

    Ok(())
}
