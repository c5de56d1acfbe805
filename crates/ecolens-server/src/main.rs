mod api;
mod cache;
mod middleware;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};
use crate::cache::ProductCache;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = ecolens_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let tables = match &config.rank_tables_path {
        Some(path) => ecolens_core::load_rank_tables(path)?,
        None => ecolens_core::RankTables::default(),
    };

    let client = ecolens_off::OffClient::from_app_config(&config)?;

    let state = AppState {
        client: Arc::new(client),
        tables: Arc::new(tables),
        cache: ProductCache::new(),
        category_page_size: config.category_page_size,
        default_top_n: config.top_n,
    };
    let app = build_app(state);

    tracing::info!(addr = %config.bind_addr, env = %config.env, "starting ecolens server");
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
