//! Product Lookup - a cache-aside product read service

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use product_lookup::api::{create_router, AppState};
use product_lookup::cache::{MemoryCache, ProductCache, RedisCache};
use product_lookup::config::{CacheBackend, Config, StoreBackend};
use product_lookup::store::{MemoryStore, MySqlStore, ProductStore};
use product_lookup::{spawn_cleanup_task, spawn_metrics_upkeep, telemetry, ProductLookup};

const METRICS_UPKEEP_INTERVAL: Duration = Duration::from_secs(5);

/// Main entry point for the product lookup server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Install the Prometheus recorder
/// 4. Build the cache and store backends
/// 5. Start HTTP server on configured port
/// 6. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "product_lookup=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Product Lookup Server");

    let config = Config::from_env().context("invalid configuration")?;
    info!(
        "Configuration loaded: cache={:?}, store={:?}, cache_ttl={}s, port={}",
        config.cache_backend, config.store_backend, config.cache_ttl, config.server_port
    );

    let mut background = vec![spawn_metrics_upkeep(
        telemetry::install_recorder(),
        METRICS_UPKEEP_INTERVAL,
    )];

    let (cache, cleanup_handle) = build_cache(&config)?;
    background.extend(cleanup_handle);
    match cache.ping().await {
        Ok(()) => info!("Cache backend '{}' reachable", cache.backend_name()),
        Err(err) => warn!(
            "Cache backend '{}' unreachable, serving from store until it recovers: {}",
            cache.backend_name(),
            err
        ),
    }

    let store = build_store(&config)?;
    info!("Store backend '{}' initialized", store.backend_name());

    let lookup = ProductLookup::new(cache, store).with_ttl(config.cache_ttl());
    let app = create_router(AppState::new(lookup));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!("Server listening on http://{}", addr);
    info!("Prometheus metrics at http://{}/metrics", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(background))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Builds the configured cache, plus the sweeper task for the in-memory one.
fn build_cache(
    config: &Config,
) -> anyhow::Result<(Arc<dyn ProductCache>, Option<JoinHandle<()>>)> {
    match config.cache_backend {
        CacheBackend::Memory => {
            let cache = MemoryCache::new(config.cache_max_entries);
            let handle = spawn_cleanup_task(cache.engine(), config.cleanup_interval());
            let cache: Arc<dyn ProductCache> = Arc::new(cache);
            Ok((cache, Some(handle)))
        }
        CacheBackend::Redis => {
            let cache: Arc<dyn ProductCache> =
                Arc::new(RedisCache::open(&config.redis_url).context("creating Redis client")?);
            Ok((cache, None))
        }
    }
}

fn build_store(config: &Config) -> anyhow::Result<Arc<dyn ProductStore>> {
    match config.store_backend {
        StoreBackend::Memory => {
            let store = match &config.products_file {
                Some(path) => MemoryStore::from_json_file(path)?,
                None => MemoryStore::default(),
            };
            info!("Loaded {} products into memory store", store.len());
            Ok(Arc::new(store))
        }
        StoreBackend::MySql => {
            let options = config.mysql_options()?;
            info!(
                "MySQL store at {}:{}/{}",
                options.get_host(),
                options.get_port(),
                options.get_database().unwrap_or_default()
            );
            Ok(Arc::new(MySqlStore::connect_lazy(
                options,
                config.db_max_connections,
            )))
        }
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM), then stops the background tasks.
async fn shutdown_signal(background: Vec<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    for handle in background {
        handle.abort();
    }
    warn!("Background tasks aborted");
}
