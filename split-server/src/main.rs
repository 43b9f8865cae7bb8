use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use split_server::cache::{CacheConfig, CachedProvider};
use split_server::split::{AnalysisConfig, SplitAnalyzer};
use split_server::vendo::{VendoClient, VendoConfig};
use split_server::web::{AppState, create_router};

const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";

/// Read an environment variable, falling back to `default` if it is unset
/// or does not parse.
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!(variable = name, value = %raw, "ignoring unparsable value");
            default
        }),
        Err(_) => default,
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let defaults = AnalysisConfig::default();
    let analysis_config = AnalysisConfig::new(
        env_or("SPLIT_BATCH_SIZE", defaults.batch_size),
        env_or("SPLIT_PACING_MS", defaults.pacing_delay_ms),
        env_or("SPLIT_LOOKUP_TIMEOUT_SECS", defaults.lookup_timeout_secs),
    );

    let vendo_defaults = VendoConfig::default();
    let mut vendo_config = VendoConfig::new()
        .with_max_concurrent(env_or("VENDO_MAX_CONCURRENT", vendo_defaults.max_concurrent))
        .with_timeout(env_or("VENDO_TIMEOUT_SECS", vendo_defaults.timeout_secs))
        .with_results(env_or("VENDO_RESULTS", vendo_defaults.results))
        .with_transfers(env_or("VENDO_TRANSFERS", vendo_defaults.transfers));
    if let Ok(url) = std::env::var("VENDO_BASE_URL") {
        vendo_config = vendo_config.with_base_url(url);
    }
    info!(base_url = %vendo_config.base_url, "using journey search API");
    let client = VendoClient::new(vendo_config)?;

    let cache_defaults = CacheConfig::default();
    let cache_config = cache_defaults.clone().with_ttl(Duration::from_secs(env_or(
        "SPLIT_CACHE_TTL_SECS",
        cache_defaults.ttl.as_secs(),
    )));
    let provider = CachedProvider::new(client, &cache_config);

    let analyzer = SplitAnalyzer::new(Arc::new(provider), analysis_config);
    let app = create_router(AppState::new(analyzer));

    let addr: SocketAddr = env_or(
        "SPLIT_LISTEN_ADDR",
        SocketAddr::from_str(DEFAULT_LISTEN_ADDR)?,
    );
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(%addr, "split-ticket server listening");
    info!("  GET  /health             - Health check");
    info!("  POST /api/split-journey  - Analyse a journey for split savings");

    axum::serve(listener, app).await?;

    Ok(())
}
