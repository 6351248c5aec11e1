//! Seedvox - 音色种子选择服务
//!
//! - Domain: seed/, preference/, style/
//! - Application: commands, queries, ports
//! - Infrastructure: http, memory, adapters

use std::sync::Arc;

use seedvox::config::{load_config, print_config, LogConfig};
use seedvox::infrastructure::adapters::{FileCatalogLoader, StdRngSeedPicker};
use seedvox::infrastructure::http::{AppState, HttpServer, ServerConfig};
use seedvox::infrastructure::memory::InMemoryCharacterVoiceCache;

fn init_tracing(log: &LogConfig) {
    let log_filter = format!("{},seedvox={},tower_http=debug", log.level, log.level);
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for ctrl-c: {}", e);
        return;
    }
    tracing::info!("Received shutdown signal");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config.log);

    tracing::info!("Seedvox - 音色种子选择服务");
    print_config(&config);

    let policy = config
        .selection
        .to_policy()
        .map_err(|e| anyhow::anyhow!("Invalid selection config: {}", e))?;

    // 目录缺失或损坏时退回内置目录，不会失败
    let loader = FileCatalogLoader::new(
        &config.catalog.seed_file,
        &config.catalog.preferences_file,
    );
    let catalog = loader.load().await;

    let voice_cache = Arc::new(InMemoryCharacterVoiceCache::new());
    let picker = Arc::new(StdRngSeedPicker::new(config.selection.rng_seed));

    let state = AppState::new(Arc::new(catalog), Arc::new(policy), voice_cache, picker);
    let server_config = ServerConfig::new(&config.server.host, config.server.port);
    let server = HttpServer::new(server_config, state);

    server.run_with_shutdown(shutdown_signal()).await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
