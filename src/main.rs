//! Eduvane 引擎服务
//!
//! 入口：初始化日志、加载配置、创建会话存储与编排器，启动 HTTP 服务。
//!
//! 配置见 config/default.toml，环境变量 EDUVANE__* 可覆盖，例如：
//! - EDUVANE__ENGINE__LINGUISTIC_VARIATION=true  启用措辞变体
//! - EDUVANE__SERVER__SHARED_SECRET=...          网关共享密钥
//!
//! 启动: cargo run --bin eduvane-engine

use std::sync::Arc;

use anyhow::Context;
use eduvane_engine::config::{load_config, AppConfig};
use eduvane_engine::gateway::server::{create_router, spawn_session_cleanup, ServerState};
use eduvane_engine::memory::SessionStore;
use eduvane_engine::{observability, Orchestrator};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 日志：默认 info，可通过 RUST_LOG 覆盖
    observability::init();

    let cfg = load_config(None).unwrap_or_else(|e| {
        tracing::warn!("Config load failed ({}), using defaults", e);
        AppConfig::default()
    });

    if cfg.server.shared_secret == "change-me" {
        tracing::warn!("Using the default shared secret; set EDUVANE__SERVER__SHARED_SECRET");
    }
    tracing::info!(
        linguistic_variation = cfg.engine.linguistic_variation,
        idle_timeout_secs = cfg.session.idle_timeout_secs,
        "Starting {}",
        cfg.app.name.as_deref().unwrap_or("eduvane-engine")
    );

    let store = Arc::new(SessionStore::new(cfg.session.idle_timeout_secs));
    if cfg.session.idle_timeout_secs > 0 {
        spawn_session_cleanup(Arc::clone(&store), cfg.session.cleanup_interval_secs);
    }

    let orchestrator = Orchestrator::with_defaults(store, cfg.engine);
    let app = create_router(Arc::new(ServerState {
        orchestrator,
        shared_secret: cfg.server.shared_secret.clone(),
    }));

    let listener = tokio::net::TcpListener::bind(cfg.server.bind.as_str())
        .await
        .with_context(|| format!("Failed to bind {}", cfg.server.bind))?;
    tracing::info!("Eduvane engine listening on http://{}", cfg.server.bind);

    axum::serve(listener, app).await.context("Server failed")?;

    Ok(())
}
