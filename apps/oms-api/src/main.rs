//! OMS HTTP API 服务器入口。
//!
//! 装配顺序：配置 → 日志 → 存储 →（可选）演示数据 → 认证 →
//! 生命周期引擎 → 路由 → 监听。

mod handlers;
mod middleware;
mod routes;
mod seed;
mod utils;

use axum::middleware as axum_middleware;
use oms_auth::{AuthService, JwtManager};
use oms_config::AppConfig;
use oms_lifecycle::FaultLifecycle;
use oms_storage::{
    FaultStore, InMemoryFaultStore, InMemoryReferenceStore, InMemoryUserStore, ReferenceStore,
};
use oms_telemetry::init_tracing;
use std::sync::Arc;
use tracing::info;

/// 各 handler 共享的应用状态。
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub faults: Arc<dyn FaultStore>,
    pub references: Arc<dyn ReferenceStore>,
    pub lifecycle: Arc<FaultLifecycle>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载本地 .env（如存在），便于直接 cargo run 启动
    dotenvy::dotenv().ok();
    // 从环境变量加载运行配置
    let config = AppConfig::from_env()?;
    // 初始化结构化日志
    init_tracing();

    let faults: Arc<dyn FaultStore> = Arc::new(InMemoryFaultStore::new());
    let references: Arc<dyn ReferenceStore> = if config.seed_demo_data {
        Arc::new(InMemoryReferenceStore::with_demo_data())
    } else {
        Arc::new(InMemoryReferenceStore::new(Vec::new(), Vec::new()))
    };
    let user_store = if config.seed_demo_data {
        Arc::new(InMemoryUserStore::with_users(seed::demo_users()?))
    } else {
        Arc::new(InMemoryUserStore::new())
    };

    let jwt = JwtManager::new(
        config.jwt_secret.clone(),
        config.jwt_access_ttl_seconds,
        config.jwt_refresh_ttl_seconds,
    );
    let auth = Arc::new(AuthService::new(user_store, jwt));
    let lifecycle = Arc::new(FaultLifecycle::new(faults.clone(), references.clone()));

    let state = AppState {
        auth,
        faults,
        references,
        lifecycle,
    };

    let app = routes::create_api_router()
        .with_state(state)
        // 注入 request_id/trace_id
        .layer(axum_middleware::from_fn(middleware::request_context));

    info!(addr = %config.http_addr, "oms-api listening");
    let listener = tokio::net::TcpListener::bind(&config.http_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
