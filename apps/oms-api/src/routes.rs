//! 路由定义
//!
//! 集中管理所有 API 路由，将路径映射到对应的 handlers。
//! 路由包括：
//! - 健康检查：/health
//! - 认证接口：/login, /refresh-token
//! - 地域参照：/regions, /districts
//! - 故障记录：/faults/*（建档、查询、权限快照、resolve/edit/delete）
//! - 菜单可见性：/menu-visibility
//! - 运行指标：/ops/metrics

use super::AppState;
use super::handlers::*;
use axum::{
    Router,
    routing::{get, post},
};

/// 创建 API 路由
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/login", post(login))
        .route("/refresh-token", post(refresh_token))
        .route("/regions", get(list_regions))
        .route("/districts", get(list_districts))
        .route("/faults", get(list_faults))
        .route("/faults/op5", post(report_op5_fault))
        .route("/faults/control-outage", post(report_control_outage))
        .route(
            "/faults/:fault_id",
            get(get_fault).put(edit_fault).delete(delete_fault),
        )
        .route("/faults/:fault_id/permissions", get(fault_permissions))
        .route("/faults/:fault_id/resolve", post(resolve_fault))
        .route("/menu-visibility", get(menu_visibility))
        .route("/ops/metrics", get(ops_metrics))
}
