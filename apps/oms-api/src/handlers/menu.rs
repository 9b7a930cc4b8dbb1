//! 菜单可见性 handler
//!
//! GET /menu-visibility?requiredRole=...&path=...
//!
//! 前端对每个菜单项询问一次：给定菜单要求的角色与当前路径，
//! 当前用户是否可见。判定本身是纯函数，直通授权能力。

use crate::AppState;
use crate::middleware::require_identity;
use crate::utils::response::bad_request_error;
use api_contract::{ApiResponse, MenuVisibilityDto, MenuVisibilityQuery};
use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use domain::Role;
use oms_lifecycle::FaultLifecycle;

/// 菜单可见性判定
///
/// `requiredRole` 解析失败按无效请求处理，不做静默隐藏。
pub async fn menu_visibility(
    State(state): State<AppState>,
    Query(query): Query<MenuVisibilityQuery>,
    headers: HeaderMap,
) -> Response {
    let identity = match require_identity(&state, &headers) {
        Ok(identity) => identity,
        Err(response) => return response,
    };
    let required_role: Role = match query.required_role.parse() {
        Ok(role) => role,
        Err(_) => {
            return bad_request_error(format!("unknown role: {}", query.required_role));
        }
    };
    let visible = FaultLifecycle::menu_visible(&identity, required_role, &query.path);
    (
        StatusCode::OK,
        Json(ApiResponse::success(MenuVisibilityDto { visible })),
    )
        .into_response()
}
