//! 认证相关 handlers：健康检查、登录、刷新 token
//!
//! ## 提供的端点
//!
//! - `GET /health` - 健康检查，返回 `{"ok": true}`
//! - `POST /login` - 用户登录，验证用户名密码后返回 access/refresh token
//! - `POST /refresh-token` - 使用 refresh token 刷新 access token
//!
//! ## 认证流程
//!
//! ### 登录流程
//! 1. 客户端发送用户名密码
//! 2. 服务端调用 `AuthService::login()` 验证凭据
//! 3. 验证成功后，返回 access/refresh token 对和用户的角色、地域信息
//!
//! ### Token 刷新流程
//! 1. 客户端使用 refresh token 请求新 token
//! 2. 服务端校验 refresh token 与存储中绑定的 jti 一致
//! 3. 验证通过后，签发新的 access/refresh token 对（jti 轮换，
//!    旧 refresh token 同时失效）

use crate::AppState;
use crate::utils::response::{auth_error, internal_auth_error};
use api_contract::{ApiResponse, LoginRequest, LoginResponse, RefreshTokenRequest, RefreshTokenResponse};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use oms_auth::AuthError;

/// 健康检查端点
///
/// 无需认证，只反映进程存活，不做外部依赖检查。
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "ok": true }))
}

/// 登录接口
///
/// 验证用户名和密码，成功后返回 access token、refresh token 和
/// 用户的角色与地域归属（前端据此渲染菜单与作用域）。
///
/// # Errors
///
/// - `401 UNAUTHORIZED`: 用户名或密码错误（`InvalidCredentials`）
/// - `500 INTERNAL SERVER ERROR`: 认证服务内部错误
pub async fn login(State(state): State<AppState>, Json(req): Json<LoginRequest>) -> Response {
    match state.auth.login(&req.username, &req.password).await {
        Ok((user, tokens)) => {
            let response = LoginResponse {
                access_token: tokens.access_token,
                refresh_token: tokens.refresh_token,
                // 秒级时间戳转毫秒级（前端期望的时间戳格式）
                expires: tokens.expires_at.saturating_mul(1000),
                username: user.username,
                role: Some(user.role),
                region: user.region,
                district: user.district,
            };
            (StatusCode::OK, Json(ApiResponse::success(response))).into_response()
        }
        Err(AuthError::InvalidCredentials) => auth_error(StatusCode::UNAUTHORIZED),
        Err(err) => internal_auth_error(err),
    }
}

/// 刷新 access token
///
/// 使用 refresh token 换取新的 token 对。每次刷新都会轮换
/// refresh token 的 jti，旧 refresh token 立即失效。
///
/// # Errors
///
/// - `401 UNAUTHORIZED`: refresh token 无效、已过期或已被轮换
/// - `500 INTERNAL SERVER ERROR`: 认证服务内部错误
pub async fn refresh_token(
    State(state): State<AppState>,
    Json(req): Json<RefreshTokenRequest>,
) -> Response {
    match state.auth.refresh(&req.refresh_token).await {
        Ok(tokens) => {
            let response = RefreshTokenResponse {
                access_token: tokens.access_token,
                refresh_token: tokens.refresh_token,
                expires: tokens.expires_at.saturating_mul(1000),
            };
            (StatusCode::OK, Json(ApiResponse::success(response))).into_response()
        }
        Err(AuthError::TokenInvalid | AuthError::TokenExpired) => {
            auth_error(StatusCode::UNAUTHORIZED)
        }
        Err(err) => internal_auth_error(err),
    }
}
