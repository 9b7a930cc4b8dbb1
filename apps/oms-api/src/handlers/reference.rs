//! 地域参照 handlers
//!
//! 提供区域/区的只读列表：
//! - GET /regions - 列出区域
//! - GET /districts - 列出区
//!
//! 参照数据由外部主数据源维护，这里只做查询；登录即可访问，
//! 不做作用域过滤（建档表单需要完整列表）。

use crate::AppState;
use crate::middleware::require_identity;
use crate::utils::response::{district_to_dto, region_to_dto, storage_error};
use api_contract::{ApiResponse, DistrictDto, RegionDto};
use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};

/// 列出区域
pub async fn list_regions(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Err(response) = require_identity(&state, &headers) {
        return response;
    }
    match state.references.list_regions().await {
        Ok(regions) => {
            let data: Vec<RegionDto> = regions.into_iter().map(region_to_dto).collect();
            (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
        }
        Err(err) => storage_error(err),
    }
}

/// 列出区
pub async fn list_districts(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Err(response) = require_identity(&state, &headers) {
        return response;
    }
    match state.references.list_districts().await {
        Ok(districts) => {
            let data: Vec<DistrictDto> = districts.into_iter().map(district_to_dto).collect();
            (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
        }
        Err(err) => storage_error(err),
    }
}
