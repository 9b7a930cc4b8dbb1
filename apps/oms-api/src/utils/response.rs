//! HTTP 响应辅助函数和 DTO 转换
//!
//! 提供统一的错误响应构造函数和 DTO 转换函数：
//! - 错误响应：auth_error, forbidden_error, bad_request_error,
//!   not_found_error, internal_auth_error, storage_error, lifecycle_error
//! - DTO 转换：fault_to_dto, region_to_dto, district_to_dto, segments_to_dto
//!
//! 设计原则：
//! - 所有错误返回统一的 ApiResponse 格式
//! - 生命周期错误分类逐一映射为独立的错误码，不压扁为通用失败

use api_contract::{ApiResponse, CustomerSegmentsDto, DistrictDto, FaultDto, RegionDto};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::{CustomerSegments, District, FaultDetail, FaultRecord, Region};
use oms_auth::AuthError;
use oms_lifecycle::LifecycleError;
use oms_storage::StorageError;

/// 认证错误响应
pub fn auth_error(status: StatusCode) -> Response {
    (
        status,
        Json(ApiResponse::<()>::error(
            "AUTH.UNAUTHORIZED",
            "unauthorized",
        )),
    )
        .into_response()
}

/// 禁止访问错误响应
pub fn forbidden_error() -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(ApiResponse::<()>::error("AUTH.FORBIDDEN", "forbidden")),
    )
        .into_response()
}

/// 错误请求响应
pub fn bad_request_error(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::<()>::error("INVALID.REQUEST", message.into())),
    )
        .into_response()
}

/// 资源未找到错误响应
pub fn not_found_error() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::<()>::error("RESOURCE.NOT_FOUND", "not found")),
    )
        .into_response()
}

/// 认证内部错误响应
pub fn internal_auth_error(err: AuthError) -> Response {
    let message = err.to_string();
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::<()>::error("INTERNAL.ERROR", message)),
    )
        .into_response()
}

/// 存储错误响应
pub fn storage_error(err: StorageError) -> Response {
    let message = err.to_string();
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::<()>::error("INTERNAL.ERROR", message)),
    )
        .into_response()
}

/// 生命周期错误响应：每个分类映射独立的状态码与错误码
pub fn lifecycle_error(err: LifecycleError) -> Response {
    let (status, code, message) = match &err {
        LifecycleError::Unauthorized => (
            StatusCode::FORBIDDEN,
            "FAULT.UNAUTHORIZED",
            err.to_string(),
        ),
        LifecycleError::InvalidState => (
            StatusCode::CONFLICT,
            "FAULT.INVALID_STATE",
            err.to_string(),
        ),
        LifecycleError::InvalidData(violation) => (
            StatusCode::BAD_REQUEST,
            "FAULT.INVALID_DATA",
            violation.to_string(),
        ),
        LifecycleError::NotFound => (
            StatusCode::NOT_FOUND,
            "RESOURCE.NOT_FOUND",
            err.to_string(),
        ),
        LifecycleError::Conflict => (StatusCode::CONFLICT, "FAULT.CONFLICT", err.to_string()),
        LifecycleError::Storage(message) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL.ERROR",
            message.clone(),
        ),
    };
    (status, Json(ApiResponse::<()>::error(code, message))).into_response()
}

/// Region 转 RegionDto
pub fn region_to_dto(region: Region) -> RegionDto {
    RegionDto {
        region_id: region.region_id,
        name: region.name,
    }
}

/// District 转 DistrictDto
pub fn district_to_dto(district: District) -> DistrictDto {
    DistrictDto {
        district_id: district.district_id,
        region_id: district.region_id,
        name: district.name,
    }
}

/// CustomerSegments 转 DTO
pub fn segments_to_dto(segments: CustomerSegments) -> CustomerSegmentsDto {
    CustomerSegmentsDto {
        rural: segments.rural,
        urban: segments.urban,
        metro: segments.metro,
    }
}

/// DTO 转 CustomerSegments
pub fn segments_from_dto(dto: CustomerSegmentsDto) -> CustomerSegments {
    CustomerSegments {
        rural: dto.rural,
        urban: dto.urban,
        metro: dto.metro,
    }
}

/// FaultRecord 转 FaultDto（附带受影响客户合计）
pub fn fault_to_dto(record: FaultRecord) -> FaultDto {
    let total_affected = Some(oms_metrics::total_affected(&record));
    let mut dto = FaultDto {
        fault_id: record.fault_id,
        kind: record.detail.kind().to_string(),
        region_id: record.region_id,
        district_id: record.district_id,
        fault_type: record.fault_type.as_str().to_string(),
        status: record.status.as_str().to_string(),
        occurred_at_ms: record.occurred_at_ms,
        restored_at_ms: record.restored_at_ms,
        version: record.version,
        total_affected,
        fault_location: None,
        mttr_hours: None,
        affected_population: None,
        load_mw: None,
        reason: None,
        area_affected: None,
        unserved_energy_mwh: None,
        customers_affected: None,
    };
    match record.detail {
        FaultDetail::Op5 {
            fault_location,
            mttr_hours,
            affected_population,
        } => {
            dto.fault_location = Some(fault_location);
            dto.mttr_hours = mttr_hours;
            dto.affected_population = affected_population.map(segments_to_dto);
        }
        FaultDetail::ControlOutage {
            load_mw,
            reason,
            area_affected,
            unserved_energy_mwh,
            customers_affected,
        } => {
            dto.load_mw = Some(load_mw);
            dto.reason = reason;
            dto.area_affected = area_affected;
            dto.unserved_energy_mwh = unserved_energy_mwh;
            dto.customers_affected = customers_affected.map(segments_to_dto);
        }
    }
    dto
}
