//! 故障记录 handlers
//!
//! 提供故障记录的建档、查询与生命周期接口：
//! - GET /faults - 列出调用者可见的记录
//! - POST /faults/op5 - OP5 故障建档
//! - POST /faults/control-outage - 负荷停电建档
//! - GET /faults/{id} - 获取记录详情
//! - PUT /faults/{id} - 字段级编辑
//! - DELETE /faults/{id} - 删除记录
//! - GET /faults/{id}/permissions - 权限快照
//! - POST /faults/{id}/resolve - 标记已恢复
//!
//! 权限要求：
//! - 所有接口需要 Bearer token 认证
//! - 建档要求 district_engineer 及以上且作用域覆盖目标地域
//! - resolve/edit/delete 的判定由生命周期引擎负责

use crate::AppState;
use crate::middleware::require_identity;
use crate::utils::response::{
    fault_to_dto, lifecycle_error, not_found_error, segments_from_dto, storage_error,
};
use crate::utils::{normalize_optional, normalize_required, parse_fault_type};
use api_contract::{
    ApiResponse, EditFaultRequest, FaultDto, PermissionSnapshotDto, ReportControlOutageRequest,
    ReportOp5FaultRequest,
};
use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use domain::{
    FaultDetail, FaultDetailPatch, FaultPatch, FaultRecord, FaultStatus, Role, UserIdentity,
};
use oms_access::{ReferenceDirectory, dominates, scope_covers};
use oms_telemetry::record_fault_reported;
use uuid::Uuid;

#[derive(serde::Deserialize)]
pub struct FaultPath {
    fault_id: String,
}

/// 列出调用者可见的故障记录
///
/// 按查看作用域过滤：技术员本区、区工程师本区、区域工程师本区域，
/// 更高角色全量。
pub async fn list_faults(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let identity = match require_identity(&state, &headers) {
        Ok(identity) => identity,
        Err(response) => return response,
    };
    let dir = match directory(&state).await {
        Ok(dir) => dir,
        Err(response) => return response,
    };
    match state.faults.list_faults().await {
        Ok(records) => {
            let data: Vec<FaultDto> = records
                .into_iter()
                .filter(|record| oms_access::can_view(&identity, record, &dir))
                .map(fault_to_dto)
                .collect();
            (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
        }
        Err(err) => storage_error(err),
    }
}

/// 获取故障记录详情
///
/// 可见性之外的记录与不存在的记录一律返回 404，不泄露存在性。
pub async fn get_fault(
    State(state): State<AppState>,
    Path(path): Path<FaultPath>,
    headers: HeaderMap,
) -> Response {
    let identity = match require_identity(&state, &headers) {
        Ok(identity) => identity,
        Err(response) => return response,
    };
    let dir = match directory(&state).await {
        Ok(dir) => dir,
        Err(response) => return response,
    };
    match state.faults.get_fault(&path.fault_id).await {
        Ok(Some(record)) => {
            if !oms_access::can_view(&identity, &record, &dir) {
                return not_found_error();
            }
            (
                StatusCode::OK,
                Json(ApiResponse::success(fault_to_dto(record))),
            )
                .into_response()
        }
        Ok(None) => not_found_error(),
        Err(err) => storage_error(err),
    }
}

/// OP5 故障建档
pub async fn report_op5_fault(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<ReportOp5FaultRequest>,
) -> Response {
    let identity = match require_identity(&state, &headers) {
        Ok(identity) => identity,
        Err(response) => return response,
    };
    let region_id = match normalize_required(req.region_id, "regionId") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let district_id = match normalize_required(req.district_id, "districtId") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let fault_type = match parse_fault_type(&req.fault_type) {
        Ok(value) => value,
        Err(response) => return response,
    };
    let fault_location = match normalize_required(req.fault_location, "faultLocation") {
        Ok(value) => value,
        Err(response) => return response,
    };

    let record = FaultRecord {
        fault_id: Uuid::new_v4().to_string(),
        region_id,
        district_id,
        fault_type,
        status: FaultStatus::Active,
        occurred_at_ms: req.occurred_at_ms,
        restored_at_ms: None,
        version: 1,
        detail: FaultDetail::Op5 {
            fault_location,
            mttr_hours: None,
            affected_population: req.affected_population.map(segments_from_dto),
        },
    };
    insert_record(&state, &identity, record).await
}

/// 负荷停电建档
pub async fn report_control_outage(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<ReportControlOutageRequest>,
) -> Response {
    let identity = match require_identity(&state, &headers) {
        Ok(identity) => identity,
        Err(response) => return response,
    };
    let region_id = match normalize_required(req.region_id, "regionId") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let district_id = match normalize_required(req.district_id, "districtId") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let fault_type = match parse_fault_type(&req.fault_type) {
        Ok(value) => value,
        Err(response) => return response,
    };
    let reason = match normalize_optional(req.reason, "reason") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let area_affected = match normalize_optional(req.area_affected, "areaAffected") {
        Ok(value) => value,
        Err(response) => return response,
    };

    let record = FaultRecord {
        fault_id: Uuid::new_v4().to_string(),
        region_id,
        district_id,
        fault_type,
        status: FaultStatus::Active,
        occurred_at_ms: req.occurred_at_ms,
        restored_at_ms: None,
        version: 1,
        detail: FaultDetail::ControlOutage {
            load_mw: req.load_mw,
            reason,
            area_affected,
            unserved_energy_mwh: req.unserved_energy_mwh,
            customers_affected: req.customers_affected.map(segments_from_dto),
        },
    };
    insert_record(&state, &identity, record).await
}

/// 权限快照：一次返回 can_edit / can_resolve / can_delete
pub async fn fault_permissions(
    State(state): State<AppState>,
    Path(path): Path<FaultPath>,
    headers: HeaderMap,
) -> Response {
    let identity = match require_identity(&state, &headers) {
        Ok(identity) => identity,
        Err(response) => return response,
    };
    match state
        .lifecycle
        .evaluate_permissions(&identity, &path.fault_id)
        .await
    {
        Ok(snapshot) => {
            let dto = PermissionSnapshotDto {
                can_edit: snapshot.can_edit,
                can_resolve: snapshot.can_resolve,
                can_delete: snapshot.can_delete,
            };
            (StatusCode::OK, Json(ApiResponse::success(dto))).into_response()
        }
        Err(err) => lifecycle_error(err),
    }
}

/// 标记记录已恢复
pub async fn resolve_fault(
    State(state): State<AppState>,
    Path(path): Path<FaultPath>,
    headers: HeaderMap,
) -> Response {
    let identity = match require_identity(&state, &headers) {
        Ok(identity) => identity,
        Err(response) => return response,
    };
    match state.lifecycle.resolve(&identity, &path.fault_id).await {
        Ok(record) => (
            StatusCode::OK,
            Json(ApiResponse::success(fault_to_dto(record))),
        )
            .into_response(),
        Err(err) => lifecycle_error(err),
    }
}

/// 字段级编辑故障记录
///
/// 请求体是扁平的可选字段集合；两类变体的字段混用按无效请求
/// 拒绝，不进入引擎。
pub async fn edit_fault(
    State(state): State<AppState>,
    Path(path): Path<FaultPath>,
    headers: HeaderMap,
    Json(req): Json<EditFaultRequest>,
) -> Response {
    let identity = match require_identity(&state, &headers) {
        Ok(identity) => identity,
        Err(response) => return response,
    };
    let patch = match build_patch(req) {
        Ok(patch) => patch,
        Err(response) => return response,
    };
    match state
        .lifecycle
        .edit(&identity, &path.fault_id, &patch)
        .await
    {
        Ok(record) => (
            StatusCode::OK,
            Json(ApiResponse::success(fault_to_dto(record))),
        )
            .into_response(),
        Err(err) => lifecycle_error(err),
    }
}

/// 删除故障记录
pub async fn delete_fault(
    State(state): State<AppState>,
    Path(path): Path<FaultPath>,
    headers: HeaderMap,
) -> Response {
    let identity = match require_identity(&state, &headers) {
        Ok(identity) => identity,
        Err(response) => return response,
    };
    match state.lifecycle.delete(&identity, &path.fault_id).await {
        Ok(()) => (StatusCode::OK, Json(ApiResponse::success(()))).into_response(),
        Err(err) => lifecycle_error(err),
    }
}

/// 建档共用的权限检查 + 插入路径。
///
/// 建档不是状态机转换，不经过生命周期引擎；权限规则与记录管理
/// 动作一致（district_engineer 及以上且作用域覆盖）。
async fn insert_record(
    state: &AppState,
    identity: &UserIdentity,
    record: FaultRecord,
) -> Response {
    let allowed = match identity.role {
        Some(role) => dominates(role, Role::DistrictEngineer),
        None => false,
    };
    if !allowed {
        return crate::utils::response::forbidden_error();
    }
    let dir = match directory(state).await {
        Ok(dir) => dir,
        Err(response) => return response,
    };
    if !scope_covers(identity, &record, &dir) {
        return crate::utils::response::forbidden_error();
    }
    if let Err(violation) = record.validate() {
        return crate::utils::response::bad_request_error(violation.to_string());
    }
    match state.faults.insert_fault(record).await {
        Ok(record) => {
            record_fault_reported();
            (
                StatusCode::OK,
                Json(ApiResponse::success(fault_to_dto(record))),
            )
                .into_response()
        }
        Err(err) => storage_error(err),
    }
}

/// 从扁平请求体构建变体一致的补丁
fn build_patch(req: EditFaultRequest) -> Result<FaultPatch, Response> {
    if req.has_op5_fields() && req.has_control_fields() {
        return Err(crate::utils::response::bad_request_error(
            "mixed op5 and control outage fields",
        ));
    }
    let fault_type = match req.fault_type.as_deref() {
        Some(value) => Some(parse_fault_type(value)?),
        None => None,
    };
    let detail = if req.has_op5_fields() {
        Some(FaultDetailPatch::Op5 {
            fault_location: req.fault_location,
            mttr_hours: req.mttr_hours,
            affected_population: req.affected_population.map(segments_from_dto),
        })
    } else if req.has_control_fields() {
        Some(FaultDetailPatch::ControlOutage {
            load_mw: req.load_mw,
            reason: req.reason,
            area_affected: req.area_affected,
            unserved_energy_mwh: req.unserved_energy_mwh,
            customers_affected: req.customers_affected.map(segments_from_dto),
        })
    } else {
        None
    };
    Ok(FaultPatch {
        fault_type,
        occurred_at_ms: req.occurred_at_ms,
        detail,
    })
}

/// 从参照存储构建名称目录
async fn directory(state: &AppState) -> Result<ReferenceDirectory, Response> {
    let regions = match state.references.list_regions().await {
        Ok(regions) => regions,
        Err(err) => return Err(storage_error(err)),
    };
    let districts = match state.references.list_districts().await {
        Ok(districts) => districts,
        Err(err) => return Err(storage_error(err)),
    };
    Ok(ReferenceDirectory::new(&regions, &districts))
}

#[cfg(test)]
mod tests {
    use super::build_patch;
    use api_contract::EditFaultRequest;
    use domain::{FaultDetailPatch, FaultType};

    #[test]
    fn mixed_variant_fields_rejected() {
        let req = EditFaultRequest {
            fault_location: Some("feeder 7".to_string()),
            load_mw: Some(12.0),
            ..EditFaultRequest::default()
        };
        assert!(build_patch(req).is_err());
    }

    #[test]
    fn op5_fields_build_op5_patch() {
        let req = EditFaultRequest {
            fault_type: Some("Planned".to_string()),
            fault_location: Some("feeder 7".to_string()),
            ..EditFaultRequest::default()
        };
        let patch = build_patch(req).expect("patch");
        assert_eq!(patch.fault_type, Some(FaultType::Planned));
        assert!(matches!(patch.detail, Some(FaultDetailPatch::Op5 { .. })));
    }

    #[test]
    fn no_variant_fields_leaves_detail_untouched() {
        let req = EditFaultRequest {
            occurred_at_ms: Some(1_000),
            ..EditFaultRequest::default()
        };
        let patch = build_patch(req).expect("patch");
        assert!(patch.detail.is_none());
        assert_eq!(patch.occurred_at_ms, Some(1_000));
    }
}
