//! 运行指标 handler
//!
//! GET /ops/metrics - 进程内计数器快照
//!
//! 仅 system_admin 可读；计数器是进程级的，重启归零。

use crate::AppState;
use crate::middleware::require_identity;
use crate::utils::response::forbidden_error;
use api_contract::{ApiResponse, MetricsSnapshotDto};
use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use domain::Role;
use oms_telemetry::metrics;

/// 运行指标快照
pub async fn ops_metrics(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let identity = match require_identity(&state, &headers) {
        Ok(identity) => identity,
        Err(response) => return response,
    };
    if identity.role != Some(Role::SystemAdmin) {
        return forbidden_error();
    }
    let snapshot = metrics().snapshot();
    let dto = MetricsSnapshotDto {
        faults_reported: snapshot.faults_reported,
        faults_resolved: snapshot.faults_resolved,
        faults_edited: snapshot.faults_edited,
        faults_deleted: snapshot.faults_deleted,
        permission_denied: snapshot.permission_denied,
        invalid_patches: snapshot.invalid_patches,
        version_conflicts: snapshot.version_conflicts,
    };
    (StatusCode::OK, Json(ApiResponse::success(dto))).into_response()
}
