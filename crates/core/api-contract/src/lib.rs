//! 稳定的 DTO 与 API 响应契约。

use serde::{Deserialize, Serialize};

/// 标准 API 响应封装。
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
}

/// 失败响应的错误体。
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError {
                code: code.into(),
                message: message.into(),
            }),
        }
    }
}

/// 登录请求体。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// 登录响应体。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires: u64,
    pub username: String,
    pub role: Option<String>,
    pub region: Option<String>,
    pub district: Option<String>,
}

/// 刷新 token 请求体。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    #[serde(alias = "refresh_token")]
    pub refresh_token: String,
}

/// 刷新 token 响应体。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires: u64,
}

/// 区域返回结构。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionDto {
    pub region_id: String,
    pub name: String,
}

/// 区返回结构。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictDto {
    pub district_id: String,
    pub region_id: String,
    pub name: String,
}

/// 人口分段客户数。
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CustomerSegmentsDto {
    #[serde(default)]
    pub rural: u64,
    #[serde(default)]
    pub urban: u64,
    #[serde(default)]
    pub metro: u64,
}

/// 故障记录返回结构。
///
/// `kind` 区分 op5 / control_outage，变体外字段按缺省省略。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FaultDto {
    pub fault_id: String,
    pub kind: String,
    pub region_id: String,
    pub district_id: String,
    pub fault_type: String,
    pub status: String,
    pub occurred_at_ms: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restored_at_ms: Option<i64>,
    pub version: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_affected: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fault_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mttr_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affected_population: Option<CustomerSegmentsDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_mw: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_affected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unserved_energy_mwh: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customers_affected: Option<CustomerSegmentsDto>,
}

/// OP5 故障建档请求体。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportOp5FaultRequest {
    pub region_id: String,
    pub district_id: String,
    pub fault_type: String,
    pub occurred_at_ms: i64,
    pub fault_location: String,
    pub affected_population: Option<CustomerSegmentsDto>,
}

/// 负荷停电建档请求体。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportControlOutageRequest {
    pub region_id: String,
    pub district_id: String,
    pub fault_type: String,
    pub occurred_at_ms: i64,
    pub load_mw: f64,
    pub reason: Option<String>,
    pub area_affected: Option<String>,
    pub unserved_energy_mwh: Option<f64>,
    pub customers_affected: Option<CustomerSegmentsDto>,
}

/// 故障编辑请求体（字段级可选补丁）。
///
/// 只允许携带与记录变体一致的字段；两类变体字段混用按
/// 无效请求处理。
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct EditFaultRequest {
    pub fault_type: Option<String>,
    pub occurred_at_ms: Option<i64>,
    pub fault_location: Option<String>,
    pub mttr_hours: Option<f64>,
    pub affected_population: Option<CustomerSegmentsDto>,
    pub load_mw: Option<f64>,
    pub reason: Option<String>,
    pub area_affected: Option<String>,
    pub unserved_energy_mwh: Option<f64>,
    pub customers_affected: Option<CustomerSegmentsDto>,
}

impl EditFaultRequest {
    /// 是否携带 OP5 变体字段。
    pub fn has_op5_fields(&self) -> bool {
        self.fault_location.is_some()
            || self.mttr_hours.is_some()
            || self.affected_population.is_some()
    }

    /// 是否携带负荷停电变体字段。
    pub fn has_control_fields(&self) -> bool {
        self.load_mw.is_some()
            || self.reason.is_some()
            || self.area_affected.is_some()
            || self.unserved_energy_mwh.is_some()
            || self.customers_affected.is_some()
    }
}

/// 权限快照返回结构。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionSnapshotDto {
    pub can_edit: bool,
    pub can_resolve: bool,
    pub can_delete: bool,
}

/// 菜单可见性查询参数。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuVisibilityQuery {
    pub required_role: String,
    pub path: String,
}

/// 菜单可见性返回结构。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuVisibilityDto {
    pub visible: bool,
}

/// Telemetry 指标快照返回结构。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshotDto {
    pub faults_reported: u64,
    pub faults_resolved: u64,
    pub faults_edited: u64,
    pub faults_deleted: u64,
    pub permission_denied: u64,
    pub invalid_patches: u64,
    pub version_conflicts: u64,
}
