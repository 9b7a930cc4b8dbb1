//! 追踪、请求 ID 与生命周期计数器。

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{EnvFilter, fmt};

/// 请求级追踪标识。
#[derive(Debug, Clone)]
pub struct RequestIds {
    pub request_id: String,
    pub trace_id: String,
}

/// 基础指标快照。
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsSnapshot {
    pub faults_reported: u64,
    pub faults_resolved: u64,
    pub faults_edited: u64,
    pub faults_deleted: u64,
    pub permission_denied: u64,
    pub invalid_patches: u64,
    pub version_conflicts: u64,
}

/// 基础指标。
pub struct TelemetryMetrics {
    faults_reported: AtomicU64,
    faults_resolved: AtomicU64,
    faults_edited: AtomicU64,
    faults_deleted: AtomicU64,
    permission_denied: AtomicU64,
    invalid_patches: AtomicU64,
    version_conflicts: AtomicU64,
}

impl TelemetryMetrics {
    pub fn new() -> Self {
        Self {
            faults_reported: AtomicU64::new(0),
            faults_resolved: AtomicU64::new(0),
            faults_edited: AtomicU64::new(0),
            faults_deleted: AtomicU64::new(0),
            permission_denied: AtomicU64::new(0),
            invalid_patches: AtomicU64::new(0),
            version_conflicts: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            faults_reported: self.faults_reported.load(Ordering::Relaxed),
            faults_resolved: self.faults_resolved.load(Ordering::Relaxed),
            faults_edited: self.faults_edited.load(Ordering::Relaxed),
            faults_deleted: self.faults_deleted.load(Ordering::Relaxed),
            permission_denied: self.permission_denied.load(Ordering::Relaxed),
            invalid_patches: self.invalid_patches.load(Ordering::Relaxed),
            version_conflicts: self.version_conflicts.load(Ordering::Relaxed),
        }
    }
}

impl Default for TelemetryMetrics {
    fn default() -> Self {
        Self::new()
    }
}

static METRICS: OnceLock<TelemetryMetrics> = OnceLock::new();

/// 获取全局指标实例。
pub fn metrics() -> &'static TelemetryMetrics {
    METRICS.get_or_init(TelemetryMetrics::new)
}

/// 初始化 tracing（默认 info）。
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

/// 生成新的 request_id 与 trace_id。
pub fn new_request_ids() -> RequestIds {
    RequestIds {
        request_id: uuid::Uuid::new_v4().to_string(),
        trace_id: uuid::Uuid::new_v4().to_string(),
    }
}

/// 记录故障建档次数。
pub fn record_fault_reported() {
    metrics().faults_reported.fetch_add(1, Ordering::Relaxed);
}

/// 记录 resolve 成功次数。
pub fn record_fault_resolved() {
    metrics().faults_resolved.fetch_add(1, Ordering::Relaxed);
}

/// 记录 edit 成功次数。
pub fn record_fault_edited() {
    metrics().faults_edited.fetch_add(1, Ordering::Relaxed);
}

/// 记录 delete 成功次数。
pub fn record_fault_deleted() {
    metrics().faults_deleted.fetch_add(1, Ordering::Relaxed);
}

/// 记录权限拒绝次数。
pub fn record_permission_denied() {
    metrics().permission_denied.fetch_add(1, Ordering::Relaxed);
}

/// 记录被整体拒绝的补丁次数。
pub fn record_invalid_patch() {
    metrics().invalid_patches.fetch_add(1, Ordering::Relaxed);
}

/// 记录乐观版本冲突次数。
pub fn record_version_conflict() {
    metrics().version_conflicts.fetch_add(1, Ordering::Relaxed);
}
