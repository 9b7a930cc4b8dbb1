//! 故障生命周期能力：resolve / edit / delete 的唯一合法入口。
//!
//! 状态机：Active --resolve--> Resolved（终态）；
//! Active/Resolved --delete--> 删除（终态）；
//! Active/Resolved --edit--> 状态不变。
//!
//! 每个转换先校验前置条件（权限、状态、不变式），全部通过后
//! 才带版本提交到存储；任何失败都不产生部分效果，并以独立的
//! 原因标签返回给调用方。

use domain::{FaultPatch, FaultRecord, FaultStatus, InvariantViolation, Role, UserIdentity};
use oms_access::{self as access, PermissionSnapshot, ReferenceDirectory};
use oms_storage::{CommitOutcome, FaultStore, ReferenceStore, StorageError};
use oms_telemetry::{
    record_fault_deleted, record_fault_edited, record_fault_resolved, record_invalid_patch,
    record_permission_denied, record_version_conflict,
};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{info, warn};

/// 生命周期转换的失败原因，彼此独立可检视。
#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    /// 权限判定为 false。
    #[error("unauthorized")]
    Unauthorized,
    /// 当前状态下转换不合法（如重复 resolve）。
    #[error("invalid state")]
    InvalidState,
    /// 补丁违反数据模型不变式，整体拒绝。
    #[error("invalid data: {0}")]
    InvalidData(InvariantViolation),
    /// 记录不存在。
    #[error("not found")]
    NotFound,
    /// 存储检测到并发修改，调用方应重读后重试。
    #[error("conflict")]
    Conflict,
    /// 存储层内部错误。
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<StorageError> for LifecycleError {
    fn from(err: StorageError) -> Self {
        LifecycleError::Storage(err.to_string())
    }
}

/// 故障生命周期引擎。
///
/// 引擎本身无可变状态；唯一共享可变资源是外部存储，
/// 通过乐观版本提交保证同一记录上的转换串行化。
pub struct FaultLifecycle {
    faults: Arc<dyn FaultStore>,
    references: Arc<dyn ReferenceStore>,
}

impl FaultLifecycle {
    /// 创建生命周期引擎。
    pub fn new(faults: Arc<dyn FaultStore>, references: Arc<dyn ReferenceStore>) -> Self {
        Self { faults, references }
    }

    /// 评估用户对某条记录的三个管理动作，供调用方决定提供哪些操作。
    pub async fn evaluate_permissions(
        &self,
        user: &UserIdentity,
        fault_id: &str,
    ) -> Result<PermissionSnapshot, LifecycleError> {
        let record = self.get_record(fault_id).await?;
        let dir = self.directory().await?;
        Ok(access::evaluate(user, &record, &dir))
    }

    /// 将记录标记为已恢复：盖恢复时间戳并翻转状态。
    ///
    /// 已恢复的记录返回 InvalidState（resolve 不可重入）；
    /// MTTR 等派生字段由外部报表流程负责，这里只盖时间戳。
    pub async fn resolve(
        &self,
        user: &UserIdentity,
        fault_id: &str,
    ) -> Result<FaultRecord, LifecycleError> {
        let record = self.get_record(fault_id).await?;
        if record.status == FaultStatus::Resolved {
            return Err(LifecycleError::InvalidState);
        }
        let dir = self.directory().await?;
        if !access::can_resolve(user, &record, &dir) {
            record_permission_denied();
            return Err(LifecycleError::Unauthorized);
        }

        let mut next = record.clone();
        next.status = FaultStatus::Resolved;
        next.restored_at_ms = Some(now_ms());
        next.validate().map_err(LifecycleError::InvalidData)?;

        let committed = self.commit(fault_id, record.version, next).await?;
        record_fault_resolved();
        info!(
            fault_id = %committed.fault_id,
            user_id = %user.user_id,
            "fault resolved"
        );
        Ok(committed)
    }

    /// 对记录应用字段级补丁；状态不变，对 active/resolved 均可用。
    ///
    /// 补丁先在副本上整体应用并重校验不变式，违例则整体拒绝。
    pub async fn edit(
        &self,
        user: &UserIdentity,
        fault_id: &str,
        patch: &FaultPatch,
    ) -> Result<FaultRecord, LifecycleError> {
        let record = self.get_record(fault_id).await?;
        let dir = self.directory().await?;
        if !access::can_edit(user, &record, &dir) {
            record_permission_denied();
            return Err(LifecycleError::Unauthorized);
        }

        let next = record.with_patch(patch).map_err(|violation| {
            record_invalid_patch();
            LifecycleError::InvalidData(violation)
        })?;

        let committed = self.commit(fault_id, record.version, next).await?;
        record_fault_edited();
        info!(
            fault_id = %committed.fault_id,
            user_id = %user.user_id,
            "fault edited"
        );
        Ok(committed)
    }

    /// 从权威存储移除记录；移除后任何引擎操作都不再合法。
    pub async fn delete(
        &self,
        user: &UserIdentity,
        fault_id: &str,
    ) -> Result<(), LifecycleError> {
        let record = self.get_record(fault_id).await?;
        let dir = self.directory().await?;
        if !access::can_delete(user, &record, &dir) {
            record_permission_denied();
            return Err(LifecycleError::Unauthorized);
        }
        let removed = self.faults.remove_fault(fault_id).await?;
        if !removed {
            // 读取后被并发删除
            return Err(LifecycleError::NotFound);
        }
        record_fault_deleted();
        info!(fault_id = %fault_id, user_id = %user.user_id, "fault deleted");
        Ok(())
    }

    /// 菜单可见性判定的直通入口（纯函数，无需读存储）。
    pub fn menu_visible(user: &UserIdentity, required_role: Role, current_path: &str) -> bool {
        access::menu_visible(user, required_role, current_path)
    }

    async fn get_record(&self, fault_id: &str) -> Result<FaultRecord, LifecycleError> {
        self.faults
            .get_fault(fault_id)
            .await?
            .ok_or(LifecycleError::NotFound)
    }

    async fn directory(&self) -> Result<ReferenceDirectory, LifecycleError> {
        let regions = self.references.list_regions().await?;
        let districts = self.references.list_districts().await?;
        Ok(ReferenceDirectory::new(&regions, &districts))
    }

    async fn commit(
        &self,
        fault_id: &str,
        expected_version: u64,
        next: FaultRecord,
    ) -> Result<FaultRecord, LifecycleError> {
        match self.faults.commit_fault(fault_id, expected_version, next).await? {
            CommitOutcome::Committed(record) => Ok(record),
            CommitOutcome::Conflict => {
                record_version_conflict();
                warn!(fault_id = %fault_id, "concurrent mutation detected");
                Err(LifecycleError::Conflict)
            }
            CommitOutcome::NotFound => Err(LifecycleError::NotFound),
        }
    }
}

/// 当前时间戳（毫秒）。
fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}
