//! 存储接口 Trait 定义
//!
//! 定义所有资源存储的异步接口：
//! - FaultStore：故障记录存储（乐观版本提交）
//! - ReferenceStore：地域参照存储（区域/区列表）
//! - UserStore：用户存储（认证用）
//!
//! 设计原则：
//! - 所有接口返回 StorageError
//! - 使用 async_trait 支持动态分发
//! - 提交冲突是正常结果而非错误，用 CommitOutcome 显式表达

use crate::error::StorageError;
use crate::models::UserRecord;
use async_trait::async_trait;
use domain::{District, FaultRecord, Region};

/// 带版本提交的结果。
///
/// Conflict 表示存储中的版本与调用方读取时不一致，
/// 调用方应重新读取后重试。
#[derive(Debug, Clone, PartialEq)]
pub enum CommitOutcome {
    Committed(FaultRecord),
    Conflict,
    NotFound,
}

/// 故障记录存储接口
#[async_trait]
pub trait FaultStore: Send + Sync {
    /// 列出所有故障记录
    async fn list_faults(&self) -> Result<Vec<FaultRecord>, StorageError>;

    /// 查找指定故障记录
    async fn get_fault(&self, fault_id: &str) -> Result<Option<FaultRecord>, StorageError>;

    /// 插入新故障记录（id 已存在则报错）
    async fn insert_fault(&self, record: FaultRecord) -> Result<FaultRecord, StorageError>;

    /// 按读取版本提交新状态；版本不符返回 Conflict
    async fn commit_fault(
        &self,
        fault_id: &str,
        expected_version: u64,
        record: FaultRecord,
    ) -> Result<CommitOutcome, StorageError>;

    /// 删除故障记录；返回是否确有删除
    async fn remove_fault(&self, fault_id: &str) -> Result<bool, StorageError>;
}

/// 地域参照存储接口
///
/// 引擎只消费区域/区列表做名称解析，不拥有权威数据。
#[async_trait]
pub trait ReferenceStore: Send + Sync {
    /// 列出所有区域
    async fn list_regions(&self) -> Result<Vec<Region>, StorageError>;

    /// 列出所有区
    async fn list_districts(&self) -> Result<Vec<District>, StorageError>;
}

/// 用户存储接口
#[async_trait]
pub trait UserStore: Send + Sync {
    /// 根据用户名查找用户
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, StorageError>;

    /// 读取当前绑定的 refresh jti
    async fn get_refresh_jti(&self, user_id: &str) -> Result<Option<String>, StorageError>;

    /// 绑定/轮换 refresh jti；返回是否更新成功
    async fn set_refresh_jti(
        &self,
        user_id: &str,
        jti: Option<&str>,
    ) -> Result<bool, StorageError>;
}
