//! 故障记录内存存储实现
//!
//! 仅用于本地演示和测试。
//!
//! 功能：
//! - 故障记录 CRUD 操作
//! - 乐观版本提交：写锁内比对版本后整体替换并自增 version，
//!   同一记录上的并发提交最多一个成功

use crate::error::StorageError;
use crate::traits::{CommitOutcome, FaultStore};
use domain::FaultRecord;
use std::collections::HashMap;
use std::sync::RwLock;

/// 故障记录内存存储
///
/// 使用 RwLock + HashMap 提供线程安全的内存存储。
#[derive(Default)]
pub struct InMemoryFaultStore {
    faults: RwLock<HashMap<String, FaultRecord>>,
}

impl InMemoryFaultStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl FaultStore for InMemoryFaultStore {
    /// 列出所有故障记录
    async fn list_faults(&self) -> Result<Vec<FaultRecord>, StorageError> {
        let faults = self
            .faults
            .read()
            .map(|map| map.values().cloned().collect())
            .unwrap_or_default();
        Ok(faults)
    }

    /// 查找指定故障记录
    async fn get_fault(&self, fault_id: &str) -> Result<Option<FaultRecord>, StorageError> {
        Ok(self
            .faults
            .read()
            .ok()
            .and_then(|map| map.get(fault_id).cloned()))
    }

    /// 插入新故障记录
    async fn insert_fault(&self, record: FaultRecord) -> Result<FaultRecord, StorageError> {
        let mut map = self
            .faults
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        if map.contains_key(&record.fault_id) {
            return Err(StorageError::new("fault exists"));
        }
        map.insert(record.fault_id.clone(), record.clone());
        Ok(record)
    }

    /// 按读取版本提交新状态
    async fn commit_fault(
        &self,
        fault_id: &str,
        expected_version: u64,
        record: FaultRecord,
    ) -> Result<CommitOutcome, StorageError> {
        let mut map = self
            .faults
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        let current = match map.get(fault_id) {
            Some(current) => current,
            None => return Ok(CommitOutcome::NotFound),
        };
        if current.version != expected_version {
            return Ok(CommitOutcome::Conflict);
        }
        let mut committed = record;
        committed.fault_id = fault_id.to_string();
        committed.version = expected_version + 1;
        map.insert(fault_id.to_string(), committed.clone());
        Ok(CommitOutcome::Committed(committed))
    }

    /// 删除故障记录
    async fn remove_fault(&self, fault_id: &str) -> Result<bool, StorageError> {
        let mut map = self
            .faults
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        Ok(map.remove(fault_id).is_some())
    }
}
