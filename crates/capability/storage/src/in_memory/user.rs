//! 用户内存存储实现
//!
//! 仅用于本地演示和测试。
//!
//! 功能：
//! - 按用户名查找用户
//! - refresh jti 绑定与轮换
//!
//! 口令哈希由认证能力负责，存储层不做任何口令处理。

use crate::error::StorageError;
use crate::models::UserRecord;
use crate::traits::UserStore;
use std::collections::HashMap;
use std::sync::RwLock;

/// 用户内存存储
///
/// 使用 RwLock + HashMap 提供线程安全的内存存储。
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<String, UserRecord>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 批量装入用户（按用户名索引）。
    pub fn with_users(users: Vec<UserRecord>) -> Self {
        let map = users
            .into_iter()
            .map(|user| (user.username.clone(), user))
            .collect();
        Self {
            users: RwLock::new(map),
        }
    }
}

#[async_trait::async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, StorageError> {
        Ok(self
            .users
            .read()
            .ok()
            .and_then(|map| map.get(username).cloned()))
    }

    async fn get_refresh_jti(&self, user_id: &str) -> Result<Option<String>, StorageError> {
        Ok(self.users.read().ok().and_then(|map| {
            map.values()
                .find(|user| user.user_id == user_id)
                .and_then(|user| user.refresh_jti.clone())
        }))
    }

    async fn set_refresh_jti(
        &self,
        user_id: &str,
        jti: Option<&str>,
    ) -> Result<bool, StorageError> {
        let mut map = self
            .users
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        let user = map.values_mut().find(|user| user.user_id == user_id);
        match user {
            Some(user) => {
                user.refresh_jti = jti.map(|value| value.to_string());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
