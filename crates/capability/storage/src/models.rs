//! 存储数据模型
//!
//! 故障与地域参照直接复用 `domain` 的记录类型；
//! 这里只定义认证所需的用户记录。

use domain::UserIdentity;

/// 用户记录（含口令哈希与 refresh token 绑定）。
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub user_id: String,
    pub username: String,
    /// argon2 口令哈希。
    pub password_hash: String,
    /// 角色字符串；无法识别的值在转换时按未认证处理。
    pub role: String,
    pub region: Option<String>,
    pub district: Option<String>,
    /// 当前有效 refresh token 的 jti（轮换后旧 token 失效）。
    pub refresh_jti: Option<String>,
}

impl UserRecord {
    /// 转换为权限判定用的身份。
    pub fn to_identity(&self) -> UserIdentity {
        UserIdentity {
            user_id: self.user_id.clone(),
            username: self.username.clone(),
            role: self.role.parse().ok(),
            region: self.region.clone(),
            district: self.district.clone(),
        }
    }
}
