//! 演示账户装载
//!
//! 与演示地域数据配套：每个角色一个账户，便于本地联调。
//! 口令统一为 admin123，哈希在启动时生成。

use oms_auth::{hash_password, AuthError};
use oms_storage::UserRecord;

const DEMO_PASSWORD: &str = "admin123";

/// 每个角色一个演示账户。
pub fn demo_users() -> Result<Vec<UserRecord>, AuthError> {
    let accounts = [
        ("user-1", "admin", "system_admin", None, None),
        ("user-2", "global", "global_engineer", None, None),
        (
            "user-3",
            "regional",
            "regional_engineer",
            Some("Accra East Region"),
            None,
        ),
        (
            "user-4",
            "district",
            "district_engineer",
            Some("Accra East Region"),
            Some("Makola"),
        ),
        (
            "user-5",
            "tech",
            "technician",
            Some("Accra East Region"),
            Some("Makola"),
        ),
    ];

    let mut users = Vec::with_capacity(accounts.len());
    for (user_id, username, role, region, district) in accounts {
        users.push(UserRecord {
            user_id: user_id.to_string(),
            username: username.to_string(),
            password_hash: hash_password(DEMO_PASSWORD)?,
            role: role.to_string(),
            region: region.map(str::to_string),
            district: district.map(str::to_string),
            refresh_jti: None,
        });
    }
    Ok(users)
}
